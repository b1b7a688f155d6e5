// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const DEFAULT_LICENSE: &str = "cc-by-4.0";

const MSG_STRING_TYPE: &str = "Input should be a valid string";
const MSG_STRING_TOO_SHORT: &str = "String should have at least 1 character";
const MSG_LIST_TOO_SHORT: &str = "List should have at least 1 item after validation, not 0";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Creator {
    pub name: String,
}

impl Creator {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadType {
    #[default]
    Dataset,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessRight {
    #[default]
    Open,
    Embargoed,
    Restricted,
    Closed,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Unvalidated input for [`ZenodoMetadata`].
///
/// String fields are kept as raw JSON values since they come straight from
/// the crate's graph and may be absent or of the wrong type.
#[derive(Debug, Clone, Default)]
pub struct ZenodoMetadataDraft {
    pub title: Option<Value>,
    pub upload_type: UploadType,
    pub description: Option<Value>,
    pub creators: Vec<Creator>,
    pub access_right: AccessRight,
    pub license: Option<String>,
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Deposition metadata in the shape expected by the Zenodo deposit API.
///
/// Can only be obtained through validation, so holding a value guarantees that
/// all required fields are present and non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ZenodoMetadata {
    title: String,
    upload_type: UploadType,
    description: String,
    creators: Vec<Creator>,
    access_right: AccessRight,
    license: String,
}

impl ZenodoMetadata {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        creators: Vec<Creator>,
    ) -> Result<Self, ZenodoMetadataValidationError> {
        Self::try_from_draft(ZenodoMetadataDraft {
            title: Some(Value::String(title.into())),
            description: Some(Value::String(description.into())),
            creators,
            ..Default::default()
        })
    }

    pub fn try_from_draft(
        draft: ZenodoMetadataDraft,
    ) -> Result<Self, ZenodoMetadataValidationError> {
        let mut errors = Vec::new();

        let title = validate_string(draft.title, "title", &mut errors);
        let description = validate_string(draft.description, "description", &mut errors);

        if draft.creators.is_empty() {
            errors.push(FieldError::new(
                vec![LocSegment::field("creators")],
                MSG_LIST_TOO_SHORT,
            ));
        }
        for (i, creator) in draft.creators.iter().enumerate() {
            if creator.name.is_empty() {
                errors.push(FieldError::new(
                    vec![
                        LocSegment::field("creators"),
                        LocSegment::Index(i),
                        LocSegment::field("name"),
                    ],
                    MSG_STRING_TOO_SHORT,
                ));
            }
        }

        if !errors.is_empty() {
            return Err(ZenodoMetadataValidationError { errors });
        }

        Ok(Self {
            title: title.unwrap_or_default(),
            upload_type: draft.upload_type,
            description: description.unwrap_or_default(),
            creators: draft.creators,
            access_right: draft.access_right,
            license: draft.license.unwrap_or_else(|| DEFAULT_LICENSE.to_string()),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn upload_type(&self) -> UploadType {
        self.upload_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn creators(&self) -> &[Creator] {
        &self.creators
    }

    pub fn access_right(&self) -> AccessRight {
        self.access_right
    }

    pub fn license(&self) -> &str {
        &self.license
    }
}

fn validate_string(
    value: Option<Value>,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match value {
        Some(Value::String(s)) if !s.is_empty() => Some(s),
        Some(Value::String(_)) => {
            errors.push(FieldError::new(
                vec![LocSegment::field(field)],
                MSG_STRING_TOO_SHORT,
            ));
            None
        }
        _ => {
            errors.push(FieldError::new(vec![LocSegment::field(field)], MSG_STRING_TYPE));
            None
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocSegment {
    Field(String),
    Index(usize),
}

impl LocSegment {
    pub fn field(name: impl Into<String>) -> Self {
        Self::Field(name.into())
    }
}

impl std::fmt::Display for LocSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Field(name) => write!(f, "{name}"),
            Self::Index(i) => write!(f, "{i}"),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A single offending field: where it is and what is wrong with it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub loc: Vec<LocSegment>,
    pub msg: String,
}

impl FieldError {
    pub fn new(loc: Vec<LocSegment>, msg: impl Into<String>) -> Self {
        Self {
            loc,
            msg: msg.into(),
        }
    }

    /// Dot-joined location, e.g. `creators.0.name`
    pub fn location(&self) -> String {
        self.loc
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(".")
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Field {}: {}", self.location(), self.msg)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{} validation error(s) for Zenodo metadata", .errors.len())]
pub struct ZenodoMetadataValidationError {
    pub errors: Vec<FieldError>,
}
