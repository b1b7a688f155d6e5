// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::Value;
use thiserror::Error;

use crate::*;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const METADATA_CONVERSION_PREAMBLE: &str = "The RO-Crate metadata could not be converted to \
                                                Zenodo metadata. Encountered the following \
                                                errors:\n";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Maps the crate's author(s) to Zenodo creators, one per person, preserving
/// order
pub fn build_zenodo_creator_list(
    authors: &AuthorProperty,
) -> Result<Vec<Creator>, PersonRecordError> {
    authors
        .records()
        .into_iter()
        .map(|person| match person.name() {
            Some(Value::String(name)) => Ok(Creator::new(name.clone())),
            Some(_) => Err(PersonRecordError::NameNotAString {
                person_id: person.id().map(ToString::to_string),
            }),
            None => Err(PersonRecordError::MissingName {
                person_id: person.id().map(ToString::to_string),
            }),
        })
        .collect()
}

/// Collects the metadata to use for a Zenodo upload from the crate's root
/// dataset
#[tracing::instrument(level = "debug", skip_all, fields(source = %ro_crate.source().path().display()))]
pub fn build_zenodo_metadata_from_crate(
    ro_crate: &RoCrate,
) -> Result<ZenodoMetadata, BuildZenodoMetadataError> {
    let root = ro_crate.root_dataset();

    let authors = ro_crate.root_author().unwrap_or_default();
    let creators = build_zenodo_creator_list(&authors)?;

    let draft = ZenodoMetadataDraft {
        title: root.get("name").cloned(),
        upload_type: UploadType::Dataset,
        description: root.get("description").cloned(),
        creators,
        ..Default::default()
    };

    let metadata = ZenodoMetadata::try_from_draft(draft).map_err(|e| {
        tracing::debug!(errors = ?e.errors, "Crate metadata failed validation");
        MetadataConversionError::from(e)
    })?;

    Ok(metadata)
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PersonRecordError {
    #[error("Person record{} has no 'name' property", fmt_person_id(.person_id.as_deref()))]
    MissingName { person_id: Option<String> },

    #[error("Person record{} has a 'name' property that is not a string", fmt_person_id(.person_id.as_deref()))]
    NameNotAString { person_id: Option<String> },
}

fn fmt_person_id(person_id: Option<&str>) -> String {
    match person_id {
        Some(id) => format!(" '{id}'"),
        None => String::new(),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Validation failure rendered for humans.
///
/// `Display` produces the fixed preamble followed by one
/// `Field <location>: <message>` line per error. The individual errors remain
/// accessible via [`MetadataConversionError::errors`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataConversionError {
    errors: Vec<FieldError>,
}

impl std::error::Error for MetadataConversionError {}

impl std::fmt::Display for MetadataConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl MetadataConversionError {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn message(&self) -> String {
        let mut msg = String::from(METADATA_CONVERSION_PREAMBLE);
        for e in &self.errors {
            msg.push_str(&e.to_string());
            msg.push('\n');
        }
        msg
    }
}

impl From<ZenodoMetadataValidationError> for MetadataConversionError {
    fn from(value: ZenodoMetadataValidationError) -> Self {
        Self::new(value.errors)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildZenodoMetadataError {
    #[error(transparent)]
    PersonRecord(#[from] PersonRecordError),

    #[error(transparent)]
    Conversion(#[from] MetadataConversionError),
}
