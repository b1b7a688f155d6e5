// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use crate::{AuthorProperty, PersonRecord};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

pub const METADATA_FILE_NAME: &str = "ro-crate-metadata.json";

/// Metadata file name used by RO-Crate 1.0
pub const LEGACY_METADATA_FILE_NAME: &str = "ro-crate-metadata.jsonld";

const DEFAULT_ROOT_ID: &str = "./";

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CrateSource {
    Directory(PathBuf),
    ZipArchive(PathBuf),
}

impl CrateSource {
    pub fn path(&self) -> &Path {
        match self {
            Self::Directory(path) | Self::ZipArchive(path) => path,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// A single node of the crate's JSON-LD `@graph`
#[derive(Debug, Clone, PartialEq)]
pub struct CrateEntity {
    properties: Map<String, Value>,
}

impl CrateEntity {
    pub fn new(properties: Map<String, Value>) -> Self {
        Self { properties }
    }

    pub fn id(&self) -> Option<&str> {
        self.properties.get("@id").and_then(Value::as_str)
    }

    pub fn get(&self, property: &str) -> Option<&Value> {
        self.properties.get(property)
    }

    pub fn get_str(&self, property: &str) -> Option<&str> {
        self.get(property).and_then(Value::as_str)
    }

    pub fn has_type(&self, type_name: &str) -> bool {
        match self.properties.get("@type") {
            Some(Value::String(t)) => t == type_name,
            Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(type_name)),
            _ => false,
        }
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// In-memory representation of an RO-Crate: its metadata graph and where the
/// crate's files live
#[derive(Debug, Clone)]
pub struct RoCrate {
    source: CrateSource,
    entities: Vec<CrateEntity>,
    root_index: usize,
}

impl RoCrate {
    /// Builds the crate from a parsed `ro-crate-metadata.json` document.
    ///
    /// The root data entity is located through the metadata descriptor's
    /// `about` reference, falling back to `./` when the descriptor is absent.
    pub fn from_metadata_document(
        source: CrateSource,
        document: Value,
    ) -> Result<Self, InvalidCrateMetadataError> {
        let Value::Object(mut document) = document else {
            return Err(InvalidCrateMetadataError::NotAnObject);
        };

        let Some(Value::Array(graph)) = document.remove("@graph") else {
            return Err(InvalidCrateMetadataError::MissingGraph);
        };

        let mut entities = Vec::with_capacity(graph.len());
        for (index, node) in graph.into_iter().enumerate() {
            match node {
                Value::Object(properties) => entities.push(CrateEntity::new(properties)),
                _ => return Err(InvalidCrateMetadataError::MalformedEntity { index }),
            }
        }

        let root_id = entities
            .iter()
            .find(|e| matches!(e.id(), Some(METADATA_FILE_NAME | LEGACY_METADATA_FILE_NAME)))
            .and_then(|descriptor| descriptor.get("about"))
            .and_then(reference_id)
            .unwrap_or(DEFAULT_ROOT_ID)
            .to_string();

        let Some(root_index) = entities.iter().position(|e| e.id() == Some(root_id.as_str())) else {
            return Err(InvalidCrateMetadataError::RootNotFound { root_id });
        };

        Ok(Self {
            source,
            entities,
            root_index,
        })
    }

    pub fn source(&self) -> &CrateSource {
        &self.source
    }

    pub fn entities(&self) -> &[CrateEntity] {
        &self.entities
    }

    pub fn root_dataset(&self) -> &CrateEntity {
        &self.entities[self.root_index]
    }

    pub fn get_entity(&self, id: &str) -> Option<&CrateEntity> {
        self.entities.iter().find(|e| e.id() == Some(id))
    }

    /// Returns the root dataset's `author` property with references resolved
    /// against the graph. `None` if the property is absent or `null`.
    pub fn root_author(&self) -> Option<AuthorProperty> {
        match self.root_dataset().get("author")? {
            Value::Null => None,
            Value::Array(values) => Some(AuthorProperty::Sequence(
                values.iter().map(|v| self.resolve_person(v)).collect(),
            )),
            value => Some(AuthorProperty::Single(self.resolve_person(value))),
        }
    }

    /// Identifiers of the data entities the root dataset declares via
    /// `hasPart`
    pub fn has_part(&self) -> Vec<&str> {
        match self.root_dataset().get("hasPart") {
            Some(Value::Array(values)) => values.iter().filter_map(reference_id).collect(),
            Some(value) => reference_id(value).into_iter().collect(),
            None => Vec::new(),
        }
    }

    fn resolve_person(&self, value: &Value) -> PersonRecord {
        match value {
            Value::Object(properties) => match properties.get("@id").and_then(Value::as_str) {
                Some(id) => match self.get_entity(id) {
                    Some(entity) => PersonRecord::new(entity.properties().clone()),
                    None => PersonRecord::new(properties.clone()),
                },
                None => PersonRecord::new(properties.clone()),
            },
            Value::String(id) => match self.get_entity(id) {
                Some(entity) => PersonRecord::new(entity.properties().clone()),
                None => PersonRecord::from_reference(id.clone()),
            },
            _ => PersonRecord::new(Map::new()),
        }
    }
}

fn reference_id(value: &Value) -> Option<&str> {
    match value {
        Value::Object(properties) => properties.get("@id").and_then(Value::as_str),
        Value::String(id) => Some(id),
        _ => None,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
// Errors
////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidCrateMetadataError {
    #[error("Metadata document is not a JSON object")]
    NotAnObject,

    #[error("Metadata document has no @graph array")]
    MissingGraph,

    #[error("Entity at position {index} of @graph is not a JSON object")]
    MalformedEntity { index: usize },

    #[error("Root data entity '{root_id}' is not present in @graph")]
    RootNotFound { root_id: String },
}
