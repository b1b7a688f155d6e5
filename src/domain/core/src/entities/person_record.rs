// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use serde_json::{Map, Value};

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Properties of a person entity as found in the crate's `@graph`, or inline
/// in the `author` property.
///
/// Only `name` is used by the mapping, but the full property set is kept so
/// that error messages can refer to the person by `@id`.
#[derive(Debug, Clone, PartialEq)]
pub struct PersonRecord {
    properties: Map<String, Value>,
}

impl PersonRecord {
    pub fn new(properties: Map<String, Value>) -> Self {
        Self { properties }
    }

    /// A record that only carries an identifier, used for references that
    /// could not be resolved against the graph
    pub fn from_reference(id: impl Into<String>) -> Self {
        let mut properties = Map::new();
        properties.insert("@id".to_string(), Value::String(id.into()));
        Self { properties }
    }

    pub fn with_name(name: impl Into<String>) -> Self {
        let mut properties = Map::new();
        properties.insert("name".to_string(), Value::String(name.into()));
        Self { properties }
    }

    pub fn id(&self) -> Option<&str> {
        self.properties.get("@id").and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&Value> {
        self.properties.get("name")
    }

    pub fn get(&self, property: &str) -> Option<&Value> {
        self.properties.get(property)
    }

    pub fn properties(&self) -> &Map<String, Value> {
        &self.properties
    }
}

impl From<Map<String, Value>> for PersonRecord {
    fn from(properties: Map<String, Value>) -> Self {
        Self::new(properties)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////

/// Value of the root dataset's `author` property.
///
/// JSON-LD allows a property to hold either one value or an array of values,
/// both shapes are preserved here.
#[derive(Debug, Clone, PartialEq)]
pub enum AuthorProperty {
    Single(PersonRecord),
    Sequence(Vec<PersonRecord>),
}

impl AuthorProperty {
    pub fn len(&self) -> usize {
        match self {
            Self::Single(_) => 1,
            Self::Sequence(records) => records.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn records(&self) -> Vec<&PersonRecord> {
        match self {
            Self::Single(record) => vec![record],
            Self::Sequence(records) => records.iter().collect(),
        }
    }

    pub fn into_records(self) -> Vec<PersonRecord> {
        match self {
            Self::Single(record) => vec![record],
            Self::Sequence(records) => records,
        }
    }
}

impl Default for AuthorProperty {
    fn default() -> Self {
        Self::Sequence(Vec::new())
    }
}
