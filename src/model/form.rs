use crate::model::{generate_id, Id};
use serde::{Deserialize, Serialize};

/// A named container grouping field definitions.
/// Names are not unique: several forms may share one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Form {
    pub id: Id,
    pub name: String,
}

impl Form {
    pub fn new(name: String) -> Self {
        Self {
            id: generate_id(),
            name,
        }
    }

    pub fn new_with_id(id: Id, name: String) -> Self {
        Self { id, name }
    }
}

/// Externally defined data column a field is bound to.
/// Only its id matters here; the name is kept for seeding and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub id: Id,
    pub name: Option<String>,
}

impl Column {
    pub fn new_with_id(id: Id, name: Option<String>) -> Self {
        Self { id, name }
    }
}
