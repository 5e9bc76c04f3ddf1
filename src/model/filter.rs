use crate::model::Id;
use serde::{Deserialize, Serialize};

/// Exact-match predicates a field lookup can use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldFilter {
    /// Fields whose `type` attribute equals the value
    Type(String),
    /// Fields owned by the form with this id
    FormId(Id),
}

impl FieldFilter {
    pub fn matches(&self, field: &crate::model::Field) -> bool {
        match self {
            FieldFilter::Type(field_type) => {
                field.attributes.field_type.as_deref() == Some(field_type.as_str())
            }
            FieldFilter::FormId(form_id) => &field.form_id == form_id,
        }
    }
}
