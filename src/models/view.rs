use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameters for a view query.
///
/// `keys` selects rows by exact key and is sent in the request body; every
/// other field becomes a query-string parameter.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keys: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_docs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
}

impl ViewParams {
    pub fn descending() -> Self {
        Self {
            descending: Some(true),
            ..Default::default()
        }
    }

    pub fn keys(keys: Vec<Value>) -> Self {
        Self {
            keys: Some(keys),
            ..Default::default()
        }
    }
}

/// Body of a view response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_rows: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    #[serde(default)]
    pub rows: Vec<ViewRow>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub key: Value,
    #[serde(default)]
    pub value: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Value>,
    /// Set instead of `id`/`value` when a requested key has no row, e.g. `"not_found"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
