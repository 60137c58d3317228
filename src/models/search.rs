use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameters for a full-text index query. Set fields are sent as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    /// Lucene query string
    pub q: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_docs: Option<bool>,
}

impl SearchParams {
    pub fn query<S: Into<String>>(q: S) -> Self {
        Self {
            q: q.into(),
            ..Default::default()
        }
    }
}

/// Body of a search index response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<String>,
    #[serde(default)]
    pub rows: Vec<SearchRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchRow {
    #[serde(default)]
    pub id: String,
    /// Relevance score and sort values as ranked by the index
    #[serde(default)]
    pub order: Value,
    /// Indexed field values, keyed by index field name
    #[serde(default)]
    pub fields: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<Value>,
}
