use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A memo as stored in the database.
///
/// The store owns the shape of a memo, so it stays untyped here. Only `_id`
/// and `_rev` have a meaning to the store itself.
pub type Document = Value;

/// Body returned by the store for insert and destroy requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentResponse {
    #[serde(default)]
    pub ok: bool,
    pub id: String,
    pub rev: String,
}

impl DocumentResponse {
    pub fn new<I: Into<String>, R: Into<String>>(id: I, rev: R) -> Self {
        Self {
            ok: true,
            id: id.into(),
            rev: rev.into(),
        }
    }
}

/// Database metadata returned by `GET /{db}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatabaseInfo {
    pub db_name: String,
    #[serde(default)]
    pub doc_count: Option<u64>,
    #[serde(default)]
    pub doc_del_count: Option<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Error body the store sends with non-2xx responses, e.g.
/// `{"error": "conflict", "reason": "Document update conflict."}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreErrorBody {
    #[serde(default)]
    pub error: String,
    #[serde(default)]
    pub reason: String,
}
