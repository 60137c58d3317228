use async_trait::async_trait;

use crate::errors::StoreError;
use crate::models::{
    DatabaseInfo, Document, DocumentResponse, SearchParams, SearchResponse, ViewParams,
    ViewResponse,
};

/// Request/response contract of a document database holding one collection.
///
/// Implementations send exactly one request per call and report the store's
/// answer as-is. They do not retry, merge conflicts, or reorder results.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Queries the full-text index `index` of design document `design`
    async fn search(
        &self,
        design: &str,
        index: &str,
        params: &SearchParams,
    ) -> Result<SearchResponse, StoreError>;

    /// Queries the view `view` of design document `design`
    async fn view(
        &self,
        design: &str,
        view: &str,
        params: &ViewParams,
    ) -> Result<ViewResponse, StoreError>;

    /// Creates a document, or updates it when `_id` and `_rev` are set
    async fn insert(&self, doc: &Document) -> Result<DocumentResponse, StoreError>;

    /// Deletes revision `rev` of document `id`
    async fn destroy(&self, id: &str, rev: &str) -> Result<DocumentResponse, StoreError>;

    async fn info(&self) -> Result<DatabaseInfo, StoreError>;
}
