use tokio::task::JoinHandle;
use tracing::debug;

use super::{LIST_DESIGN, LIST_VIEW};
use crate::db::MemoRepository;
use crate::errors::StoreError;
use crate::models::{Document, DocumentResponse, ViewParams, ViewResponse};
use crate::services::{complete_with, Callback};

impl MemoRepository {
    /// All memos from the list view, in descending key order
    pub async fn list(&self) -> Result<ViewResponse, StoreError> {
        self.store()
            .view(LIST_DESIGN, LIST_VIEW, &ViewParams::descending())
            .await
    }

    /// Creates a memo, or updates it when the document carries `_id` and `_rev`.
    /// A stale `_rev` fails with `StoreError::Conflict`.
    pub async fn save(&self, doc: &Document) -> Result<DocumentResponse, StoreError> {
        let saved = self.store().insert(doc).await?;
        debug!("Saved memo {} at revision {}", saved.id, saved.rev);
        Ok(saved)
    }

    pub async fn remove(&self, id: &str, rev: &str) -> Result<DocumentResponse, StoreError> {
        let removed = self.store().destroy(id, rev).await?;
        debug!("Removed memo {} (revision {})", removed.id, removed.rev);
        Ok(removed)
    }

    /// Callback form of [`MemoRepository::save`]. `callback` receives the store's result unchanged.
    pub fn save_with_callback(
        &self,
        doc: Document,
        callback: Callback<DocumentResponse, StoreError>,
    ) -> JoinHandle<()> {
        let repo = self.clone();
        complete_with(async move { repo.save(&doc).await }, callback)
    }

    /// Callback form of [`MemoRepository::remove`]
    pub fn remove_with_callback(
        &self,
        id: String,
        rev: String,
        callback: Callback<DocumentResponse, StoreError>,
    ) -> JoinHandle<()> {
        let repo = self.clone();
        complete_with(async move { repo.remove(&id, &rev).await }, callback)
    }
}
