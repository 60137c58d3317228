use std::sync::Arc;

use crate::errors::StoreError;
use crate::models::DatabaseInfo;
use crate::services::DocumentStore;

pub mod memos;

/// Memo operations over an injected document store
#[derive(Clone)]
pub struct MemoRepository {
    store: Arc<dyn DocumentStore>,
}

impl MemoRepository {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Checks that the memo database answers
    pub async fn health_check(&self) -> Result<DatabaseInfo, StoreError> {
        self.store.info().await
    }
}
