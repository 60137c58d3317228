use axum::Router;
use serde_json::{json, Value};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::{
    build_router,
    config::Config,
    db::MemoRepository,
    errors::StoreError,
    models::{
        DatabaseInfo, Document, DocumentResponse, SearchParams, SearchResponse, ViewParams,
        ViewResponse,
    },
    services::{Callback, CallbackStore, Promisified},
    AppState,
};

/// A call received by [`RecordingStore`]
#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    Search { design: String, index: String, params: SearchParams },
    View { design: String, view: String, params: ViewParams },
    Insert { doc: Document },
    Destroy { id: String, rev: String },
    Info,
}

#[derive(Default)]
struct RecordingState {
    calls: Vec<StoreCall>,
    search: VecDeque<Result<SearchResponse, StoreError>>,
    view: VecDeque<Result<ViewResponse, StoreError>>,
    insert: VecDeque<Result<DocumentResponse, StoreError>>,
    destroy: VecDeque<Result<DocumentResponse, StoreError>>,
    info: VecDeque<Result<DatabaseInfo, StoreError>>,
}

/// Callback-style store double. Records every call and answers with scripted
/// results, in order, from a spawned task. A call with nothing scripted fails
/// with `StoreError::MalformedResponse`.
#[derive(Clone, Default)]
pub struct RecordingStore {
    state: Arc<Mutex<RecordingState>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(self, result: Result<SearchResponse, StoreError>) -> Self {
        self.state.lock().unwrap().search.push_back(result);
        self
    }

    pub fn with_view(self, result: Result<ViewResponse, StoreError>) -> Self {
        self.state.lock().unwrap().view.push_back(result);
        self
    }

    pub fn with_insert(self, result: Result<DocumentResponse, StoreError>) -> Self {
        self.state.lock().unwrap().insert.push_back(result);
        self
    }

    pub fn with_destroy(self, result: Result<DocumentResponse, StoreError>) -> Self {
        self.state.lock().unwrap().destroy.push_back(result);
        self
    }

    pub fn with_info(self, result: Result<DatabaseInfo, StoreError>) -> Self {
        self.state.lock().unwrap().info.push_back(result);
        self
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Repository backed by this store; the store keeps recording through it
    pub fn repository(&self) -> MemoRepository {
        MemoRepository::new(Arc::new(Promisified::new(self.clone())))
    }

    fn answer<T: Send + 'static>(
        next: Option<Result<T, StoreError>>,
        what: &str,
        done: Callback<T, StoreError>,
    ) {
        let result = next.unwrap_or_else(|| Err(StoreError::malformed(format!("no scripted {} response", what))));
        tokio::spawn(async move { done(result) });
    }
}

impl CallbackStore for RecordingStore {
    fn search(
        &self,
        design: &str,
        index: &str,
        params: &SearchParams,
        done: Callback<SearchResponse, StoreError>,
    ) {
        let next = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(StoreCall::Search {
                design: design.to_string(),
                index: index.to_string(),
                params: params.clone(),
            });
            state.search.pop_front()
        };
        Self::answer(next, "search", done);
    }

    fn view(
        &self,
        design: &str,
        view: &str,
        params: &ViewParams,
        done: Callback<ViewResponse, StoreError>,
    ) {
        let next = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(StoreCall::View {
                design: design.to_string(),
                view: view.to_string(),
                params: params.clone(),
            });
            state.view.pop_front()
        };
        Self::answer(next, "view", done);
    }

    fn insert(&self, doc: &Document, done: Callback<DocumentResponse, StoreError>) {
        let next = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(StoreCall::Insert { doc: doc.clone() });
            state.insert.pop_front()
        };
        Self::answer(next, "insert", done);
    }

    fn destroy(&self, id: &str, rev: &str, done: Callback<DocumentResponse, StoreError>) {
        let next = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(StoreCall::Destroy {
                id: id.to_string(),
                rev: rev.to_string(),
            });
            state.destroy.pop_front()
        };
        Self::answer(next, "destroy", done);
    }

    fn info(&self, done: Callback<DatabaseInfo, StoreError>) {
        let next = {
            let mut state = self.state.lock().unwrap();
            state.calls.push(StoreCall::Info);
            state.info.pop_front()
        };
        Self::answer(next, "info", done);
    }
}

/// Search response whose rows carry `keys` as their `default` field
pub fn search_response_with_keys(keys: &[&str]) -> SearchResponse {
    let rows: Vec<Value> = keys
        .iter()
        .enumerate()
        .map(|(i, key)| {
            json!({
                "id": format!("memo-{}", key),
                "order": [1.0 / (i as f64 + 1.0), i],
                "fields": {"default": [key, "memo text"]}
            })
        })
        .collect();

    serde_json::from_value(json!({
        "total_rows": keys.len(),
        "bookmark": "g1AAAA",
        "rows": rows
    }))
    .unwrap()
}

/// View response with one row per key, in the given order
pub fn view_response_with_keys(keys: &[&str]) -> ViewResponse {
    let rows: Vec<Value> = keys
        .iter()
        .map(|key| {
            json!({
                "id": format!("memo-{}", key),
                "key": key,
                "value": {"_id": format!("memo-{}", key), "_rev": "1-abc", "date": key}
            })
        })
        .collect();

    serde_json::from_value(json!({
        "total_rows": keys.len(),
        "offset": 0,
        "rows": rows
    }))
    .unwrap()
}

pub fn test_config() -> Config {
    Config {
        couchdb_url: "http://localhost:5984".to_string(),
        couchdb_username: None,
        couchdb_password: None,
        memo_db_name: "memo".to_string(),
        server_address: "127.0.0.1:0".to_string(),
        request_timeout_seconds: 5,
    }
}

/// HTTP API over a recording store
pub fn create_test_app(store: &RecordingStore) -> Router {
    let state = Arc::new(AppState {
        memos: store.repository(),
        config: test_config(),
    });
    build_router(state)
}
