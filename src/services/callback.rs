//! Bridges between completion callbacks and futures.
//!
//! [`deferred`] turns a call that reports through a callback into a future,
//! and [`complete_with`] goes the other way. [`Promisified`] uses the former to
//! expose any [`CallbackStore`] as an async [`DocumentStore`].

use async_trait::async_trait;
use std::future::Future;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::errors::StoreError;
use crate::models::{
    DatabaseInfo, Document, DocumentResponse, SearchParams, SearchResponse, ViewParams,
    ViewResponse,
};
use crate::services::store::DocumentStore;

/// Completion handed to a callback-style call. A call with several results
/// completes with a tuple.
pub type Callback<T, E> = Box<dyn FnOnce(Result<T, E>) + Send + 'static>;

/// The wrapped call dropped its completion without invoking it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("completion callback was dropped before it was invoked")]
pub struct CompletionDropped;

/// Invokes `call` once with an injected completion and returns a future for
/// the value it completes with.
///
/// An `Err` completion is returned unchanged. The call starts immediately,
/// before the future is first polled.
pub fn deferred<T, E, F>(call: F) -> impl Future<Output = Result<T, E>>
where
    T: Send + 'static,
    E: From<CompletionDropped> + Send + 'static,
    F: FnOnce(Callback<T, E>),
{
    let (tx, rx) = oneshot::channel();
    call(Box::new(move |result| {
        // The receiver is gone only if the caller dropped the future
        let _ = tx.send(result);
    }));

    async move {
        match rx.await {
            Ok(result) => result,
            Err(_) => Err(E::from(CompletionDropped)),
        }
    }
}

/// Drives `future` on the runtime and reports its result to `callback`
pub fn complete_with<T, E, Fut>(future: Fut, callback: Callback<T, E>) -> JoinHandle<()>
where
    T: Send + 'static,
    E: Send + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
{
    tokio::spawn(async move { callback(future.await) })
}

/// A document store client that reports every result through a callback
pub trait CallbackStore: Send + Sync {
    fn search(
        &self,
        design: &str,
        index: &str,
        params: &SearchParams,
        done: Callback<SearchResponse, StoreError>,
    );

    fn view(
        &self,
        design: &str,
        view: &str,
        params: &ViewParams,
        done: Callback<ViewResponse, StoreError>,
    );

    fn insert(&self, doc: &Document, done: Callback<DocumentResponse, StoreError>);

    fn destroy(&self, id: &str, rev: &str, done: Callback<DocumentResponse, StoreError>);

    fn info(&self, done: Callback<DatabaseInfo, StoreError>);
}

/// Async view over a [`CallbackStore`]
#[derive(Debug, Clone)]
pub struct Promisified<S> {
    inner: S,
}

impl<S: CallbackStore> Promisified<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }
}

#[async_trait]
impl<S: CallbackStore> DocumentStore for Promisified<S> {
    async fn search(
        &self,
        design: &str,
        index: &str,
        params: &SearchParams,
    ) -> Result<SearchResponse, StoreError> {
        deferred(|done| self.inner.search(design, index, params, done)).await
    }

    async fn view(
        &self,
        design: &str,
        view: &str,
        params: &ViewParams,
    ) -> Result<ViewResponse, StoreError> {
        deferred(|done| self.inner.view(design, view, params, done)).await
    }

    async fn insert(&self, doc: &Document) -> Result<DocumentResponse, StoreError> {
        deferred(|done| self.inner.insert(doc, done)).await
    }

    async fn destroy(&self, id: &str, rev: &str) -> Result<DocumentResponse, StoreError> {
        deferred(|done| self.inner.destroy(id, rev, done)).await
    }

    async fn info(&self) -> Result<DatabaseInfo, StoreError> {
        deferred(|done| self.inner.info(done)).await
    }
}
