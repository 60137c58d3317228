use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info, warn};

use super::config::CouchDbConfig;
use crate::errors::StoreError;
use crate::models::{
    DatabaseInfo, Document, DocumentResponse, SearchParams, SearchResponse, StoreErrorBody,
    ViewParams, ViewResponse,
};
use crate::services::store::DocumentStore;

/// Handle to one database on a CouchDB-compatible server
#[derive(Debug, Clone)]
pub struct CouchDbClient {
    client: Client,
    config: CouchDbConfig,
}

/// Query-string part of a view request. `keys` travels in the body.
#[derive(Debug, Serialize)]
struct ViewQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    descending: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    include_docs: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    skip: Option<u32>,
}

impl From<&ViewParams> for ViewQuery {
    fn from(params: &ViewParams) -> Self {
        Self {
            descending: params.descending,
            include_docs: params.include_docs,
            limit: params.limit,
            skip: params.skip,
        }
    }
}

impl CouchDbClient {
    pub fn new(config: CouchDbConfig) -> Result<Self> {
        // Validate configuration first
        config.validate()?;
        let client = Client::builder()
            .timeout(config.timeout())
            .build()?;

        info!("Using memo database '{}' at {}", config.database, config.server_url);

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &CouchDbConfig {
        &self.config
    }

    /// URL of a document, e.g. `{db}/memo-1`
    pub fn document_url(&self, id: &str) -> String {
        format!("{}/{}", self.config.database_url(), urlencoding::encode(id))
    }

    /// URL of a design document resource, e.g. `{db}/_design/memo/_view/list`
    pub fn design_url(&self, design: &str, kind: &str, name: &str) -> String {
        format!(
            "{}/_design/{}/{}/{}",
            self.config.database_url(),
            urlencoding::encode(design),
            kind,
            urlencoding::encode(name)
        )
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let request = self.client.request(method, url);
        match self.config.username {
            Some(ref username) => request.basic_auth(username, self.config.password.as_ref()),
            None => request,
        }
    }

    /// Sends the request and decodes a 2xx body as `T`; anything else becomes a `StoreError`
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, StoreError> {
        let response = request.send().await?;
        let status = response.status();

        if status.is_success() {
            return response
                .json::<T>()
                .await
                .map_err(|e| StoreError::malformed(e.to_string()));
        }

        let body = response.json::<StoreErrorBody>().await.unwrap_or_default();
        warn!(
            "Document store answered {}: {} ({})",
            status, body.error, body.reason
        );
        Err(StoreError::from_response(status.as_u16(), body))
    }
}

#[async_trait]
impl DocumentStore for CouchDbClient {
    async fn search(
        &self,
        design: &str,
        index: &str,
        params: &SearchParams,
    ) -> Result<SearchResponse, StoreError> {
        let url = self.design_url(design, "_search", index);
        debug!("GET {} q={}", url, params.q);

        self.send(self.request(Method::GET, &url).query(params)).await
    }

    async fn view(
        &self,
        design: &str,
        view: &str,
        params: &ViewParams,
    ) -> Result<ViewResponse, StoreError> {
        let url = self.design_url(design, "_view", view);
        let query = ViewQuery::from(params);

        let request = match params.keys {
            Some(ref keys) => {
                debug!("POST {} with {} keys", url, keys.len());
                self.request(Method::POST, &url)
                    .query(&query)
                    .json(&json!({ "keys": keys }))
            }
            None => {
                debug!("GET {}", url);
                self.request(Method::GET, &url).query(&query)
            }
        };

        self.send(request).await
    }

    async fn insert(&self, doc: &Document) -> Result<DocumentResponse, StoreError> {
        let url = self.config.database_url();
        debug!("POST {}", url);

        self.send(self.request(Method::POST, &url).json(doc)).await
    }

    async fn destroy(&self, id: &str, rev: &str) -> Result<DocumentResponse, StoreError> {
        let url = self.document_url(id);
        debug!("DELETE {} rev={}", url, rev);

        self.send(self.request(Method::DELETE, &url).query(&[("rev", rev)]))
            .await
    }

    async fn info(&self) -> Result<DatabaseInfo, StoreError> {
        let url = self.config.database_url();
        self.send(self.request(Method::GET, &url)).await
    }
}
