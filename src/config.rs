use anyhow::Result;
use std::env;

use crate::services::couchdb::CouchDbConfig;

#[derive(Clone, Debug)]
pub struct Config {
    pub couchdb_url: String,
    pub couchdb_username: Option<String>,
    pub couchdb_password: Option<String>,
    pub memo_db_name: String,
    pub server_address: String,
    pub request_timeout_seconds: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        Ok(Config {
            couchdb_url: env::var("COUCHDB_URL")
                .unwrap_or_else(|_| "http://localhost:5984".to_string()),
            couchdb_username: env::var("COUCHDB_USERNAME")
                .ok()
                .filter(|s| !s.is_empty()),
            couchdb_password: env::var("COUCHDB_PASSWORD")
                .ok()
                .filter(|s| !s.is_empty()),
            memo_db_name: env::var("MEMO_DB_NAME")
                .unwrap_or_else(|_| "memo".to_string()),
            server_address: env::var("SERVER_ADDRESS")
                .unwrap_or_else(|_| "0.0.0.0:8000".to_string()),
            request_timeout_seconds: env::var("REQUEST_TIMEOUT_SECONDS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(30),
        })
    }

    /// Connection settings for the memo database
    pub fn couchdb(&self) -> CouchDbConfig {
        CouchDbConfig {
            server_url: self.couchdb_url.clone(),
            username: self.couchdb_username.clone(),
            password: self.couchdb_password.clone(),
            database: self.memo_db_name.clone(),
            timeout_seconds: self.request_timeout_seconds,
        }
    }
}
