// CouchDB HTTP client modules

pub mod config;
pub mod connection;

pub use config::CouchDbConfig;
pub use connection::CouchDbClient;
