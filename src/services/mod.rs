pub mod callback;
pub mod couchdb;
pub mod store;

pub use callback::{complete_with, deferred, Callback, CallbackStore, CompletionDropped, Promisified};
pub use couchdb::{CouchDbClient, CouchDbConfig};
pub use store::DocumentStore;
