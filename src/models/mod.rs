// Wire types exchanged with the document store

pub mod document;
pub mod search;
pub mod view;

// Re-export commonly used types
pub use document::*;
pub use search::*;
pub use view::*;
