// Memo database operations organized into focused modules

mod collation;
mod crud;
mod search;

pub use collation::compare_descending;
pub use search::extract_sort_keys;

/// Design document holding the full-text index
pub const SEARCH_DESIGN: &str = "memos";
/// Full-text index queried by search
pub const SEARCH_INDEX: &str = "searchText";
/// Design document of the view that search resolves keys against
pub const LOOKUP_DESIGN: &str = "memos";
/// Design document of the view used to list memos
pub const LIST_DESIGN: &str = "memo";
pub const LIST_VIEW: &str = "list";
/// Index field group holding each memo's sort key
pub const DEFAULT_FIELD: &str = "default";
