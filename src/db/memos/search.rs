use serde_json::Value;
use tracing::debug;

use super::collation::compare_descending;
use super::{DEFAULT_FIELD, LIST_VIEW, LOOKUP_DESIGN, SEARCH_DESIGN, SEARCH_INDEX};
use crate::db::MemoRepository;
use crate::errors::StoreError;
use crate::models::{SearchParams, SearchRow, ViewParams, ViewResponse};

impl MemoRepository {
    /// Full-text search over memos, newest key first.
    ///
    /// The index ranks by relevance, so matches are re-fetched from the list
    /// view by their sort keys in descending order. The view answers multi-key
    /// queries in request order; its response is returned as-is.
    pub async fn search(&self, q: &str) -> Result<ViewResponse, StoreError> {
        let matches = self
            .store()
            .search(SEARCH_DESIGN, SEARCH_INDEX, &SearchParams::query(q))
            .await?;

        let mut keys = extract_sort_keys(&matches.rows)?;
        keys.sort_by(compare_descending);
        debug!("Search '{}' matched {} memos", q, keys.len());

        self.store()
            .view(LOOKUP_DESIGN, LIST_VIEW, &ViewParams::keys(keys))
            .await
    }
}

/// Takes the first value of each row's `default` field group.
///
/// A field indexed once comes back as a bare value rather than an array and is
/// used as-is.
pub fn extract_sort_keys(rows: &[SearchRow]) -> Result<Vec<Value>, StoreError> {
    rows.iter()
        .map(|row| match row.fields.get(DEFAULT_FIELD) {
            Some(Value::Array(values)) => values.first().cloned().ok_or_else(|| {
                StoreError::malformed(format!("search row '{}' has an empty '{}' field", row.id, DEFAULT_FIELD))
            }),
            Some(Value::Null) | None => Err(StoreError::malformed(format!(
                "search row '{}' has no '{}' field",
                row.id, DEFAULT_FIELD
            ))),
            Some(value) => Ok(value.clone()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(id: &str, fields: Value) -> SearchRow {
        serde_json::from_value(json!({"id": id, "order": [1.0, 0], "fields": fields})).unwrap()
    }

    #[test]
    fn test_extracts_first_default_value() {
        let rows = vec![
            row("a", json!({"default": ["2024-02-01", "shopping list"]})),
            row("b", json!({"default": ["2024-01-01"]})),
        ];
        assert_eq!(
            extract_sort_keys(&rows).unwrap(),
            vec![json!("2024-02-01"), json!("2024-01-01")]
        );
    }

    #[test]
    fn test_scalar_default_is_used_as_is() {
        let rows = vec![row("a", json!({"default": "2024-02-01"}))];
        assert_eq!(extract_sort_keys(&rows).unwrap(), vec![json!("2024-02-01")]);
    }

    #[test]
    fn test_missing_default_is_malformed() {
        let rows = vec![row("a", json!({"default": ["k"]})), row("b", json!({"title": "x"}))];
        let err = extract_sort_keys(&rows).unwrap_err();
        assert!(matches!(err, StoreError::MalformedResponse { ref details } if details.contains("'b'")));

        let rows = vec![row("c", json!({"default": []}))];
        assert!(matches!(
            extract_sort_keys(&rows),
            Err(StoreError::MalformedResponse { .. })
        ));
    }

    #[test]
    fn test_no_rows_yields_no_keys() {
        assert!(extract_sort_keys(&[]).unwrap().is_empty());
    }
}
