use memos::db::MemoRepository;
use memos::errors::StoreError;
use memos::models::{SearchParams, ViewParams};
use memos::services::{CouchDbClient, CouchDbConfig, DocumentStore};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{basic_auth, body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_test_client(server_url: &str) -> CouchDbClient {
    let config = CouchDbConfig::new(server_url.to_string(), "memo".to_string());
    CouchDbClient::new(config).expect("Failed to create CouchDB client")
}

fn view_body(keys: &[&str]) -> serde_json::Value {
    json!({
        "total_rows": 10,
        "offset": 0,
        "rows": keys.iter().map(|k| json!({
            "id": format!("memo-{}", k),
            "key": k,
            "value": {"date": k}
        })).collect::<Vec<_>>()
    })
}

#[tokio::test]
async fn test_search_queries_text_index() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/memo/_design/memos/_search/searchText"))
        .and(query_param("q", "milk AND eggs"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_rows": 1,
            "bookmark": "g1AAAA",
            "rows": [{"id": "memo-1", "order": [0.9, 0], "fields": {"default": ["2024-01-01"]}}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let response = client
        .search("memos", "searchText", &SearchParams::query("milk AND eggs"))
        .await
        .expect("search failed");

    assert_eq!(response.total_rows, 1);
    assert_eq!(response.bookmark.as_deref(), Some("g1AAAA"));
    assert_eq!(response.rows[0].fields["default"], json!(["2024-01-01"]));
}

#[tokio::test]
async fn test_view_with_keys_posts_them_in_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/memo/_design/memos/_view/list"))
        .and(body_json(json!({"keys": ["k2", "k1"]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(view_body(&["k2", "k1"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let response = client
        .view("memos", "list", &ViewParams::keys(vec![json!("k2"), json!("k1")]))
        .await
        .expect("view failed");

    let keys: Vec<_> = response.rows.iter().map(|r| r.key.clone()).collect();
    assert_eq!(keys, vec![json!("k2"), json!("k1")]);
}

#[tokio::test]
async fn test_descending_view_uses_query_string() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/memo/_design/memo/_view/list"))
        .and(query_param("descending", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(view_body(&["b", "a"])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let response = client
        .view("memo", "list", &ViewParams::descending())
        .await
        .expect("view failed");

    assert_eq!(response.total_rows, Some(10));
    assert_eq!(response.rows.len(), 2);
}

#[tokio::test]
async fn test_insert_posts_document() {
    let mock_server = MockServer::start().await;
    let memo = json!({"_id": "memo-1", "date": "2024-01-01", "text": "buy milk"});

    Mock::given(method("POST"))
        .and(path("/memo"))
        .and(body_json(memo.clone()))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({"ok": true, "id": "memo-1", "rev": "1-abc"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let saved = client.insert(&memo).await.expect("insert failed");

    assert!(saved.ok);
    assert_eq!(saved.id, "memo-1");
    assert_eq!(saved.rev, "1-abc");
}

#[tokio::test]
async fn test_insert_conflict_is_passed_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/memo"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "conflict",
            "reason": "Document update conflict."
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let result = client.insert(&json!({"_id": "memo-1", "_rev": "1-old"})).await;

    match result {
        Err(StoreError::Conflict { error, reason }) => {
            assert_eq!(error, "conflict");
            assert_eq!(reason, "Document update conflict.");
        }
        other => panic!("expected conflict, got {:?}", other),
    }
}

#[tokio::test]
async fn test_destroy_sends_revision() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/memo/memo%201"))
        .and(query_param("rev", "1-abc"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"ok": true, "id": "memo 1", "rev": "2-def"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let removed = client.destroy("memo 1", "1-abc").await.expect("destroy failed");

    assert_eq!(removed.id, "memo 1");
    assert_eq!(removed.rev, "2-def");
}

#[tokio::test]
async fn test_destroy_missing_document_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": "not_found",
            "reason": "missing"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let result = client.destroy("gone", "1-abc").await;

    assert!(matches!(result, Err(StoreError::NotFound { ref reason, .. }) if reason == "missing"));
}

#[tokio::test]
async fn test_server_error_without_json_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let result = client.view("memo", "list", &ViewParams::descending()).await;

    assert!(matches!(result, Err(StoreError::Server { status: 503, .. })));
}

#[tokio::test]
async fn test_malformed_success_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server.uri());
    let result = client.search("memos", "searchText", &SearchParams::query("x")).await;

    assert!(matches!(result, Err(StoreError::MalformedResponse { .. })));
}

#[tokio::test]
async fn test_unreachable_server_is_connection_error() {
    let client = create_test_client("http://127.0.0.1:1");
    let result = client.info().await;

    assert!(matches!(result, Err(StoreError::Connection(_))));
}

#[tokio::test]
async fn test_credentials_use_basic_auth() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/memo"))
        .and(basic_auth("apikey", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "db_name": "memo",
            "doc_count": 3,
            "update_seq": "3-abc"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let config = CouchDbConfig::new(mock_server.uri(), "memo".to_string())
        .with_credentials("apikey".to_string(), "secret".to_string());
    let client = CouchDbClient::new(config).expect("Failed to create CouchDB client");

    let info = client.info().await.expect("info failed");
    assert_eq!(info.db_name, "memo");
    assert_eq!(info.doc_count, Some(3));
    assert_eq!(info.extra["update_seq"], "3-abc");
}

#[tokio::test]
async fn test_repository_search_end_to_end() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/memo/_design/memos/_search/searchText"))
        .and(query_param("q", "milk"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_rows": 3,
            "rows": [
                {"id": "a", "order": [0.9, 0], "fields": {"default": ["2024-01-01", "milk"]}},
                {"id": "c", "order": [0.8, 1], "fields": {"default": ["2024-03-01", "milk"]}},
                {"id": "b", "order": [0.7, 2], "fields": {"default": ["2024-02-01", "milk"]}}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/memo/_design/memos/_view/list"))
        .and(body_json(json!({"keys": ["2024-03-01", "2024-02-01", "2024-01-01"]})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(view_body(&["2024-03-01", "2024-02-01", "2024-01-01"])),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let repo = MemoRepository::new(Arc::new(create_test_client(&mock_server.uri())));
    let response = repo.search("milk").await.expect("search failed");

    let ids: Vec<_> = response.rows.iter().filter_map(|r| r.id.clone()).collect();
    assert_eq!(ids, vec!["memo-2024-03-01", "memo-2024-02-01", "memo-2024-01-01"]);
}
