mod common;

use axum::http::StatusCode;
use serde_json::{Value, json};
use shortlink::domain::repositories::LinkRepository;
use shortlink::utils::code_generator::is_valid_code;
use std::sync::Arc;

#[tokio::test]
async fn test_create_link_with_generated_code() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "email": "a@b.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<Value>();
    let code = json["code"].as_str().unwrap();
    assert_eq!(code.len(), 8);
    assert!(is_valid_code(code));
    assert_eq!(json["url"], "https://example.com");
    assert_eq!(json["email"], "a@b.com");
    assert_eq!(json["totalClicks"], 0);
    assert_eq!(json["lastClicked"], Value::Null);
    assert!(json["createdAt"].is_string());
}

#[tokio::test]
async fn test_create_link_with_requested_code() {
    let (server, repo) = common::create_test_server();

    let json = common::create_link(&server, "https://example.com", "a@b.com", Some("abc123")).await;

    assert_eq!(json["code"], "abc123");
    assert!(repo.find_by_code("abc123").await.unwrap().is_some());
}

#[tokio::test]
async fn test_create_link_requested_code_conflict() {
    let (server, repo) = common::create_test_server();

    common::create_link(&server, "https://example.com", "a@b.com", Some("abc123")).await;

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://other.com", "email": "c@d.com", "code": "abc123" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "conflict");

    let stored = repo.find_by_code("abc123").await.unwrap().unwrap();
    assert_eq!(stored.destination_url, "https://example.com");
}

#[tokio::test]
async fn test_codes_differing_only_in_case_coexist() {
    let (server, _repo) = common::create_test_server();

    common::create_link(&server, "https://lower.com", "a@b.com", Some("abc123")).await;
    common::create_link(&server, "https://upper.com", "a@b.com", Some("ABC123")).await;

    let lower = server.get("/api/links/abc123").await.json::<Value>();
    let upper = server.get("/api/links/ABC123").await.json::<Value>();

    assert_eq!(lower["url"], "https://lower.com");
    assert_eq!(upper["url"], "https://upper.com");
}

#[tokio::test]
async fn test_create_link_rejects_non_http_url() {
    let (server, repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "ftp://x", "email": "a@b.com" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "validation_error"
    );
    assert!(repo.list_by_owner("a@b.com").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_link_rejects_bad_email() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "email": "nope" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_link_rejects_malformed_codes() {
    let (server, repo) = common::create_test_server();

    for code in ["abc", "abc-12", "abc_12", "abc 12", "abcdefghi", "abcdé1"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "url": "https://example.com", "email": "a@b.com", "code": code }))
            .await;

        assert_eq!(
            response.status_code(),
            StatusCode::BAD_REQUEST,
            "code {code:?} should be rejected"
        );
    }

    assert!(repo.list_by_owner("a@b.com").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_link_missing_fields() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_bad_request();

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "validation_error");
    assert!(json["error"]["details"]["reason"]
        .as_str()
        .unwrap()
        .contains("email"));
}

#[tokio::test]
async fn test_create_link_wrongly_typed_code() {
    let (server, repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "email": "a@b.com", "code": 123456 }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "validation_error"
    );
    assert!(repo.list_by_owner("a@b.com").await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_link_invalid_json_syntax() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .post("/api/links")
        .text("{\"url\": ")
        .content_type("application/json")
        .await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "validation_error"
    );
}

#[tokio::test]
async fn test_create_link_rejects_control_characters_in_url() {
    let (server, repo) = common::create_test_server();

    for url in ["https://example.com/a\nb", "https://example.com/a\r\nX-Injected: 1"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "url": url, "email": "a@b.com", "code": "ctrl12" }))
            .await;

        response.assert_status_bad_request();
        let json = response.json::<Value>();
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(json["error"]["details"]["field"], "url");
    }

    assert!(repo.find_by_code("ctrl12").await.unwrap().is_none());
    server.get("/ctrl12").await.assert_status_not_found();
}

#[tokio::test]
async fn test_create_link_namespace_exhausted() {
    let server = common::create_server_with(Arc::new(common::SaturatedRepository));

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "email": "a@b.com" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "allocation_exhausted");
    assert_eq!(json["error"]["details"]["attempts"], common::MAX_ATTEMPTS);
}

#[tokio::test]
async fn test_requested_code_on_saturated_store_is_conflict() {
    let server = common::create_server_with(Arc::new(common::SaturatedRepository));

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "email": "a@b.com", "code": "abc123" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_storage_unavailable_hides_detail() {
    let server = common::create_server_with(Arc::new(common::UnreachableRepository));

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "email": "a@b.com" }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let text = response.text();
    assert!(text.contains("storage_unavailable"));
    assert!(!text.contains("10.0.0.5"));
}

#[tokio::test]
async fn test_list_links_by_owner() {
    let (server, _repo) = common::create_test_server();

    common::create_link(&server, "https://one.com", "a@b.com", Some("first1")).await;
    common::create_link(&server, "https://else.com", "x@y.com", Some("other1")).await;
    common::create_link(&server, "https://two.com", "a@b.com", Some("second")).await;

    let response = server
        .get("/api/links")
        .add_query_param("email", "a@b.com")
        .await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    let items = json.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["code"], "second");
    assert_eq!(items[1]["code"], "first1");
}

#[tokio::test]
async fn test_list_links_unknown_owner_is_empty() {
    let (server, _repo) = common::create_test_server();

    let response = server
        .get("/api/links")
        .add_query_param("email", "nobody@example.com")
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!([]));
}

#[tokio::test]
async fn test_list_links_requires_email() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/api/links").await;

    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["error"]["code"],
        "validation_error"
    );
}

#[tokio::test]
async fn test_get_link_not_found() {
    let (server, _repo) = common::create_test_server();

    let response = server.get("/api/links/nothere").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_get_link_does_not_count_visit() {
    let (server, _repo) = common::create_test_server();
    common::create_link(&server, "https://example.com", "a@b.com", Some("peek12")).await;

    server.get("/api/links/peek12").await.assert_status_ok();
    let json = server.get("/api/links/peek12").await.json::<Value>();

    assert_eq!(json["totalClicks"], 0);
}

#[tokio::test]
async fn test_delete_link() {
    let (server, repo) = common::create_test_server();
    common::create_link(&server, "https://example.com", "a@b.com", Some("bye123")).await;

    let response = server.delete("/api/links/bye123").await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(repo.find_by_code("bye123").await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_twice_reports_not_found() {
    let (server, _repo) = common::create_test_server();
    common::create_link(&server, "https://example.com", "a@b.com", Some("bye123")).await;

    server
        .delete("/api/links/bye123")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    server.delete("/api/links/bye123").await.assert_status_not_found();
}

#[tokio::test]
async fn test_deleted_code_can_be_reused() {
    let (server, _repo) = common::create_test_server();
    common::create_link(&server, "https://old.com", "a@b.com", Some("again1")).await;

    server
        .delete("/api/links/again1")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let json = common::create_link(&server, "https://new.com", "a@b.com", Some("again1")).await;
    assert_eq!(json["url"], "https://new.com");
    assert_eq!(json["totalClicks"], 0);
}
