use std::sync::Arc;

use axum_test::TestServer;
use serde_json::json;

use reco_api::api::{create_router, AppState};
use reco_api::models::CatalogEntry;
use reco_api::services::{Catalog, KnnModel};

fn entry(id: i64, title: &str) -> CatalogEntry {
    CatalogEntry {
        id,
        title: title.to_string(),
    }
}

/// Server over a small fixed dataset: "Batman" matches id 12, whose
/// neighbors are ids 7, 3 and 99; id 99 has no catalog entry.
fn create_test_server() -> TestServer {
    let catalog = Catalog::from_entries(vec![
        entry(12, "Batman Begins (2005)"),
        entry(7, "Iron Man (2008)"),
        entry(3, "Spider-Man (2002)"),
        entry(50, "Unmodeled Film (1996)"),
    ]);

    // internal ids: 0 -> 12, 1 -> 7, 2 -> 3, 3 -> 99
    let model = KnnModel::from_parts(
        vec![12, 7, 3, 99],
        vec![vec![1, 2, 3], vec![0, 2], vec![0, 1], vec![0]],
    )
    .unwrap();

    let state = AppState::new(catalog, Arc::new(model), 10);
    TestServer::new(create_router(state)).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_recommendations_by_id() {
    let server = create_test_server();

    let response = server
        .post("/make_recommendations_by_id")
        .json(&json!({ "object_id": "12" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ids"], json!([7, 3, 99]));
    // id 99 has no catalog entry: its title slot is null, not dropped
    assert_eq!(
        body["titles"],
        json!(["Iron Man (2008)", "Spider-Man (2002)", null])
    );
}

#[tokio::test]
async fn test_recommendations_by_id_accepts_numeric_json() {
    let server = create_test_server();

    let as_string = server
        .post("/make_recommendations_by_id")
        .json(&json!({ "object_id": "12" }))
        .await;
    let as_number = server
        .post("/make_recommendations_by_id")
        .json(&json!({ "object_id": 12 }))
        .await;

    let lhs: serde_json::Value = as_string.json();
    let rhs: serde_json::Value = as_number.json();
    assert_eq!(lhs, rhs);
}

#[tokio::test]
async fn test_recommendations_by_id_via_query_string() {
    let server = create_test_server();

    let response = server
        .get("/make_recommendations_by_id")
        .add_query_param("object_id", "12")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ids"], json!([7, 3, 99]));
}

#[tokio::test]
async fn test_unknown_id_yields_empty_lists() {
    let server = create_test_server();

    let response = server
        .post("/make_recommendations_by_id")
        .json(&json!({ "object_id": "555" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["ids"], json!([]));
    assert_eq!(body["titles"], json!([]));
}

#[tokio::test]
async fn test_missing_object_id_yields_empty_object() {
    let server = create_test_server();

    let response = server.post("/make_recommendations_by_id").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_recommendations_by_title() {
    let server = create_test_server();

    let response = server
        .post("/make_recommendations_by_title")
        .json(&json!({ "title": "Batman" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["query"], "Batman");
    assert_eq!(body["number_of_recommendations"], 10);
    assert_eq!(body["title"], "Batman Begins (2005)");
    // neighbor id 99 resolves to no title and is dropped from the list
    assert_eq!(
        body["recommendations"],
        json!(["Iron Man (2008)", "Spider-Man (2002)"])
    );
}

#[tokio::test]
async fn test_unknown_title_keeps_response_shape() {
    let server = create_test_server();

    let response = server
        .post("/make_recommendations_by_title")
        .json(&json!({ "title": "Alien" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["query"], "Alien");
    assert_eq!(body["title"], serde_json::Value::Null);
    assert_eq!(body["recommendations"], json!([]));
}

#[tokio::test]
async fn test_title_excluded_from_model_yields_no_recommendations() {
    let server = create_test_server();

    let response = server
        .post("/make_recommendations_by_title")
        .json(&json!({ "title": "Unmodeled" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["title"], "Unmodeled Film (1996)");
    assert_eq!(body["recommendations"], json!([]));
}

#[tokio::test]
async fn test_missing_title_yields_empty_object() {
    let server = create_test_server();

    let response = server.get("/make_recommendations_by_title").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body, json!({}));
}

#[tokio::test]
async fn test_json_body_wins_over_query_string() {
    let server = create_test_server();

    let response = server
        .post("/make_recommendations_by_title")
        .add_query_param("title", "Alien")
        .json(&json!({ "title": "Batman" }))
        .await;

    let body: serde_json::Value = response.json();
    assert_eq!(body["query"], "Batman");
    assert_eq!(body["title"], "Batman Begins (2005)");
}

#[tokio::test]
async fn test_repeated_requests_are_idempotent() {
    let server = create_test_server();

    let first = server
        .post("/make_recommendations_by_title")
        .json(&json!({ "title": "Batman" }))
        .await;
    let second = server
        .post("/make_recommendations_by_title")
        .json(&json!({ "title": "Batman" }))
        .await;

    let lhs: serde_json::Value = first.json();
    let rhs: serde_json::Value = second.json();
    assert_eq!(lhs, rhs);
}

#[tokio::test]
async fn test_recommender_form_page() {
    let server = create_test_server();

    let response = server.get("/recommender").await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("<form action=\"/results\" method=\"post\">"));
    assert!(html.contains("name=\"title\""));
}

#[tokio::test]
async fn test_results_page_from_form_post() {
    let server = create_test_server();

    let response = server
        .post("/results")
        .form(&[("title", "Batman")])
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("Batman Begins (2005)"));
    assert!(html.contains("Iron Man (2008)"));
    assert!(html.contains("Spider-Man (2002)"));
}

#[tokio::test]
async fn test_results_page_for_unknown_title_shows_excluded_page() {
    let server = create_test_server();

    let response = server.post("/results").form(&[("title", "Alien")]).await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("No recommendations"));
    assert!(html.contains("Alien"));
}

#[tokio::test]
async fn test_results_page_for_excluded_title() {
    let server = create_test_server();

    let response = server
        .post("/results")
        .form(&[("title", "Unmodeled")])
        .await;

    response.assert_status_ok();
    let html = response.text();
    assert!(html.contains("No recommendations"));
}

#[tokio::test]
async fn test_request_id_header_is_echoed() {
    let server = create_test_server();

    let response = server.get("/health").await;

    assert!(response.headers().contains_key("x-request-id"));
}
