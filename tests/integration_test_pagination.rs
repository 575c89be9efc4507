mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};

async fn seed_events(app: &TestApp, count: usize) {
    for i in 0..count {
        app.seed_event(&format!("Event {:02}", i), 1 + i as i64, 50).await;
    }
}

#[tokio::test]
async fn test_first_page_descriptor() {
    let app = TestApp::new().await;
    seed_events(&app, 25).await;

    let res = app.send(app.get("/api/events?page=1&limit=10", None)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 10);

    let pagination = &body["pagination"];
    assert_eq!(pagination["total"], 25);
    assert_eq!(pagination["page"], 1);
    assert_eq!(pagination["limit"], 10);
    assert_eq!(pagination["totalPages"], 3);
    assert_eq!(pagination["hasNextPage"], true);
    assert_eq!(pagination["hasPrevPage"], false);
}

#[tokio::test]
async fn test_last_partial_page() {
    let app = TestApp::new().await;
    seed_events(&app, 25).await;

    let res = app.send(app.get("/api/events?page=3&limit=10", None)).await;
    let body = parse_body(res).await;

    // 25 events at 10 a page leave 5 on the last page.
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["pagination"]["hasNextPage"], false);
    assert_eq!(body["pagination"]["hasPrevPage"], true);
}

#[tokio::test]
async fn test_page_beyond_end_is_empty_not_an_error() {
    let app = TestApp::new().await;
    seed_events(&app, 25).await;

    let res = app.send(app.get("/api/events?page=7&limit=10", None)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["pagination"]["total"], 25);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["hasNextPage"], false);
}

#[tokio::test]
async fn test_empty_collection_descriptor() {
    let app = TestApp::new().await;

    let res = app.send(app.get("/api/events", None)).await;
    let body = parse_body(res).await;

    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["pagination"]["total"], 0);
    assert_eq!(body["pagination"]["totalPages"], 0);
    assert_eq!(body["pagination"]["hasNextPage"], false);
    assert_eq!(body["pagination"]["hasPrevPage"], false);
}

#[tokio::test]
async fn test_junk_paging_values_fall_back() {
    let app = TestApp::new().await;
    seed_events(&app, 15).await;

    let res = app.send(app.get("/api/events?page=abc&limit=xyz", None)).await;
    let body = parse_body(res).await;
    assert_eq!(body["pagination"]["page"], 1);
    assert_eq!(body["pagination"]["limit"], 10);
    assert_eq!(body["data"].as_array().unwrap().len(), 10);

    let res = app.send(app.get("/api/events?page=-2", None)).await;
    let body = parse_body(res).await;
    assert_eq!(body["pagination"]["page"], 1);
}

#[tokio::test]
async fn test_limit_is_clamped_to_max() {
    let app = TestApp::new().await;
    seed_events(&app, 5).await;

    let res = app.send(app.get("/api/events?limit=500", None)).await;
    let body = parse_body(res).await;
    assert_eq!(body["pagination"]["limit"], 100);
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn test_pages_do_not_overlap() {
    let app = TestApp::new().await;
    seed_events(&app, 12).await;

    let res = app.send(app.get("/api/events?page=1&limit=5", None)).await;
    let first = parse_body(res).await;
    let res = app.send(app.get("/api/events?page=2&limit=5", None)).await;
    let second = parse_body(res).await;

    let first_ids: Vec<String> = first["data"].as_array().unwrap()
        .iter().map(|e| e["id"].as_str().unwrap().to_string()).collect();
    let second_ids: Vec<String> = second["data"].as_array().unwrap()
        .iter().map(|e| e["id"].as_str().unwrap().to_string()).collect();

    assert_eq!(first_ids.len(), 5);
    assert_eq!(second_ids.len(), 5);
    assert!(first_ids.iter().all(|id| !second_ids.contains(id)));
}

#[tokio::test]
async fn test_bookings_listing_is_paginated() {
    let app = TestApp::new().await;
    let (_user, token) = app.seed_user("alice@example.com", "user").await;

    for i in 0..12 {
        let event = app.seed_event(&format!("Event {:02}", i), 1 + i, 50).await;
        let res = app.send(app.post_json(&format!("/api/bookings/{}", event.id), Some(&token), serde_json::json!({}))).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app.send(app.get("/api/bookings?page=2&limit=5", Some(&token))).await;
    let body = parse_body(res).await;

    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["pagination"]["total"], 12);
    assert_eq!(body["pagination"]["totalPages"], 3);
    assert_eq!(body["pagination"]["hasNextPage"], true);
    assert_eq!(body["pagination"]["hasPrevPage"], true);
}
