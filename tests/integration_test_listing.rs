mod common;

use axum::http::StatusCode;
use common::{parse_body, TestApp};

#[tokio::test]
async fn test_anonymous_listing_marks_nothing_as_booked() {
    let app = TestApp::new().await;
    app.seed_event("Event A", 5, 50).await;
    app.seed_event("Event B", 6, 50).await;

    let res = app.send(app.get("/api/events", None)).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    for entry in data {
        assert_eq!(entry["userHasBooked"], false);
    }
}

#[tokio::test]
async fn test_listing_flags_only_booked_events() {
    let app = TestApp::new().await;
    let (_user, token) = app.seed_user("alice@example.com", "user").await;
    let booked = app.seed_event("Booked Event", 5, 50).await;
    app.seed_event("Other Event", 6, 50).await;

    let res = app.send(app.post_json(&format!("/api/bookings/{}", booked.id), Some(&token), serde_json::json!({}))).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.send(app.get("/api/events", Some(&token))).await;
    let body = parse_body(res).await;

    for entry in body["data"].as_array().unwrap() {
        let expected = entry["id"] == booked.id.as_str();
        assert_eq!(entry["userHasBooked"], expected, "wrong flag on {}", entry["name"]);
    }
}

#[tokio::test]
async fn test_invalid_token_degrades_to_guest() {
    let app = TestApp::new().await;
    app.seed_event("Event A", 5, 50).await;

    let res = app.send(app.get("/api/events", Some("garbage-token"))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    assert_eq!(body["data"][0]["userHasBooked"], false);
}

#[tokio::test]
async fn test_dangling_booking_is_filtered_from_listing() {
    let app = TestApp::new().await;
    let (_user, token) = app.seed_user("alice@example.com", "user").await;
    let (_admin, admin_token) = app.seed_user("admin@example.com", "admin").await;

    let doomed = app.seed_event("Doomed Event", 5, 50).await;
    let surviving = app.seed_event("Surviving Event", 6, 50).await;

    for event_id in [&doomed.id, &surviving.id] {
        let res = app.send(app.post_json(&format!("/api/bookings/{}", event_id), Some(&token), serde_json::json!({}))).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app.send(app.delete(&format!("/api/events/{}", doomed.id), Some(&admin_token))).await;
    assert_eq!(res.status(), StatusCode::OK);

    // The orphaned booking vanishes from the listing without an error
    // and without null event fields.
    let res = app.send(app.get("/api/bookings", Some(&token))).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body = parse_body(res).await;
    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["eventName"], "Surviving Event");
    for entry in data {
        assert!(!entry["eventName"].is_null());
        assert!(!entry["eventDate"].is_null());
    }
}

#[tokio::test]
async fn test_dangling_booking_get_by_id_is_not_found() {
    let app = TestApp::new().await;
    let (_user, token) = app.seed_user("alice@example.com", "user").await;
    let (_admin, admin_token) = app.seed_user("admin@example.com", "admin").await;

    let doomed = app.seed_event("Doomed Event", 5, 50).await;

    let res = app.send(app.post_json(&format!("/api/bookings/{}", doomed.id), Some(&token), serde_json::json!({}))).await;
    let booking_id = parse_body(res).await["data"]["id"].as_str().unwrap().to_string();

    app.send(app.delete(&format!("/api/events/{}", doomed.id), Some(&admin_token))).await;

    let res = app.send(app.get(&format!("/api/bookings/{}", booking_id), Some(&token))).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_my_bookings_are_reverse_chronological() {
    let app = TestApp::new().await;
    let (_user, token) = app.seed_user("alice@example.com", "user").await;

    for (name, days) in [("First", 5), ("Second", 6), ("Third", 7)] {
        let event = app.seed_event(name, days, 50).await;
        let res = app.send(app.post_json(&format!("/api/bookings/{}", event.id), Some(&token), serde_json::json!({}))).await;
        assert_eq!(res.status(), StatusCode::CREATED);
        // Space out created_at so the sort is deterministic.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let res = app.send(app.get("/api/bookings", Some(&token))).await;
    let body = parse_body(res).await;
    let names: Vec<&str> = body["data"].as_array().unwrap()
        .iter()
        .map(|b| b["eventName"].as_str().unwrap())
        .collect();

    assert_eq!(names, vec!["Third", "Second", "First"]);
}

#[tokio::test]
async fn test_my_bookings_only_contain_own_bookings() {
    let app = TestApp::new().await;
    let (_alice, token_alice) = app.seed_user("alice@example.com", "user").await;
    let (_bob, token_bob) = app.seed_user("bob@example.com", "user").await;
    let event = app.seed_event("Shared Event", 5, 50).await;

    app.send(app.post_json(&format!("/api/bookings/{}", event.id), Some(&token_alice), serde_json::json!({}))).await;

    let res = app.send(app.get("/api/bookings", Some(&token_bob))).await;
    let body = parse_body(res).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 0);
    assert_eq!(body["pagination"]["total"], 0);
}
