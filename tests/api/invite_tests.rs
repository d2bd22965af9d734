//! Invite API Tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::common::{nikkah_payload, png_data_uri, TestApp, FRONTEND_URL};

fn with(field: &str, value: Value) -> Value {
    let mut payload = nikkah_payload();
    payload[field] = value;
    payload
}

/// Create then read back the walkthrough invite
#[tokio::test]
async fn test_create_then_read_round_trip() {
    let app = TestApp::new();

    let response = app.post_json("/api/invites", &nikkah_payload()).await;
    assert_eq!(response.status, StatusCode::CREATED);

    let created = response.json();
    let slug = created["slug"].as_str().unwrap().to_string();
    assert_eq!(slug.len(), 6);
    assert_eq!(created["url"], format!("{}/invite/{}", FRONTEND_URL, slug));

    let response = app.get(&format!("/api/invites/{}", slug)).await;
    assert_eq!(response.status, StatusCode::OK);

    let invite = response.json();
    assert_eq!(invite["slug"], slug.as_str());
    assert_eq!(invite["eventCategory"], "NIKKAH");
    assert_eq!(invite["templateKey"], "nikkah-classic-01");
    assert_eq!(invite["eventTitle"], "Ali & Sara");
    assert_eq!(invite["primaryNames"], "Ali, Sara");
    assert_eq!(invite["date"], "2025-06-01T18:00:00");
    assert_eq!(invite["time"], "18:00");
    assert_eq!(invite["venueName"], "Grand Hall");
    assert_eq!(invite["address"], "123 Main St");
    assert_eq!(invite["language"], "EN");
    assert_eq!(invite["viewCount"], 0);
    assert!(invite.get("mapsUrl").is_none());
    assert!(invite["createdAt"].is_string());
}

/// Optional fields are stored and served back
#[tokio::test]
async fn test_optional_fields_round_trip() {
    let app = TestApp::new();
    let mut payload = with("eventCategory", json!("BIRTHDAY"));
    payload["mapsUrl"] = json!("https://maps.example.com/?q=hall");
    payload["customMessage"] = json!("Dinner to follow");
    payload["language"] = json!("BOTH");

    let slug = app.create_invite(&payload).await;
    let invite = app.get(&format!("/api/invites/{}", slug)).await.json();

    assert_eq!(invite["eventCategory"], "BIRTHDAY");
    assert_eq!(invite["mapsUrl"], "https://maps.example.com/?q=hall");
    assert_eq!(invite["customMessage"], "Dinner to follow");
    assert_eq!(invite["language"], "BOTH");
}

/// Every single-field violation is a 400 and persists nothing
#[tokio::test]
async fn test_invalid_payloads_are_rejected_without_persisting() {
    let app = TestApp::new();

    let cases = vec![
        with("eventCategory", json!("GRADUATION")),
        with("language", json!("DE")),
        with("eventTitle", json!("")),
        with("primaryNames", json!("")),
        with("venueName", json!("")),
        with("address", json!("")),
        with("eventTime", json!("")),
        with("eventDate", json!("2025-02-30")),
        with("mapsUrl", json!("grand hall")),
        with("customMessage", json!("x".repeat(1001))),
    ];

    for payload in cases {
        let response = app.post_json("/api/invites", &payload).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "payload: {payload}");
        assert!(response.json()["message"].is_string());
    }

    assert!(app.store.is_empty());
}

/// Malformed JSON is a 400, not a 422
#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = TestApp::new();

    let response = app.post_empty("/api/invites").await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(app.store.is_empty());
}

/// Unknown slugs are 404
#[tokio::test]
async fn test_unknown_slug_is_not_found() {
    let app = TestApp::new();

    let response = app.get("/api/invites/zzzzzz").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.json()["message"], "Invite not found");
}

/// View tracking increments the counter
#[tokio::test]
async fn test_track_view_increments_count() {
    let app = TestApp::new();
    let slug = app.create_invite(&nikkah_payload()).await;

    for _ in 0..3 {
        let response = app.post_empty(&format!("/api/invites/{}/view", slug)).await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        assert!(response.body.is_empty());
    }

    let invite = app.get(&format!("/api/invites/{}", slug)).await.json();
    assert_eq!(invite["viewCount"], 3);
}

/// View tracking on an unknown slug is acknowledged and creates nothing
#[tokio::test]
async fn test_track_view_unknown_slug_is_acknowledged() {
    let app = TestApp::new();

    let response = app.post_empty("/api/invites/zzzzzz/view").await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert!(app.store.is_empty());
}

/// Concurrent view events are all counted
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_views_are_all_counted() {
    let app = std::sync::Arc::new(TestApp::new());
    let slug = app.create_invite(&nikkah_payload()).await;

    let tasks: Vec<_> = (0..64)
        .map(|_| {
            let app = app.clone();
            let uri = format!("/api/invites/{}/view", slug);
            tokio::spawn(async move { app.post_empty(&uri).await.status })
        })
        .collect();

    for status in futures::future::join_all(tasks).await {
        assert_eq!(status.unwrap(), StatusCode::NO_CONTENT);
    }

    let invite = app.get(&format!("/api/invites/{}", slug)).await.json();
    assert_eq!(invite["viewCount"], 64);
}

/// A PNG data URI comes back as a PDF attachment
#[tokio::test]
async fn test_export_pdf() {
    let app = TestApp::new();

    let response = app
        .post_json(
            "/api/invites/abc123/export/pdf",
            &json!({ "imageData": png_data_uri() }),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.headers["content-type"], "application/pdf");
    assert_eq!(
        response.headers["content-disposition"],
        "attachment; filename=\"invite-abc123.pdf\""
    );
    assert!(response.body.starts_with(b"%PDF-"));
}

/// Export rejects payloads without the PNG data URI prefix
#[tokio::test]
async fn test_export_rejects_bad_image_data() {
    let app = TestApp::new();
    let uri = "/api/invites/abc123/export/pdf";

    let cases = vec![
        json!({}),
        json!({ "imageData": "" }),
        json!({ "imageData": "data:image/jpeg;base64,/9j/4AAQSkZJRg==" }),
        json!({ "imageData": "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk" }),
        json!({ "imageData": "data:image/png;base64,%%%" }),
        json!({ "imageData": "data:image/png;base64,aGVsbG8gd29ybGQ=" }),
    ];

    for body in cases {
        let response = app.post_json(uri, &body).await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "body: {body}");
        assert_ne!(
            response.headers.get("content-type").map(|v| v.as_bytes()),
            Some(&b"application/pdf"[..])
        );
    }
}

/// A whitespace-only slug segment is rejected
#[tokio::test]
async fn test_blank_slug_is_bad_request() {
    let app = TestApp::new();

    let response = app.get("/api/invites/%20").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["message"], "Missing slug");

    let response = app.post_empty("/api/invites/%20/view").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

/// Padded date and time are accepted and stored as HH:MM
#[tokio::test]
async fn test_padded_event_time_is_normalized() {
    let app = TestApp::new();
    let mut payload = with("eventTime", json!("18:00          "));
    payload["eventDate"] = json!("2025-06-01 ");

    let slug = app.create_invite(&payload).await;
    let invite = app.get(&format!("/api/invites/{}", slug)).await.json();

    assert_eq!(invite["time"], "18:00");
    assert_eq!(invite["date"], "2025-06-01T18:00:00");
}

/// Slugs are used as given, not trimmed
#[tokio::test]
async fn test_padded_slug_is_not_rewritten() {
    let app = TestApp::new();
    let slug = app.create_invite(&nikkah_payload()).await;

    let response = app.get(&format!("/api/invites/%20{}", slug)).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    let response = app
        .post_json(
            "/api/invites/%20abc123/export/pdf",
            &json!({ "imageData": png_data_uri() }),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers["content-disposition"],
        "attachment; filename=\"invite- abc123.pdf\""
    );
}

/// Undecodable slug segments get the JSON error body
#[tokio::test]
async fn test_undecodable_slug_is_json_bad_request() {
    let app = TestApp::new();

    for response in [
        app.get("/api/invites/%FF").await,
        app.post_empty("/api/invites/%FF/view").await,
    ] {
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.headers["content-type"], "application/json");
        let body = response.json();
        assert_eq!(body["code"], 10002);
        assert!(body["message"].is_string());
    }
}
