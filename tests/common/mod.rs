//! Common Test Utilities
//!
//! Shared helpers, fixtures, and test infrastructure.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::{json, Value};
use tower::ServiceExt;

use invite_card_server::config::{
    CorsSettings, DatabaseSettings, FrontendSettings, ServerSettings, Settings, StorageBackend,
    StorageSettings,
};
use invite_card_server::infrastructure::repositories::InMemoryInviteRepository;
use invite_card_server::startup::{build_router, AppState};

pub const FRONTEND_URL: &str = "https://invites.example.com";

/// Collected response parts
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Bytes,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).expect("response body is not JSON")
    }
}

/// Test application over the in-memory store
pub struct TestApp {
    pub router: Router,
    pub store: Arc<InMemoryInviteRepository>,
}

impl TestApp {
    /// Create a new test application with the full middleware stack
    pub fn new() -> Self {
        let store = Arc::new(InMemoryInviteRepository::default());
        let state = AppState::new(store.clone(), test_settings());

        Self {
            router: build_router(state),
            store,
        }
    }

    async fn send(&self, request: Request<Body>) -> TestResponse {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        TestResponse {
            status,
            headers,
            body,
        }
    }

    /// Make a GET request to the application
    pub async fn get(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Make a POST request with JSON body
    pub async fn post_json(&self, uri: &str, body: &Value) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Make a POST request without a body
    pub async fn post_empty(&self, uri: &str) -> TestResponse {
        self.send(
            Request::builder()
                .method("POST")
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
    }

    /// Create an invite from `payload` and return its slug
    pub async fn create_invite(&self, payload: &Value) -> String {
        let response = self.post_json("/api/invites", payload).await;
        assert_eq!(response.status, StatusCode::CREATED);
        response.json()["slug"].as_str().unwrap().to_string()
    }
}

pub fn test_settings() -> Settings {
    Settings {
        server: ServerSettings {
            host: "127.0.0.1".into(),
            port: 0,
            max_body_bytes: 10 * 1024 * 1024,
        },
        storage: StorageSettings {
            backend: StorageBackend::Memory,
        },
        database: DatabaseSettings {
            url: None,
            max_connections: 1,
            min_connections: 1,
            acquire_timeout: 1,
            run_migrations: false,
        },
        frontend: FrontendSettings {
            base_url: FRONTEND_URL.into(),
        },
        cors: CorsSettings {
            allowed_origins: vec![FRONTEND_URL.into()],
        },
        environment: "test".into(),
    }
}

/// The invite from the product walkthrough
pub fn nikkah_payload() -> Value {
    json!({
        "eventCategory": "NIKKAH",
        "eventTitle": "Ali & Sara",
        "primaryNames": "Ali, Sara",
        "eventDate": "2025-06-01",
        "eventTime": "18:00",
        "venueName": "Grand Hall",
        "address": "123 Main St",
        "language": "EN"
    })
}

/// A small RGBA PNG wrapped in a data URI
pub fn png_data_uri() -> String {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, 8, 12);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(&[180u8; 8 * 12 * 4]).unwrap();
    }
    format!("data:image/png;base64,{}", STANDARD.encode(out))
}
