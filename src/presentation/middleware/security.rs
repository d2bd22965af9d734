//! Security Headers Middleware
//!
//! Adds browser hardening headers to every response.

use axum::{
    extract::{Request, State},
    http::{header, HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Security headers configuration
#[derive(Clone, Debug)]
pub struct SecurityHeadersConfig {
    /// Enable HSTS header (should only be true when served over HTTPS)
    pub enable_hsts: bool,
    /// HSTS max-age in seconds
    pub hsts_max_age: u64,
    /// Referrer-Policy value
    pub referrer_policy: &'static str,
    /// Permissions-Policy value
    pub permissions_policy: &'static str,
}

impl Default for SecurityHeadersConfig {
    fn default() -> Self {
        Self {
            enable_hsts: false,
            hsts_max_age: 31536000, // 1 year
            referrer_policy: "strict-origin-when-cross-origin",
            permissions_policy: "geolocation=(), microphone=(), camera=()",
        }
    }
}

impl SecurityHeadersConfig {
    /// Configuration for an environment name; HSTS only in production.
    pub fn for_environment(environment: &str) -> Self {
        Self {
            enable_hsts: environment == "production",
            ..Default::default()
        }
    }
}

/// Insert security headers into the response
pub async fn security_headers(
    State(config): State<SecurityHeadersConfig>,
    request: Request,
    next: Next,
) -> Response {
    let mut response = next.run(request).await;
    let headers = response.headers_mut();

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );
    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.insert(
        header::REFERRER_POLICY,
        HeaderValue::from_static(config.referrer_policy),
    );
    headers.insert(
        HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static(config.permissions_policy),
    );

    if config.enable_hsts {
        if let Ok(value) = HeaderValue::from_str(&format!("max-age={}", config.hsts_max_age)) {
            headers.insert(header::STRICT_TRANSPORT_SECURITY, value);
        }
    }

    response
}
