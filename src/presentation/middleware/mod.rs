//! Middleware
//!
//! Tower middleware for request processing.

pub mod cors;
pub mod logging;
pub mod security;

pub use logging::{create_trace_layer, track_metrics};
pub use security::{security_headers, SecurityHeadersConfig};
