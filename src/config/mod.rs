//! # Configuration Module
//!
//! This module handles application configuration loading and management.
//! Configuration can be loaded from:
//! - Environment variables (prefixed with APP__, plus PORT, DATABASE_URL,
//!   FRONTEND_BASE_URL, ALLOWED_ORIGINS, STORAGE_BACKEND)
//! - Configuration files (config/default.toml, config/{environment}.toml)
//! - .env files (via dotenvy)
//!
//! Settings are loaded once at startup and shared read-only.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use invite_card_server::config::Settings;
//!
//! let settings = Settings::load()?;
//! println!("Server will listen on {}", settings.server_addr());
//! ```

mod settings;

pub use settings::*;
