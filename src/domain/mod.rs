//! # Domain Layer
//!
//! Core invite model, independent of HTTP and storage concerns.
//!
//! - **entities**: the Invite record, its enums and the repository trait

pub mod entities;

pub use entities::*;
