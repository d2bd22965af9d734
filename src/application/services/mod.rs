//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! ## Available Services
//!
//! - **InviteService**: Invite creation, lookup, view tracking and export
//! - **pdf_service**: PNG-to-PDF page rendering used by export

pub mod invite_service;
pub mod pdf_service;

// Re-export invite service types
pub use invite_service::{InviteError, InviteService, InviteServiceImpl};
pub use pdf_service::PdfError;
