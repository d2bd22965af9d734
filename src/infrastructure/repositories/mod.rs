//! Repository Implementations
//!
//! Concrete implementations of the domain `InviteRepository` trait.
//!
//! ## Available Repositories
//!
//! - **PgInviteRepository** - PostgreSQL, unique slug index, atomic view counter
//! - **InMemoryInviteRepository** - DashMap-backed, for development and tests
//!
//! ## Usage Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use sqlx::PgPool;
//! use crate::infrastructure::repositories::PgInviteRepository;
//! use crate::shared::slug::SlugGenerator;
//!
//! fn setup_repository(pool: PgPool) -> PgInviteRepository {
//!     PgInviteRepository::new(pool, Arc::new(SlugGenerator::default()))
//! }
//! ```

pub mod invite_repository;
pub mod memory_invite_repository;

pub use invite_repository::{InviteEntity, PgInviteRepository};
pub use memory_invite_repository::InMemoryInviteRepository;
