//! Invite Service
//!
//! Handles invite creation, lookup, view tracking and PDF export.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::services::pdf_service::{self, PdfError};
use crate::domain::{Invite, InviteRepository, NewInvite};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Invite service trait defining invite operations.
#[async_trait]
pub trait InviteService: Send + Sync {
    /// Persist a validated invite and return its slug.
    async fn create_invite(&self, invite: NewInvite) -> Result<String, InviteError>;

    /// Get an invite by its slug.
    async fn get_invite(&self, slug: &str) -> Result<Invite, InviteError>;

    /// Record one page view. Unknown slugs are accepted silently.
    async fn track_view(&self, slug: &str) -> Result<(), InviteError>;

    /// Render a PNG data URI as a one-page PDF.
    ///
    /// The slug is only used for logging; it is not looked up.
    async fn export_pdf(&self, slug: &str, image_data: &str) -> Result<Vec<u8>, InviteError>;

    /// Check that the store is reachable.
    async fn check_storage(&self) -> Result<(), InviteError>;
}

/// Invite service errors.
#[derive(Debug, thiserror::Error)]
pub enum InviteError {
    #[error("Invite not found")]
    NotFound,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Generated slug already exists: {0}")]
    DuplicateSlug(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<AppError> for InviteError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::DuplicateSlug(slug) => InviteError::DuplicateSlug(slug),
            AppError::NotFound(_) => InviteError::NotFound,
            AppError::BadRequest(msg) | AppError::Validation(msg) => InviteError::InvalidInput(msg),
            other => InviteError::Storage(other.to_string()),
        }
    }
}

impl From<PdfError> for InviteError {
    fn from(err: PdfError) -> Self {
        InviteError::InvalidInput(err.to_string())
    }
}

/// Invite service implementation.
pub struct InviteServiceImpl<R>
where
    R: InviteRepository + ?Sized,
{
    invite_repo: Arc<R>,
}

impl<R> InviteServiceImpl<R>
where
    R: InviteRepository + ?Sized,
{
    /// Create a new InviteServiceImpl.
    pub fn new(invite_repo: Arc<R>) -> Self {
        Self { invite_repo }
    }
}

#[async_trait]
impl<R> InviteService for InviteServiceImpl<R>
where
    R: InviteRepository + ?Sized + 'static,
{
    async fn create_invite(&self, invite: NewInvite) -> Result<String, InviteError> {
        let category = invite.event_category;
        let created = self.invite_repo.create(&invite).await?;

        metrics::record_invite_created(category.as_str());
        tracing::info!(slug = %created.slug, %category, "Invite created");

        Ok(created.slug)
    }

    async fn get_invite(&self, slug: &str) -> Result<Invite, InviteError> {
        self.invite_repo
            .find_by_slug(slug)
            .await?
            .ok_or(InviteError::NotFound)
    }

    async fn track_view(&self, slug: &str) -> Result<(), InviteError> {
        self.invite_repo.increment_view(slug).await?;

        metrics::record_invite_view();
        tracing::debug!(%slug, "Invite view tracked");

        Ok(())
    }

    async fn export_pdf(&self, slug: &str, image_data: &str) -> Result<Vec<u8>, InviteError> {
        // Cheap prefix check before handing work to the blocking pool
        if !image_data.starts_with(pdf_service::PNG_DATA_URI_PREFIX) {
            metrics::record_pdf_export("rejected");
            return Err(PdfError::InvalidDataUri.into());
        }

        let image_data = image_data.to_owned();
        let rendered = tokio::task::spawn_blocking(move || pdf_service::render_data_uri(&image_data))
            .await
            .map_err(|e| InviteError::Storage(format!("PDF render task failed: {e}")))?;

        match rendered {
            Ok(pdf) => {
                metrics::record_pdf_export("ok");
                tracing::info!(%slug, bytes = pdf.len(), "Invite PDF exported");
                Ok(pdf)
            }
            Err(e) => {
                metrics::record_pdf_export("rejected");
                tracing::debug!(%slug, error = %e, "PDF export rejected");
                Err(e.into())
            }
        }
    }

    async fn check_storage(&self) -> Result<(), InviteError> {
        self.invite_repo.ping().await?;
        Ok(())
    }
}
