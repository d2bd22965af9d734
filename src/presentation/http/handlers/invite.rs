//! Invite Handlers
//!
//! HTTP handlers for invite-related endpoints.

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::application::dto::{
    CreateInviteRequest, CreateInviteResponse, ExportPdfRequest, InviteResponse,
};
use crate::application::services::{pdf_service, InviteError};
use crate::domain::NewInvite;
use crate::presentation::http::extractors::{SlugPath, ValidatedJson};
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Helper to convert InviteError to AppError
fn map_invite_error(e: InviteError) -> AppError {
    match e {
        InviteError::NotFound => AppError::NotFound("Invite not found".into()),
        InviteError::InvalidInput(msg) => AppError::BadRequest(msg),
        InviteError::DuplicateSlug(slug) => AppError::DuplicateSlug(slug),
        InviteError::Storage(msg) => AppError::Internal(msg),
    }
}

/// Create a new invite
///
/// POST /api/invites
///
/// ## Request Body
/// - `eventCategory`: one of NIKKAH, MEHNDI, BARAAT, WALIMA, BIRTHDAY
/// - `eventTitle`, `primaryNames`, `venueName`, `address`: non-empty strings
/// - `eventDate` ("YYYY-MM-DD") and `eventTime` ("HH:MM")
/// - `mapsUrl` (optional): absolute URL
/// - `customMessage` (optional): at most 1000 characters
/// - `language`: EN, UR or BOTH
///
/// Returns 201 with the assigned slug and the shareable page URL.
pub async fn create_invite(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<CreateInviteRequest>,
) -> Result<(StatusCode, Json<CreateInviteResponse>), AppError> {
    let invite = NewInvite::try_from(body)?;

    let slug = state
        .invites
        .create_invite(invite)
        .await
        .map_err(map_invite_error)?;

    let url = state.settings.frontend.invite_url(&slug);

    Ok((StatusCode::CREATED, Json(CreateInviteResponse { slug, url })))
}

/// Get an invite by slug
///
/// GET /api/invites/{slug}
pub async fn get_invite(
    State(state): State<AppState>,
    SlugPath(slug): SlugPath,
) -> Result<Json<InviteResponse>, AppError> {
    let invite = state
        .invites
        .get_invite(&slug)
        .await
        .map_err(map_invite_error)?;

    Ok(Json(invite.into()))
}

/// Track a page view
///
/// POST /api/invites/{slug}/view
///
/// Always 204, also for unknown slugs.
pub async fn track_invite_view(
    State(state): State<AppState>,
    SlugPath(slug): SlugPath,
) -> Result<StatusCode, AppError> {
    state
        .invites
        .track_view(&slug)
        .await
        .map_err(map_invite_error)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Export the rendered invite card as a PDF
///
/// POST /api/invites/{slug}/export/pdf
///
/// ## Request Body
/// - `imageData`: "data:image/png;base64,..." capture of the card
///
/// The PNG is stretched over one A4 page and returned as an attachment
/// named `invite-<slug>.pdf`. The slug is not looked up.
pub async fn export_invite_pdf(
    State(state): State<AppState>,
    SlugPath(slug): SlugPath,
    ValidatedJson(body): ValidatedJson<ExportPdfRequest>,
) -> Result<Response, AppError> {
    let image_data = body
        .image_data
        .ok_or_else(|| AppError::BadRequest("Invalid imageData".into()))?;

    let disposition = HeaderValue::from_str(&format!(
        "attachment; filename=\"{}\"",
        pdf_service::export_file_name(&slug)
    ))
    .map_err(|_| AppError::BadRequest("Invalid slug".into()))?;

    let pdf = state
        .invites
        .export_pdf(&slug, &image_data)
        .await
        .map_err(map_invite_error)?;

    Ok((
        [
            (header::CONTENT_TYPE, HeaderValue::from_static("application/pdf")),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        pdf,
    )
        .into_response())
}
