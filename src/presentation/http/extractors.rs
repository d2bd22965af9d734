//! Custom Extractors
//!
//! Axum extractors for request parsing.

use axum::{
    extract::{FromRequest, FromRequestParts, Path, Request},
    http::request::Parts,
    Json,
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::shared::error::AppError;
use crate::shared::validation::{require_slug, validation_error};

/// JSON body that has been deserialized and checked with `validator`.
///
/// Malformed JSON, missing fields and unknown enum values are answered with
/// 400 rather than axum's default 422.
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Send,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value.validate().map_err(validation_error)?;
        Ok(Self(value))
    }
}

/// Non-blank `{slug}` path segment.
///
/// Undecodable segments and blank slugs are answered with the JSON error
/// body instead of axum's plain-text rejection.
#[derive(Debug, Clone)]
pub struct SlugPath(pub String);

impl<S> FromRequestParts<S> for SlugPath
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(slug) = Path::<String>::from_request_parts(parts, state).await?;
        require_slug(&slug)?;
        Ok(Self(slug))
    }
}
