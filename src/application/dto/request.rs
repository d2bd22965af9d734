//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::Deserialize;
use validator::Validate;

use crate::domain::{combine_event_date_time, EventCategory, Language, NewInvite};
use crate::shared::error::AppError;

/// Create invite request
///
/// Enum membership and field presence are enforced by deserialization;
/// the remaining field rules live in the `validate` attributes below.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateInviteRequest {
    pub event_category: EventCategory,

    #[validate(length(min = 1, message = "Event title is required"))]
    pub event_title: String,

    #[validate(length(min = 1, message = "Names are required"))]
    pub primary_names: String,

    /// "YYYY-MM-DD"
    #[validate(length(min = 1, message = "Event date is required"))]
    pub event_date: String,

    /// "HH:MM"
    #[validate(length(min = 1, message = "Event time is required"))]
    pub event_time: String,

    #[validate(length(min = 1, message = "Venue name is required"))]
    pub venue_name: String,

    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,

    #[validate(url(message = "Maps URL must be a valid URL"))]
    pub maps_url: Option<String>,

    #[validate(length(max = 1000, message = "Message must be at most 1000 characters"))]
    pub custom_message: Option<String>,

    pub language: Language,
}

impl TryFrom<CreateInviteRequest> for NewInvite {
    type Error = AppError;

    /// Combine the date and time fields; the request must already be validated.
    fn try_from(request: CreateInviteRequest) -> Result<Self, Self::Error> {
        let date = combine_event_date_time(&request.event_date, &request.event_time)
            .map_err(|_| AppError::Validation("event_date: Invalid event date or time".into()))?;

        Ok(NewInvite {
            event_category: request.event_category,
            event_title: request.event_title,
            primary_names: request.primary_names,
            date,
            time: date.format("%H:%M").to_string(),
            venue_name: request.venue_name,
            address: request.address,
            maps_url: request.maps_url,
            custom_message: request.custom_message,
            language: request.language,
        })
    }
}

/// PDF export request
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ExportPdfRequest {
    /// "data:image/png;base64,..." capture of the rendered card
    #[validate(required(message = "imageData is required"))]
    pub image_data: Option<String>,
}
