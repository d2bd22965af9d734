//! Response DTOs
//!
//! Data structures for API response bodies.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Serialize;

use crate::domain::{EventCategory, Invite, Language};

/// Result of creating an invite
#[derive(Debug, Clone, Serialize)]
pub struct CreateInviteResponse {
    pub slug: String,
    /// Shareable page URL on the frontend
    pub url: String,
}

/// Full invite record as served to the invite page
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteResponse {
    pub slug: String,
    pub event_category: EventCategory,
    pub template_key: String,
    pub event_title: String,
    pub primary_names: String,
    pub date: NaiveDateTime,
    pub time: String,
    pub venue_name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maps_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_message: Option<String>,
    pub language: Language,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Invite> for InviteResponse {
    fn from(invite: Invite) -> Self {
        Self {
            slug: invite.slug,
            event_category: invite.event_category,
            template_key: invite.template_key,
            event_title: invite.event_title,
            primary_names: invite.primary_names,
            date: invite.date,
            time: invite.time,
            venue_name: invite.venue_name,
            address: invite.address,
            maps_url: invite.maps_url,
            custom_message: invite.custom_message,
            language: invite.language,
            view_count: invite.view_count,
            created_at: invite.created_at,
            updated_at: invite.updated_at,
        }
    }
}
