//! Event Invite entity and repository trait.
//!
//! Maps to the `invites` table in the database schema.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Template every new invite is rendered with.
pub const DEFAULT_TEMPLATE_KEY: &str = "nikkah-classic-01";

/// Maximum length of the free-form message, in characters.
pub const MAX_CUSTOM_MESSAGE_CHARS: u64 = 1000;

/// Kind of event an invite announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventCategory {
    Nikkah,
    Mehndi,
    Baraat,
    Walima,
    Birthday,
}

impl EventCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventCategory::Nikkah => "NIKKAH",
            EventCategory::Mehndi => "MEHNDI",
            EventCategory::Baraat => "BARAAT",
            EventCategory::Walima => "WALIMA",
            EventCategory::Birthday => "BIRTHDAY",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventCategory {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NIKKAH" => Ok(EventCategory::Nikkah),
            "MEHNDI" => Ok(EventCategory::Mehndi),
            "BARAAT" => Ok(EventCategory::Baraat),
            "WALIMA" => Ok(EventCategory::Walima),
            "BIRTHDAY" => Ok(EventCategory::Birthday),
            other => Err(AppError::Internal(format!("Unknown event category: {other}"))),
        }
    }
}

/// Display language of the invite card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    En,
    Ur,
    Both,
}

impl Language {
    pub fn as_str(&self) -> &'static str {
        match self {
            Language::En => "EN",
            Language::Ur => "UR",
            Language::Both => "BOTH",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EN" => Ok(Language::En),
            "UR" => Ok(Language::Ur),
            "BOTH" => Ok(Language::Both),
            other => Err(AppError::Internal(format!("Unknown language: {other}"))),
        }
    }
}

/// Represents a persisted event invite.
///
/// Maps to the `invites` table:
/// - slug: VARCHAR(16) NOT NULL UNIQUE
/// - event_category / language: VARCHAR, uppercase enum names
/// - event_date: TIMESTAMP NOT NULL (venue wall-clock time, no zone)
/// - event_time: VARCHAR(8) NOT NULL (raw "HH:MM" input)
/// - view_count: BIGINT NOT NULL DEFAULT 0
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invite {
    /// Short public identifier used in the share URL
    pub slug: String,

    pub event_category: EventCategory,

    /// Card template the client renders
    pub template_key: String,

    pub event_title: String,

    /// Names shown on the card (couple, birthday person, ...)
    pub primary_names: String,

    /// Event date and time combined
    pub date: NaiveDateTime,

    /// Event time as entered
    pub time: String,

    pub venue_name: String,

    pub address: String,

    pub maps_url: Option<String>,

    pub custom_message: Option<String>,

    pub language: Language,

    /// Number of tracked page views
    pub view_count: i64,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

/// Validated input for creating an invite.
///
/// Everything the store needs except the identifier and timestamps.
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvite {
    pub event_category: EventCategory,
    pub event_title: String,
    pub primary_names: String,
    pub date: NaiveDateTime,
    pub time: String,
    pub venue_name: String,
    pub address: String,
    pub maps_url: Option<String>,
    pub custom_message: Option<String>,
    pub language: Language,
}

impl NewInvite {
    /// Build the stored record for this input under `slug`.
    pub fn into_invite(self, slug: String, now: DateTime<Utc>) -> Invite {
        Invite {
            slug,
            event_category: self.event_category,
            template_key: DEFAULT_TEMPLATE_KEY.to_string(),
            event_title: self.event_title,
            primary_names: self.primary_names,
            date: self.date,
            time: self.time,
            venue_name: self.venue_name,
            address: self.address,
            maps_url: self.maps_url,
            custom_message: self.custom_message,
            language: self.language,
            view_count: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Combine a `YYYY-MM-DD` date and an `HH:MM` time into one timestamp.
pub fn combine_event_date_time(date: &str, time: &str) -> Result<NaiveDateTime, chrono::ParseError> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M")?;
    Ok(date.and_time(time))
}

/// Repository trait for Invite data access operations.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait InviteRepository: Send + Sync {
    /// Persist a new invite under a freshly generated slug.
    ///
    /// A slug collision is reported as `AppError::DuplicateSlug`.
    async fn create(&self, invite: &NewInvite) -> Result<Invite, AppError>;

    /// Find an invite by its slug.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Invite>, AppError>;

    /// Atomically add one to the view count. Unknown slugs are ignored.
    async fn increment_view(&self, slug: &str) -> Result<(), AppError>;

    /// Check that the backing store is reachable.
    async fn ping(&self) -> Result<(), AppError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_combine_event_date_time() {
        let combined = combine_event_date_time("2025-06-01", "18:00").unwrap();
        assert_eq!(combined.to_string(), "2025-06-01 18:00:00");
        assert_eq!(
            serde_json::to_value(combined).unwrap(),
            serde_json::json!("2025-06-01T18:00:00")
        );
    }

    #[test]
    fn test_combine_rejects_bad_input() {
        assert!(combine_event_date_time("2025-13-01", "18:00").is_err());
        assert!(combine_event_date_time("2025-06-01", "25:00").is_err());
        assert!(combine_event_date_time("01/06/2025", "18:00").is_err());
        assert!(combine_event_date_time("2025-06-01", "6pm").is_err());
    }

    #[test]
    fn test_enum_round_trip_through_names() {
        for category in [
            EventCategory::Nikkah,
            EventCategory::Mehndi,
            EventCategory::Baraat,
            EventCategory::Walima,
            EventCategory::Birthday,
        ] {
            assert_eq!(category.as_str().parse::<EventCategory>().unwrap(), category);
        }
        assert_eq!("BOTH".parse::<Language>().unwrap(), Language::Both);
        assert!("nikkah".parse::<EventCategory>().is_err());
    }

    #[test]
    fn test_into_invite_applies_defaults() {
        let now = Utc::now();
        let invite = NewInvite {
            event_category: EventCategory::Birthday,
            event_title: "Zara turns 5".into(),
            primary_names: "Zara".into(),
            date: combine_event_date_time("2025-09-10", "16:30").unwrap(),
            time: "16:30".into(),
            venue_name: "Play Park".into(),
            address: "1 Park Lane".into(),
            maps_url: None,
            custom_message: None,
            language: Language::Ur,
        }
        .into_invite("k3j9x0".into(), now);

        assert_eq!(invite.template_key, DEFAULT_TEMPLATE_KEY);
        assert_eq!(invite.view_count, 0);
        assert_eq!(invite.created_at, invite.updated_at);
    }

    #[test]
    fn test_invite_serializes_camel_case() {
        let invite = NewInvite {
            event_category: EventCategory::Walima,
            event_title: "Walima".into(),
            primary_names: "Ali, Sara".into(),
            date: combine_event_date_time("2025-06-03", "20:00").unwrap(),
            time: "20:00".into(),
            venue_name: "Grand Hall".into(),
            address: "123 Main St".into(),
            maps_url: Some("https://maps.example.com/x".into()),
            custom_message: None,
            language: Language::Both,
        }
        .into_invite("abc123".into(), Utc::now());

        let json = serde_json::to_value(&invite).unwrap();
        assert_eq!(json["eventCategory"], "WALIMA");
        assert_eq!(json["templateKey"], DEFAULT_TEMPLATE_KEY);
        assert_eq!(json["mapsUrl"], "https://maps.example.com/x");
        assert_eq!(json["language"], "BOTH");
        assert_eq!(json["viewCount"], 0);
    }
}
