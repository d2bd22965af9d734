//! Invite Repository Implementation
//!
//! PostgreSQL implementation of invite persistence.
//! Handles slug assignment on insert and atomic view counting.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Invite, InviteRepository, NewInvite, DEFAULT_TEMPLATE_KEY};
use crate::shared::error::AppError;
use crate::shared::slug::SlugGenerator;

/// Row shape of the `invites` table.
///
/// Enum columns are stored as their uppercase names.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct InviteEntity {
    pub slug: String,
    pub event_category: String,
    pub template_key: String,
    pub event_title: String,
    pub primary_names: String,
    pub event_date: NaiveDateTime,
    pub event_time: String,
    pub venue_name: String,
    pub address: String,
    pub maps_url: Option<String>,
    pub custom_message: Option<String>,
    pub language: String,
    pub view_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl TryFrom<InviteEntity> for Invite {
    type Error = AppError;

    fn try_from(row: InviteEntity) -> Result<Self, Self::Error> {
        Ok(Invite {
            slug: row.slug,
            event_category: row.event_category.parse()?,
            template_key: row.template_key,
            event_title: row.event_title,
            primary_names: row.primary_names,
            date: row.event_date,
            time: row.event_time,
            venue_name: row.venue_name,
            address: row.address,
            maps_url: row.maps_url,
            custom_message: row.custom_message,
            language: row.language.parse()?,
            view_count: row.view_count,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

/// PostgreSQL implementation of the InviteRepository.
pub struct PgInviteRepository {
    pool: PgPool,
    slugs: Arc<SlugGenerator>,
}

impl PgInviteRepository {
    /// Creates a new PgInviteRepository with the given connection pool.
    pub fn new(pool: PgPool, slugs: Arc<SlugGenerator>) -> Self {
        Self { pool, slugs }
    }
}

#[async_trait]
impl InviteRepository for PgInviteRepository {
    /// Insert a new invite.
    ///
    /// The slug is not checked beforehand; the unique index rejects collisions.
    async fn create(&self, invite: &NewInvite) -> Result<Invite, AppError> {
        let slug = self.slugs.generate();

        let created = sqlx::query_as::<_, InviteEntity>(
            r#"
            INSERT INTO invites (slug, event_category, template_key, event_title, primary_names,
                                 event_date, event_time, venue_name, address, maps_url,
                                 custom_message, language)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING slug, event_category, template_key, event_title, primary_names,
                      event_date, event_time, venue_name, address, maps_url,
                      custom_message, language, view_count, created_at, updated_at
            "#,
        )
        .bind(&slug)
        .bind(invite.event_category.as_str())
        .bind(DEFAULT_TEMPLATE_KEY)
        .bind(&invite.event_title)
        .bind(&invite.primary_names)
        .bind(invite.date)
        .bind(&invite.time)
        .bind(&invite.venue_name)
        .bind(&invite.address)
        .bind(&invite.maps_url)
        .bind(&invite.custom_message)
        .bind(invite.language.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                AppError::DuplicateSlug(slug.clone())
            }
            other => AppError::Database(other),
        })?;

        created.try_into()
    }

    /// Find an invite by its slug.
    ///
    /// Returns None if the invite does not exist.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Invite>, AppError> {
        let row = sqlx::query_as::<_, InviteEntity>(
            r#"
            SELECT slug, event_category, template_key, event_title, primary_names,
                   event_date, event_time, venue_name, address, maps_url,
                   custom_message, language, view_count, created_at, updated_at
            FROM invites
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Invite::try_from).transpose()
    }

    /// Increment the view count of an invite.
    ///
    /// Single-statement update so concurrent views never overwrite each other.
    async fn increment_view(&self, slug: &str) -> Result<(), AppError> {
        sqlx::query(
            r#"
            UPDATE invites
            SET view_count = view_count + 1, updated_at = NOW()
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
