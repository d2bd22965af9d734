//! In-Memory Invite Repository
//!
//! Process-local store backed by a sharded concurrent map. Used when
//! `storage.backend = "memory"` and by the test suites.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::domain::{Invite, InviteRepository, NewInvite};
use crate::shared::error::AppError;
use crate::shared::slug::SlugGenerator;

/// DashMap-backed implementation of the InviteRepository.
///
/// The map key is the slug, so uniqueness holds per entry.
#[derive(Default)]
pub struct InMemoryInviteRepository {
    invites: DashMap<String, Invite>,
    slugs: Arc<SlugGenerator>,
}

impl InMemoryInviteRepository {
    pub fn new(slugs: Arc<SlugGenerator>) -> Self {
        Self {
            invites: DashMap::new(),
            slugs,
        }
    }

    /// Number of stored invites.
    pub fn len(&self) -> usize {
        self.invites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invites.is_empty()
    }
}

#[async_trait]
impl InviteRepository for InMemoryInviteRepository {
    async fn create(&self, invite: &NewInvite) -> Result<Invite, AppError> {
        let slug = self.slugs.generate();

        match self.invites.entry(slug.clone()) {
            Entry::Occupied(_) => Err(AppError::DuplicateSlug(slug)),
            Entry::Vacant(slot) => {
                let stored = invite.clone().into_invite(slug, Utc::now());
                slot.insert(stored.clone());
                Ok(stored)
            }
        }
    }

    async fn find_by_slug(&self, slug: &str) -> Result<Option<Invite>, AppError> {
        Ok(self.invites.get(slug).map(|entry| entry.value().clone()))
    }

    async fn increment_view(&self, slug: &str) -> Result<(), AppError> {
        // get_mut holds the shard write lock for the whole update
        if let Some(mut invite) = self.invites.get_mut(slug) {
            invite.view_count += 1;
            invite.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}
