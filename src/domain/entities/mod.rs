//! # Domain Entities
//!
//! The invite record and its repository contract. Repository traits are
//! implemented in the infrastructure layer.

mod invite;

pub use invite::{
    combine_event_date_time, EventCategory, Invite, InviteRepository, Language, NewInvite,
    DEFAULT_TEMPLATE_KEY, MAX_CUSTOM_MESSAGE_CHARS,
};

#[cfg(test)]
pub use invite::MockInviteRepository;
