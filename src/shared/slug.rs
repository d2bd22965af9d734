//! Slug Generator
//!
//! Short random public identifiers for invites. Slugs are drawn uniformly
//! from a lowercase base-36 alphabet and are not checked against existing
//! records; the store's unique index is the only collision guard.

use rand::Rng;

/// Characters a slug may contain.
pub const SLUG_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Default slug length.
pub const SLUG_LENGTH: usize = 6;

/// Random slug generator.
#[derive(Debug, Clone)]
pub struct SlugGenerator {
    length: usize,
}

impl SlugGenerator {
    /// Create a generator producing slugs of `length` characters.
    pub fn new(length: usize) -> Self {
        Self { length }
    }

    /// Generate the next slug.
    pub fn generate(&self) -> String {
        let mut rng = rand::rng();
        (0..self.length)
            .map(|_| {
                let idx = rng.random_range(0..SLUG_ALPHABET.len());
                SLUG_ALPHABET[idx] as char
            })
            .collect()
    }
}

impl Default for SlugGenerator {
    fn default() -> Self {
        Self::new(SLUG_LENGTH)
    }
}
