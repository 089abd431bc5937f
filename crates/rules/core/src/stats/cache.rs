//! Change-detecting cache for the stat pipeline.
//!
//! One `StatCache` belongs to one character document. It remembers the last
//! result together with a SHA-256 fingerprint of the bincode-encoded
//! document, so any change anywhere in the document (nested purchase lists
//! included) forces a recompute. The cache assumes the same catalog on every
//! call.

use sha2::{Digest, Sha256};

use super::{CharacterStats, calculate_all_stats};
use crate::catalog::Catalog;
use crate::character::Character;
use crate::config::RulesConfig;

pub type Fingerprint = [u8; 32];

/// Fingerprint of everything the stat pipeline can read from a document.
///
/// `None` only if the document cannot be encoded, in which case callers
/// should not cache.
pub fn fingerprint(character: &Character) -> Option<Fingerprint> {
    match bincode::serialize(character) {
        Ok(bytes) => Some(Sha256::digest(&bytes).into()),
        Err(err) => {
            tracing::warn!(%err, "character could not be fingerprinted; stat cache bypassed");
            None
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct StatCache {
    enabled: bool,
    entry: Option<(Fingerprint, CharacterStats)>,
    hits: u64,
    misses: u64,
}

impl StatCache {
    pub fn new() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    pub fn from_config(config: &RulesConfig) -> Self {
        Self {
            enabled: config.stat_cache_enabled,
            ..Self::default()
        }
    }

    /// Stats for `character`, reusing the previous result when unchanged.
    pub fn calculate_all_stats(
        &mut self,
        character: &Character,
        catalog: &Catalog,
    ) -> CharacterStats {
        if !self.enabled {
            self.misses += 1;
            return calculate_all_stats(character, catalog);
        }
        let Some(current) = fingerprint(character) else {
            self.misses += 1;
            return calculate_all_stats(character, catalog);
        };
        if let Some((cached, stats)) = &self.entry {
            if *cached == current {
                self.hits += 1;
                tracing::trace!("stat cache hit");
                return stats.clone();
            }
        }
        self.misses += 1;
        let stats = calculate_all_stats(character, catalog);
        self.entry = Some((current, stats.clone()));
        stats
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
