//! Character document load and save.
//!
//! Documents are camelCase JSON. Loading recomputes every attack's stored
//! point totals so the cached fields always agree with the catalog in use.

use std::path::Path;

use rules_core::systems::special_attacks::recalculate_all_attacks;
use rules_core::{Catalog, Character};

use crate::loaders::{LoadResult, read_file};

/// Loader for character documents.
pub struct CharacterLoader;

impl CharacterLoader {
    /// Parse a document without touching its cached fields.
    pub fn parse(content: &str) -> LoadResult<Character> {
        serde_json::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse character JSON: {}", e))
    }

    /// Read a document from disk and refresh its attack point caches.
    pub fn load(path: &Path, catalog: &Catalog) -> LoadResult<Character> {
        let content = read_file(path)?;
        let mut character = Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
        recalculate_all_attacks(&mut character, catalog);
        tracing::debug!(
            path = %path.display(),
            tier = character.tier,
            attacks = character.special_attacks.len(),
            "character loaded"
        );
        Ok(character)
    }

    pub fn to_json(character: &Character) -> LoadResult<String> {
        serde_json::to_string_pretty(character)
            .map_err(|e| anyhow::anyhow!("Failed to serialize character: {}", e))
    }

    pub fn save(path: &Path, character: &Character) -> LoadResult<()> {
        let json = Self::to_json(character)?;
        std::fs::write(path, json)
            .map_err(|e| anyhow::anyhow!("Failed to write file {}: {}", path.display(), e))?;
        tracing::debug!(path = %path.display(), "character saved");
        Ok(())
    }
}
