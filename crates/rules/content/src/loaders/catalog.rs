//! Ruleset catalog loader.
//!
//! Each catalog file is a partial [`CatalogSnapshot`]: it lists only the
//! sections it owns. The loader merges the files in a fixed order and hands
//! the result to [`Catalog::from_snapshot`], which indexes it and checks the
//! limit hierarchy.

use std::path::Path;

use rules_core::{Catalog, CatalogSnapshot};

use crate::loaders::{LoadResult, read_file};

/// Catalog files under a catalog directory, in merge order.
pub const CATALOG_FILES: &[&str] = &[
    "limits.ron",
    "upgrades.ron",
    "main_pool.ron",
    "utility.ron",
    "conditions.ron",
];

/// Loader for ruleset catalogs from RON files.
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load one partial catalog file.
    pub fn load_snapshot(path: &Path) -> LoadResult<CatalogSnapshot> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse catalog RON {}: {}", path.display(), e))
    }

    /// Load and merge every file in [`CATALOG_FILES`] from `dir`.
    pub fn load_dir(dir: &Path) -> LoadResult<Catalog> {
        let mut merged = CatalogSnapshot::default();
        for name in CATALOG_FILES {
            let part = Self::load_snapshot(&dir.join(name))?;
            merge(&mut merged, part);
        }
        Self::build(merged)
    }

    /// Index a merged snapshot.
    pub fn build(snapshot: CatalogSnapshot) -> LoadResult<Catalog> {
        let catalog = Catalog::from_snapshot(snapshot)
            .map_err(|e| anyhow::anyhow!("Invalid catalog: {}", e))?;
        for (kind, count) in catalog.counts() {
            tracing::debug!(%kind, count, "catalog entries loaded");
        }
        Ok(catalog)
    }
}

fn merge(into: &mut CatalogSnapshot, part: CatalogSnapshot) {
    into.limits.extend(part.limits);
    into.upgrades.extend(part.upgrades);
    into.boons.extend(part.boons);
    into.traits.extend(part.traits);
    into.flaws.extend(part.flaws);
    into.primary_action_upgrades.extend(part.primary_action_upgrades);
    into.expertise.extend(part.expertise);
    into.features.extend(part.features);
    into.senses.extend(part.senses);
    into.movement.extend(part.movement);
    into.descriptors.extend(part.descriptors);
    into.conditions.extend(part.conditions);
}
