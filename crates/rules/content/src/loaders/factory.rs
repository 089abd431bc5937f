//! Content factory for loading a whole ruleset from a data directory.

use std::path::{Path, PathBuf};

use rules_core::{Catalog, Character, RulesConfig};

use crate::loaders::{CatalogLoader, CharacterLoader, ConfigLoader, LoadResult};

/// Loads all rules content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── config.toml
/// └── catalog/
///     ├── limits.ron
///     ├── upgrades.ron
///     ├── main_pool.ron
///     ├── utility.ron
///     └── conditions.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Factory over the ruleset shipped with this crate.
    pub fn bundled() -> Self {
        Self::new(Self::bundled_data_dir())
    }

    pub fn bundled_data_dir() -> PathBuf {
        Path::new(env!("CARGO_MANIFEST_DIR")).join("data")
    }

    /// Load engine configuration from `config.toml`.
    pub fn load_config(&self) -> LoadResult<RulesConfig> {
        ConfigLoader::load(&self.data_dir.join("config.toml"))
    }

    /// Load and index the catalog from `catalog/`.
    pub fn load_catalog(&self) -> LoadResult<Catalog> {
        CatalogLoader::load_dir(&self.data_dir.join("catalog"))
    }

    /// Load a character document against an already loaded catalog.
    pub fn load_character(&self, path: &Path, catalog: &Catalog) -> LoadResult<Character> {
        CharacterLoader::load(path, catalog)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factory_paths() {
        let factory = ContentFactory::new("/tmp/data");
        assert_eq!(factory.data_dir(), Path::new("/tmp/data"));
        assert!(ContentFactory::bundled().data_dir().ends_with("data"));
    }

    #[test]
    fn missing_directory_reports_the_path() {
        let factory = ContentFactory::new("/nonexistent/rules");
        let err = factory.load_config().unwrap_err();
        assert!(err.to_string().contains("/nonexistent/rules/config.toml"));
    }
}
