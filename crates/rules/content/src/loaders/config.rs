//! Engine configuration loader.

use std::path::Path;

use rules_core::RulesConfig;

use crate::loaders::{LoadResult, read_file};

/// Loader for [`RulesConfig`] from TOML files.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load config data from a TOML file.
    ///
    /// Missing keys keep their defaults. The default tier must be a valid tier.
    pub fn load(path: &Path) -> LoadResult<RulesConfig> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<RulesConfig> {
        let config: RulesConfig = toml::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config TOML: {}", e))?;
        if !rules_core::tier::is_valid_tier(config.default_tier) {
            anyhow::bail!(
                "default_tier {} is outside {}..={}",
                config.default_tier,
                RulesConfig::TIER_MIN,
                RulesConfig::TIER_MAX
            );
        }
        tracing::debug!(?config, "config loaded");
        Ok(config)
    }
}
