//! Subcommand implementations.
//!
//! Each command owns its clap arguments and an `execute` method taking the
//! resolved [`CliConfig`].

mod catalog;
mod pools;
mod scale;
mod stats;
mod validate;

pub use catalog::Catalog;
pub use pools::Pools;
pub use scale::Scale;
pub use stats::Stats;
pub use validate::Validate;

use std::path::{Path, PathBuf};

use anyhow::Result;
use console::style;
use rules_content::ContentFactory;
use rules_core::{Catalog as RulesCatalog, Character, RulesConfig};
use serde::Serialize;

use crate::config::CliConfig;

/// Ruleset data loaded from the configured data directory.
pub(crate) struct Rules {
    pub factory: ContentFactory,
    pub catalog: RulesCatalog,
    pub config: RulesConfig,
}

impl Rules {
    pub fn load(config: &CliConfig) -> Result<Self> {
        let factory = ContentFactory::new(&config.data_dir);
        let rules_config = factory.load_config()?;
        let catalog = factory.load_catalog()?;
        tracing::debug!(data_dir = %config.data_dir.display(), "ruleset loaded");
        Ok(Self {
            factory,
            catalog,
            config: rules_config,
        })
    }

    pub fn character(&self, path: &Path) -> Result<Character> {
        self.factory.load_character(path, &self.catalog)
    }
}

/// Positional path to a character document.
#[derive(clap::Args)]
pub(crate) struct CharacterPath {
    /// Character document (JSON)
    #[arg(value_name = "CHARACTER")]
    pub path: PathBuf,
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn print_header(title: &str) {
    println!("{}", style(title).bold().green());
}
