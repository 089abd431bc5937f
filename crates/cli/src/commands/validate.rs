use anyhow::{Result, bail};
use clap::Parser;
use console::style;
use rules_core::{BuildPhase, CharacterValidator};
use strum::IntoEnumIterator;

use super::{CharacterPath, Rules, print_header, print_json};
use crate::config::{CliConfig, OutputFormat};

/// Validate a character and list every error and warning
#[derive(Parser)]
pub struct Validate {
    #[command(flatten)]
    character: CharacterPath,

    /// Exit with an error when warnings are present
    #[arg(long)]
    strict: bool,
}

impl Validate {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let rules = Rules::load(config)?;
        let character = rules.character(&self.character.path)?;
        let report = CharacterValidator::new(&rules.catalog, &rules.config).validate(&character);

        if config.output == OutputFormat::Json {
            print_json(&report)?;
        } else {
            print_header("=== Build Progress ===");
            for phase in BuildPhase::iter() {
                let mark = if report.build_state.can_access(phase) {
                    style("open").green()
                } else {
                    style("locked").yellow()
                };
                println!("  {phase:<16} {mark}");
            }
            println!();

            print_header("=== Findings ===");
            for issue in &report.errors {
                println!("  {} {issue}", style("error").red().bold());
            }
            for issue in &report.warnings {
                println!("  {} {issue}", style("warning").yellow());
            }
            if report.errors.is_empty() && report.warnings.is_empty() {
                println!("  none");
            }
        }

        if !report.is_valid {
            bail!("{} validation error(s)", report.errors.len());
        }
        if self.strict && !report.warnings.is_empty() {
            bail!("{} validation warning(s)", report.warnings.len());
        }
        Ok(())
    }
}
