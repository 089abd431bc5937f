use anyhow::{Result, anyhow};
use clap::Parser;
use console::style;
use rules_core::{CharacterBuilder, StatCategory};
use strum::IntoEnumIterator;

use super::{CharacterPath, Rules, print_header, print_json};
use crate::config::{CliConfig, OutputFormat};

/// Show every derived stat of a character
#[derive(Parser)]
pub struct Stats {
    #[command(flatten)]
    character: CharacterPath,

    /// Only one category: combat, defense or utility
    #[arg(short, long, value_name = "CATEGORY")]
    category: Option<String>,

    /// List every contribution behind the totals
    #[arg(short, long)]
    explain: bool,
}

impl Stats {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let category = self
            .category
            .as_deref()
            .map(|raw| {
                raw.parse::<StatCategory>()
                    .map_err(|_| anyhow!("unknown stat category '{raw}'"))
            })
            .transpose()?;

        let rules = Rules::load(config)?;
        let character = rules.character(&self.character.path)?;
        let mut builder = CharacterBuilder::from_character(&rules.catalog, rules.config, character);

        if let Some(category) = category {
            let section = builder.calculate_specific_stats(category);
            if config.output == OutputFormat::Json {
                return print_json(&section);
            }
            print_header(&format!("=== {category} ==="));
            for (stat, value) in section {
                println!("  {stat:<20} {value:>5}");
            }
            return Ok(());
        }

        let stats = builder.calculate_all_stats();
        if config.output == OutputFormat::Json {
            return print_json(&stats);
        }

        for category in StatCategory::iter() {
            print_header(&format!("=== {category} ==="));
            for (stat, value) in stats.section(category) {
                println!("  {stat:<20} {value:>5}");
            }
            println!();
        }
        if !stats.immunities.is_empty() {
            println!("{} {:?}", style("Immunities:").bold().cyan(), stats.immunities);
        }
        if !stats.vulnerabilities.is_empty() {
            println!(
                "{} {:?}",
                style("Vulnerabilities:").bold().cyan(),
                stats.vulnerabilities
            );
        }
        if stats.passive_healing {
            println!("{}", style("Passive healing").bold().cyan());
        }

        if self.explain {
            println!();
            print_header("=== Contributions ===");
            for entry in &stats.contributions {
                println!(
                    "  {:<10} {:<24} {:<16} {:+}",
                    entry.stage, entry.source, entry.stat, entry.amount
                );
            }
        }
        Ok(())
    }
}
