use anyhow::Result;
use clap::Parser;
use console::style;
use rules_core::{Pool, calculate_all_pools};

use super::{CharacterPath, Rules, print_header, print_json};
use crate::config::{CliConfig, OutputFormat};

/// Show available, spent and remaining points for every pool
#[derive(Parser)]
pub struct Pools {
    #[command(flatten)]
    character: CharacterPath,
}

impl Pools {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        let rules = Rules::load(config)?;
        let character = rules.character(&self.character.path)?;
        let pools = calculate_all_pools(&character, &rules.catalog)?;

        if config.output == OutputFormat::Json {
            return print_json(&pools);
        }

        print_header(&format!("=== Point Pools (tier {}) ===", character.tier));
        println!(
            "  {:<32} {:>9} {:>6} {:>9}",
            "pool", "available", "spent", "remaining"
        );
        for (name, pool) in pools.named() {
            println!("  {}", format_row(&name, pool));
        }
        for attack in &pools.special_attacks.attacks {
            println!(
                "  {} {} funded by {}",
                style("·").dim(),
                attack.name,
                attack.method
            );
        }
        Ok(())
    }
}

fn format_row(name: &str, pool: Pool) -> String {
    let remaining = if pool.is_over_budget() {
        style(pool.remaining).red().bold().to_string()
    } else {
        pool.remaining.to_string()
    };
    format!(
        "{name:<32} {:>9} {:>6} {remaining:>9}",
        pool.available, pool.spent
    )
}
