use anyhow::{Result, anyhow, bail};
use clap::Parser;
use console::style;
use rules_core::archetype::SpecialAttackArchetype;
use rules_core::{calculate_limit_scaling, tier};

use super::{print_header, print_json};
use crate::config::{CliConfig, OutputFormat};

/// Convert limit points into upgrade points
#[derive(Parser)]
pub struct Scale {
    /// Total points of the limits on the attack
    #[arg(value_name = "LIMIT_POINTS")]
    limit_points: i32,

    /// Character tier
    #[arg(short, long, default_value_t = 4)]
    tier: i32,

    /// Special attack archetype (normal, specialist, straightforward, ...)
    #[arg(short, long, default_value = "normal")]
    archetype: String,
}

impl Scale {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        if !tier::is_valid_tier(self.tier) {
            bail!("tier {} is out of range", self.tier);
        }
        let archetype: SpecialAttackArchetype = self
            .archetype
            .parse()
            .map_err(|_| anyhow!("unknown special attack archetype '{}'", self.archetype))?;
        let scaling = calculate_limit_scaling(self.limit_points, self.tier, Some(archetype));

        if config.output == OutputFormat::Json {
            return print_json(&scaling);
        }

        print_header(&format!(
            "=== {} limit points, tier {}, {archetype} ===",
            self.limit_points, self.tier
        ));
        println!(
            "{} {:.3}",
            style("Rate multiplier:").bold().cyan(),
            scaling.rate_multiplier
        );
        for line in scaling.breakdown() {
            println!("  {line}");
        }
        match scaling.points_to_next_bucket() {
            Some(points) => println!(
                "{} {points} more limit points",
                style("Next increase:").bold().cyan()
            ),
            None => println!("{} never", style("Next increase:").bold().cyan()),
        }
        Ok(())
    }
}
