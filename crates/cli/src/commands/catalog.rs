use anyhow::Result;
use clap::Parser;
use console::style;
use rules_core::{ArchetypeCategory, archetypes_for_category};
use strum::IntoEnumIterator;

use super::{Rules, print_header};
use crate::config::CliConfig;

/// List the entries of the loaded ruleset
#[derive(Parser)]
pub struct Catalog {
    /// Which section to list
    #[arg(value_enum, default_value = "summary")]
    section: Section,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum Section {
    /// Entry counts per kind
    Summary,
    /// Archetypes of every category
    Archetypes,
    /// The limit hierarchy
    Limits,
    Upgrades,
    Boons,
    Traits,
    Flaws,
    Conditions,
}

impl Catalog {
    pub fn execute(self, config: &CliConfig) -> Result<()> {
        if let Section::Archetypes = self.section {
            for category in ArchetypeCategory::iter() {
                print_header(&format!("=== {category} ==="));
                for info in archetypes_for_category(category) {
                    println!("  {:<20} {}", info.id, style(info.description).dim());
                }
            }
            return Ok(());
        }

        let rules = Rules::load(config)?;
        let catalog = &rules.catalog;
        match self.section {
            Section::Summary => {
                print_header(&format!("=== {} ===", config.data_dir.display()));
                for (kind, count) in catalog.counts() {
                    println!("  {kind:<24} {count:>4}");
                }
            }
            Section::Limits => {
                for node in catalog.limits().iter() {
                    let indent = match node.level {
                        rules_core::LimitLevel::Main => "",
                        rules_core::LimitLevel::Variant => "  ",
                        rules_core::LimitLevel::Modifier => "    ",
                    };
                    println!(
                        "  {indent}{:<28} {:?}",
                        node.id(),
                        node.definition.cost
                    );
                }
            }
            Section::Upgrades => {
                for upgrade in catalog.upgrades().iter() {
                    println!("  {:<24} {:<28} {:?}", upgrade.id, upgrade.name, upgrade.cost);
                }
            }
            Section::Boons => {
                for boon in catalog.boons().iter() {
                    println!("  {:<24} {:<28} {:?}", boon.id, boon.name, boon.cost);
                }
            }
            Section::Traits => {
                for entry in catalog.traits().iter() {
                    println!(
                        "  {:<24} {:<28} up to {} stat(s)",
                        entry.id, entry.name, entry.max_stat_bonuses
                    );
                }
            }
            Section::Flaws => {
                for flaw in catalog.flaws().iter() {
                    println!("  {:<24} {}", flaw.id, style(&flaw.description).dim());
                }
            }
            Section::Conditions => {
                for condition in catalog.conditions().iter() {
                    println!("  {:<24} {:<28} {}", condition.id, condition.name, condition.tier);
                }
            }
            Section::Archetypes => {}
        }
        Ok(())
    }
}
