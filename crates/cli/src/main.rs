//! `builder`: inspect point pools, stats, validation and limit scaling of
//! character documents from the terminal.
//!
//! ```bash
//! builder pools hero.json
//! builder --output json validate hero.json
//! builder scale 90 --tier 6 --archetype normal
//! ```

mod commands;
mod config;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use commands::{Catalog, Pools, Scale, Stats, Validate};
use config::{CliConfig, OutputFormat};

/// Point-buy character builder tools
#[derive(Parser)]
#[command(name = "builder")]
#[command(about = "Inspect point-buy character documents", long_about = None)]
#[command(version)]
struct Cli {
    /// Ruleset directory (overrides RULES_DATA_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Output format (overrides RULES_OUTPUT)
    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    Pools(Pools),
    Stats(Stats),
    Validate(Validate),
    Scale(Scale),
    Catalog(Catalog),
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = CliConfig::from_env();
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(output) = cli.output {
        config.output = output;
    }

    match cli.command {
        Command::Pools(cmd) => cmd.execute(&config),
        Command::Stats(cmd) => cmd.execute(&config),
        Command::Validate(cmd) => cmd.execute(&config),
        Command::Scale(cmd) => cmd.execute(&config),
        Command::Catalog(cmd) => cmd.execute(&config),
    }
}
