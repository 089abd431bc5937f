//! Environment configuration for the `builder` binary.
use std::env;
use std::path::PathBuf;

use rules_content::ContentFactory;

/// How command results are printed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Aligned, colored text for terminals
    #[default]
    Text,
    /// Pretty-printed JSON for scripts
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format '{other}' (expected text or json)")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CliConfig {
    /// Root holding `config.toml` and `catalog/`.
    pub data_dir: PathBuf,
    pub output: OutputFormat,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: ContentFactory::bundled_data_dir(),
            output: OutputFormat::default(),
        }
    }
}

impl CliConfig {
    /// Construct configuration from process environment variables.
    ///
    /// - `RULES_DATA_DIR`
    /// - `RULES_OUTPUT` (`text` or `json`)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(dir) = lookup("RULES_DATA_DIR").filter(|dir| !dir.trim().is_empty()) {
            config.data_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup("RULES_OUTPUT") {
            match raw.parse() {
                Ok(output) => config.output = output,
                Err(err) => tracing::warn!("ignoring RULES_OUTPUT: {err}"),
            }
        }

        config
    }
}
