//! Optional TOML configuration file.
//!
//! ```toml
//! source = "directory"
//! data_dir = "/etc/fiscal-sim/data"
//! fiscal_year = 2025
//! output = "json"
//! log_level = "info"
//! log_file = "/var/log/fiscal-sim.log"
//! ```
//!
//! Every key is optional; command-line flags win over file values.

use std::path::{Path, PathBuf};

use fiscal_core::SourceConfig;
use serde::Deserialize;
use thiserror::Error;

use crate::output::OutputFormat;

pub const DEFAULT_LOG_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Values read from the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    pub source: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub fiscal_year: Option<i32>,
    pub output: Option<OutputFormat>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

impl CliConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }
}

/// Global command-line flags, all optional so they can fall back to the
/// config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub source: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub fiscal_year: Option<i32>,
    pub output: Option<OutputFormat>,
    pub log_level: Option<String>,
    pub log_file: Option<PathBuf>,
}

/// Effective settings after merging flags over the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub source: SourceConfig,
    /// `None` means the latest year the source holds.
    pub fiscal_year: Option<i32>,
    pub output: OutputFormat,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Settings {
    /// Flags win over the file. A data directory without an explicit
    /// backend selects the `directory` source.
    pub fn resolve(
        file: CliConfig,
        flags: Overrides,
    ) -> Self {
        let data_dir = flags.data_dir.or(file.data_dir);
        let backend = flags
            .source
            .or(file.source)
            .unwrap_or_else(|| match data_dir {
                Some(_) => "directory".to_string(),
                None => SourceConfig::default().backend,
            });

        Self {
            source: SourceConfig {
                backend,
                location: data_dir,
            },
            fiscal_year: flags.fiscal_year.or(file.fiscal_year),
            output: flags.output.or(file.output).unwrap_or_default(),
            log_level: flags
                .log_level
                .or(file.log_level)
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
            log_file: flags.log_file.or(file.log_file),
        }
    }
}
