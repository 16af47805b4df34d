//! Reference data for the status simulator: bracket tables, the legal-status
//! table and yearly rates, read from CSV and TOML files.

mod directory;
mod embedded;
mod loader;

pub use directory::{DirectorySource, DirectorySourceFactory};
pub use embedded::{EmbeddedSource, EmbeddedSourceFactory};
pub use loader::{
    BracketRecord, ReferenceBundle, ReferenceLoader, ReferenceLoaderError, Schedule,
};

use fiscal_core::SourceRegistry;

pub const BRACKETS_FILE: &str = "brackets.csv";
pub const STATUSES_FILE: &str = "statuses.csv";
pub const PARAMETERS_FILE: &str = "parameters.toml";

/// Registry with every source this crate provides.
pub fn default_registry() -> SourceRegistry {
    let mut registry = SourceRegistry::new();
    registry.register(Box::new(EmbeddedSourceFactory));
    registry.register(Box::new(DirectorySourceFactory));
    registry
}
