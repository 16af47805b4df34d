use fiscal_core::{ReferenceData, ReferenceSource, SourceConfig, SourceError, SourceFactory};
use tracing::debug;

use crate::loader::{ReferenceBundle, ReferenceLoader, ReferenceLoaderError};

const BRACKETS_CSV: &str = include_str!("../data/brackets.csv");
const STATUSES_CSV: &str = include_str!("../data/statuses.csv");
const PARAMETERS_TOML: &str = include_str!("../data/parameters.toml");

/// Reference data compiled into the binary.
#[derive(Debug, Clone)]
pub struct EmbeddedSource {
    bundle: ReferenceBundle,
}

impl EmbeddedSource {
    /// Parses the embedded files.
    ///
    /// # Errors
    ///
    /// Only fails if the files shipped with the crate are broken.
    pub fn new() -> Result<Self, ReferenceLoaderError> {
        let bundle = ReferenceLoader::parse_bundle(
            BRACKETS_CSV.as_bytes(),
            STATUSES_CSV.as_bytes(),
            PARAMETERS_TOML,
        )?;
        debug!(years = ?bundle.fiscal_years(), "parsed embedded reference data");
        Ok(Self { bundle })
    }

    pub fn bundle(&self) -> &ReferenceBundle {
        &self.bundle
    }
}

impl ReferenceSource for EmbeddedSource {
    fn list_fiscal_years(&self) -> Result<Vec<i32>, SourceError> {
        Ok(self.bundle.fiscal_years())
    }

    fn load(
        &self,
        fiscal_year: i32,
    ) -> Result<ReferenceData, SourceError> {
        Ok(self.bundle.reference(fiscal_year)?)
    }
}

/// Factory for the `embedded` backend. The configured location is ignored.
pub struct EmbeddedSourceFactory;

impl SourceFactory for EmbeddedSourceFactory {
    fn backend_name(&self) -> &'static str {
        "embedded"
    }

    fn create(
        &self,
        _config: &SourceConfig,
    ) -> Result<Box<dyn ReferenceSource>, SourceError> {
        Ok(Box::new(EmbeddedSource::new()?))
    }
}
