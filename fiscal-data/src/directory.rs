use std::fs::{self, File};
use std::path::{Path, PathBuf};

use fiscal_core::{ReferenceData, ReferenceSource, SourceConfig, SourceError, SourceFactory};
use tracing::debug;

use crate::loader::{ReferenceBundle, ReferenceLoader};
use crate::{BRACKETS_FILE, PARAMETERS_FILE, STATUSES_FILE};

/// Reference data read from a directory holding `brackets.csv`,
/// `statuses.csv` and `parameters.toml`.
///
/// The files are read once, when the source is opened.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    bundle: ReferenceBundle,
}

impl DirectorySource {
    /// # Errors
    ///
    /// * [`SourceError::Io`] when a file is missing or unreadable.
    /// * [`SourceError::Parse`] or [`SourceError::InvalidReference`] when
    ///   the contents are invalid.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, SourceError> {
        let root = root.into();

        let brackets = open_file(&root.join(BRACKETS_FILE))?;
        let statuses = open_file(&root.join(STATUSES_FILE))?;
        let parameters_path = root.join(PARAMETERS_FILE);
        let parameters = fs::read_to_string(&parameters_path)
            .map_err(|e| SourceError::Io(format!("{}: {e}", parameters_path.display())))?;

        let bundle = ReferenceLoader::parse_bundle(brackets, statuses, &parameters)?;

        debug!(
            root = %root.display(),
            years = ?bundle.fiscal_years(),
            "opened reference directory"
        );
        Ok(Self { root, bundle })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn bundle(&self) -> &ReferenceBundle {
        &self.bundle
    }
}

fn open_file(path: &Path) -> Result<File, SourceError> {
    File::open(path).map_err(|e| SourceError::Io(format!("{}: {e}", path.display())))
}

impl ReferenceSource for DirectorySource {
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

/// Factory for the `directory` backend; `location` is the data directory.
pub struct DirectorySourceFactory;

impl SourceFactory for DirectorySourceFactory {
    fn backend_name(&self) -> &'static str {
        "directory"
    }

    fn create(
        &self,
        config: &SourceConfig,
    ) -> Result<Box<dyn ReferenceSource>, SourceError> {
        let location = config.location.as_ref().ok_or_else(|| {
            SourceError::Configuration("the directory source needs a data directory".to_string())
        })?;
        Ok(Box::new(DirectorySource::open(location)?))
    }
}
