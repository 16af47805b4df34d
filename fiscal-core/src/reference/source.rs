use thiserror::Error;

use crate::error::ConfigurationError;
use crate::models::ReferenceData;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SourceError {
    #[error("no reference data for fiscal year {0}")]
    YearNotFound(i32),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("invalid reference data: {0}")]
    InvalidReference(#[from] ConfigurationError),
}

/// Provider of yearly reference data.
pub trait ReferenceSource: Send + Sync {
    /// Fiscal years this source can load, ascending.
    fn list_fiscal_years(&self) -> Result<Vec<i32>, SourceError>;

    fn load(
        &self,
        fiscal_year: i32,
    ) -> Result<ReferenceData, SourceError>;

    /// Most recent fiscal year available.
    fn latest(&self) -> Result<ReferenceData, SourceError> {
        let year = self
            .list_fiscal_years()?
            .into_iter()
            .max()
            .ok_or_else(|| SourceError::Configuration("source holds no fiscal year".to_string()))?;
        self.load(year)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::test_support::reference_2024;

    struct FixedSource {
        years: Vec<i32>,
    }

    impl ReferenceSource for FixedSource {
        fn list_fiscal_years(&self) -> Result<Vec<i32>, SourceError> {
            Ok(self.years.clone())
        }

        fn load(
            &self,
            fiscal_year: i32,
        ) -> Result<ReferenceData, SourceError> {
            if !self.years.contains(&fiscal_year) {
                return Err(SourceError::YearNotFound(fiscal_year));
            }
            let mut data = reference_2024();
            data.fiscal_year = fiscal_year;
            Ok(data)
        }
    }

    #[test]
    fn latest_loads_highest_year() {
        let source = FixedSource {
            years: vec![2025, 2023, 2024],
        };

        assert_eq!(source.latest().unwrap().fiscal_year, 2025);
    }

    #[test]
    fn latest_on_empty_source_fails() {
        let source = FixedSource { years: vec![] };

        assert!(matches!(
            source.latest(),
            Err(SourceError::Configuration(_))
        ));
    }

    #[test]
    fn configuration_error_converts() {
        let err: SourceError = ConfigurationError::EmptyBracketTable.into();

        assert_eq!(
            err.to_string(),
            "invalid reference data: bracket table is empty"
        );
    }
}
