use serde::{Deserialize, Serialize};

use super::{BracketTable, FiscalParameters};
use crate::error::ConfigurationError;
use crate::rules::StatusTable;

/// Everything a simulation reads, for one fiscal year.
///
/// Built once at startup and shared by reference; nothing in it changes
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceData {
    pub fiscal_year: i32,
    pub parameters: FiscalParameters,
    /// Personal income tax schedule (barème de l'impôt sur le revenu).
    pub income_tax_brackets: BracketTable,
    /// Corporate tax schedule: reduced rate up to a threshold, standard rate
    /// above it.
    pub corporate_tax_brackets: BracketTable,
    pub statuses: StatusTable,
}

impl ReferenceData {
    /// Assembles the reference data after checking the parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] if the parameters are invalid or were
    /// published for another fiscal year.
    pub fn new(
        fiscal_year: i32,
        parameters: FiscalParameters,
        income_tax_brackets: BracketTable,
        corporate_tax_brackets: BracketTable,
        statuses: StatusTable,
    ) -> Result<Self, ConfigurationError> {
        if parameters.fiscal_year != fiscal_year {
            return Err(ConfigurationError::FiscalYearMismatch {
                expected: fiscal_year,
                found: parameters.fiscal_year,
            });
        }
        parameters.validate()?;

        Ok(Self {
            fiscal_year,
            parameters,
            income_tax_brackets,
            corporate_tax_brackets,
            statuses,
        })
    }
}
