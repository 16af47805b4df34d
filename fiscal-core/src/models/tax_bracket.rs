use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::brackets::validate_brackets;
use crate::error::ConfigurationError;

/// One band of a progressive schedule.
///
/// The band starts where the previous one ends (0 for the first band) and
/// runs up to `upper_bound` inclusive. `None` marks the unbounded top band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn bounded(
        upper_bound: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            upper_bound: Some(upper_bound),
            rate,
        }
    }

    pub fn unbounded(rate: Decimal) -> Self {
        Self {
            upper_bound: None,
            rate,
        }
    }
}

/// A bracket schedule that has passed [`validate_brackets`].
///
/// Deserialization goes through the same validation, so a `BracketTable`
/// read from a file is as trustworthy as one built in code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Validates and wraps a schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when the schedule is empty, unsorted,
    /// has a non-positive bound, a misplaced unbounded band, a bounded top
    /// band, or a rate outside `[0, 1]`.
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, ConfigurationError> {
        validate_brackets(&brackets)?;
        Ok(Self { brackets })
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    pub fn len(&self) -> usize {
        self.brackets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brackets.is_empty()
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketTable {
    type Error = ConfigurationError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketTable> for Vec<TaxBracket> {
    fn from(table: BracketTable) -> Self {
        table.brackets
    }
}
