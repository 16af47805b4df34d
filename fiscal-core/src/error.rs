use rust_decimal::Decimal;
use thiserror::Error;

use crate::models::MicroActivity;

/// Reference data that cannot be used for calculations.
///
/// These errors point at corrupted tables or parameter files, never at user
/// input, and are not expected to be recovered from.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("bracket table is empty")]
    EmptyBracketTable,

    #[error("bracket {index} has a non-positive upper bound {bound}")]
    NonPositiveBound { index: usize, bound: Decimal },

    #[error("bracket {index} upper bound {bound} does not exceed the previous bound {previous}")]
    UnsortedBrackets {
        index: usize,
        previous: Decimal,
        bound: Decimal,
    },

    #[error("bracket {index} is unbounded but is not the top bracket")]
    UnboundedBracketNotLast { index: usize },

    #[error("top bracket must be unbounded")]
    BoundedTopBracket,

    #[error("{name} must be between 0 and 1, got {value}")]
    RateOutOfRange { name: String, value: Decimal },

    #[error("{name} must not be negative, got {value}")]
    NegativeAmount { name: String, value: Decimal },

    #[error("status '{0}' is declared more than once")]
    DuplicateStatus(String),

    #[error("micro status '{0}' has no activity category")]
    MissingMicroActivity(String),

    #[error("status '{0}' declares an activity category but is not a micro status")]
    UnexpectedMicroActivity(String),

    #[error("no micro parameters for activity '{0}'")]
    MissingMicroParameters(MicroActivity),

    #[error("reference data is for fiscal year {expected} but parameters are for {found}")]
    FiscalYearMismatch { expected: i32, found: i32 },
}

/// Lookup of a status id that the rule table does not know.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown legal status '{0}'")]
pub struct StatusNotFound(pub String);

/// Errors returned by [`crate::StatusSimulator::simulate`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SimulationError {
    /// A profile value is out of range. Surfaced to the caller as-is.
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    #[error(transparent)]
    NotFound(#[from] StatusNotFound),

    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

impl SimulationError {
    pub(crate) fn validation(
        field: &'static str,
        reason: impl Into<String>,
    ) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }
}
