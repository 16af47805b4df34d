//! Deterministic engine comparing French legal statuses for a business owner.
//!
//! The crate holds no global state: bracket tables, yearly parameters and the
//! legal-status table are bundled in a [`ReferenceData`] value and borrowed by
//! the calculators.

pub mod calculations;
pub mod error;
pub mod models;
pub mod reference;
pub mod rules;

pub use calculations::{Comparator, StatusSimulator};
pub use error::{ConfigurationError, SimulationError, StatusNotFound};
pub use models::*;
pub use reference::{ReferenceSource, SourceConfig, SourceError, SourceFactory, SourceRegistry};
pub use rules::{StatusCriteria, StatusTable};

#[cfg(test)]
pub(crate) mod test_support;
