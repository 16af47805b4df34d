//! Calculation modules for the legal-status comparison.
//!
//! Leaves first: the progressive bracket calculator and the flat
//! contribution calculator, then the per-status simulator that composes
//! them, then the comparator that runs the simulator over several statuses.

pub mod brackets;
pub mod common;
pub mod comparison;
pub mod contributions;
pub mod simulator;

pub use brackets::{compute_progressive_tax, validate_brackets};
pub use comparison::Comparator;
pub use contributions::{
    ContributionCalculator, TaxableBase, compute_contributions, compute_non_deductible_surtax,
};
pub use simulator::StatusSimulator;
