//! Where reference data comes from.
//!
//! Calculators never read files themselves; a [`ReferenceSource`] hands
//! them a ready [`crate::ReferenceData`]. Backends are picked at runtime
//! through a [`SourceRegistry`].

pub mod factory;
pub mod source;

pub use factory::{SourceConfig, SourceFactory, SourceRegistry};
pub use source::{ReferenceSource, SourceError};
