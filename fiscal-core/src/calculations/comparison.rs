//! Runs the simulator over several legal statuses with one shared profile.

use tracing::{debug, warn};

use crate::calculations::simulator::StatusSimulator;
use crate::error::SimulationError;
use crate::models::{ComparisonReport, ReferenceData, SimulationProfile};

/// Side-by-side comparison of legal statuses.
///
/// Unknown status ids are skipped and reported; any other failure aborts the
/// whole comparison since it would affect every status alike.
#[derive(Debug, Clone, Copy)]
pub struct Comparator<'a> {
    simulator: StatusSimulator<'a>,
}

impl<'a> Comparator<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self {
            simulator: StatusSimulator::new(reference),
        }
    }

    /// Simulates `profile` under each of `status_ids`, in order. Results are
    /// not ranked.
    ///
    /// # Errors
    ///
    /// Returns [`SimulationError::Validation`] or
    /// [`SimulationError::Configuration`] from the first simulation that
    /// fails that way. [`SimulationError::NotFound`] is never returned.
    pub fn compare<S: AsRef<str>>(
        &self,
        profile: &SimulationProfile,
        status_ids: &[S],
    ) -> Result<ComparisonReport, SimulationError> {
        let mut report = ComparisonReport::default();

        for status_id in status_ids {
            let status_id = status_id.as_ref();
            match self.simulator.simulate(&profile.for_status(status_id)) {
                Ok(result) => report.results.push(result),
                Err(SimulationError::NotFound(missing)) => {
                    warn!(status = %missing.0, "skipping unknown legal status");
                    report.skipped.push(missing.0);
                }
                Err(err) => return Err(err),
            }
        }

        debug!(
            simulated = report.results.len(),
            skipped = report.skipped.len(),
            "comparison finished"
        );
        Ok(report)
    }

    /// Compares every status of the reference table, in table order.
    pub fn compare_all(
        &self,
        profile: &SimulationProfile,
    ) -> Result<ComparisonReport, SimulationError> {
        let ids = self.simulator.reference().statuses.ids();
        self.compare(profile, &ids)
    }
}
