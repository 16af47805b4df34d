//! Command execution, independent of argument parsing.

use std::path::PathBuf;

use anyhow::{Context, Result};
use fiscal_core::{
    Comparator, ReferenceData, SimulationProfile, SourceConfig, SourceError, SourceRegistry,
    StatusCriteria, StatusSimulator,
};
use tracing::{debug, info};

use crate::csv_loader;
use crate::output::{OutputFormat, ResultRow, StatusRow, render_results, render_statuses};

/// Statuses to compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    All,
    Ids(Vec<String>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Simulate {
        status: String,
        profile: SimulationProfile,
    },
    Compare {
        profile: SimulationProfile,
        selection: Selection,
        /// Sort by decreasing net income instead of request order.
        rank: bool,
    },
    Batch {
        file: PathBuf,
    },
    Statuses {
        criteria: StatusCriteria,
    },
}

pub fn build_registry() -> SourceRegistry {
    fiscal_data::default_registry()
}

/// Opens the configured source and loads `fiscal_year`, or the latest year
/// it holds.
pub fn load_reference(
    registry: &SourceRegistry,
    config: &SourceConfig,
    fiscal_year: Option<i32>,
) -> Result<ReferenceData> {
    debug!(backend = %config.backend, "opening reference source");
    let source = registry
        .create(config)
        .with_context(|| format!("cannot open '{}' reference source", config.backend))?;

    let reference = match fiscal_year {
        Some(year) => source.load(year).map_err(|err| match err {
            SourceError::YearNotFound(_) => {
                let available = source.list_fiscal_years().unwrap_or_default();
                anyhow::Error::new(err).context(format!("available fiscal years: {available:?}"))
            }
            other => anyhow::Error::new(other),
        }),
        None => source.latest().map_err(anyhow::Error::new),
    }
    .context("cannot load reference data")?;

    info!(
        fiscal_year = reference.fiscal_year,
        statuses = reference.statuses.len(),
        "reference data loaded"
    );
    Ok(reference)
}

/// Runs `command` and returns the rendered output.
pub fn run(
    reference: &ReferenceData,
    command: &Command,
    format: OutputFormat,
) -> Result<String> {
    let out = match command {
        Command::Simulate { status, profile } => {
            let result = StatusSimulator::new(reference)
                .simulate(&profile.for_status(status.as_str()))
                .with_context(|| format!("simulation failed for status '{status}'"))?;
            render_results(
                format,
                reference.fiscal_year,
                &[ResultRow::new(None, &result)],
                &[],
            )?
        }
        Command::Compare {
            profile,
            selection,
            rank,
        } => {
            let comparator = Comparator::new(reference);
            let report = match selection {
                Selection::All => comparator.compare_all(profile),
                Selection::Ids(ids) => comparator.compare(profile, ids),
            }
            .context("comparison failed")?;

            let rows: Vec<_> = if *rank {
                report
                    .ranked()
                    .into_iter()
                    .map(|result| ResultRow::new(None, result))
                    .collect()
            } else {
                report
                    .results
                    .iter()
                    .map(|result| ResultRow::new(None, result))
                    .collect()
            };
            render_results(format, reference.fiscal_year, &rows, &report.skipped)?
        }
        Command::Batch { file } => {
            let (rows, skipped) = run_batch(reference, file)?;
            render_results(format, reference.fiscal_year, &rows, &skipped)?
        }
        Command::Statuses { criteria } => {
            let rows: Vec<StatusRow> = reference
                .statuses
                .filter(criteria)
                .into_iter()
                .map(StatusRow::from)
                .collect();
            render_statuses(format, &rows)?
        }
    };
    Ok(out)
}

/// Compares every profile of `file`. Unknown ids are collected once each,
/// in order of first appearance.
fn run_batch(
    reference: &ReferenceData,
    file: &std::path::Path,
) -> Result<(Vec<ResultRow>, Vec<String>)> {
    let profiles = csv_loader::load_from_file(file)
        .with_context(|| format!("cannot load profiles from '{}'", file.display()))?;
    debug!(profiles = profiles.len(), "batch loaded");

    let comparator = Comparator::new(reference);
    let mut rows = Vec::new();
    let mut skipped: Vec<String> = Vec::new();

    for entry in &profiles {
        let report = if entry.statuses.is_empty() {
            comparator.compare_all(&entry.profile)
        } else {
            comparator.compare(&entry.profile, &entry.statuses)
        }
        .with_context(|| format!("profile '{}'", entry.label))?;

        rows.extend(
            report
                .results
                .iter()
                .map(|result| ResultRow::new(Some(&entry.label), result)),
        );
        for id in report.skipped {
            if !skipped.contains(&id) {
                skipped.push(id);
            }
        }
    }

    Ok((rows, skipped))
}
