//! CSV loader for batch simulation profiles.
//!
//! ## CSV Format
//!
//! Headers are matched by name, so column order does not matter.
//!
//! | Column               | Required | Type    | Notes                                        |
//! |----------------------|----------|---------|----------------------------------------------|
//! | `label`              | yes      | string  | Shown in the output, need not be unique      |
//! | `gross_revenue`      | yes      | decimal | `85000`, `85 000,50` and `85,000.50` all work |
//! | `expenses_rate`      | yes      | rate    | `0.2` or `20%`                               |
//! | `payout_split_ratio` | yes      | rate    | Share paid as salary                         |
//! | `share_capital`      | no       | decimal | Empty means 0                                |
//! | `household_parts`    | no       | decimal | Empty means 1                                |
//! | `statuses`           | no       | list    | Ids separated by `;` (or `,` when quoted). Empty means every status |
//!
//! ### Example
//!
//! ```csv
//! label,gross_revenue,expenses_rate,payout_split_ratio,share_capital,household_parts,statuses
//! consultant,100000,0,0.5,10000,1,EURL;SASU
//! shop,180000,40%,1,,2,
//! ```

use std::path::{Path, PathBuf};

use fiscal_core::SimulationProfile;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::utils::{parse_decimal, parse_rate};

#[derive(Debug, Deserialize)]
struct CsvRow {
    label: String,
    gross_revenue: String,
    expenses_rate: String,
    payout_split_ratio: String,
    #[serde(default)]
    share_capital: Option<String>,
    #[serde(default)]
    household_parts: Option<String>,
    #[serde(default)]
    statuses: Option<String>,
}

/// One batch entry: a labelled profile and the statuses to compare it under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileRow {
    pub label: String,
    pub profile: SimulationProfile,
    /// Requested status ids, as written. Empty means every status.
    pub statuses: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// Bad structure, missing required column, wrong field count.
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// `row` is 1-based, the header not counted.
    #[error("invalid {column} '{value}' on row {row}")]
    InvalidValue {
        column: &'static str,
        value: String,
        row: usize,
    },
}

fn decimal_cell(
    column: &'static str,
    value: &str,
    row: usize,
    parse: fn(&str) -> Result<Decimal, crate::utils::ParseDecimalError>,
) -> Result<Decimal, CsvLoadError> {
    let invalid = || CsvLoadError::InvalidValue {
        column,
        value: value.to_string(),
        row,
    };
    // required cell: blank is not 0
    if value.trim().is_empty() {
        return Err(invalid());
    }
    parse(value).map_err(|_| invalid())
}

fn optional_cell(
    column: &'static str,
    value: Option<&str>,
    row: usize,
) -> Result<Option<Decimal>, CsvLoadError> {
    match value.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => decimal_cell(column, value, row, parse_decimal).map(Some),
    }
}

fn split_statuses(cell: Option<&str>) -> Vec<String> {
    cell.unwrap_or_default()
        .split([';', ','])
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect()
}

fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<ProfileRow, CsvLoadError> {
    let label = row.label.trim();
    if label.is_empty() {
        return Err(CsvLoadError::InvalidValue {
            column: "label",
            value: row.label.clone(),
            row: row_number,
        });
    }

    let mut profile = SimulationProfile::new(
        decimal_cell("gross_revenue", &row.gross_revenue, row_number, parse_decimal)?,
        decimal_cell("expenses_rate", &row.expenses_rate, row_number, parse_rate)?,
        decimal_cell(
            "payout_split_ratio",
            &row.payout_split_ratio,
            row_number,
            parse_rate,
        )?,
    );
    if let Some(capital) =
        optional_cell("share_capital", row.share_capital.as_deref(), row_number)?
    {
        profile = profile.with_share_capital(capital);
    }
    if let Some(parts) =
        optional_cell("household_parts", row.household_parts.as_deref(), row_number)?
    {
        profile = profile.with_household_parts(parts);
    }

    Ok(ProfileRow {
        label: label.to_string(),
        profile,
        statuses: split_statuses(row.statuses.as_deref()),
    })
}

/// Parses CSV text into profile rows, in file order.
///
/// Values are only parsed here; range checks happen when the profile is
/// simulated.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] for structural problems.
/// * [`CsvLoadError::InvalidValue`] for a cell that is not a number, or an
///   empty label.
pub fn load_from_str(input: &str) -> Result<Vec<ProfileRow>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(false)
        .from_reader(input.as_bytes());

    reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| convert_row(result?, idx + 1))
        .collect()
}

/// Reads `path` and delegates to [`load_from_str`].
pub fn load_from_file(path: &Path) -> Result<Vec<ProfileRow>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}
