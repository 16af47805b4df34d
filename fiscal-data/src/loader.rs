use std::io::Read;

use fiscal_core::{
    BracketTable, CapitalRaisingFriction, ConfigurationError, DirectorRegime, FiscalParameters,
    LegalStatusMeta, MicroActivity, ReferenceData, SourceError, StatusTable, TaxBracket,
    TaxRegime,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur when loading reference data files.
#[derive(Debug, Error)]
pub enum ReferenceLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("invalid schedule '{0}' (expected IR or IS)")]
    InvalidSchedule(String),

    #[error("invalid {field} '{value}' on row {row}")]
    InvalidField {
        field: &'static str,
        value: String,
        row: usize,
    },

    #[error("no reference data for fiscal year {0}")]
    YearNotFound(i32),

    #[error("no {schedule} brackets for fiscal year {fiscal_year}")]
    MissingSchedule {
        fiscal_year: i32,
        schedule: Schedule,
    },

    #[error("fiscal year {0} is declared more than once in the parameters")]
    DuplicateYear(i32),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

impl From<csv::Error> for ReferenceLoaderError {
    fn from(err: csv::Error) -> Self {
        ReferenceLoaderError::CsvParse(err.to_string())
    }
}

impl From<toml::de::Error> for ReferenceLoaderError {
    fn from(err: toml::de::Error) -> Self {
        ReferenceLoaderError::TomlParse(err.to_string())
    }
}

impl From<ReferenceLoaderError> for SourceError {
    fn from(err: ReferenceLoaderError) -> Self {
        match err {
            ReferenceLoaderError::YearNotFound(year) => SourceError::YearNotFound(year),
            ReferenceLoaderError::Configuration(inner) => SourceError::InvalidReference(inner),
            other => SourceError::Parse(other.to_string()),
        }
    }
}

/// Which tax schedule a bracket row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Schedule {
    /// Personal income tax (`IR`).
    IncomeTax,
    /// Corporate tax (`IS`).
    CorporateTax,
}

impl Schedule {
    pub fn code(&self) -> &'static str {
        match self {
            Self::IncomeTax => "IR",
            Self::CorporateTax => "IS",
        }
    }

    fn parse(code: &str) -> Result<Self, ReferenceLoaderError> {
        match code.trim().to_ascii_uppercase().as_str() {
            "IR" => Ok(Self::IncomeTax),
            "IS" => Ok(Self::CorporateTax),
            _ => Err(ReferenceLoaderError::InvalidSchedule(code.to_string())),
        }
    }
}

impl std::fmt::Display for Schedule {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// A single record from `brackets.csv`.
///
/// - `fiscal_year`: year the schedule applies to (e.g. 2024)
/// - `schedule`: `IR` (income tax) or `IS` (corporate tax)
/// - `upper_bound`: inclusive ceiling of the band, empty for the top band
/// - `rate`: marginal rate as a decimal (e.g. 0.11 for 11%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub fiscal_year: i32,
    pub schedule: String,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// A single record from `statuses.csv`. Enumerations stay as text until
/// [`convert_status`] checks them, so errors can name the row.
#[derive(Debug, Deserialize)]
struct StatusRecord {
    id: String,
    name: String,
    tax_regime: String,
    micro_activity: Option<String>,
    can_pay_salary: bool,
    can_pay_dividends: bool,
    dividends_subject_to_contributions: bool,
    director_regime: String,
    unemployment_benefit_compatible: bool,
    capital_raising_friction: String,
    min_associates: u32,
}

fn invalid(
    field: &'static str,
    value: &str,
    row: usize,
) -> ReferenceLoaderError {
    ReferenceLoaderError::InvalidField {
        field,
        value: value.to_string(),
        row,
    }
}

/// `row` is 1-based (header excluded).
fn convert_status(
    record: StatusRecord,
    row: usize,
) -> Result<LegalStatusMeta, ReferenceLoaderError> {
    let tax_regime = TaxRegime::parse(&record.tax_regime)
        .ok_or_else(|| invalid("tax_regime", &record.tax_regime, row))?;
    let micro_activity = match record.micro_activity.as_deref().map(str::trim) {
        None | Some("") => None,
        Some(value) => {
            Some(MicroActivity::parse(value).ok_or_else(|| invalid("micro_activity", value, row))?)
        }
    };
    let director_regime = DirectorRegime::parse(&record.director_regime)
        .ok_or_else(|| invalid("director_regime", &record.director_regime, row))?;
    let capital_raising_friction = CapitalRaisingFriction::parse(&record.capital_raising_friction)
        .ok_or_else(|| {
            invalid(
                "capital_raising_friction",
                &record.capital_raising_friction,
                row,
            )
        })?;

    Ok(LegalStatusMeta {
        id: record.id.trim().to_ascii_uppercase(),
        name: record.name,
        tax_regime,
        micro_activity,
        can_pay_salary: record.can_pay_salary,
        can_pay_dividends: record.can_pay_dividends,
        dividends_subject_to_contributions: record.dividends_subject_to_contributions,
        director_regime,
        unemployment_benefit_compatible: record.unemployment_benefit_compatible,
        capital_raising_friction,
        min_associates: record.min_associates,
    })
}

#[derive(Debug, Deserialize)]
struct ParametersFile {
    #[serde(default)]
    fiscal_year: Vec<FiscalParameters>,
}

/// Parsed contents of the three reference files, for every year they cover.
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceBundle {
    pub brackets: Vec<BracketRecord>,
    pub statuses: StatusTable,
    pub parameters: Vec<FiscalParameters>,
}

impl ReferenceBundle {
    /// Years with published parameters, ascending.
    pub fn fiscal_years(&self) -> Vec<i32> {
        let mut years: Vec<_> = self.parameters.iter().map(|p| p.fiscal_year).collect();
        years.sort_unstable();
        years.dedup();
        years
    }

    /// Assembles the [`ReferenceData`] of one year.
    ///
    /// # Errors
    ///
    /// * [`ReferenceLoaderError::YearNotFound`] when the parameters do not
    ///   cover `fiscal_year`.
    /// * [`ReferenceLoaderError::MissingSchedule`] when either bracket table
    ///   has no row for that year.
    /// * [`ReferenceLoaderError::Configuration`] when a table or the
    ///   parameters fail validation.
    pub fn reference(
        &self,
        fiscal_year: i32,
    ) -> Result<ReferenceData, ReferenceLoaderError> {
        let parameters = self
            .parameters
            .iter()
            .find(|p| p.fiscal_year == fiscal_year)
            .cloned()
            .ok_or(ReferenceLoaderError::YearNotFound(fiscal_year))?;

        let income_tax = self.bracket_table(fiscal_year, Schedule::IncomeTax)?;
        let corporate_tax = self.bracket_table(fiscal_year, Schedule::CorporateTax)?;

        debug!(
            fiscal_year,
            income_tax_bands = income_tax.len(),
            statuses = self.statuses.len(),
            "assembled reference data"
        );

        Ok(ReferenceData::new(
            fiscal_year,
            parameters,
            income_tax,
            corporate_tax,
            self.statuses.clone(),
        )?)
    }

    fn bracket_table(
        &self,
        fiscal_year: i32,
        schedule: Schedule,
    ) -> Result<BracketTable, ReferenceLoaderError> {
        let mut brackets = Vec::new();
        for record in self.brackets.iter().filter(|r| r.fiscal_year == fiscal_year) {
            if Schedule::parse(&record.schedule)? == schedule {
                brackets.push(TaxBracket {
                    upper_bound: record.upper_bound,
                    rate: record.rate,
                });
            }
        }
        if brackets.is_empty() {
            return Err(ReferenceLoaderError::MissingSchedule {
                fiscal_year,
                schedule,
            });
        }
        Ok(BracketTable::new(brackets)?)
    }
}

/// Parser for the reference data files.
///
/// `brackets.csv` rows are kept in file order: bands of one schedule must be
/// listed from the lowest ceiling to the unbounded top band.
pub struct ReferenceLoader;

impl ReferenceLoader {
    /// Parse bracket records from a CSV reader.
    pub fn parse_brackets<R: Read>(reader: R) -> Result<Vec<BracketRecord>, ReferenceLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            Schedule::parse(&record.schedule)?;
            records.push(record);
        }

        Ok(records)
    }

    /// Parse and validate the legal-status table from a CSV reader.
    pub fn parse_statuses<R: Read>(reader: R) -> Result<StatusTable, ReferenceLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(reader);

        let statuses = csv_reader
            .deserialize::<StatusRecord>()
            .enumerate()
            .map(|(idx, result)| convert_status(result?, idx + 1))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StatusTable::new(statuses)?)
    }

    /// Parse and validate the yearly parameters from TOML text.
    pub fn parse_parameters(input: &str) -> Result<Vec<FiscalParameters>, ReferenceLoaderError> {
        let file: ParametersFile = toml::from_str(input)?;

        for (index, parameters) in file.fiscal_year.iter().enumerate() {
            if file.fiscal_year[..index]
                .iter()
                .any(|other| other.fiscal_year == parameters.fiscal_year)
            {
                return Err(ReferenceLoaderError::DuplicateYear(parameters.fiscal_year));
            }
            parameters.validate()?;
        }

        Ok(file.fiscal_year)
    }

    /// Parse all three files into a bundle.
    pub fn parse_bundle<B: Read, S: Read>(
        brackets: B,
        statuses: S,
        parameters: &str,
    ) -> Result<ReferenceBundle, ReferenceLoaderError> {
        Ok(ReferenceBundle {
            brackets: Self::parse_brackets(brackets)?,
            statuses: Self::parse_statuses(statuses)?,
            parameters: Self::parse_parameters(parameters)?,
        })
    }
}
