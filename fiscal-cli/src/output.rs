//! Rendering of simulation results and status listings.
//!
//! Every figure is rounded here and only here: whole euros in tables, cents
//! in JSON and CSV.

use clap::ValueEnum;
use fiscal_core::calculations::common::{round_half_up, round_to_euro};
use fiscal_core::{LegalStatusMeta, SimulationResult};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tabled::{Table, builder::Builder};
use thiserror::Error;

use crate::utils::opt_decimal_display;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV serialization error: {0}")]
    Csv(String),
}

impl From<csv::Error> for OutputError {
    fn from(err: csv::Error) -> Self {
        OutputError::Csv(err.to_string())
    }
}

/// One line of a results listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRow {
    /// Profile label in batch runs.
    pub label: Option<String>,
    pub status: String,
    pub social_contributions: Decimal,
    pub taxable_income: Decimal,
    pub income_tax: Decimal,
    pub corporate_tax: Option<Decimal>,
    pub salary_net: Decimal,
    pub dividends_net: Decimal,
    pub net_income: Decimal,
}

impl ResultRow {
    pub fn new(
        label: Option<&str>,
        result: &SimulationResult,
    ) -> Self {
        Self {
            label: label.map(str::to_string),
            status: result.status_id.clone(),
            social_contributions: result.social_contributions,
            taxable_income: result.taxable_income,
            income_tax: result.income_tax,
            corporate_tax: result.breakdown.corporate_tax,
            salary_net: result.breakdown.salary_net,
            dividends_net: result.breakdown.dividends_net,
            net_income: result.net_income,
        }
    }

    fn rounded(
        &self,
        round: fn(Decimal) -> Decimal,
    ) -> Self {
        Self {
            label: self.label.clone(),
            status: self.status.clone(),
            social_contributions: round(self.social_contributions),
            taxable_income: round(self.taxable_income),
            income_tax: round(self.income_tax),
            corporate_tax: self.corporate_tax.map(round),
            salary_net: round(self.salary_net),
            dividends_net: round(self.dividends_net),
            net_income: round(self.net_income),
        }
    }
}

/// One line of the status listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusRow {
    pub id: String,
    pub name: String,
    pub tax_regime: &'static str,
    pub micro_activity: Option<&'static str>,
    pub salary: bool,
    pub dividends: bool,
    pub director_regime: &'static str,
    pub unemployment_compatible: bool,
    pub capital_raising: &'static str,
    pub min_associates: u32,
}

impl From<&LegalStatusMeta> for StatusRow {
    fn from(status: &LegalStatusMeta) -> Self {
        Self {
            id: status.id.clone(),
            name: status.name.clone(),
            tax_regime: status.tax_regime.as_str(),
            micro_activity: status.micro_activity.map(|a| a.as_str()),
            salary: status.can_pay_salary,
            dividends: status.can_pay_dividends,
            director_regime: status.director_regime.as_str(),
            unemployment_compatible: status.unemployment_benefit_compatible,
            capital_raising: status.capital_raising_friction.as_str(),
            min_associates: status.min_associates,
        }
    }
}

#[derive(Serialize)]
struct ResultsEnvelope<'a> {
    fiscal_year: i32,
    results: &'a [ResultRow],
    skipped: &'a [String],
}

/// Renders simulation results. Unknown status ids are listed after the
/// table, or in a `skipped` field for JSON; CSV output carries rows only.
pub fn render_results(
    format: OutputFormat,
    fiscal_year: i32,
    rows: &[ResultRow],
    skipped: &[String],
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Table => {
            let rounded: Vec<_> = rows.iter().map(|r| r.rounded(round_to_euro)).collect();
            let mut out = results_table(&rounded);
            if !skipped.is_empty() {
                out.push_str(&format!("\nSkipped unknown statuses: {}\n", skipped.join(", ")));
            }
            Ok(out)
        }
        OutputFormat::Json => {
            let rounded: Vec<_> = rows.iter().map(|r| r.rounded(round_half_up)).collect();
            let envelope = ResultsEnvelope {
                fiscal_year,
                results: &rounded,
                skipped,
            };
            Ok(serde_json::to_string_pretty(&envelope)? + "\n")
        }
        OutputFormat::Csv => {
            let rounded: Vec<_> = rows.iter().map(|r| r.rounded(round_half_up)).collect();
            to_csv(&rounded)
        }
    }
}

/// Renders the status listing.
pub fn render_statuses(
    format: OutputFormat,
    rows: &[StatusRow],
) -> Result<String, OutputError> {
    match format {
        OutputFormat::Table => Ok(statuses_table(rows)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)? + "\n"),
        OutputFormat::Csv => to_csv(rows),
    }
}

fn results_table(rows: &[ResultRow]) -> String {
    if rows.is_empty() {
        return "(no results)\n".to_string();
    }
    let with_label = rows.iter().any(|r| r.label.is_some());

    let mut builder = Builder::default();
    let mut header = Vec::new();
    if with_label {
        header.push("Profile");
    }
    header.extend([
        "Status",
        "Contributions",
        "Taxable income",
        "Income tax",
        "Corporate tax",
        "Net salary",
        "Net dividends",
        "Net income",
    ]);
    builder.push_record(header);

    for row in rows {
        let mut record = Vec::new();
        if with_label {
            record.push(row.label.clone().unwrap_or_default());
        }
        record.extend([
            row.status.clone(),
            row.social_contributions.to_string(),
            row.taxable_income.to_string(),
            row.income_tax.to_string(),
            opt_decimal_display(row.corporate_tax),
            row.salary_net.to_string(),
            row.dividends_net.to_string(),
            row.net_income.to_string(),
        ]);
        builder.push_record(record);
    }

    format!("{}\n", Table::from(builder))
}

fn statuses_table(rows: &[StatusRow]) -> String {
    if rows.is_empty() {
        return "(no matching status)\n".to_string();
    }
    let yes_no = |b: bool| (if b { "yes" } else { "no" }).to_string();

    let mut builder = Builder::default();
    builder.push_record([
        "Id",
        "Name",
        "Regime",
        "Salary",
        "Dividends",
        "Director",
        "Unemployment",
        "Capital raising",
        "Min. associates",
    ]);
    for row in rows {
        let regime = match row.micro_activity {
            Some(activity) => format!("{} ({activity})", row.tax_regime),
            None => row.tax_regime.to_string(),
        };
        builder.push_record([
            row.id.clone(),
            row.name.clone(),
            regime,
            yes_no(row.salary),
            yes_no(row.dividends),
            row.director_regime.to_string(),
            yes_no(row.unemployment_compatible),
            row.capital_raising.to_string(),
            row.min_associates.to_string(),
        ]);
    }

    format!("{}\n", Table::from(builder))
}

fn to_csv<T: Serialize>(rows: &[T]) -> Result<String, OutputError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer.serialize(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| OutputError::Csv(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| OutputError::Csv(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fiscal_core::PayoutBreakdown;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    fn sasu_result() -> SimulationResult {
        SimulationResult {
            status_id: "SASU".to_string(),
            social_contributions: dec!(22500),
            taxable_income: dec!(27500),
            income_tax: dec!(1843.705),
            net_income: dec!(54881.295),
            breakdown: PayoutBreakdown {
                salary_gross: dec!(50000),
                salary_net: dec!(27500),
                dividends_gross: dec!(41750),
                dividends_net: dec!(29225),
                dividend_withholding: dec!(12525),
                corporate_tax: Some(dec!(8250)),
                retained_earnings: Decimal::ZERO,
            },
        }
    }

    #[test]
    fn csv_rounds_to_cents() {
        let rows = vec![ResultRow::new(None, &sasu_result())];

        let out = render_results(OutputFormat::Csv, 2024, &rows, &[]).unwrap();

        assert_eq!(
            out,
            "label,status,social_contributions,taxable_income,income_tax,corporate_tax,salary_net,dividends_net,net_income\n\
             ,SASU,22500,27500,1843.71,8250,27500,29225,54881.30\n"
        );
    }

    #[test]
    fn json_includes_skipped_ids() {
        let rows = vec![ResultRow::new(Some("base"), &sasu_result())];

        let out = render_results(
            OutputFormat::Json,
            2024,
            &rows,
            &["UNKNOWN_STATUS".to_string()],
        )
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["fiscal_year"], 2024);
        assert_eq!(value["results"][0]["label"], "base");
        assert_eq!(value["results"][0]["net_income"], "54881.30");
        assert_eq!(value["skipped"][0], "UNKNOWN_STATUS");
    }

    #[test]
    fn table_rounds_to_euros_and_lists_skipped() {
        let rows = vec![ResultRow::new(None, &sasu_result())];

        let out = render_results(
            OutputFormat::Table,
            2024,
            &rows,
            &["NOPE".to_string()],
        )
        .unwrap();

        assert!(out.contains("54881"), "{out}");
        assert!(!out.contains("54881.3"), "{out}");
        assert!(!out.contains("Profile"), "{out}");
        assert!(out.ends_with("Skipped unknown statuses: NOPE\n"), "{out}");
    }

    #[test]
    fn empty_results_table() {
        let out = render_results(OutputFormat::Table, 2024, &[], &[]).unwrap();

        assert_eq!(out, "(no results)\n");
    }

    #[test]
    fn status_rows_render_as_csv() {
        let row = StatusRow {
            id: "EURL".to_string(),
            name: "EURL".to_string(),
            tax_regime: "is",
            micro_activity: None,
            salary: true,
            dividends: true,
            director_regime: "self-employed",
            unemployment_compatible: false,
            capital_raising: "medium",
            min_associates: 1,
        };

        let out = render_statuses(OutputFormat::Csv, &[row]).unwrap();

        assert_eq!(
            out,
            "id,name,tax_regime,micro_activity,salary,dividends,director_regime,unemployment_compatible,capital_raising,min_associates\n\
             EURL,EURL,is,,true,true,self-employed,false,medium,1\n"
        );
    }

    #[test]
    fn output_format_deserializes_lowercase() {
        #[derive(Deserialize)]
        struct Holder {
            output: OutputFormat,
        }

        let holder: Holder = toml::from_str("output = \"json\"").unwrap();

        assert_eq!(holder.output, OutputFormat::Json);
    }
}
