use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use fiscal_core::ReferenceSource;
use fiscal_data::DirectorySource;

/// Validate a reference data directory.
///
/// The directory must contain:
/// - brackets.csv: fiscal_year,schedule,upper_bound,rate
/// - statuses.csv: one row per legal status
/// - parameters.toml: one [[fiscal_year]] table per year
///
/// Every year is assembled and checked; the first invalid one aborts.
#[derive(Parser, Debug)]
#[command(name = "fiscal-data-check")]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory holding the reference files
    #[arg(short, long)]
    dir: PathBuf,

    /// Only check this fiscal year
    #[arg(short, long)]
    year: Option<i32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Reading reference data from: {}", args.dir.display());

    let source = DirectorySource::open(&args.dir)
        .with_context(|| format!("Failed to open: {}", args.dir.display()))?;

    let years = match args.year {
        Some(year) => vec![year],
        None => source.list_fiscal_years()?,
    };
    if years.is_empty() {
        bail!("{} holds no fiscal year", args.dir.display());
    }

    for year in years {
        let reference = source
            .load(year)
            .with_context(|| format!("Invalid reference data for {year}"))?;
        println!(
            "{year}: {} income tax bands, {} corporate tax bands, {} statuses",
            reference.income_tax_brackets.len(),
            reference.corporate_tax_brackets.len(),
            reference.statuses.len()
        );
    }

    println!("Reference data is valid.");
    Ok(())
}
