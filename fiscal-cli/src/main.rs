use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use rust_decimal::Decimal;
use tracing::debug;

use fiscal_cli::app::{self, Command, Selection};
use fiscal_cli::config::{CliConfig, Overrides, Settings};
use fiscal_cli::logging;
use fiscal_cli::output::OutputFormat;
use fiscal_cli::utils::{parse_decimal, parse_rate};
use fiscal_core::{
    CapitalRaisingFriction, DirectorRegime, SimulationProfile, StatusCriteria, TaxRegime,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Compares the net income a French business owner keeps under each legal
/// status.
#[derive(Debug, Parser)]
#[command(name = "fiscal-sim", version)]
struct Cli {
    /// TOML config file; flags override its values.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Reference data backend (`embedded` or `directory`).
    #[arg(long, global = true)]
    source: Option<String>,

    /// Folder holding brackets.csv, statuses.csv and parameters.toml.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Fiscal year; defaults to the latest one available.
    #[arg(long, global = true)]
    year: Option<i32>,

    #[arg(long, global = true, value_enum)]
    output: Option<OutputFormat>,

    /// Level or EnvFilter directives. `RUST_LOG` takes precedence.
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Debug, Subcommand)]
enum CliCommand {
    /// Simulates one legal status.
    Simulate {
        #[arg(long)]
        status: String,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Compares several legal statuses for the same profile.
    Compare {
        /// Comma-separated status ids.
        #[arg(long, value_delimiter = ',', required_unless_present = "all")]
        statuses: Vec<String>,

        /// Compares every status of the reference table.
        #[arg(long, conflicts_with = "statuses")]
        all: bool,

        /// Sorts by decreasing net income.
        #[arg(long)]
        rank: bool,

        #[command(flatten)]
        profile: ProfileArgs,
    },

    /// Compares every profile of a CSV file.
    Batch {
        #[arg(long)]
        file: PathBuf,
    },

    /// Lists legal statuses, optionally filtered.
    Statuses {
        /// Only statuses that can pay a salary.
        #[arg(long)]
        salary: bool,

        /// Only statuses that can pay dividends.
        #[arg(long)]
        dividends: bool,

        /// Only statuses compatible with unemployment benefits.
        #[arg(long)]
        unemployment: bool,

        /// Highest acceptable capital-raising friction (low, medium, high).
        #[arg(long, value_parser = parse_friction)]
        max_friction: Option<CapitalRaisingFriction>,

        /// Director social regime (tns, assimile, none).
        #[arg(long, value_parser = parse_director_regime)]
        regime: Option<DirectorRegime>,

        /// Tax regime (ir, is, micro).
        #[arg(long, value_parser = parse_tax_regime)]
        tax_regime: Option<TaxRegime>,
    },
}

#[derive(Debug, Args)]
struct ProfileArgs {
    /// Yearly turnover, e.g. `85000` or `85 000,50`.
    #[arg(long, value_parser = parse_decimal)]
    revenue: Decimal,

    /// Share of turnover spent on expenses, `0.2` or `20%`.
    #[arg(long, value_parser = parse_rate, default_value = "0")]
    expenses_rate: Decimal,

    /// Share of profit paid as salary, the rest as dividends.
    #[arg(long, value_parser = parse_rate, default_value = "0.5")]
    split: Decimal,

    #[arg(long, value_parser = parse_decimal)]
    share_capital: Option<Decimal>,

    /// Family-quotient parts of the tax household.
    #[arg(long, value_parser = parse_decimal)]
    parts: Option<Decimal>,
}

impl ProfileArgs {
    fn into_profile(self) -> SimulationProfile {
        let mut profile = SimulationProfile::new(self.revenue, self.expenses_rate, self.split);
        if let Some(capital) = self.share_capital {
            profile = profile.with_share_capital(capital);
        }
        if let Some(parts) = self.parts {
            profile = profile.with_household_parts(parts);
        }
        profile
    }
}

fn parse_friction(s: &str) -> Result<CapitalRaisingFriction, String> {
    CapitalRaisingFriction::parse(s).ok_or_else(|| format!("expected low, medium or high, got '{s}'"))
}

fn parse_director_regime(s: &str) -> Result<DirectorRegime, String> {
    DirectorRegime::parse(s).ok_or_else(|| format!("expected tns, assimile or none, got '{s}'"))
}

fn parse_tax_regime(s: &str) -> Result<TaxRegime, String> {
    TaxRegime::parse(s).ok_or_else(|| format!("expected ir, is or micro, got '{s}'"))
}

impl From<CliCommand> for Command {
    fn from(command: CliCommand) -> Self {
        match command {
            CliCommand::Simulate { status, profile } => Command::Simulate {
                status,
                profile: profile.into_profile(),
            },
            CliCommand::Compare {
                statuses,
                all,
                rank,
                profile,
            } => Command::Compare {
                profile: profile.into_profile(),
                selection: if all {
                    Selection::All
                } else {
                    Selection::Ids(statuses)
                },
                rank,
            },
            CliCommand::Batch { file } => Command::Batch { file },
            CliCommand::Statuses {
                salary,
                dividends,
                unemployment,
                max_friction,
                regime,
                tax_regime,
            } => Command::Statuses {
                criteria: StatusCriteria {
                    requires_salary: salary,
                    requires_dividends: dividends,
                    requires_unemployment_compatibility: unemployment,
                    max_capital_raising_friction: max_friction,
                    director_regime: regime,
                    tax_regime,
                },
            },
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let file = match &cli.config {
        Some(path) => CliConfig::load(path)?,
        None => CliConfig::default(),
    };
    let settings = Settings::resolve(
        file,
        Overrides {
            source: cli.source,
            data_dir: cli.data_dir,
            fiscal_year: cli.year,
            output: cli.output,
            log_level: cli.log_level,
            log_file: cli.log_file,
        },
    );

    logging::init_logging(&settings.log_level, settings.log_file.as_deref())?;
    debug!(?settings, "settings resolved");

    let registry = app::build_registry();
    let reference = app::load_reference(&registry, &settings.source, settings.fiscal_year)?;

    let out = app::run(&reference, &cli.command.into(), settings.output)?;
    print!("{out}");
    Ok(())
}
