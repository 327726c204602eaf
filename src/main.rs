//! Compound Projection CLI
//!
//! Command-line interface for running compound-interest projections

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use compound_projection::{
    config,
    export::{self, Header},
    format::format_currency,
    params::{self, query},
    report::{self, SummaryCards},
    Currency, Frequency, Locale, ProjectionConfig, ProjectionEngine, RateType, ScenarioRunner,
    SimulationParams, SimulationResult,
};

#[derive(Parser)]
#[command(name = "compound_projection")]
#[command(about = "Month-by-month compound-interest projections")]
struct Cli {
    /// Anchor date for period labels, YYYY-MM-DD (default: today)
    #[arg(long, global = true, value_parser = config::parse_anchor_date)]
    anchor_date: Option<NaiveDate>,

    /// Display locale (pt-BR or en-US)
    #[arg(long, global = true)]
    locale: Option<Locale>,

    /// Currency for rendered amounts (BRL, USD or EUR)
    #[arg(long, global = true)]
    currency: Option<Currency>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project a single parameter set
    Project(ProjectArgs),
    /// Project every scenario in a CSV file
    Batch {
        /// Scenario file (name plus one column per parameter)
        #[arg(short, long)]
        input: PathBuf,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliFrequency {
    Monthly,
    Quarterly,
    Annual,
}

impl From<CliFrequency> for Frequency {
    fn from(value: CliFrequency) -> Self {
        match value {
            CliFrequency::Monthly => Frequency::Monthly,
            CliFrequency::Quarterly => Frequency::Quarterly,
            CliFrequency::Annual => Frequency::Annual,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum CliRateType {
    Monthly,
    Annual,
}

impl From<CliRateType> for RateType {
    fn from(value: CliRateType) -> Self {
        match value {
            CliRateType::Monthly => RateType::Monthly,
            CliRateType::Annual => RateType::Annual,
        }
    }
}

#[derive(Args)]
struct ProjectArgs {
    /// Shared-link query string, applied before the individual flags
    #[arg(long)]
    query: Option<String>,

    #[arg(long)]
    initial_capital: Option<f64>,

    #[arg(long)]
    contribution: Option<f64>,

    #[arg(long, value_enum)]
    frequency: Option<CliFrequency>,

    /// Interest rate in percent
    #[arg(long)]
    rate: Option<f64>,

    #[arg(long, value_enum)]
    rate_type: Option<CliRateType>,

    /// Horizon in months
    #[arg(long, conflicts_with_all = ["years", "months"])]
    period: Option<u32>,

    /// Horizon in whole years (combined with --months)
    #[arg(long)]
    years: Option<u32>,

    /// Extra months on top of --years
    #[arg(long)]
    months: Option<u32>,

    /// Keep interest out of the balance
    #[arg(long)]
    no_reinvest: bool,

    /// Annual inflation in percent
    #[arg(long)]
    inflation: Option<f64>,

    /// Tax on gains in percent
    #[arg(long)]
    tax_rate: Option<f64>,

    /// Write the monthly series to this CSV file
    #[arg(long)]
    csv: Option<PathBuf>,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Rows of the monthly table to print
    #[arg(long, default_value_t = 24)]
    rows: usize,
}

impl ProjectArgs {
    fn to_params(&self) -> Result<SimulationParams> {
        let mut params = match &self.query {
            Some(q) => query::overlay_query_string(SimulationParams::default(), q)
                .context("Invalid --query")?,
            None => SimulationParams::default(),
        };

        if let Some(v) = self.initial_capital {
            params.initial_capital = v;
        }
        if let Some(v) = self.contribution {
            params.periodic_contribution = v;
        }
        if let Some(v) = self.frequency {
            params.contribution_frequency = v.into();
        }
        if let Some(v) = self.rate {
            params.interest_rate = v;
        }
        if let Some(v) = self.rate_type {
            params.rate_type = v.into();
        }
        if let Some(v) = self.period {
            params.period = v;
        }
        if self.years.is_some() || self.months.is_some() {
            params = params
                .with_period_years_months(self.years.unwrap_or(0), self.months.unwrap_or(0))
                .context("Invalid --years/--months")?;
        }
        if self.no_reinvest {
            params.reinvest = false;
        }
        if let Some(v) = self.inflation {
            params.inflation = v;
        }
        if let Some(v) = self.tax_rate {
            params.tax_rate = v;
        }

        params.validate().context("Invalid simulation parameters")?;
        Ok(params)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProjectionOutput<'a> {
    params: &'a SimulationParams,
    share_query: String,
    summary: SummaryCards,
    result: &'a SimulationResult,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchRow {
    name: String,
    months: usize,
    total_invested: f64,
    final_gross_value: f64,
    final_net_value: f64,
    real_gains: f64,
}

fn build_config(cli: &Cli) -> Result<ProjectionConfig> {
    let mut config = config::from_env().context("Invalid environment configuration")?;
    if let Some(anchor) = cli.anchor_date {
        config.anchor_date = anchor;
    }
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if let Some(currency) = cli.currency {
        config.currency = currency;
    }
    Ok(config)
}

fn run_project(config: ProjectionConfig, args: &ProjectArgs) -> Result<()> {
    let params = args.to_params()?;
    let engine = ProjectionEngine::new(config.clone());
    let result = engine.project(&params);
    info!("Projected {} months", result.months());

    if let Some(path) = &args.csv {
        export::write_csv_file(path, &result.monthly_data, Header::Localized(config.locale))
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }

    let summary = SummaryCards::new(&result, config.locale, config.currency);

    if args.json {
        let output = ProjectionOutput {
            params: &params,
            share_query: query::to_query_string(&params),
            summary,
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Summary:");
    print!("{}", report::render_summary(&summary));
    println!();
    print!("{}", report::render_table(&result, config.locale, config.currency, Some(args.rows)));
    println!();
    println!("Share: ?{}", query::to_query_string(&params));
    if let Some(path) = &args.csv {
        println!("Full results written to: {}", path.display());
    }

    Ok(())
}

fn run_batch(config: ProjectionConfig, input: &PathBuf, json: bool) -> Result<()> {
    let scenarios = params::load_scenarios(input)
        .with_context(|| format!("Failed to load scenarios from {}", input.display()))?;

    let locale = config.locale;
    let currency = config.currency;
    let runner = ScenarioRunner::new(config);
    let outcomes = runner.run_scenarios(&scenarios);

    let rows: Vec<BatchRow> = outcomes
        .iter()
        .map(|o| BatchRow {
            name: o.name.clone(),
            months: o.result.months(),
            total_invested: o.result.total_invested,
            final_gross_value: o.result.final_gross_value,
            final_net_value: o.result.final_net_value,
            real_gains: o.result.real_gains,
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{:<20} {:>6} {:>20} {:>20} {:>20} {:>20}",
        "Scenario", "Months", "Invested", "Gross", "Net", "Real gain"
    );
    println!("{}", "-".repeat(111));
    for row in &rows {
        println!(
            "{:<20} {:>6} {:>20} {:>20} {:>20} {:>20}",
            row.name,
            row.months,
            format_currency(row.total_invested, locale, currency),
            format_currency(row.final_gross_value, locale, currency),
            format_currency(row.final_net_value, locale, currency),
            format_currency(row.real_gains, locale, currency),
        );
    }

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;

    match &cli.command {
        Commands::Project(args) => run_project(config, args),
        Commands::Batch { input, json } => run_batch(config, input, *json),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project_args(flags: &[&str]) -> ProjectArgs {
        let argv = ["compound_projection", "project"].into_iter().chain(flags.iter().copied());
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Project(args) => args,
            Commands::Batch { .. } => panic!("expected the project subcommand"),
        }
    }

    #[test]
    fn test_flags_override_query() {
        let params = project_args(&[
            "--query",
            "?initialCapital=2500&period=36&taxRate=20",
            "--initial-capital",
            "5000",
        ])
        .to_params()
        .unwrap();

        assert_eq!(params.initial_capital, 5000.0);
        assert_eq!(params.period, 36);
        assert_eq!(params.tax_rate, 20.0);
    }

    #[test]
    fn test_validation_runs_after_flags() {
        // The query alone is out of range, the flag brings it back
        let params = project_args(&["--query", "taxRate=150", "--tax-rate", "10"])
            .to_params()
            .unwrap();
        assert_eq!(params.tax_rate, 10.0);

        assert!(project_args(&["--tax-rate", "150"]).to_params().is_err());
    }

    #[test]
    fn test_years_and_months_combine() {
        let params = project_args(&["--years", "2", "--months", "6"]).to_params().unwrap();
        assert_eq!(params.period, 30);

        let params = project_args(&["--query", "period=36", "--years", "1"]).to_params().unwrap();
        assert_eq!(params.period, 12);

        assert!(project_args(&["--years", "357913942"]).to_params().is_err());
    }

    #[test]
    fn test_period_conflicts_with_years() {
        let argv = ["compound_projection", "project", "--period", "12", "--years", "1"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_enum_flags() {
        let params = project_args(&["--frequency", "quarterly", "--rate-type", "annual", "--no-reinvest"])
            .to_params()
            .unwrap();
        assert_eq!(params.contribution_frequency, Frequency::Quarterly);
        assert_eq!(params.rate_type, RateType::Annual);
        assert!(!params.reinvest);
    }
}
