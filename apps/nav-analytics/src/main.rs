//! NAV Analytics Binary
//!
//! Computes a fund report from CSV price histories and prints it as JSON.
//!
//! # Usage
//!
//! ```bash
//! nav-analytics --fund nav.csv --benchmark nifty.csv --period 3y
//! ```
//!
//! CSV files carry a header row followed by `date,price` records; dates are
//! `YYYY-MM-DD` or `DD-MM-YYYY`.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (overrides `observability.logging.level`)

use std::fs::File;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use nav_analytics::config::{Config, load_config};
use nav_analytics::telemetry::init_tracing;
use nav_analytics::{AnalysisPeriod, Analyzer, PriceSeries};
use tracing::info;

/// Fund return and risk report.
#[derive(Debug, Parser)]
#[command(name = "nav-analytics", version, about)]
struct Cli {
    /// Fund NAV history (CSV).
    #[arg(long)]
    fund: PathBuf,

    /// Benchmark index history (CSV).
    #[arg(long)]
    benchmark: Option<PathBuf>,

    /// YAML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Period for point-in-time figures.
    #[arg(long, value_enum, default_value_t = PeriodArg::All)]
    period: PeriodArg,

    /// Annual risk-free rate as a decimal; overrides the configuration.
    #[arg(long)]
    risk_free_rate: Option<f64>,
}

/// Period selector accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PeriodArg {
    #[value(name = "all")]
    All,
    #[value(name = "1y")]
    OneYear,
    #[value(name = "3y")]
    ThreeYears,
    #[value(name = "5y")]
    FiveYears,
    #[value(name = "10y")]
    TenYears,
}

impl From<PeriodArg> for AnalysisPeriod {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::All => Self::AllTime,
            PeriodArg::OneYear => Self::TrailingYears { years: 1 },
            PeriodArg::ThreeYears => Self::TrailingYears { years: 3 },
            PeriodArg::FiveYears => Self::TrailingYears { years: 5 },
            PeriodArg::TenYears => Self::TrailingYears { years: 10 },
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(Some(&*path.to_string_lossy()))
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };
    init_tracing(&config.observability.logging);

    let mut analyzer = Analyzer::new(config.analytics);
    if let Some(rate) = cli.risk_free_rate {
        anyhow::ensure!(
            (0.0..=1.0).contains(&rate),
            "--risk-free-rate must be between 0.0 and 1.0"
        );
        analyzer = analyzer.with_risk_free_rate(rate);
    }

    let fund = read_series(&cli.fund)?;
    let benchmark = cli.benchmark.as_deref().map(read_series).transpose()?;
    info!(
        fund_points = fund.len(),
        benchmark_points = benchmark.as_ref().map_or(0, PriceSeries::len),
        risk_free_rate = analyzer.settings().risk_free_rate,
        "Loaded price series"
    );

    let report = analyzer.report(&fund, benchmark.as_ref(), cli.period.into());
    let json = serde_json::to_string_pretty(&report).context("serializing report")?;
    println!("{json}");
    Ok(())
}

fn read_series(path: &Path) -> Result<PriceSeries> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    PriceSeries::from_csv_reader(file).with_context(|| format!("reading {}", path.display()))
}
