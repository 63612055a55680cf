//! Trailing-period statistics (1Y/3Y/5Y/10Y tables).
//!
//! Each horizon either yields [`PeriodStats`] or an explicit
//! [`PeriodOutcome::InsufficientData`] marker; nothing is swallowed.
//! Horizons are independent, so the table can be computed in parallel with
//! identical results.

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::constants::{MIN_ALIGNED_POINTS, annualization_factor};
use super::math::std_dev;
use super::ratios::{RiskMetrics, risk_metrics};
use super::relative::{AlphaBetaResult, CaptureRatios, alpha_beta, capture_ratios};
use crate::series::PriceSeries;

/// Days of slack allowed when checking whether history covers a horizon
/// (launch gaps, holidays).
const HISTORY_GRACE_DAYS: i64 = 30;

/// Annualized return and volatility over one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnRisk {
    /// `(last / first)^(1 / years) - 1`.
    pub annualized_return: f64,
    /// Sample std of daily returns × √252.
    pub annualized_volatility: f64,
    /// Return / volatility, present only when both are non-zero.
    pub return_risk_ratio: Option<f64>,
}

impl ReturnRisk {
    fn over(window: &PriceSeries, years: u32) -> Option<Self> {
        let (first, last) = (window.first()?, window.last()?);
        let annualized_return = (last.price / first.price).powf(1.0 / f64::from(years)) - 1.0;
        let annualized_volatility =
            std_dev(&window.return_values()).map_or(0.0, |std| std * annualization_factor());

        let return_risk_ratio = (annualized_return != 0.0 && annualized_volatility != 0.0)
            .then(|| annualized_return / annualized_volatility);

        Some(Self {
            annualized_return,
            annualized_volatility,
            return_risk_ratio,
        })
    }
}

/// Benchmark-relative statistics for one window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RelativeStats {
    /// Regression and active-return statistics.
    pub alpha_beta: AlphaBetaResult,
    /// Up/down-market capture.
    pub capture: CaptureRatios,
}

/// Statistics for one trailing horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    /// Horizon length in years.
    pub years: u32,
    /// First date of the trailing window.
    pub start: NaiveDate,
    /// Fund return/risk.
    pub fund: ReturnRisk,
    /// Fund risk-adjusted ratios over the window.
    pub risk: Option<RiskMetrics>,
    /// Benchmark return/risk over its own trailing window.
    pub benchmark: Option<ReturnRisk>,
    /// Fund vs benchmark statistics over the fund's window.
    pub relative: Option<RelativeStats>,
}

/// Why a horizon could not be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum InsufficientData {
    /// History spans fewer days than the horizon requires.
    ShortHistory {
        /// Minimum span in days.
        required_days: i64,
        /// Span available.
        available_days: i64,
    },
    /// The trailing window holds too few observations.
    TooFewPoints {
        /// Minimum observations.
        required: usize,
        /// Observations in the window.
        available: usize,
    },
}

/// Result for one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PeriodOutcome {
    /// Statistics were computed.
    Available(PeriodStats),
    /// The horizon is not covered by the data.
    InsufficientData {
        /// Horizon length in years.
        years: u32,
        /// Cause.
        cause: InsufficientData,
    },
}

impl PeriodOutcome {
    /// Horizon length in years.
    #[must_use]
    pub const fn years(&self) -> u32 {
        match self {
            Self::Available(stats) => stats.years,
            Self::InsufficientData { years, .. } => *years,
        }
    }

    /// Statistics if available.
    #[must_use]
    pub const fn stats(&self) -> Option<&PeriodStats> {
        match self {
            Self::Available(stats) => Some(stats),
            Self::InsufficientData { .. } => None,
        }
    }
}

/// Statistics over the trailing `years` of `fund`, optionally against `bench`.
#[must_use]
pub fn period_stats(
    fund: &PriceSeries,
    bench: Option<&PriceSeries>,
    years: u32,
    risk_free_rate: f64,
) -> PeriodOutcome {
    let insufficient = |cause| PeriodOutcome::InsufficientData { years, cause };

    let required_days = i64::from(years) * 365 - HISTORY_GRACE_DAYS;
    let available_days = fund.span_days();
    if fund.is_empty() || available_days < required_days {
        debug!(years, available_days, required_days, "History shorter than horizon");
        return insufficient(InsufficientData::ShortHistory {
            required_days,
            available_days,
        });
    }

    let window = fund.trailing_years(years);
    let (Some(start), Some(fund_stats)) = (window.first(), ReturnRisk::over(&window, years))
    else {
        return insufficient(InsufficientData::TooFewPoints {
            required: MIN_ALIGNED_POINTS,
            available: 0,
        });
    };
    if window.len() < MIN_ALIGNED_POINTS {
        return insufficient(InsufficientData::TooFewPoints {
            required: MIN_ALIGNED_POINTS,
            available: window.len(),
        });
    }

    let benchmark = bench.and_then(|b| {
        let own_window = b.trailing_years(years);
        (own_window.len() > MIN_ALIGNED_POINTS)
            .then(|| ReturnRisk::over(&own_window, years))
            .flatten()
    });

    let relative = bench.and_then(|b| {
        let bench_window = b.since(start.date);
        (bench_window.len() >= MIN_ALIGNED_POINTS).then(|| RelativeStats {
            alpha_beta: alpha_beta(&window, &bench_window, risk_free_rate),
            capture: capture_ratios(&window, &bench_window),
        })
    });

    PeriodOutcome::Available(PeriodStats {
        years,
        start: start.date,
        fund: fund_stats,
        risk: risk_metrics(&window, risk_free_rate),
        benchmark,
        relative,
    })
}

/// One outcome per horizon, in the order given.
#[must_use]
pub fn period_table(
    fund: &PriceSeries,
    bench: Option<&PriceSeries>,
    horizons: &[u32],
    risk_free_rate: f64,
    parallel: bool,
) -> Vec<PeriodOutcome> {
    let compute = |years: &u32| period_stats(fund, bench, *years, risk_free_rate);

    let table: Vec<PeriodOutcome> = if parallel {
        horizons.par_iter().map(compute).collect()
    } else {
        horizons.iter().map(compute).collect()
    };

    info!(
        horizons = horizons.len(),
        available = table.iter().filter(|o| o.stats().is_some()).count(),
        parallel,
        "Computed trailing period table"
    );
    table
}
