//! Benchmark-relative statistics over fund/benchmark pairs joined on date.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::constants::{HUNDRED, MIN_ALIGNED_POINTS, TRADING_DAYS};
use super::math::{linear_fit, mean, pearson, safe_ratio, std_dev};
use crate::series::{AlignedSeries, PriceSeries};

/// Regression and active-return statistics against a benchmark.
///
/// `Default` (all zeros) is the result for fewer than 20 shared observations.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AlphaBetaResult {
    /// Annualized regression intercept (daily intercept × 252).
    pub alpha: f64,
    /// Regression slope of fund excess returns on benchmark excess returns.
    pub beta: f64,
    /// Squared Pearson correlation of the excess-return series.
    pub r_squared: f64,
    /// Annualized mean active return / annualized tracking error.
    pub info_ratio: f64,
    /// Percentage of days the fund return beat the benchmark return.
    pub batting_average: f64,
}

/// Participation in benchmark up-months and down-months, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CaptureRatios {
    /// Mean fund return / mean benchmark return over up-months, × 100.
    pub upside: f64,
    /// Mean fund return / mean benchmark return over flat-or-down months, × 100.
    pub downside: f64,
}

/// Alpha, beta and active-return statistics for a fund against a benchmark.
#[must_use]
pub fn alpha_beta(fund: &PriceSeries, bench: &PriceSeries, risk_free_rate: f64) -> AlphaBetaResult {
    alpha_beta_aligned(&AlignedSeries::align(fund, bench), risk_free_rate)
}

/// [`alpha_beta`] over an already aligned pair.
#[must_use]
pub fn alpha_beta_aligned(aligned: &AlignedSeries, risk_free_rate: f64) -> AlphaBetaResult {
    if aligned.len() < MIN_ALIGNED_POINTS {
        debug!(
            aligned = aligned.len(),
            required = MIN_ALIGNED_POINTS,
            "Too few shared observations for alpha/beta"
        );
        return AlphaBetaResult::default();
    }

    let fund_returns = aligned.fund_returns();
    let bench_returns = aligned.bench_returns();

    let daily_rf = risk_free_rate / TRADING_DAYS;
    let fund_excess: Vec<f64> = fund_returns.iter().map(|r| r - daily_rf).collect();
    let bench_excess: Vec<f64> = bench_returns.iter().map(|r| r - daily_rf).collect();

    let (beta, alpha_daily) = linear_fit(&bench_excess, &fund_excess).unwrap_or_else(|| {
        debug!("Benchmark excess returns have no variance, regression undefined");
        (0.0, 0.0)
    });
    let r_squared = pearson(&bench_excess, &fund_excess).map_or(0.0, |r| r * r);

    let active: Vec<f64> = fund_returns
        .iter()
        .zip(&bench_returns)
        .map(|(f, b)| f - b)
        .collect();
    let tracking_error = std_dev(&active).map_or(0.0, |std| std * TRADING_DAYS.sqrt());
    let active_annual = mean(&active).map_or(0.0, |m| m * TRADING_DAYS);

    let wins = fund_returns
        .iter()
        .zip(&bench_returns)
        .filter(|(f, b)| f > b)
        .count();
    let batting_average = safe_ratio(wins as f64, fund_returns.len() as f64) * HUNDRED;

    AlphaBetaResult {
        alpha: alpha_daily * TRADING_DAYS,
        beta,
        r_squared,
        info_ratio: safe_ratio(active_annual, tracking_error),
        batting_average,
    }
}

/// Upside/downside capture from month-end returns of the aligned pair.
#[must_use]
pub fn capture_ratios(fund: &PriceSeries, bench: &PriceSeries) -> CaptureRatios {
    capture_ratios_aligned(&AlignedSeries::align(fund, bench))
}

/// [`capture_ratios`] over an already aligned pair.
#[must_use]
pub fn capture_ratios_aligned(aligned: &AlignedSeries) -> CaptureRatios {
    if aligned.is_empty() {
        return CaptureRatios::default();
    }

    let monthly = aligned.month_end_returns();
    let (up, down): (Vec<(f64, f64)>, Vec<(f64, f64)>) =
        monthly.into_iter().partition(|(_, bench)| *bench > 0.0);

    CaptureRatios {
        upside: capture(&up),
        downside: capture(&down),
    }
}

fn capture(months: &[(f64, f64)]) -> f64 {
    let fund: Vec<f64> = months.iter().map(|(f, _)| *f).collect();
    let bench: Vec<f64> = months.iter().map(|(_, b)| *b).collect();
    match (mean(&fund), mean(&bench)) {
        (Some(f), Some(b)) => safe_ratio(f, b) * HUNDRED,
        _ => 0.0,
    }
}
