//! Composite risk-adjusted ratios bundled into [`RiskMetrics`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::constants::TRADING_DAYS;
use super::math::{mean, safe_ratio};
use super::returns::cagr;
use super::risk::{
    annualized_downside_deviation, annualized_volatility, hurst_exponent, max_drawdown,
};
use crate::series::PriceSeries;

/// Risk and risk-adjusted return statistics for one price series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    /// Annualized volatility (sample std of daily returns × √252).
    pub volatility: f64,
    /// (mean daily return × 252 − rf) / volatility.
    pub sharpe_ratio: f64,
    /// (mean daily return × 252 − rf) / downside deviation.
    pub sortino_ratio: f64,
    /// Annualized downside deviation.
    pub downside_deviation: f64,
    /// CAGR / |max drawdown|.
    pub calmar_ratio: f64,
    /// Gains over losses relative to the daily risk-free threshold.
    pub omega_ratio: f64,
    /// Trend-persistence proxy (0.5 = random walk).
    pub hurst_exponent: f64,
    /// Compound annual growth rate.
    pub cagr: f64,
}

/// Compute the full risk record.
///
/// Returns `None` (an empty record) for series shorter than two points;
/// otherwise every field is populated, with each ratio falling back to 0
/// when its own denominator is 0.
#[must_use]
pub fn risk_metrics(series: &PriceSeries, risk_free_rate: f64) -> Option<RiskMetrics> {
    if series.len() < 2 {
        debug!(points = series.len(), "Series too short for risk metrics");
        return None;
    }

    let returns = series.return_values();
    let volatility = annualized_volatility(&returns);
    let mean_annual_return = mean(&returns)? * TRADING_DAYS;
    let excess_return = mean_annual_return - risk_free_rate;

    let downside_deviation = annualized_downside_deviation(&returns);
    let growth = cagr(series);
    let max_dd = max_drawdown(series);

    Some(RiskMetrics {
        volatility,
        sharpe_ratio: safe_ratio(excess_return, volatility),
        sortino_ratio: safe_ratio(excess_return, downside_deviation),
        downside_deviation,
        calmar_ratio: safe_ratio(growth, max_dd.abs()),
        omega_ratio: omega_ratio(&returns, risk_free_rate),
        hurst_exponent: hurst_exponent(series),
        cagr: growth,
    })
}

/// Omega ratio of daily returns against the threshold `rf / 252`.
///
/// Sum of `(r - threshold)` over returns above the threshold, divided by the
/// sum of `|r - threshold|` over returns at or below it; 0 when that loss sum
/// is 0.
///
/// Losses are measured from the threshold, not as the absolute sum of the raw
/// returns at or below it, so values differ from a raw-return Omega.
#[must_use]
pub fn omega_ratio(returns: &[f64], risk_free_rate: f64) -> f64 {
    let threshold = risk_free_rate / TRADING_DAYS;
    let (gains, losses) = returns.iter().fold((0.0, 0.0), |(gains, losses), r| {
        let excess = r - threshold;
        if excess > 0.0 {
            (gains + excess, losses)
        } else {
            (gains, losses + excess.abs())
        }
    });
    safe_ratio(gains, losses)
}
