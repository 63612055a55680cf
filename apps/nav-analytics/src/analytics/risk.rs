//! Risk transforms: volatility, downside deviation, drawdowns and the Hurst
//! exponent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::constants::{HURST_LAGS, HURST_MIN_POINTS, NEUTRAL_HURST, annualization_factor};
use super::math::{self, linear_fit, population_std_dev, std_dev};
use crate::series::PriceSeries;

/// Drawdown at one observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawdownPoint {
    /// Observation date.
    pub date: NaiveDate,
    /// `(price - running_max) / running_max`, always `<= 0`.
    pub drawdown: f64,
}

/// Drawdown series aligned 1:1 with its source prices.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DrawdownSeries {
    points: Vec<DrawdownPoint>,
}

impl DrawdownSeries {
    /// Per-observation drawdowns.
    #[must_use]
    pub fn points(&self) -> &[DrawdownPoint] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Most negative drawdown (0.0 when empty).
    #[must_use]
    pub fn max_drawdown(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.drawdown)
            .fold(0.0, f64::min)
    }

    /// Point where the deepest drawdown occurs (earliest on ties).
    #[must_use]
    pub fn trough(&self) -> Option<&DrawdownPoint> {
        self.points
            .iter()
            .reduce(|best, p| if p.drawdown < best.drawdown { p } else { best })
    }
}

/// Drawdown from the running maximum at every observation.
#[must_use]
pub fn drawdowns(series: &PriceSeries) -> DrawdownSeries {
    let mut peak = f64::MIN;
    let points = series
        .points()
        .iter()
        .map(|p| {
            peak = peak.max(p.price);
            DrawdownPoint {
                date: p.date,
                drawdown: (p.price - peak) / peak,
            }
        })
        .collect();

    DrawdownSeries { points }
}

/// Deepest drawdown of the series (0.0 when empty).
#[must_use]
pub fn max_drawdown(series: &PriceSeries) -> f64 {
    drawdowns(series).max_drawdown()
}

/// Annualized volatility: sample std of daily returns × √252.
///
/// Returns 0.0 with fewer than two returns.
#[must_use]
pub fn volatility(series: &PriceSeries) -> f64 {
    annualized_volatility(&series.return_values())
}

/// Annualized downside deviation.
///
/// Squares of negative daily returns are averaged over the total number of
/// returns (not the number of negative ones), then scaled by √252.
#[must_use]
pub fn downside_deviation(series: &PriceSeries) -> f64 {
    annualized_downside_deviation(&series.return_values())
}

pub(crate) fn annualized_volatility(returns: &[f64]) -> f64 {
    std_dev(returns).map_or(0.0, |std| std * annualization_factor())
}

pub(crate) fn annualized_downside_deviation(returns: &[f64]) -> f64 {
    math::downside_deviation(returns).map_or(0.0, |dd| dd * annualization_factor())
}

/// Trend-persistence proxy from lagged price differences.
///
/// For lags 2..=19, takes `sqrt(std(price[lag..] - price[..len-lag]))`, fits
/// a line to `ln(lag)` vs `ln` of that value, and returns `slope * 2`.
/// Falls back to 0.5 below 100 points or when a lag has zero dispersion.
#[must_use]
pub fn hurst_exponent(series: &PriceSeries) -> f64 {
    if series.len() < HURST_MIN_POINTS {
        return NEUTRAL_HURST;
    }

    let prices = series.prices();
    let mut log_lags = Vec::with_capacity(HURST_LAGS.len());
    let mut log_tau = Vec::with_capacity(HURST_LAGS.len());

    for lag in HURST_LAGS {
        let diffs: Vec<f64> = prices[lag..]
            .iter()
            .zip(&prices)
            .map(|(later, earlier)| later - earlier)
            .collect();

        let tau = population_std_dev(&diffs).map_or(0.0, f64::sqrt);
        if tau <= 0.0 || !tau.is_finite() {
            debug!(lag, "Zero dispersion at lag, using neutral Hurst exponent");
            return NEUTRAL_HURST;
        }

        log_lags.push((lag as f64).ln());
        log_tau.push(tau.ln());
    }

    linear_fit(&log_lags, &log_tau).map_or(NEUTRAL_HURST, |(slope, _)| slope * 2.0)
}

#[cfg(test)]
mod tests {
    use chrono::Days;

    use super::*;
    use crate::series::PricePoint;

    fn daily(prices: &[f64]) -> PriceSeries {
        let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        PriceSeries::new(
            prices
                .iter()
                .enumerate()
                .map(|(i, &p)| PricePoint::new(start + Days::new(i as u64), p))
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_drawdown_calculation() {
        let s = daily(&[100.0, 110.0, 105.0, 108.0, 95.0, 100.0]);
        let dd = drawdowns(&s);

        assert_eq!(dd.len(), 6);
        assert_eq!(dd.points()[0].drawdown, 0.0);
        assert_eq!(dd.points()[1].drawdown, 0.0);
        let expected = (95.0 - 110.0) / 110.0;
        assert!((dd.max_drawdown() - expected).abs() < 1e-12);
        assert_eq!(dd.trough().unwrap().date, s.points()[4].date);
    }

    #[test]
    fn test_drawdown_empty() {
        let dd = drawdowns(&PriceSeries::default());
        assert!(dd.is_empty());
        assert_eq!(dd.max_drawdown(), 0.0);
        assert!(dd.trough().is_none());
    }

    #[test]
    fn test_volatility_constant_growth_is_zero() {
        let prices: Vec<f64> = (0..50).map(|i| 100.0 * 1.001_f64.powi(i)).collect();
        assert!(volatility(&daily(&prices)) < 1e-9);
        assert_eq!(volatility(&daily(&[100.0, 101.0])), 0.0);
    }

    #[test]
    fn test_downside_deviation_total_count_denominator() {
        // Returns: +10%, -10%, +0%  -> sqrt(0.01 / 3) * sqrt(252)
        let s = daily(&[100.0, 110.0, 99.0, 99.0]);
        let expected = (0.01_f64 / 3.0).sqrt() * 252.0_f64.sqrt();
        assert!((downside_deviation(&s) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_downside_deviation_no_losses() {
        assert_eq!(downside_deviation(&daily(&[100.0, 101.0, 102.0])), 0.0);
        assert_eq!(downside_deviation(&daily(&[100.0])), 0.0);
    }

    #[test]
    fn test_hurst_short_series_is_neutral() {
        let prices: Vec<f64> = (0..99).map(|i| 100.0 + f64::from(i % 7)).collect();
        assert_eq!(hurst_exponent(&daily(&prices)), NEUTRAL_HURST);
    }

    #[test]
    fn test_hurst_linear_series_is_neutral() {
        // Constant differences at every lag have zero dispersion.
        let prices: Vec<f64> = (0..200).map(|i| 100.0 + f64::from(i)).collect();
        assert_eq!(hurst_exponent(&daily(&prices)), NEUTRAL_HURST);
    }

    #[test]
    fn test_hurst_golden_value() {
        // Multiplicative random walk driven by a 64-bit LCG (seed 1).
        let mut state: u64 = 1;
        let mut price = 100.0_f64;
        let prices: Vec<f64> = (0..300)
            .map(|_| {
                state = state
                    .wrapping_mul(6_364_136_223_846_793_005)
                    .wrapping_add(1_442_695_040_888_963_407);
                let u = (state >> 11) as f64 / (1_u64 << 53) as f64 - 0.5;
                price *= 1.0 + 0.02 * u;
                price
            })
            .collect();

        // Lags 2..=19, sqrt of the lagged-difference std, slope doubled.
        let h = hurst_exponent(&daily(&prices));
        assert!((h - 0.418_458_155_158).abs() < 1e-9, "hurst = {h}");
    }

    #[test]
    fn test_hurst_mean_reverting_below_trending() {
        // Bounded oscillation: lagged differences do not grow with lag.
        let reverting: Vec<f64> = (0..300)
            .map(|i| 100.0 + 3.0 * (f64::from(i) * 2.1).sin())
            .collect();
        // Quadratic drift: dispersion grows with lag.
        let trending: Vec<f64> = (0..300)
            .map(|i| 100.0 + 0.01 * f64::from(i * i) + f64::from(i % 3))
            .collect();

        let h_rev = hurst_exponent(&daily(&reverting));
        let h_trend = hurst_exponent(&daily(&trending));
        assert!(h_rev.is_finite() && h_trend.is_finite());
        assert!(h_rev < h_trend);
    }
}
