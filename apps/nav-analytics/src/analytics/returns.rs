//! Return and growth transforms: CAGR, growth multiplier, rolling and
//! calendar-year returns, and the rolling-return profile.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::constants::{DAYS_PER_YEAR, ROLLING_HORIZONS, TRADING_DAYS};
use super::math::median;
use crate::series::{PriceSeries, ReturnPoint};

/// Return for one calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalendarYearReturn {
    /// Calendar year.
    pub year: i32,
    /// Return as a decimal fraction. The first year is measured from the
    /// first observation, so it may cover a partial year.
    pub value: f64,
}

/// Share of rolling windows falling into each return band.
///
/// Bands are half-open and together cover every return: `< 0`, `[0, 5%)`,
/// `[5%, 10%)`, `[10%, 15%)`, `[15%, 20%)`, `>= 20%`. Values are fractions
/// in `[0, 1]` summing to 1.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReturnBuckets {
    /// Share of negative returns.
    pub negative: f64,
    /// Share in `[0, 5%)`.
    pub zero_to_five: f64,
    /// Share in `[5%, 10%)`.
    pub five_to_ten: f64,
    /// Share in `[10%, 15%)`.
    pub ten_to_fifteen: f64,
    /// Share in `[15%, 20%)`.
    pub fifteen_to_twenty: f64,
    /// Share at or above 20%.
    pub above_twenty: f64,
}

impl ReturnBuckets {
    /// Upper bounds of the non-negative bands.
    const EDGES: [f64; 4] = [0.05, 0.10, 0.15, 0.20];

    fn from_returns(values: &[f64]) -> Self {
        let mut counts = [0usize; 6];
        for &value in values {
            counts[Self::band(value)] += 1;
        }

        let total = values.len().max(1) as f64;
        let share = |idx: usize| counts[idx] as f64 / total;
        Self {
            negative: share(0),
            zero_to_five: share(1),
            five_to_ten: share(2),
            ten_to_fifteen: share(3),
            fifteen_to_twenty: share(4),
            above_twenty: share(5),
        }
    }

    fn band(value: f64) -> usize {
        if value < 0.0 {
            return 0;
        }
        Self::EDGES
            .iter()
            .position(|edge| value < *edge)
            .map_or(5, |idx| idx + 1)
    }
}

/// Distribution summary of rolling annualized returns for one horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingStats {
    /// Number of rolling windows observed.
    pub observations: usize,
    /// Worst rolling return.
    pub minimum: f64,
    /// Median rolling return.
    pub median: f64,
    /// Best rolling return.
    pub maximum: f64,
    /// Band frequencies.
    pub buckets: ReturnBuckets,
}

/// Rolling-return result for one horizon: either statistics or an explicit
/// insufficient-history marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum HorizonProfile {
    /// Enough history for at least one full window.
    Available(RollingStats),
    /// History too short for a single window.
    InsufficientHistory {
        /// Observations needed for one window plus its end point.
        required: usize,
        /// Observations present.
        available: usize,
    },
}

impl HorizonProfile {
    /// Statistics if available.
    #[must_use]
    pub const fn stats(&self) -> Option<&RollingStats> {
        match self {
            Self::Available(stats) => Some(stats),
            Self::InsufficientHistory { .. } => None,
        }
    }
}

/// Rolling-return profile over the 1, 3 and 5 year horizons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RollingReturnProfile {
    /// 1-year windows.
    pub one_year: HorizonProfile,
    /// 3-year windows.
    pub three_year: HorizonProfile,
    /// 5-year windows.
    pub five_year: HorizonProfile,
}

impl RollingReturnProfile {
    /// `(years, profile)` pairs in ascending horizon order.
    #[must_use]
    pub const fn horizons(&self) -> [(u32, &HorizonProfile); 3] {
        [
            (ROLLING_HORIZONS[0], &self.one_year),
            (ROLLING_HORIZONS[1], &self.three_year),
            (ROLLING_HORIZONS[2], &self.five_year),
        ]
    }

    /// Whether no horizon has enough history.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.horizons().iter().all(|(_, p)| p.stats().is_none())
    }
}

/// Compound annual growth rate using an actual/365.25 day count.
///
/// Returns 0.0 for fewer than two points, a non-positive span, or a span
/// too short for the annualized figure to be finite.
#[must_use]
pub fn cagr(series: &PriceSeries) -> f64 {
    let (Some(first), Some(last)) = (series.first(), series.last()) else {
        return 0.0;
    };
    if series.len() < 2 {
        return 0.0;
    }

    let days = series.span_days();
    if days <= 0 {
        return 0.0;
    }

    let years = days as f64 / DAYS_PER_YEAR;
    let growth = (last.price / first.price).powf(1.0 / years) - 1.0;
    if growth.is_finite() {
        growth
    } else {
        debug!(days, "CAGR overflowed over a short span");
        0.0
    }
}

/// How many times the first price has grown by the last (1.0 when empty).
#[must_use]
pub fn fund_multiplier(series: &PriceSeries) -> f64 {
    match (series.first(), series.last()) {
        (Some(first), Some(last)) => last.price / first.price,
        _ => 1.0,
    }
}

/// Number of observations spanned by a rolling window of `window_years`.
#[must_use]
pub fn rolling_window(window_years: f64) -> usize {
    (window_years * TRADING_DAYS).round().max(0.0) as usize
}

/// Backward-looking annualized returns over overlapping windows of
/// `round(window_years * 252)` observations.
///
/// Empty when the series has no complete window.
#[must_use]
pub fn rolling_returns(series: &PriceSeries, window_years: f64) -> Vec<ReturnPoint> {
    let window = rolling_window(window_years);
    if window == 0 || series.len() <= window {
        return Vec::new();
    }

    let points = series.points();
    let exponent = 1.0 / window_years;
    (window..points.len())
        .map(|i| ReturnPoint {
            date: points[i].date,
            value: (points[i].price / points[i - window].price).powf(exponent) - 1.0,
        })
        .collect()
}

/// Year-over-year returns from year-end observations.
///
/// The first year is measured against the series' first observation rather
/// than dropped.
#[must_use]
pub fn calendar_year_returns(series: &PriceSeries) -> Vec<CalendarYearReturn> {
    use chrono::Datelike;

    let Some(first) = series.first() else {
        return Vec::new();
    };

    let mut previous = first.price;
    series
        .year_end_points()
        .into_iter()
        .map(|point| {
            let value = point.price / previous - 1.0;
            previous = point.price;
            CalendarYearReturn {
                year: point.date.year(),
                value,
            }
        })
        .collect()
}

/// Rolling-return statistics for one horizon.
#[must_use]
pub fn horizon_profile(series: &PriceSeries, years: u32) -> HorizonProfile {
    let rolling = rolling_returns(series, f64::from(years));
    let values: Vec<f64> = rolling.iter().map(|r| r.value).collect();

    let (Some(minimum), Some(maximum), Some(median)) = (
        values.iter().copied().reduce(f64::min),
        values.iter().copied().reduce(f64::max),
        median(&values),
    ) else {
        debug!(years, points = series.len(), "Insufficient history for rolling horizon");
        return HorizonProfile::InsufficientHistory {
            required: rolling_window(f64::from(years)) + 1,
            available: series.len(),
        };
    };

    HorizonProfile::Available(RollingStats {
        observations: values.len(),
        minimum,
        median,
        maximum,
        buckets: ReturnBuckets::from_returns(&values),
    })
}

/// Rolling-return profile across the standard horizons.
#[must_use]
pub fn rolling_return_profile(series: &PriceSeries) -> RollingReturnProfile {
    RollingReturnProfile {
        one_year: horizon_profile(series, ROLLING_HORIZONS[0]),
        three_year: horizon_profile(series, ROLLING_HORIZONS[1]),
        five_year: horizon_profile(series, ROLLING_HORIZONS[2]),
    }
}
