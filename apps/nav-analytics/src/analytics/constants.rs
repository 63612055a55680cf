//! Day-count and threshold constants shared by every transform.

/// Trading days per year, used for daily-to-annual scaling.
pub const TRADING_DAYS: f64 = 252.0;
/// Calendar days per year (actual/365.25) for multi-year annualization.
pub const DAYS_PER_YEAR: f64 = 365.25;
/// Scale for percentage-style outputs.
pub const HUNDRED: f64 = 100.0;

/// Minimum history before the Hurst estimate is attempted.
pub const HURST_MIN_POINTS: usize = 100;
/// Lags used by the Hurst estimate (2 through 19).
pub const HURST_LAGS: std::ops::Range<usize> = 2..20;
/// Random-walk value returned when the Hurst estimate is not computable.
pub const NEUTRAL_HURST: f64 = 0.5;

/// Minimum shared observations for benchmark-relative statistics.
pub const MIN_ALIGNED_POINTS: usize = 20;

/// Rolling-return horizons (years) reported in the profile.
pub const ROLLING_HORIZONS: [u32; 3] = [1, 3, 5];

/// √252, the daily-to-annual volatility multiplier.
#[must_use]
pub fn annualization_factor() -> f64 {
    TRADING_DAYS.sqrt()
}
