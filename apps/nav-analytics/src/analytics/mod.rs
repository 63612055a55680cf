//! Return and risk analytics over validated price series.
//!
//! Implements the fund dashboard metrics:
//! - CAGR, growth multiple, rolling and calendar-year returns
//! - Volatility, downside deviation, drawdowns, Hurst exponent
//! - Sharpe, Sortino, Calmar and Omega ratios
//! - Alpha/beta, information ratio, batting average, capture ratios
//! - SIP simulation and trailing-period tables
//!
//! Every function is pure and total: degenerate input resolves to a defined
//! fallback (usually 0) rather than an error or NaN.

mod analyzer;
mod constants;
mod math;
mod periods;
mod ratios;
mod relative;
mod report;
mod returns;
mod risk;
mod sip;

pub use analyzer::Analyzer;
pub use constants::{DAYS_PER_YEAR, MIN_ALIGNED_POINTS, TRADING_DAYS};
pub use periods::{
    InsufficientData, PeriodOutcome, PeriodStats, RelativeStats, ReturnRisk, period_stats,
    period_table,
};
pub use ratios::{RiskMetrics, omega_ratio, risk_metrics};
pub use relative::{
    AlphaBetaResult, CaptureRatios, alpha_beta, alpha_beta_aligned, capture_ratios,
    capture_ratios_aligned,
};
pub use report::{BenchmarkComparison, FundReport, build_report};
pub use returns::{
    CalendarYearReturn, HorizonProfile, ReturnBuckets, RollingReturnProfile, RollingStats, cagr,
    calendar_year_returns, fund_multiplier, horizon_profile, rolling_return_profile,
    rolling_returns, rolling_window,
};
pub use risk::{
    DrawdownPoint, DrawdownSeries, downside_deviation, drawdowns, hurst_exponent, max_drawdown,
    volatility,
};
pub use sip::{SipOutcome, simulate_sip};
