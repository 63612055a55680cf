//! Top-level fund report for one analysis period.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use super::constants::DAYS_PER_YEAR;
use super::periods::{PeriodOutcome, period_table};
use super::ratios::{RiskMetrics, risk_metrics};
use super::relative::{AlphaBetaResult, CaptureRatios, alpha_beta_aligned, capture_ratios_aligned};
use super::returns::{
    CalendarYearReturn, RollingReturnProfile, calendar_year_returns, fund_multiplier,
    rolling_return_profile,
};
use super::risk::{DrawdownSeries, drawdowns};
use super::sip::{SipOutcome, simulate_sip};
use crate::config::AnalyticsSettings;
use crate::series::{AlignedSeries, AnalysisPeriod, PricePoint, PriceSeries};

/// Base value the comparison chart is rebased to.
const REBASE_LEVEL: f64 = 100.0;

/// Fund vs benchmark statistics over the selected period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BenchmarkComparison {
    /// Observations shared by both series.
    pub aligned_points: usize,
    /// Regression and active-return statistics.
    pub alpha_beta: AlphaBetaResult,
    /// Up/down-market capture.
    pub capture: CaptureRatios,
    /// Benchmark calendar-year returns over its full history.
    pub benchmark_calendar_returns: Vec<CalendarYearReturn>,
    /// Fund rebased to 100 at the period start.
    pub fund_rebased: Vec<PricePoint>,
    /// Benchmark rebased to 100 at the period start.
    pub benchmark_rebased: Vec<PricePoint>,
}

/// Everything the dashboard shows for one fund.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FundReport {
    /// Period the point-in-time figures cover.
    pub period: AnalysisPeriod,
    /// Observations in the period.
    pub observations: usize,
    /// First date in the period.
    pub start: Option<NaiveDate>,
    /// Last date in the period.
    pub end: Option<NaiveDate>,
    /// Years of actual history in the period (for labelling).
    pub history_years: f64,
    /// `last / first` over the period.
    pub growth_multiple: f64,
    /// Risk record over the period.
    pub risk: Option<RiskMetrics>,
    /// Worst drawdown over the period.
    pub max_drawdown: f64,
    /// Drawdown curve over the period.
    pub drawdowns: DrawdownSeries,
    /// Calendar-year returns over the full history.
    pub calendar_returns: Vec<CalendarYearReturn>,
    /// Rolling-return profile over the full history.
    pub rolling_profile: RollingReturnProfile,
    /// Monthly SIP over the period.
    pub sip: Option<SipOutcome>,
    /// Benchmark statistics, when a benchmark was supplied.
    pub benchmark: Option<BenchmarkComparison>,
    /// Trailing-period table over the full history.
    pub periods: Vec<PeriodOutcome>,
}

/// Build the report for `fund` (and optionally `bench`) over `period`.
///
/// Point-in-time figures use the period slice; calendar returns, rolling
/// profile and the trailing table always use the full history.
#[must_use]
#[instrument(skip_all, fields(period = ?period, observations = fund.len()))]
pub fn build_report(
    settings: &AnalyticsSettings,
    fund: &PriceSeries,
    bench: Option<&PriceSeries>,
    period: AnalysisPeriod,
) -> FundReport {
    let rf = settings.risk_free_rate;
    let window = fund.slice(period);
    if window.is_empty() {
        debug!("Selected period contains no observations");
    }

    let drawdown_curve = drawdowns(&window);
    let history_years = window.span_days() as f64 / DAYS_PER_YEAR;

    let benchmark = bench.map(|b| {
        let bench_window = b.slice(period);
        let aligned = AlignedSeries::align(&window, &bench_window);
        BenchmarkComparison {
            aligned_points: aligned.len(),
            alpha_beta: alpha_beta_aligned(&aligned, rf),
            capture: capture_ratios_aligned(&aligned),
            benchmark_calendar_returns: calendar_year_returns(b),
            fund_rebased: window.rebase(REBASE_LEVEL),
            benchmark_rebased: bench_window.rebase(REBASE_LEVEL),
        }
    });

    let report = FundReport {
        period,
        observations: window.len(),
        start: window.first().map(|p| p.date),
        end: window.last().map(|p| p.date),
        history_years,
        growth_multiple: fund_multiplier(&window),
        risk: risk_metrics(&window, rf),
        max_drawdown: drawdown_curve.max_drawdown(),
        drawdowns: drawdown_curve,
        calendar_returns: calendar_year_returns(fund),
        rolling_profile: rolling_return_profile(fund),
        sip: simulate_sip(&window, settings.sip_amount),
        benchmark,
        periods: period_table(
            fund,
            bench,
            &settings.periods,
            rf,
            settings.parallel_periods,
        ),
    };

    info!(
        observations = report.observations,
        history_years,
        benchmark = report.benchmark.is_some(),
        "Built fund report"
    );
    report
}
