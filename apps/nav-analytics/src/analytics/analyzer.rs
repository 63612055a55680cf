//! Analyzer bound to a set of analytics settings.

use super::periods::{PeriodOutcome, period_stats, period_table};
use super::ratios::{RiskMetrics, risk_metrics};
use super::relative::{AlphaBetaResult, CaptureRatios, alpha_beta, capture_ratios};
use super::report::{FundReport, build_report};
use super::returns::{
    CalendarYearReturn, RollingReturnProfile, cagr, calendar_year_returns, fund_multiplier,
    rolling_return_profile, rolling_returns,
};
use super::risk::{DrawdownSeries, drawdowns, hurst_exponent, max_drawdown, volatility};
use super::sip::{SipOutcome, simulate_sip};
use crate::config::AnalyticsSettings;
use crate::series::{AnalysisPeriod, PriceSeries, ReturnPoint};

/// Immutable analytics front end.
///
/// Every method forwards to the matching free function, supplying the
/// risk-free rate, SIP amount and horizons from the bound settings. Changing
/// a parameter produces a new analyzer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analyzer {
    settings: AnalyticsSettings,
}

#[allow(clippy::unused_self)]
impl Analyzer {
    /// Create an analyzer with the given settings.
    #[must_use]
    pub const fn new(settings: AnalyticsSettings) -> Self {
        Self { settings }
    }

    /// Copy of this analyzer using a different risk-free rate.
    #[must_use]
    pub fn with_risk_free_rate(self, rate: f64) -> Self {
        Self {
            settings: AnalyticsSettings {
                risk_free_rate: rate,
                ..self.settings
            },
        }
    }

    /// Bound settings.
    #[must_use]
    pub const fn settings(&self) -> &AnalyticsSettings {
        &self.settings
    }

    /// Compound annual growth rate.
    #[must_use]
    pub fn cagr(&self, series: &PriceSeries) -> f64 {
        cagr(series)
    }

    /// Growth multiple `last / first`.
    #[must_use]
    pub fn fund_multiplier(&self, series: &PriceSeries) -> f64 {
        fund_multiplier(series)
    }

    /// Annualized volatility.
    #[must_use]
    pub fn volatility(&self, series: &PriceSeries) -> f64 {
        volatility(series)
    }

    /// Drawdown curve.
    #[must_use]
    pub fn drawdowns(&self, series: &PriceSeries) -> DrawdownSeries {
        drawdowns(series)
    }

    /// Deepest drawdown.
    #[must_use]
    pub fn max_drawdown(&self, series: &PriceSeries) -> f64 {
        max_drawdown(series)
    }

    /// Hurst exponent estimate.
    #[must_use]
    pub fn hurst_exponent(&self, series: &PriceSeries) -> f64 {
        hurst_exponent(series)
    }

    /// Risk record at the bound risk-free rate.
    #[must_use]
    pub fn risk_metrics(&self, series: &PriceSeries) -> Option<RiskMetrics> {
        risk_metrics(series, self.settings.risk_free_rate)
    }

    /// Annualized rolling returns over `window_years`.
    #[must_use]
    pub fn rolling_returns(&self, series: &PriceSeries, window_years: f64) -> Vec<ReturnPoint> {
        rolling_returns(series, window_years)
    }

    /// Rolling-return profile for the 1/3/5-year horizons.
    #[must_use]
    pub fn rolling_return_profile(&self, series: &PriceSeries) -> RollingReturnProfile {
        rolling_return_profile(series)
    }

    /// Calendar-year returns.
    #[must_use]
    pub fn calendar_year_returns(&self, series: &PriceSeries) -> Vec<CalendarYearReturn> {
        calendar_year_returns(series)
    }

    /// Alpha/beta against `bench` at the bound risk-free rate.
    #[must_use]
    pub fn alpha_beta(&self, fund: &PriceSeries, bench: &PriceSeries) -> AlphaBetaResult {
        alpha_beta(fund, bench, self.settings.risk_free_rate)
    }

    /// Upside/downside capture against `bench`.
    #[must_use]
    pub fn capture_ratios(&self, fund: &PriceSeries, bench: &PriceSeries) -> CaptureRatios {
        capture_ratios(fund, bench)
    }

    /// Monthly SIP with the bound contribution.
    #[must_use]
    pub fn simulate_sip(&self, series: &PriceSeries) -> Option<SipOutcome> {
        simulate_sip(series, self.settings.sip_amount)
    }

    /// Statistics for one trailing horizon.
    #[must_use]
    pub fn period_stats(
        &self,
        fund: &PriceSeries,
        bench: Option<&PriceSeries>,
        years: u32,
    ) -> PeriodOutcome {
        period_stats(fund, bench, years, self.settings.risk_free_rate)
    }

    /// Statistics for every configured horizon.
    #[must_use]
    pub fn period_table(
        &self,
        fund: &PriceSeries,
        bench: Option<&PriceSeries>,
    ) -> Vec<PeriodOutcome> {
        period_table(
            fund,
            bench,
            &self.settings.periods,
            self.settings.risk_free_rate,
            self.settings.parallel_periods,
        )
    }

    /// Full report over `period`.
    #[must_use]
    pub fn report(
        &self,
        fund: &PriceSeries,
        bench: Option<&PriceSeries>,
        period: AnalysisPeriod,
    ) -> FundReport {
        build_report(&self.settings, fund, bench, period)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Days, NaiveDate};

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
    fn test_default_settings() {
        let analyzer = Analyzer::default();
        assert!((analyzer.settings().risk_free_rate - 0.06).abs() < f64::EPSILON);
    }

    #[test]
    fn test_with_risk_free_rate_leaves_original_untouched() {
        let base = Analyzer::default();
        let changed = base.clone().with_risk_free_rate(0.02);

        assert!((base.settings().risk_free_rate - 0.06).abs() < f64::EPSILON);
        assert!((changed.settings().risk_free_rate - 0.02).abs() < f64::EPSILON);
        assert_eq!(changed.settings().periods, base.settings().periods);
    }

    #[test]
    fn test_forwards_bound_rate() {
        let s = daily(&[100.0, 102.0, 99.0, 103.0, 101.0, 105.0]);
        let analyzer = Analyzer::default().with_risk_free_rate(0.03);
        assert_eq!(analyzer.risk_metrics(&s), risk_metrics(&s, 0.03));
        assert_eq!(analyzer.cagr(&s), cagr(&s));
        assert_eq!(analyzer.max_drawdown(&s), max_drawdown(&s));
    }

    #[test]
    fn test_sip_uses_configured_amount() {
        let s = daily(&[10.0, 11.0]);
        let analyzer = Analyzer::new(AnalyticsSettings {
            sip_amount: 250.0,
            ..AnalyticsSettings::default()
        });
        let Some(outcome) = analyzer.simulate_sip(&s) else {
            panic!("SIP should run");
        };
        assert!((outcome.total_invested - 250.0).abs() < 1e-12);
    }

    #[test]
    fn test_period_table_uses_configured_horizons() {
        let s = daily(&[100.0, 101.0, 102.0]);
        let analyzer = Analyzer::new(AnalyticsSettings {
            periods: vec![2, 7],
            ..AnalyticsSettings::default()
        });
        let years: Vec<u32> = analyzer
            .period_table(&s, None)
            .iter()
            .map(PeriodOutcome::years)
            .collect();
        assert_eq!(years, vec![2, 7]);
    }
}
