//! Integration tests for the analytics engine.
//!
//! These tests drive the public API end to end with hand-built price
//! histories whose expected metrics are known in closed form.

use approx::{assert_abs_diff_eq, assert_relative_eq};
use chrono::{Days, NaiveDate};
use nav_analytics::analytics::{
    AlphaBetaResult, CaptureRatios, alpha_beta, cagr, capture_ratios, drawdowns, max_drawdown,
    volatility,
};
use nav_analytics::{AlignedSeries, AnalysisPeriod, Analyzer, PricePoint, PriceSeries};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn daily_series(start: NaiveDate, prices: &[f64]) -> PriceSeries {
    PriceSeries::new(
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::new(start + Days::new(i as u64), p))
            .collect(),
    )
    .unwrap()
}

/// Drifting price path with a monthly-scale oscillation, so both up and down
/// months occur.
fn oscillating(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 100.0 + i as f64 * 0.05 + 8.0 * (i as f64 * 0.3).sin())
        .collect()
}

#[test]
fn test_linear_rise_over_one_year() {
    // 252 observations spread evenly across 365 calendar days, 100 -> 110.
    let start = date(2023, 1, 1);
    let points: Vec<PricePoint> = (0..252)
        .map(|i| {
            let offset = (f64::from(i) * 365.0 / 251.0).round() as u64;
            PricePoint::new(
                start + Days::new(offset),
                100.0 + 10.0 * f64::from(i) / 251.0,
            )
        })
        .collect();
    let series = PriceSeries::new(points).unwrap();

    assert_eq!(series.span_days(), 365);
    assert_abs_diff_eq!(cagr(&series), 0.10, epsilon = 1e-3);
    assert_eq!(max_drawdown(&series), 0.0);
    assert!(volatility(&series) < 0.01);
}

#[test]
fn test_drop_and_full_recovery() {
    let mut prices: Vec<f64> = (0..50).map(|i| 90.0 + f64::from(i) * 10.0 / 49.0).collect();
    prices.extend((1..=10).map(|i| 100.0 - 2.0 * f64::from(i)));
    prices.extend((1..=30).map(|i| 80.0 + f64::from(i)));
    let series = daily_series(date(2022, 6, 1), &prices);

    let curve = drawdowns(&series);
    let Some(trough) = curve.trough() else {
        panic!("non-empty series has a trough");
    };
    assert_relative_eq!(trough.drawdown, -0.20, epsilon = 1e-12);
    assert_eq!(trough.date, date(2022, 6, 1) + Days::new(59));
    assert_eq!(curve.points().last().map(|p| p.drawdown), Some(0.0));
    assert_relative_eq!(max_drawdown(&series), -0.20, epsilon = 1e-12);
}

#[test]
fn test_identical_fund_and_benchmark() {
    let series = daily_series(date(2022, 1, 1), &oscillating(400));
    let analyzer = Analyzer::default();

    let result = analyzer.alpha_beta(&series, &series);
    assert_abs_diff_eq!(result.beta, 1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.alpha, 0.0, epsilon = 1e-9);
    assert_abs_diff_eq!(result.r_squared, 1.0, epsilon = 1e-9);

    let capture = analyzer.capture_ratios(&series, &series);
    assert_abs_diff_eq!(capture.upside, 100.0, epsilon = 1e-9);
    assert_abs_diff_eq!(capture.downside, 100.0, epsilon = 1e-9);
}

#[test]
fn test_disjoint_benchmark_yields_neutral_defaults() {
    let fund = daily_series(date(2022, 1, 1), &oscillating(60));
    let bench = daily_series(date(2015, 1, 1), &oscillating(60));

    assert!(AlignedSeries::align(&fund, &bench).is_empty());
    assert_eq!(alpha_beta(&fund, &bench, 0.06), AlphaBetaResult::default());
    assert_eq!(capture_ratios(&fund, &bench), CaptureRatios::default());
}

#[test]
fn test_csv_to_report() {
    let mut csv = String::from("date,nav\n");
    for (i, price) in oscillating(300).iter().enumerate() {
        let day = date(2021, 1, 1) + Days::new(i as u64);
        csv.push_str(&format!("{},{price:.4}\n", day.format("%d-%m-%Y")));
    }

    let fund = PriceSeries::from_csv_reader(csv.as_bytes()).unwrap();
    assert_eq!(fund.len(), 300);

    let report = Analyzer::default().report(&fund, Some(&fund), AnalysisPeriod::AllTime);
    assert_eq!(report.observations, 300);
    assert!(report.max_drawdown < 0.0);
    assert!(report.risk.is_some());
    let Some(comparison) = &report.benchmark else {
        panic!("benchmark comparison expected");
    };
    assert_eq!(comparison.aligned_points, 300);
    assert_abs_diff_eq!(comparison.alpha_beta.beta, 1.0, epsilon = 1e-9);

    let json = serde_json::to_value(&report).unwrap();
    assert!(json["rolling_profile"]["one_year"]["status"].is_string());
}

#[test]
fn test_risk_free_rate_is_threaded_explicitly() {
    let series = daily_series(date(2020, 1, 1), &oscillating(500));
    let low = Analyzer::default().with_risk_free_rate(0.0);
    let high = Analyzer::default().with_risk_free_rate(0.08);

    let (Some(low_metrics), Some(high_metrics)) =
        (low.risk_metrics(&series), high.risk_metrics(&series))
    else {
        panic!("risk metrics expected");
    };
    assert!(high_metrics.sharpe_ratio < low_metrics.sharpe_ratio);
    assert_eq!(high_metrics.volatility, low_metrics.volatility);
    assert_eq!(high_metrics.cagr, low_metrics.cagr);
    assert_eq!(high_metrics.calmar_ratio, low_metrics.calmar_ratio);
}
