//! Property tests for the analytics engine.
//!
//! Random price histories must never produce NaN or infinity, drawdowns stay
//! non-positive, and every transform is a pure function of its input.

use chrono::{Days, NaiveDate};
use nav_analytics::analytics::{
    alpha_beta, cagr, capture_ratios, drawdowns, fund_multiplier, hurst_exponent, max_drawdown,
    omega_ratio, risk_metrics, rolling_return_profile, simulate_sip,
};
use nav_analytics::{PricePoint, PriceSeries};
use proptest::prelude::*;

fn series_from(prices: &[f64]) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    PriceSeries::new(
        prices
            .iter()
            .enumerate()
            .map(|(i, &p)| PricePoint::new(start + Days::new(i as u64), p))
            .collect(),
    )
    .unwrap()
}

fn prices(max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0f64..1000.0, 0..max_len)
}

/// Strictly increasing prices with bounded daily growth.
fn rising_prices() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.01f64..2.0, 1..300).prop_map(|steps| {
        let mut price = 50.0;
        let mut out = vec![price];
        for step in steps {
            price += step;
            out.push(price);
        }
        out
    })
}

proptest! {
    #[test]
    fn test_outputs_are_finite(values in prices(200)) {
        let series = series_from(&values);

        prop_assert!(cagr(&series).is_finite());
        prop_assert!(fund_multiplier(&series).is_finite());
        prop_assert!(hurst_exponent(&series).is_finite());
        prop_assert!(max_drawdown(&series).is_finite());

        if let Some(m) = risk_metrics(&series, 0.06) {
            for value in [
                m.volatility,
                m.sharpe_ratio,
                m.sortino_ratio,
                m.downside_deviation,
                m.calmar_ratio,
                m.omega_ratio,
                m.hurst_exponent,
                m.cagr,
            ] {
                prop_assert!(value.is_finite());
            }
        } else {
            prop_assert!(series.len() < 2);
        }

        if let Some(sip) = simulate_sip(&series, 10_000.0) {
            prop_assert!(sip.absolute_return.is_finite());
        }
    }

    #[test]
    fn test_relative_outputs_are_finite(fund in prices(120), bench in prices(120)) {
        let fund = series_from(&fund);
        let bench = series_from(&bench);

        let ab = alpha_beta(&fund, &bench, 0.06);
        for value in [ab.alpha, ab.beta, ab.r_squared, ab.info_ratio, ab.batting_average] {
            prop_assert!(value.is_finite());
        }
        let capture = capture_ratios(&fund, &bench);
        prop_assert!(capture.upside.is_finite());
        prop_assert!(capture.downside.is_finite());
    }

    #[test]
    fn test_drawdowns_are_non_positive(values in prices(200)) {
        let series = series_from(&values);
        let curve = drawdowns(&series);

        prop_assert_eq!(curve.len(), series.len());
        if let Some(first) = curve.points().first() {
            prop_assert_eq!(first.drawdown, 0.0);
        }

        let mut peak = f64::MIN;
        for (point, dd) in series.points().iter().zip(curve.points()) {
            prop_assert!(dd.drawdown <= 0.0);
            if point.price >= peak {
                prop_assert_eq!(dd.drawdown, 0.0);
            }
            peak = peak.max(point.price);
        }
    }

    #[test]
    fn test_transforms_are_idempotent(values in prices(300)) {
        let series = series_from(&values);

        prop_assert_eq!(risk_metrics(&series, 0.05), risk_metrics(&series, 0.05));
        prop_assert_eq!(drawdowns(&series), drawdowns(&series));
        prop_assert_eq!(rolling_return_profile(&series), rolling_return_profile(&series));
        prop_assert_eq!(cagr(&series).to_bits(), cagr(&series).to_bits());
    }

    #[test]
    fn test_rising_series_round_trip(values in rising_prices()) {
        let series = series_from(&values);

        prop_assert!(cagr(&series) > 0.0);
        prop_assert_eq!(max_drawdown(&series), 0.0);
        prop_assert!(fund_multiplier(&series) > 1.0);
    }

    #[test]
    fn test_flat_series_ratios_are_zero(price in 1.0f64..1000.0, len in 2usize..150) {
        let series = series_from(&vec![price; len]);
        let Some(m) = risk_metrics(&series, 0.0) else {
            panic!("two or more points always produce a record");
        };

        prop_assert_eq!(m.volatility, 0.0);
        prop_assert_eq!(m.sharpe_ratio, 0.0);
        prop_assert_eq!(m.downside_deviation, 0.0);
        prop_assert_eq!(m.sortino_ratio, 0.0);
        prop_assert_eq!(m.calmar_ratio, 0.0);
        prop_assert_eq!(m.omega_ratio, 0.0);
        prop_assert_eq!(omega_ratio(&series.return_values(), 0.0), 0.0);
    }
}
