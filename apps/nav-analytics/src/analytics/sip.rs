//! Systematic investment plan (SIP) simulation.
//!
//! A fixed amount is invested at the first available price of every calendar
//! month. The reported return is a simple gain over invested capital, not a
//! solved internal rate of return.

use serde::{Deserialize, Serialize};

use super::math::safe_ratio;
use crate::series::PriceSeries;

/// Outcome of a monthly contribution plan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SipOutcome {
    /// Number of monthly contributions made.
    pub installments: usize,
    /// Units accumulated.
    pub total_units: f64,
    /// Capital contributed.
    pub total_invested: f64,
    /// Units valued at the last price.
    pub current_value: f64,
    /// `(current_value - total_invested) / total_invested`.
    pub absolute_return: f64,
}

/// Simulate investing `contribution` at the first observation of each month.
///
/// Returns `None` for an empty series.
#[must_use]
pub fn simulate_sip(series: &PriceSeries, contribution: f64) -> Option<SipOutcome> {
    let last = series.last()?;

    let installments = series.month_start_points();
    let (total_units, total_invested) = installments
        .iter()
        .fold((0.0, 0.0), |(units, invested), point| {
            (units + contribution / point.price, invested + contribution)
        });

    let current_value = total_units * last.price;
    Some(SipOutcome {
        installments: installments.len(),
        total_units,
        total_invested,
        current_value,
        absolute_return: safe_ratio(current_value - total_invested, total_invested),
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::series::PricePoint;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_empty_series() {
        assert!(simulate_sip(&PriceSeries::default(), 10_000.0).is_none());
    }

    #[test]
    fn test_invests_once_per_month() {
        let s = PriceSeries::new(vec![
            PricePoint::new(date(2024, 1, 2), 10.0),
            PricePoint::new(date(2024, 1, 15), 12.0),
            PricePoint::new(date(2024, 2, 1), 20.0),
            PricePoint::new(date(2024, 3, 4), 25.0),
            PricePoint::new(date(2024, 3, 28), 40.0),
        ])
        .unwrap();

        let Some(outcome) = simulate_sip(&s, 1000.0) else {
            panic!("non-empty series should simulate");
        };
        assert_eq!(outcome.installments, 3);
        assert!((outcome.total_units - (100.0 + 50.0 + 40.0)).abs() < 1e-9);
        assert!((outcome.total_invested - 3000.0).abs() < 1e-9);
        assert!((outcome.current_value - 190.0 * 40.0).abs() < 1e-9);
        assert!((outcome.absolute_return - (7600.0 - 3000.0) / 3000.0).abs() < 1e-12);
    }

    #[test]
    fn test_flat_prices_break_even() {
        let s = PriceSeries::new(vec![
            PricePoint::new(date(2024, 1, 2), 10.0),
            PricePoint::new(date(2024, 2, 1), 10.0),
        ])
        .unwrap();
        let outcome = simulate_sip(&s, 500.0).unwrap();
        assert!(outcome.absolute_return.abs() < 1e-12);
    }

    #[test]
    fn test_zero_contribution_has_no_return() {
        let s = PriceSeries::new(vec![PricePoint::new(date(2024, 1, 2), 10.0)]).unwrap();
        let outcome = simulate_sip(&s, 0.0).unwrap();
        assert_eq!(outcome.absolute_return, 0.0);
    }
}
