//! Price series: the validated input every transform reads.
//!
//! A [`PriceSeries`] is an ordered run of `(date, price)` observations with
//! strictly increasing dates and finite positive prices. Gaps (holidays,
//! missing trading days) are allowed and never imputed. Construction is the
//! only place the invariants are checked; everything downstream relies on
//! them.

use std::io::Read;

use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SeriesError;

/// Date formats accepted from CSV sources (ISO first, then the provider's day-first form).
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d-%m-%Y"];

/// A single dated price observation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    /// Observation date.
    pub date: NaiveDate,
    /// Price (NAV or index level).
    pub price: f64,
}

impl PricePoint {
    /// Create a new price point.
    #[must_use]
    pub const fn new(date: NaiveDate, price: f64) -> Self {
        Self { date, price }
    }
}

/// A dated simple (or annualized) return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    /// Date the return is observed on (end of the measured interval).
    pub date: NaiveDate,
    /// Return as a decimal fraction (0.05 = 5%).
    pub value: f64,
}

/// Window of history selected for analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AnalysisPeriod {
    /// Entire available history.
    #[default]
    AllTime,
    /// The last `years` calendar years, anchored at the latest observation.
    TrailingYears {
        /// Number of calendar years.
        years: u32,
    },
    /// Inclusive date range.
    Custom {
        /// First date included.
        start: NaiveDate,
        /// Last date included.
        end: NaiveDate,
    },
}

/// Ordered, validated price history.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PriceSeries {
    points: Vec<PricePoint>,
}

impl PriceSeries {
    /// Build a series from points already in chronological order.
    ///
    /// # Errors
    ///
    /// Returns a `SeriesError` if a price is non-finite or non-positive, or if
    /// dates are not strictly increasing.
    pub fn new(points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        for (idx, point) in points.iter().enumerate() {
            if !point.price.is_finite() {
                return Err(SeriesError::NonFinitePrice { date: point.date });
            }
            if point.price <= 0.0 {
                return Err(SeriesError::NonPositivePrice {
                    date: point.date,
                    price: point.price,
                });
            }
            if idx > 0 && points[idx - 1].date >= point.date {
                return Err(SeriesError::NotIncreasing {
                    previous: points[idx - 1].date,
                    current: point.date,
                });
            }
        }
        Ok(Self { points })
    }

    /// Build a series from points in any order (providers often deliver newest first).
    ///
    /// # Errors
    ///
    /// Same as [`PriceSeries::new`]; duplicate dates surface as `NotIncreasing`.
    pub fn from_unsorted(mut points: Vec<PricePoint>) -> Result<Self, SeriesError> {
        points.sort_by_key(|p| p.date);
        Self::new(points)
    }

    /// Parse a `date,price` CSV with a header row.
    ///
    /// # Errors
    ///
    /// Returns a `SeriesError` on unreadable input, unparseable cells, or a
    /// series that violates the ordering/positivity invariants.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self, SeriesError> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut points = Vec::new();
        for (idx, record) in reader.records().enumerate() {
            let record = record?;
            let line = idx as u64 + 1;

            let raw_date = record.get(0).ok_or(SeriesError::MissingColumn {
                line,
                column: "date",
            })?;
            let raw_price = record.get(1).ok_or(SeriesError::MissingColumn {
                line,
                column: "price",
            })?;

            let date = parse_date(raw_date)?;
            let price = raw_price
                .parse::<f64>()
                .map_err(|_| SeriesError::InvalidPrice {
                    value: raw_price.to_string(),
                })?;
            points.push(PricePoint::new(date, price));
        }

        debug!(points = points.len(), "Parsed price series from CSV");
        Self::from_unsorted(points)
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the series has no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All observations in date order.
    #[must_use]
    pub fn points(&self) -> &[PricePoint] {
        &self.points
    }

    /// First observation.
    #[must_use]
    pub fn first(&self) -> Option<&PricePoint> {
        self.points.first()
    }

    /// Last observation.
    #[must_use]
    pub fn last(&self) -> Option<&PricePoint> {
        self.points.last()
    }

    /// Prices without dates.
    #[must_use]
    pub fn prices(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.price).collect()
    }

    /// Calendar days between the first and last observation (0 when fewer than 2 points).
    #[must_use]
    pub fn span_days(&self) -> i64 {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => (last.date - first.date).num_days(),
            _ => 0,
        }
    }

    /// Simple period-over-period returns, one shorter than the series.
    #[must_use]
    pub fn daily_returns(&self) -> Vec<ReturnPoint> {
        self.points
            .windows(2)
            .map(|w| ReturnPoint {
                date: w[1].date,
                value: w[1].price / w[0].price - 1.0,
            })
            .collect()
    }

    /// Simple returns without dates.
    #[must_use]
    pub fn return_values(&self) -> Vec<f64> {
        simple_returns(&self.prices())
    }

    /// Last observation of each calendar year.
    #[must_use]
    pub fn year_end_points(&self) -> Vec<PricePoint> {
        last_per_key(&self.points, |p| p.date.year())
    }

    /// Last observation of each calendar month.
    #[must_use]
    pub fn month_end_points(&self) -> Vec<PricePoint> {
        last_per_key(&self.points, |p| (p.date.year(), p.date.month()))
    }

    /// First observation of each calendar month.
    #[must_use]
    pub fn month_start_points(&self) -> Vec<PricePoint> {
        first_per_key(&self.points, |p| (p.date.year(), p.date.month()))
    }

    /// Observations on or after `start`.
    #[must_use]
    pub fn since(&self, start: NaiveDate) -> Self {
        let from = self.points.partition_point(|p| p.date < start);
        Self {
            points: self.points[from..].to_vec(),
        }
    }

    /// Observations within `[start, end]`.
    #[must_use]
    pub fn between(&self, start: NaiveDate, end: NaiveDate) -> Self {
        let from = self.points.partition_point(|p| p.date < start);
        let to = self.points.partition_point(|p| p.date <= end);
        if from >= to {
            return Self::default();
        }
        Self {
            points: self.points[from..to].to_vec(),
        }
    }

    /// Date `years` calendar years before the last observation.
    #[must_use]
    pub fn trailing_anchor(&self, years: u32) -> Option<NaiveDate> {
        self.points
            .last()
            .and_then(|last| last.date.checked_sub_months(Months::new(years.saturating_mul(12))))
    }

    /// Observations within the last `years` calendar years.
    #[must_use]
    pub fn trailing_years(&self, years: u32) -> Self {
        self.trailing_anchor(years)
            .map_or_else(|| self.clone(), |anchor| self.since(anchor))
    }

    /// Observations inside an analysis period.
    #[must_use]
    pub fn slice(&self, period: AnalysisPeriod) -> Self {
        match period {
            AnalysisPeriod::AllTime => self.clone(),
            AnalysisPeriod::TrailingYears { years } => self.trailing_years(years),
            AnalysisPeriod::Custom { start, end } => self.between(start, end),
        }
    }

    /// Rescale so the first observation equals `base` (for side-by-side comparison).
    #[must_use]
    pub fn rebase(&self, base: f64) -> Vec<PricePoint> {
        let Some(first) = self.points.first() else {
            return Vec::new();
        };
        self.points
            .iter()
            .map(|p| PricePoint::new(p.date, p.price / first.price * base))
            .collect()
    }
}

/// Fund and benchmark prices observed on the same date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AlignedPoint {
    /// Shared observation date.
    pub date: NaiveDate,
    /// Fund price.
    pub fund: f64,
    /// Benchmark price.
    pub bench: f64,
}

/// Fund/benchmark pair inner-joined on date.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignedSeries {
    points: Vec<AlignedPoint>,
}

impl AlignedSeries {
    /// Inner-join two series on date; dates present in only one side are dropped.
    #[must_use]
    pub fn align(fund: &PriceSeries, bench: &PriceSeries) -> Self {
        let (f, b) = (fund.points(), bench.points());
        let mut points = Vec::with_capacity(f.len().min(b.len()));
        let (mut i, mut j) = (0, 0);

        while i < f.len() && j < b.len() {
            match f[i].date.cmp(&b[j].date) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    points.push(AlignedPoint {
                        date: f[i].date,
                        fund: f[i].price,
                        bench: b[j].price,
                    });
                    i += 1;
                    j += 1;
                }
            }
        }

        debug!(
            fund = f.len(),
            bench = b.len(),
            aligned = points.len(),
            "Aligned fund and benchmark series"
        );
        Self { points }
    }

    /// Number of shared dates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether no dates are shared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Joined observations.
    #[must_use]
    pub fn points(&self) -> &[AlignedPoint] {
        &self.points
    }

    /// Fund simple returns over the joined dates.
    #[must_use]
    pub fn fund_returns(&self) -> Vec<f64> {
        simple_returns(&self.points.iter().map(|p| p.fund).collect::<Vec<_>>())
    }

    /// Benchmark simple returns over the joined dates.
    #[must_use]
    pub fn bench_returns(&self) -> Vec<f64> {
        simple_returns(&self.points.iter().map(|p| p.bench).collect::<Vec<_>>())
    }

    /// `(fund, bench)` returns between consecutive month-end observations.
    #[must_use]
    pub fn month_end_returns(&self) -> Vec<(f64, f64)> {
        let month_ends = last_per_key(&self.points, |p| (p.date.year(), p.date.month()));
        month_ends
            .windows(2)
            .map(|w| (w[1].fund / w[0].fund - 1.0, w[1].bench / w[0].bench - 1.0))
            .collect()
    }
}

fn parse_date(raw: &str) -> Result<NaiveDate, SeriesError> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .ok_or_else(|| SeriesError::InvalidDate {
            value: raw.to_string(),
        })
}

fn simple_returns(prices: &[f64]) -> Vec<f64> {
    prices.windows(2).map(|w| w[1] / w[0] - 1.0).collect()
}

fn last_per_key<T: Copy, K: PartialEq>(items: &[T], key: impl Fn(&T) -> K) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if out.last().is_some_and(|last| key(last) == key(item)) {
            out.pop();
        }
        out.push(*item);
    }
    out
}

fn first_per_key<T: Copy, K: PartialEq>(items: &[T], key: impl Fn(&T) -> K) -> Vec<T> {
    let mut out: Vec<T> = Vec::new();
    for item in items {
        if out.last().is_none_or(|last| key(last) != key(item)) {
            out.push(*item);
        }
    }
    out
}
