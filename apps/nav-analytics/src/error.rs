//! Errors raised at the price-series boundary.
//!
//! The analytics themselves never fail: short or degenerate input resolves to
//! defined defaults. The only hard failures are series that violate the
//! ordering/positivity invariants, or source data that cannot be parsed.

use chrono::NaiveDate;
use thiserror::Error;

/// Rejection of malformed price-series input.
#[derive(Debug, Error)]
pub enum SeriesError {
    /// Price is zero or negative.
    #[error("price {price} on {date} must be positive")]
    NonPositivePrice {
        /// Observation date.
        date: NaiveDate,
        /// Offending price.
        price: f64,
    },

    /// Price is NaN or infinite.
    #[error("price on {date} is not a finite number")]
    NonFinitePrice {
        /// Observation date.
        date: NaiveDate,
    },

    /// Dates are not strictly increasing (includes duplicates).
    #[error("dates must be strictly increasing: {current} follows {previous}")]
    NotIncreasing {
        /// Date of the preceding observation.
        previous: NaiveDate,
        /// Date that breaks the ordering.
        current: NaiveDate,
    },

    /// A date cell could not be parsed.
    #[error("invalid date '{value}' (expected YYYY-MM-DD or DD-MM-YYYY)")]
    InvalidDate {
        /// Raw cell content.
        value: String,
    },

    /// A price cell could not be parsed.
    #[error("invalid price '{value}'")]
    InvalidPrice {
        /// Raw cell content.
        value: String,
    },

    /// A record is missing the date or price column.
    #[error("record {line} is missing the {column} column")]
    MissingColumn {
        /// 1-based record number.
        line: u64,
        /// Name of the missing column.
        column: &'static str,
    },

    /// Underlying CSV reader failure.
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
}
