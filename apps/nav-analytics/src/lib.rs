// Allow unwrap/expect in tests - tests should panic on unexpected errors
// Allow test-specific patterns and pedantic lints in test code
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::cast_possible_wrap,
        clippy::needless_collect,
        clippy::option_if_let_else,
        clippy::items_after_statements
    )
)]

//! NAV Analytics - Fund Return and Risk Library
//!
//! Computes the return, risk and benchmark-relative statistics shown on a
//! mutual-fund dashboard from a daily NAV history and an optional benchmark
//! index.
//!
//! # Modules
//!
//! - `series`: validated price series, CSV loading, slicing and alignment
//! - `analytics`: pure metric functions, the `Analyzer` front end and the
//!   `FundReport` bundle
//! - `config`: YAML configuration with environment interpolation
//! - `telemetry`: tracing subscriber setup
//!
//! # Conventions
//!
//! - Returns are decimal fractions (0.05 = 5%); capture ratios and batting
//!   average are percentages.
//! - Volatility annualizes with √252; multi-year growth uses actual/365.25.
//! - Degenerate input never produces NaN or infinity: each ratio falls back
//!   to 0 when its denominator is 0.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod analytics;
pub mod config;
pub mod error;
pub mod series;
pub mod telemetry;

pub use analytics::{Analyzer, FundReport};
pub use config::{AnalyticsSettings, Config, ConfigError, load_config};
pub use error::SeriesError;
pub use series::{AlignedSeries, AnalysisPeriod, PricePoint, PriceSeries, ReturnPoint};
