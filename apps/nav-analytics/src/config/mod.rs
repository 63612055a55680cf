//! YAML configuration for the analytics engine.
//!
//! Values may reference the environment as `${VAR}` or `${VAR:-fallback}`;
//! references are expanded before parsing. Every field is optional, so an
//! empty file yields [`Config::default`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use nav_analytics::config::load_config;
//!
//! let config = load_config(Some("nav-analytics.yaml"))?;
//! let analyzer = Analyzer::new(config.analytics);
//! ```

mod analytics;
mod observability;

use std::sync::OnceLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use analytics::AnalyticsSettings;
pub use observability::{LogFormat, LoggingConfig, ObservabilityConfig};

/// Path read when no configuration file is given.
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Failure to produce a usable [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("cannot read config file '{path}': {source}")]
    ReadError {
        /// File that was requested.
        path: String,
        /// IO failure.
        source: std::io::Error,
    },

    /// The document is not valid YAML for [`Config`].
    #[error("invalid config YAML: {0}")]
    ParseError(#[from] serde_yaml_bw::Error),

    /// A value is outside its allowed range.
    #[error("invalid config value: {0}")]
    ValidationError(String),
}

/// Root of the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Analytics parameters.
    #[serde(default)]
    pub analytics: AnalyticsSettings,
    /// Log output.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Read, expand and validate a configuration file.
///
/// `None` reads [`DEFAULT_CONFIG_PATH`].
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    let path = path.unwrap_or(DEFAULT_CONFIG_PATH);
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
        path: path.to_owned(),
        source,
    })?;
    load_config_from_string(&raw)
}

/// Expand, parse and validate a YAML document.
pub fn load_config_from_string(yaml: &str) -> Result<Config, ConfigError> {
    let expanded = expand_env_refs(yaml);
    if expanded.trim().is_empty() {
        return Ok(Config::default());
    }

    let config: Config = serde_yaml_bw::from_str(&expanded)?;
    check_ranges(&config.analytics)?;
    Ok(config)
}

/// Replace `${VAR}` / `${VAR:-fallback}` with the variable's value.
///
/// Unset or empty variables take the fallback, or become empty without one.
#[allow(clippy::expect_used)] // Pattern is a literal
fn expand_env_refs(input: &str) -> String {
    static ENV_REF: OnceLock<Regex> = OnceLock::new();
    let pattern = ENV_REF.get_or_init(|| {
        Regex::new(r"\$\{(?P<name>[A-Za-z_][A-Za-z0-9_]*)(?::-(?P<fallback>[^}]*))?\}")
            .expect("env reference pattern compiles")
    });

    pattern
        .replace_all(input, |caps: &Captures<'_>| {
            std::env::var(&caps["name"])
                .ok()
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| {
                    caps.name("fallback")
                        .map_or_else(String::new, |m| m.as_str().to_owned())
                })
        })
        .into_owned()
}

fn check_ranges(settings: &AnalyticsSettings) -> Result<(), ConfigError> {
    let invalid = |message: &str| Err(ConfigError::ValidationError(message.to_owned()));

    if !(0.0..=1.0).contains(&settings.risk_free_rate) {
        return invalid("analytics.risk_free_rate must be within [0, 1]");
    }
    if !settings.sip_amount.is_finite() || settings.sip_amount <= 0.0 {
        return invalid("analytics.sip_amount must be a positive amount");
    }
    if settings.periods.is_empty() {
        return invalid("analytics.periods must list at least one horizon");
    }
    if settings.periods.contains(&0) {
        return invalid("analytics.periods must contain only positive years");
    }
    Ok(())
}
