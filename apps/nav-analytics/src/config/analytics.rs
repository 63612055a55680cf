//! Analytics parameters: risk-free rate, SIP amount and reported horizons.

use serde::{Deserialize, Serialize};

/// Parameters threaded into every analytics call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsSettings {
    /// Annual risk-free rate as a decimal (0.06 = 6%).
    #[serde(default = "default_risk_free_rate")]
    pub risk_free_rate: f64,
    /// Monthly SIP contribution.
    #[serde(default = "default_sip_amount")]
    pub sip_amount: f64,
    /// Trailing horizons (years) for the period table.
    #[serde(default = "default_periods")]
    pub periods: Vec<u32>,
    /// Compute period horizons on the rayon pool.
    #[serde(default = "default_true")]
    pub parallel_periods: bool,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            risk_free_rate: default_risk_free_rate(),
            sip_amount: default_sip_amount(),
            periods: default_periods(),
            parallel_periods: true,
        }
    }
}

const fn default_risk_free_rate() -> f64 {
    0.06
}

const fn default_sip_amount() -> f64 {
    10_000.0
}

fn default_periods() -> Vec<u32> {
    vec![1, 3, 5, 10]
}

const fn default_true() -> bool {
    true
}
