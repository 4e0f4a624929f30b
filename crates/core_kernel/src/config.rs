//! Reporting thresholds
//!
//! The needs-attention and trend rules in the aggregation service compare
//! against these values; they are configuration, not constants baked into the
//! engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;

/// Thresholds consumed by the aggregation service
#[derive(Debug, Clone, Deserialize)]
pub struct ReportingThresholds {
    /// A subject whose average rating falls below this floor needs attention
    pub attention_rating_floor: Decimal,
    /// A subject idle for more than this many days needs attention
    pub attention_idle_days: i64,
    /// Completion rate (percent) at or above this is an improving trend
    pub trend_improving_min: Decimal,
    /// Completion rate (percent) below this is a declining trend
    pub trend_declining_max: Decimal,
}

impl Default for ReportingThresholds {
    fn default() -> Self {
        Self {
            attention_rating_floor: dec!(2.5),
            attention_idle_days: 30,
            trend_improving_min: dec!(75),
            trend_declining_max: dec!(30),
        }
    }
}

impl ReportingThresholds {
    /// Loads thresholds from `OVERSIGHT_`-prefixed environment variables,
    /// falling back to the defaults for anything unset
    pub fn from_env() -> Result<Self, config::ConfigError> {
        let defaults = Self::default();
        config::Config::builder()
            .set_default(
                "attention_rating_floor",
                defaults.attention_rating_floor.to_string(),
            )?
            .set_default("attention_idle_days", defaults.attention_idle_days)?
            .set_default(
                "trend_improving_min",
                defaults.trend_improving_min.to_string(),
            )?
            .set_default(
                "trend_declining_max",
                defaults.trend_declining_max.to_string(),
            )?
            .add_source(config::Environment::with_prefix("OVERSIGHT"))
            .build()?
            .try_deserialize()
    }
}
