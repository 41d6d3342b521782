//! Deployment configuration for the engine and its monitor.

use serde::Deserialize;

use stashlens_core::{DomainError, DomainResult};

/// Default container capacity (bank slots).
pub const DEFAULT_CAPACITY: i64 = 816;

pub const ENV_CAPACITY: &str = "STASHLENS_CAPACITY";
pub const ENV_VALUABLE_THRESHOLD: &str = "STASHLENS_VALUABLE_THRESHOLD";
pub const ENV_VALUE_CHANGE_THRESHOLD: &str = "STASHLENS_VALUE_CHANGE_THRESHOLD";
pub const ENV_CAPACITY_WARNING_PERCENT: &str = "STASHLENS_CAPACITY_WARNING_PERCENT";
pub const ENV_SHOW_VALUE_CHANGES: &str = "STASHLENS_SHOW_VALUE_CHANGES";
pub const ENV_NOTIFY_CAPACITY: &str = "STASHLENS_NOTIFY_CAPACITY";

const VALUABLE_THRESHOLD_RANGE: (i64, i64) = (1_000, 100_000_000);
const VALUE_CHANGE_THRESHOLD_RANGE: (i64, i64) = (100_000, 50_000_000);
const CAPACITY_WARNING_PERCENT_RANGE: (u8, u8) = (75, 99);

/// Thresholds and switches supplied per deployment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub capacity: i64,
    pub valuable_threshold: i64,
    pub value_change_threshold: i64,
    pub capacity_warning_percent: u8,
    pub show_value_changes: bool,
    pub notify_capacity: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            valuable_threshold: 100_000,
            value_change_threshold: 1_000_000,
            capacity_warning_percent: 90,
            show_value_changes: false,
            notify_capacity: true,
        }
    }
}

impl EngineConfig {
    /// Read `STASHLENS_*` variables; unset ones keep their defaults.
    pub fn from_env() -> DomainResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`EngineConfig::from_env`] over an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> DomainResult<Self> {
        let mut config = Self::default();

        if let Some(v) = lookup(ENV_CAPACITY) {
            config.capacity = parse_var(ENV_CAPACITY, &v)?;
        }
        if let Some(v) = lookup(ENV_VALUABLE_THRESHOLD) {
            config.valuable_threshold = parse_var(ENV_VALUABLE_THRESHOLD, &v)?;
        }
        if let Some(v) = lookup(ENV_VALUE_CHANGE_THRESHOLD) {
            config.value_change_threshold = parse_var(ENV_VALUE_CHANGE_THRESHOLD, &v)?;
        }
        if let Some(v) = lookup(ENV_CAPACITY_WARNING_PERCENT) {
            config.capacity_warning_percent = parse_var(ENV_CAPACITY_WARNING_PERCENT, &v)?;
        }
        if let Some(v) = lookup(ENV_SHOW_VALUE_CHANGES) {
            config.show_value_changes = parse_flag(ENV_SHOW_VALUE_CHANGES, &v)?;
        }
        if let Some(v) = lookup(ENV_NOTIFY_CAPACITY) {
            config.notify_capacity = parse_flag(ENV_NOTIFY_CAPACITY, &v)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON object; missing fields keep their defaults.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| DomainError::configuration(format!("engine config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Reject out-of-range values rather than clamping them.
    pub fn validate(&self) -> DomainResult<()> {
        if self.capacity <= 0 {
            return Err(DomainError::invalid_parameter(format!(
                "capacity must be positive (got {})",
                self.capacity
            )));
        }
        check_range(
            "valuable_threshold",
            self.valuable_threshold,
            VALUABLE_THRESHOLD_RANGE,
        )?;
        check_range(
            "value_change_threshold",
            self.value_change_threshold,
            VALUE_CHANGE_THRESHOLD_RANGE,
        )?;
        check_range(
            "capacity_warning_percent",
            self.capacity_warning_percent,
            CAPACITY_WARNING_PERCENT_RANGE,
        )?;
        Ok(())
    }
}

fn check_range<T>(name: &str, value: T, (min, max): (T, T)) -> DomainResult<()>
where
    T: PartialOrd + core::fmt::Display,
{
    if value < min || value > max {
        return Err(DomainError::invalid_parameter(format!(
            "{name} must be within {min}..={max} (got {value})"
        )));
    }
    Ok(())
}

fn parse_var<T>(key: &str, raw: &str) -> DomainResult<T>
where
    T: core::str::FromStr,
    T::Err: core::fmt::Display,
{
    raw.trim().parse::<T>().map_err(|e| {
        tracing::warn!(key, value = raw, "rejected configuration value");
        DomainError::configuration(format!("{key}={raw:?}: {e}"))
    })
}

fn parse_flag(key: &str, raw: &str) -> DomainResult<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => {
            tracing::warn!(key, value = raw, "rejected configuration flag");
            Err(DomainError::configuration(format!(
                "{key}={raw:?}: expected true/false"
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_match_the_stock_settings() {
        let config = EngineConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.capacity, 816);
        assert_eq!(config.valuable_threshold, 100_000);
        assert_eq!(config.value_change_threshold, 1_000_000);
        assert_eq!(config.capacity_warning_percent, 90);
        assert!(!config.show_value_changes);
        assert!(config.notify_capacity);
    }

    #[test]
    fn reads_overrides() {
        let config = EngineConfig::from_lookup(lookup_from(&[
            (ENV_CAPACITY, "1200"),
            (ENV_VALUABLE_THRESHOLD, " 5000 "),
            (ENV_SHOW_VALUE_CHANGES, "yes"),
            (ENV_NOTIFY_CAPACITY, "off"),
            (ENV_CAPACITY_WARNING_PERCENT, "80"),
        ]))
        .unwrap();

        assert_eq!(config.capacity, 1_200);
        assert_eq!(config.valuable_threshold, 5_000);
        assert_eq!(config.capacity_warning_percent, 80);
        assert!(config.show_value_changes);
        assert!(!config.notify_capacity);
    }

    #[test]
    fn unparsable_values_are_configuration_errors() {
        let err = EngineConfig::from_lookup(lookup_from(&[(ENV_CAPACITY, "lots")])).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));

        let err =
            EngineConfig::from_lookup(lookup_from(&[(ENV_NOTIFY_CAPACITY, "maybe")])).unwrap_err();
        assert!(matches!(err, DomainError::Configuration(_)));
    }

    #[test]
    fn out_of_range_values_fail_fast() {
        let err = EngineConfig::from_lookup(lookup_from(&[(ENV_CAPACITY, "-816")])).unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_parameter("capacity must be positive (got -816)")
        );

        let err = EngineConfig::from_lookup(lookup_from(&[(ENV_CAPACITY_WARNING_PERCENT, "100")]))
            .unwrap_err();
        assert_eq!(
            err,
            DomainError::invalid_parameter("capacity_warning_percent must be within 75..=99 (got 100)")
        );

        let err = EngineConfig::from_lookup(lookup_from(&[(ENV_VALUE_CHANGE_THRESHOLD, "10")]))
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidParameter(_)));
    }

    #[test]
    fn json_fills_missing_fields_with_defaults() {
        let config = EngineConfig::from_json(r#"{"capacity": 400, "show_value_changes": true}"#).unwrap();
        assert_eq!(config.capacity, 400);
        assert!(config.show_value_changes);
        assert_eq!(config.valuable_threshold, 100_000);

        assert!(matches!(
            EngineConfig::from_json(r#"{"capacty": 400}"#),
            Err(DomainError::Configuration(_))
        ));
        assert!(matches!(
            EngineConfig::from_json(r#"{"valuable_threshold": 1}"#),
            Err(DomainError::InvalidParameter(_))
        ));
    }
}
