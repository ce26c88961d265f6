//! # Application State
//!
//! Shared state handed to every handler: the issue tracker, the runtime
//! configuration, and the metrics registry when metrics are enabled.

use std::str::FromStr;

use itops_state::IssueTracker;
use thiserror::Error;

use crate::middleware::metrics::ApiMetrics;

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "text" | "" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Invalid {
                var: "ITOPS_LOG_FORMAT",
                value: other.to_string(),
                expected: "`text` or `json`",
            }),
        }
    }
}

/// Error reading configuration from the environment.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var}={value:?} is invalid, expected {expected}")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Runtime configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Preload the demo issues at startup.
    pub seed_demo: bool,
    /// Record request metrics and serve `/metrics`.
    pub metrics: bool,
    /// Tracing output format.
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            seed_demo: true,
            metrics: true,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Read `PORT`, `ITOPS_SEED_DEMO`, `ITOPS_METRICS` and `ITOPS_LOG_FORMAT`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary variable source. Unset
    /// variables keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = lookup("PORT") {
            config.port = raw.trim().parse().map_err(|_| ConfigError::Invalid {
                var: "PORT",
                value: raw.clone(),
                expected: "a port number",
            })?;
        }
        if let Some(raw) = lookup("ITOPS_SEED_DEMO") {
            config.seed_demo = parse_flag("ITOPS_SEED_DEMO", &raw)?;
        }
        if let Some(raw) = lookup("ITOPS_METRICS") {
            config.metrics = parse_flag("ITOPS_METRICS", &raw)?;
        }
        if let Some(raw) = lookup("ITOPS_LOG_FORMAT") {
            config.log_format = raw.parse()?;
        }
        Ok(config)
    }
}

fn parse_flag(var: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            var,
            value: raw.to_string(),
            expected: "a boolean",
        }),
    }
}

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub tracker: IssueTracker,
    pub config: AppConfig,
    /// Present only when `config.metrics` is set.
    pub metrics: Option<ApiMetrics>,
}

impl AppState {
    /// Create state over `tracker`, registering metrics if the config asks
    /// for them.
    pub fn with_config(tracker: IssueTracker, config: AppConfig) -> Result<Self, prometheus::Error> {
        let metrics = if config.metrics {
            Some(ApiMetrics::new()?)
        } else {
            None
        };
        Ok(Self {
            tracker,
            config,
            metrics,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        assert_eq!(AppConfig::from_lookup(lookup(&[])).unwrap(), AppConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let config = AppConfig::from_lookup(lookup(&[
            ("PORT", "9000"),
            ("ITOPS_SEED_DEMO", "false"),
            ("ITOPS_METRICS", "0"),
            ("ITOPS_LOG_FORMAT", "JSON"),
        ]))
        .unwrap();
        assert_eq!(config.port, 9000);
        assert!(!config.seed_demo);
        assert!(!config.metrics);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn invalid_port_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
        assert!(err.to_string().starts_with("PORT=\"http\""));
    }

    #[test]
    fn invalid_flag_and_format_are_errors() {
        assert!(AppConfig::from_lookup(lookup(&[("ITOPS_METRICS", "maybe")])).is_err());
        assert!(AppConfig::from_lookup(lookup(&[("ITOPS_LOG_FORMAT", "xml")])).is_err());
    }

    #[test]
    fn metrics_follow_config() {
        let tracker = IssueTracker::in_memory(Vec::new());
        let on = AppState::with_config(tracker.clone(), AppConfig::default()).unwrap();
        assert!(on.metrics.is_some());
        let off = AppState::with_config(
            tracker,
            AppConfig {
                metrics: false,
                ..AppConfig::default()
            },
        )
        .unwrap();
        assert!(off.metrics.is_none());
    }
}
