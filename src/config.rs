//! Runtime configuration, read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `PETVITALS_PORT` | `3000` |
//! | `PETVITALS_API_BASE_URL` | `http://localhost:4000/api/v1/petcare` |
//! | `PETVITALS_API_TOKEN` | unset |
//! | `PETVITALS_TREND_MONTHS` | `12` |
//! | `PETVITALS_REQUEST_TIMEOUT_SECS` | `10` |
//!
//! Unparsable values fall back to the default.

use std::env;
use std::time::Duration;

use crate::data_sources::petcare::PETCARE_API_BASE;
use crate::trend::{DEFAULT_REQUEST_TIMEOUT, TrendSettings};
use crate::window::DEFAULT_WINDOW_LENGTH;

/// Default port if not specified via environment variable.
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub port: u16,
    pub api_base_url: String,
    pub api_token: Option<String>,
    pub trend: TrendSettings,
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PETVITALS_PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let api_base_url = lookup("PETVITALS_API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| PETCARE_API_BASE.to_string());

        let api_token = lookup("PETVITALS_API_TOKEN").filter(|token| !token.is_empty());

        let window_length = lookup("PETVITALS_TREND_MONTHS")
            .and_then(|m| m.parse::<usize>().ok())
            .filter(|&m| m >= 1)
            .unwrap_or(DEFAULT_WINDOW_LENGTH);

        let request_timeout = lookup("PETVITALS_REQUEST_TIMEOUT_SECS")
            .and_then(|s| s.parse::<u64>().ok())
            .filter(|&s| s >= 1)
            .map(Duration::from_secs)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT);

        Self {
            port,
            api_base_url,
            api_token,
            trend: TrendSettings {
                window_length,
                request_timeout,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Config {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.api_base_url, PETCARE_API_BASE);
        assert_eq!(config.api_token, None);
        assert_eq!(config.trend, TrendSettings::default());
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("PETVITALS_PORT", "8080"),
            ("PETVITALS_API_BASE_URL", "http://backend:4000/api"),
            ("PETVITALS_API_TOKEN", "secret"),
            ("PETVITALS_TREND_MONTHS", "6"),
            ("PETVITALS_REQUEST_TIMEOUT_SECS", "3"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.api_base_url, "http://backend:4000/api");
        assert_eq!(config.api_token.as_deref(), Some("secret"));
        assert_eq!(config.trend.window_length, 6);
        assert_eq!(config.trend.request_timeout, Duration::from_secs(3));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            ("PETVITALS_PORT", "not-a-port"),
            ("PETVITALS_TREND_MONTHS", "0"),
            ("PETVITALS_REQUEST_TIMEOUT_SECS", "-1"),
            ("PETVITALS_API_TOKEN", ""),
        ]);

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.trend.window_length, DEFAULT_WINDOW_LENGTH);
        assert_eq!(config.trend.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.api_token, None);
    }
}
