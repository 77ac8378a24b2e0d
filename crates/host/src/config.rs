//! Host configuration read from the environment.
//!
//! | Variable                   | Default                     |
//! |----------------------------|-----------------------------|
//! | `REEL_API_URL`             | `http://localhost:8000/api` |
//! | `REEL_REQUEST_TIMEOUT_SECS`| `30`                        |
//! | `REEL_PAGE_SIZE`           | page's own size             |
//! | `REEL_LOAD_MORE_DELAY_MS`  | `0`                         |
//!
//! A variable that is set but cannot be parsed logs a warning and falls
//! back to its default.

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

pub const DEFAULT_API_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

pub const API_URL_VAR: &str = "REEL_API_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "REEL_REQUEST_TIMEOUT_SECS";
pub const PAGE_SIZE_VAR: &str = "REEL_PAGE_SIZE";
pub const LOAD_MORE_DELAY_VAR: &str = "REEL_LOAD_MORE_DELAY_MS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostConfig {
    pub base_url: String,
    pub request_timeout: Duration,
    /// Replaces every page's own page size when set
    pub page_size_override: Option<usize>,
    /// Simulated latency before a "load more" request is applied
    pub load_more_delay: Duration,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            page_size_override: None,
            load_more_delay: Duration::ZERO,
        }
    }
}

impl HostConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Build the config from any variable lookup (the process environment,
    /// a map in tests).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let base_url = lookup(API_URL_VAR)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or(defaults.base_url);

        let timeout_secs = parse_with_default(&lookup, REQUEST_TIMEOUT_VAR, DEFAULT_REQUEST_TIMEOUT_SECS);
        let delay_ms = parse_with_default(&lookup, LOAD_MORE_DELAY_VAR, 0u64);

        let page_size_override = match lookup(PAGE_SIZE_VAR) {
            None => None,
            Some(v) => match v.trim().parse::<usize>() {
                Ok(n) if n > 0 => Some(n),
                _ => {
                    warn!(var = PAGE_SIZE_VAR, value = %v, "invalid page size, using each page's default");
                    None
                }
            },
        };

        Self {
            base_url,
            request_timeout: Duration::from_secs(timeout_secs.max(1)),
            page_size_override,
            load_more_delay: Duration::from_millis(delay_ms),
        }
    }
}

fn parse_with_default<T: FromStr + Display>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &str,
    default: T,
) -> T {
    match lookup(var) {
        Some(v) => match v.trim().parse() {
            Ok(n) => n,
            Err(_) => {
                warn!(var, value = %v, default = %default, "invalid env var value, using default");
                default
            }
        },
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> HostConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        HostConfig::from_lookup(|var| vars.get(var).cloned())
    }

    #[test]
    fn test_defaults_when_unset() {
        assert_eq!(config_from(&[]), HostConfig::default());
    }

    #[test]
    fn test_valid_values() {
        let config = config_from(&[
            (API_URL_VAR, "https://reel.example/api/"),
            (REQUEST_TIMEOUT_VAR, "5"),
            (PAGE_SIZE_VAR, "50"),
            (LOAD_MORE_DELAY_VAR, "250"),
        ]);

        assert_eq!(config.base_url, "https://reel.example/api/");
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.page_size_override, Some(50));
        assert_eq!(config.load_more_delay, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_from(&[
            (API_URL_VAR, "   "),
            (REQUEST_TIMEOUT_VAR, "soon"),
            (PAGE_SIZE_VAR, "0"),
            (LOAD_MORE_DELAY_VAR, "-3"),
        ]);

        assert_eq!(config, HostConfig::default());
    }
}
