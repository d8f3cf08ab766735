//! Environment-driven configuration.
//!
//! Values are read through a lookup function so tests can supply a map
//! instead of touching the process environment.

use std::time::Duration;

use shipment_sync_core::date_range::{DateRange, DateRangeError};
use shipment_sync_core::paging::DEFAULT_FETCH_LIMIT;
use thiserror::Error;

use crate::pipeline::RunOptions;

pub const DEFAULT_BASE_URL: &str = "https://api.loop.us/v1";

pub const API_KEY_VAR: &str = "API_KEY";
pub const BASE_URL_VAR: &str = "LOGISTICS_API_BASE_URL";
pub const TIMEOUT_VAR: &str = "LOGISTICS_API_TIMEOUT_SECS";
pub const START_DATE_VAR: &str = "SHIPMENT_START_DATE";
pub const END_DATE_VAR: &str = "SHIPMENT_END_DATE";
pub const FETCH_LIMIT_VAR: &str = "SHIPMENT_FETCH_LIMIT";
pub const CONCURRENCY_VAR: &str = "ENRICHMENT_CONCURRENCY";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be configured")]
    Missing(&'static str),
    #[error("{name} must be a positive integer, got `{value}`")]
    InvalidNumber { name: &'static str, value: String },
    #[error(transparent)]
    DateRange(#[from] DateRangeError),
}

/// Connection settings for the upstream API.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiSettings {
    pub base_url: String,
    pub api_key: String,
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for ApiSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiSettings")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// What a single pipeline run fetches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    pub range: DateRange,
    pub options: RunOptions,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub api: ApiSettings,
    pub run: RunConfig,
}

impl ServiceConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let api_key = value(API_KEY_VAR).ok_or(ConfigError::Missing(API_KEY_VAR))?;
        let base_url = value(BASE_URL_VAR).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout = value(TIMEOUT_VAR)
            .map(|raw| parse_positive(TIMEOUT_VAR, &raw))
            .transpose()?
            .map(|secs| Duration::from_secs(secs as u64));

        let start = value(START_DATE_VAR).ok_or(ConfigError::Missing(START_DATE_VAR))?;
        let end = value(END_DATE_VAR).ok_or(ConfigError::Missing(END_DATE_VAR))?;
        let range = DateRange::parse(&start, &end)?;

        let fetch_limit = value(FETCH_LIMIT_VAR)
            .map(|raw| parse_positive(FETCH_LIMIT_VAR, &raw))
            .transpose()?
            .unwrap_or(DEFAULT_FETCH_LIMIT);
        let enrichment_concurrency = value(CONCURRENCY_VAR)
            .map(|raw| parse_positive(CONCURRENCY_VAR, &raw))
            .transpose()?;

        Ok(Self {
            api: ApiSettings {
                base_url,
                api_key,
                timeout,
            },
            run: RunConfig {
                range,
                options: RunOptions {
                    fetch_limit,
                    enrichment_concurrency,
                },
            },
        })
    }
}

fn parse_positive(name: &'static str, raw: &str) -> Result<usize, ConfigError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .filter(|value| *value > 0)
        .ok_or_else(|| ConfigError::InvalidNumber {
            name,
            value: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    const REQUIRED: [(&str, &str); 3] = [
        (API_KEY_VAR, "secret"),
        (START_DATE_VAR, "2024-02-01"),
        (END_DATE_VAR, "2024-04-30"),
    ];

    #[test]
    fn applies_defaults_for_optional_settings() {
        let config = ServiceConfig::from_lookup(lookup(&REQUIRED)).expect("config should load");

        assert_eq!(config.api.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.api.timeout, None);
        assert_eq!(config.run.options.fetch_limit, DEFAULT_FETCH_LIMIT);
        assert_eq!(config.run.options.enrichment_concurrency, None);
        assert_eq!(config.run.range.revised_after(), "2024-02-01");
    }

    #[test]
    fn reads_optional_overrides() {
        let mut pairs = REQUIRED.to_vec();
        pairs.extend([
            (BASE_URL_VAR, "http://localhost:9000/v1"),
            (TIMEOUT_VAR, "15"),
            (FETCH_LIMIT_VAR, "200"),
            (CONCURRENCY_VAR, "8"),
        ]);
        let config = ServiceConfig::from_lookup(lookup(&pairs)).expect("config should load");

        assert_eq!(config.api.base_url, "http://localhost:9000/v1");
        assert_eq!(config.api.timeout, Some(Duration::from_secs(15)));
        assert_eq!(config.run.options.fetch_limit, 200);
        assert_eq!(config.run.options.enrichment_concurrency, Some(8));
    }

    #[test]
    fn missing_api_key_is_reported_by_name() {
        let error = ServiceConfig::from_lookup(lookup(&REQUIRED[1..]))
            .expect_err("api key is required");
        assert_eq!(error, ConfigError::Missing(API_KEY_VAR));
        assert_eq!(error.to_string(), "API_KEY must be configured");
    }

    #[test]
    fn blank_date_counts_as_missing() {
        let mut pairs = REQUIRED.to_vec();
        pairs[2] = (END_DATE_VAR, "  ");
        let error = ServiceConfig::from_lookup(lookup(&pairs)).expect_err("end date is blank");
        assert_eq!(error, ConfigError::Missing(END_DATE_VAR));
    }

    #[test]
    fn rejects_zero_fetch_limit() {
        let mut pairs = REQUIRED.to_vec();
        pairs.push((FETCH_LIMIT_VAR, "0"));
        let error = ServiceConfig::from_lookup(lookup(&pairs)).expect_err("zero limit is invalid");
        assert!(matches!(error, ConfigError::InvalidNumber { name, .. } if name == FETCH_LIMIT_VAR));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config = ServiceConfig::from_lookup(lookup(&REQUIRED)).expect("config should load");
        let rendered = format!("{:?}", config.api);
        assert!(!rendered.contains("secret"));
    }
}
