//! Configuration loading from environment.

use std::env;
use std::time::Duration;

use anyhow::Context;
use fx_client::DEFAULT_BASE_URL;
use fx_hex::default_popular_pairs;
use fx_types::{CurrencyPair, NumberLocale};

/// Application configuration.
#[derive(Debug)]
pub struct Config {
    pub port: u16,
    pub provider_url: String,
    pub request_timeout: Duration,
    pub locale: NumberLocale,
    pub popular_pairs: Vec<CurrencyPair>,
    /// OTLP collector; spans are only exported when this is set.
    pub otlp_endpoint: Option<String>,
}

impl Config {
    /// Loads configuration from environment variables.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let port = lookup("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT must be a port number")?;

        let provider_url = lookup("FX_PROVIDER_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs: u64 = lookup("FX_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|| "10".to_string())
            .parse()
            .context("FX_REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;

        let locale = match lookup("FX_LOCALE") {
            Some(tag) => tag.parse()?,
            None => NumberLocale::default(),
        };

        let popular_pairs = match lookup("FX_POPULAR_PAIRS") {
            Some(list) => parse_pairs(&list)?,
            None => default_popular_pairs(),
        };

        Ok(Self {
            port,
            provider_url,
            request_timeout: Duration::from_secs(timeout_secs),
            locale,
            popular_pairs,
            otlp_endpoint: lookup("OTEL_EXPORTER_OTLP_ENDPOINT").filter(|s| !s.is_empty()),
        })
    }
}

/// Parses `EUR/USD,USD/JPY`, ignoring blank entries.
fn parse_pairs(list: &str) -> anyhow::Result<Vec<CurrencyPair>> {
    list.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse()
                .with_context(|| format!("invalid pair in FX_POPULAR_PAIRS: {entry}"))
        })
        .collect()
}
