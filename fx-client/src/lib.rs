//! # FX Client
//!
//! A typed Rust client for the Frankfurter exchange rate API, implementing
//! the `RateProvider` port.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use chrono::NaiveDate;
use fx_types::{
    CurrencyCode, CurrencyList, DateWindow, RateError, RateProvider, RateQuote, TrendPoint,
    TrendSeries,
};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;

/// Public Frankfurter endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.frankfurter.dev/v1";

/// Body of `GET /latest`.
#[derive(Debug, Deserialize)]
struct LatestBody {
    date: NaiveDate,
    rates: HashMap<String, f64>,
}

/// Body of `GET /{start}..{end}`.
#[derive(Debug, Deserialize)]
struct HistoricalBody {
    rates: BTreeMap<NaiveDate, HashMap<String, f64>>,
}

/// Frankfurter API client.
pub struct FrankfurterClient {
    base_url: String,
    timeout: Option<Duration>,
    http: Client,
}

impl Default for FrankfurterClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl FrankfurterClient {
    /// Creates a new client.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: None,
            http: Client::new(),
        }
    }

    /// Sets a per-request timeout. A request that exceeds it fails as
    /// `ProviderUnavailable`.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        pair: Option<(&CurrencyCode, &CurrencyCode)>,
    ) -> Result<T, RateError> {
        let mut req = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .query(query);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        tracing::debug!(path, ?query, "requesting rate provider");
        let resp = req.send().await.map_err(transport_error)?;
        self.handle_response(resp, pair).await
    }

    async fn handle_response<T: DeserializeOwned>(
        &self,
        resp: reqwest::Response,
        pair: Option<(&CurrencyCode, &CurrencyCode)>,
    ) -> Result<T, RateError> {
        let status = resp.status();
        if status.is_success() {
            let body = resp.text().await.map_err(transport_error)?;
            return serde_json::from_str(&body)
                .map_err(|e| RateError::MalformedResponse(e.to_string()));
        }

        let body = resp.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(String::from))
            .unwrap_or(body);

        match (status, pair) {
            (StatusCode::NOT_FOUND | StatusCode::UNPROCESSABLE_ENTITY, Some((from, to))) => {
                tracing::debug!(%from, %to, status = status.as_u16(), %message, "provider has no data for pair");
                Err(RateError::UnknownPair {
                    from: from.clone(),
                    to: to.clone(),
                })
            }
            _ => Err(RateError::ProviderUnavailable(format!(
                "HTTP {} - {}",
                status.as_u16(),
                message
            ))),
        }
    }
}

fn transport_error(err: reqwest::Error) -> RateError {
    if err.is_timeout() {
        RateError::ProviderUnavailable("request timed out".into())
    } else if err.is_decode() {
        RateError::MalformedResponse(err.to_string())
    } else {
        RateError::ProviderUnavailable(err.to_string())
    }
}

fn checked_rate(rate: f64, what: impl std::fmt::Display) -> Result<f64, RateError> {
    if rate.is_finite() && rate > 0.0 {
        Ok(rate)
    } else {
        Err(RateError::MalformedResponse(format!(
            "non-positive rate {rate} for {what}"
        )))
    }
}

#[async_trait::async_trait]
impl RateProvider for FrankfurterClient {
    async fn list_currencies(&self) -> Result<CurrencyList, RateError> {
        let raw: BTreeMap<String, String> = self.get("/currencies", &[], None).await?;
        if raw.is_empty() {
            return Err(RateError::MalformedResponse(
                "currency list is empty".into(),
            ));
        }
        raw.into_iter()
            .map(|(code, name)| {
                code.parse::<CurrencyCode>()
                    .map(|code| (code, name))
                    .map_err(|e| RateError::MalformedResponse(e.to_string()))
            })
            .collect()
    }

    async fn latest_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<RateQuote, RateError> {
        let body: LatestBody = self
            .get(
                "/latest",
                &[("base", from.as_str()), ("symbols", to.as_str())],
                Some((from, to)),
            )
            .await?;

        let rate = body.rates.get(to.as_str()).copied().ok_or_else(|| {
            RateError::MalformedResponse(format!("response has no rate for {}", to))
        })?;
        let rate = checked_rate(rate, format_args!("{from}/{to}"))?;

        RateQuote::new(from.clone(), to.clone(), rate, body.date)
            .map_err(|e| RateError::MalformedResponse(e.to_string()))
    }

    async fn historical_series(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        window: DateWindow,
    ) -> Result<TrendSeries, RateError> {
        let body: HistoricalBody = self
            .get(
                &format!("/{}..{}", window.start, window.end),
                &[("base", from.as_str()), ("symbols", to.as_str())],
                Some((from, to)),
            )
            .await?;

        let mut points = Vec::with_capacity(body.rates.len());
        for (date, rates) in body.rates {
            // The provider backfills the last business day before a weekend start.
            if !window.contains(date) {
                continue;
            }
            // Dates without a quote for the target are gaps, not errors.
            let Some(rate) = rates.get(to.as_str()).copied() else {
                continue;
            };
            let rate = checked_rate(rate, date)?;
            points.push(TrendPoint { date, rate });
        }

        if points.is_empty() {
            return Err(RateError::EmptySeries {
                from: from.clone(),
                to: to.clone(),
                start: window.start,
                end: window.end,
            });
        }

        Ok(TrendSeries::new(from.clone(), to.clone(), points))
    }
}
