//! Rate provider port.
//!
//! Implementations can be HTTP clients, mock providers, etc.
//! No method retries; callers decide retry policy.

use crate::domain::{CurrencyCode, CurrencyList, DateWindow, RateQuote, TrendSeries};
use crate::error::RateError;

/// Port trait for exchange rate providers.
#[async_trait::async_trait]
pub trait RateProvider: Send + Sync + 'static {
    /// Lists every currency the provider publishes rates for.
    async fn list_currencies(&self) -> Result<CurrencyList, RateError>;

    /// Gets the latest published rate: how many units of `to` one unit of `from` buys.
    async fn latest_rate(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
    ) -> Result<RateQuote, RateError>;

    /// Gets the daily rates for `from -> to` within `window` (inclusive).
    ///
    /// Fails with `RateError::EmptySeries` when the window holds no data.
    async fn historical_series(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        window: DateWindow,
    ) -> Result<TrendSeries, RateError>;
}
