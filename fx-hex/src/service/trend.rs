//! Seven-day historical trend for a currency pair.

use std::sync::Arc;

use chrono::NaiveDate;
use fx_types::{CurrencyCode, DateWindow, RateError, RateProvider, TrendError, TrendSeries};

/// Builds the chart series for the week before a given day.
///
/// Stateless: every build is a full replacement, never merged with a
/// previous series.
pub struct TrendSeriesBuilder<P: RateProvider> {
    provider: Arc<P>,
}

impl<P: RateProvider> TrendSeriesBuilder<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Fetches `[today-7, today-1]` for `from -> to`, ordered by date.
    #[tracing::instrument(skip(self))]
    pub async fn build(
        &self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        today: NaiveDate,
    ) -> Result<TrendSeries, TrendError> {
        if from == to {
            return Err(TrendError::SameCurrency(from.clone()));
        }
        let window = DateWindow::trailing_week(today)?;

        let unavailable = |source: RateError| {
            tracing::warn!(error = %source, "trend lookup failed");
            TrendError::TrendUnavailable {
                from: from.clone(),
                to: to.clone(),
                source,
            }
        };

        let fetched = self
            .provider
            .historical_series(from, to, window)
            .await
            .map_err(unavailable)?;

        let points: Vec<_> = fetched
            .points()
            .iter()
            .filter(|p| window.contains(p.date))
            .copied()
            .collect();
        if points.is_empty() {
            return Err(unavailable(RateError::EmptySeries {
                from: from.clone(),
                to: to.clone(),
                start: window.start,
                end: window.end,
            }));
        }

        let series = TrendSeries::new(from.clone(), to.clone(), points);
        tracing::debug!(points = series.len(), start = %window.start, end = %window.end, "trend built");
        Ok(series)
    }
}
