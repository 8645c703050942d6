//! Widget session: the state a single widget instance carries between user actions.

use std::sync::Arc;

use chrono::NaiveDate;
use fx_types::{
    CachedRate, ChartSink, ChartSpec, ConversionError, ConversionResult, CurrencyList,
    CurrencyPair, QUOTES, RateError, RateProvider, Theme, TrendError, TrendSeries,
};
use rand::seq::IndexedRandom;

use super::conversion::ConversionEngine;
use super::trend::TrendSeriesBuilder;

/// Owns the currency catalogue, the active pair, the conversion engine (and
/// with it the cached rate), the displayed trend and the cosmetic theme.
pub struct WidgetSession<P: RateProvider, S: ChartSink> {
    provider: Arc<P>,
    currencies: CurrencyList,
    selection: CurrencyPair,
    engine: ConversionEngine<P>,
    trend: Option<TrendSeries>,
    chart: S,
    theme: Theme,
}

impl<P: RateProvider, S: ChartSink> WidgetSession<P, S> {
    /// Creates a session with no currencies loaded and EUR/USD selected.
    pub fn new(provider: Arc<P>, chart: S) -> Self {
        Self {
            engine: ConversionEngine::new(provider.clone()),
            provider,
            currencies: CurrencyList::default(),
            selection: CurrencyList::default().default_selection(),
            trend: None,
            chart,
            theme: Theme::default(),
        }
    }

    /// Fetches the currency catalogue. The current selection is kept when the
    /// catalogue lists both of its codes, otherwise it falls back to the
    /// catalogue default.
    pub async fn load_currencies(&mut self) -> Result<&CurrencyList, RateError> {
        let currencies = self.provider.list_currencies().await?;
        tracing::info!(count = currencies.len(), "currencies loaded");
        let selection = if currencies.contains(&self.selection.from)
            && currencies.contains(&self.selection.to)
        {
            self.selection.clone()
        } else {
            currencies.default_selection()
        };
        self.currencies = currencies;
        self.select(selection);
        Ok(&self.currencies)
    }

    pub fn currencies(&self) -> &CurrencyList {
        &self.currencies
    }

    pub fn selection(&self) -> &CurrencyPair {
        &self.selection
    }

    /// Changes the active pair. Returns whether it actually changed; a change
    /// drops the cached rate so reverse lookups never use a stale pair.
    pub fn select(&mut self, pair: CurrencyPair) -> bool {
        if pair == self.selection {
            return false;
        }
        tracing::debug!(previous = %self.selection, current = %pair, "selection changed");
        self.selection = pair;
        self.engine.invalidate_rate();
        true
    }

    pub async fn convert(&mut self, amount: f64) -> Result<ConversionResult, ConversionError> {
        let CurrencyPair { from, to } = self.selection.clone();
        self.engine.convert(&from, &to, amount).await
    }

    pub fn reverse(&self, target_amount: f64) -> Result<f64, ConversionError> {
        self.engine.reverse_convert(target_amount)
    }

    pub fn last_rate(&self) -> Option<&CachedRate> {
        self.engine.last_rate()
    }

    /// Shows `series` if it still belongs to the active pair.
    ///
    /// A series fetched for a pair that has since been deselected is
    /// discarded and `false` is returned.
    pub fn apply_trend(&mut self, series: TrendSeries) -> bool {
        if series.pair() != self.selection {
            tracing::debug!(
                series = %series.pair(),
                selection = %self.selection,
                "discarding stale trend"
            );
            return false;
        }
        self.chart.destroy();
        self.chart.render(ChartSpec::from_series(&series));
        self.trend = Some(series);
        true
    }

    /// Builds and applies the trend for the active pair.
    pub async fn refresh_trend(
        &mut self,
        trends: &TrendSeriesBuilder<P>,
        today: NaiveDate,
    ) -> Result<TrendSeries, TrendError> {
        let CurrencyPair { from, to } = self.selection.clone();
        let series = trends.build(&from, &to, today).await?;
        self.apply_trend(series.clone());
        Ok(series)
    }

    /// The displayed trend, if it belongs to the active pair.
    pub fn current_trend(&self) -> Option<&TrendSeries> {
        self.trend
            .as_ref()
            .filter(|series| series.pair() == self.selection)
    }

    pub fn chart(&self) -> &S {
        &self.chart
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// A random quote for the footer.
    pub fn quote(&self) -> &'static str {
        QUOTES.choose(&mut rand::rng()).copied().unwrap_or_default()
    }
}
