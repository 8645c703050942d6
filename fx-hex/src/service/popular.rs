//! Popular currency pairs table.

use std::sync::Arc;

use futures::future::join_all;
use fx_types::{CurrencyCode, CurrencyPair, PopularPairResult, RateProvider};

/// Pairs shown when none are configured.
const DEFAULT_POPULAR_PAIRS: [(&str, &str); 4] = [
    ("EUR", "USD"),
    ("USD", "JPY"),
    ("GBP", "EUR"),
    ("EUR", "CHF"),
];

pub fn default_popular_pairs() -> Vec<CurrencyPair> {
    DEFAULT_POPULAR_PAIRS
        .iter()
        .filter_map(|(from, to)| {
            Some(CurrencyPair::new(
                CurrencyCode::new(from).ok()?,
                CurrencyCode::new(to).ok()?,
            ))
        })
        .collect()
}

/// Fetches several pairs concurrently, isolating each pair's failure.
pub struct PopularRatesAggregator<P: RateProvider> {
    provider: Arc<P>,
}

impl<P: RateProvider> PopularRatesAggregator<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    /// Looks up every pair at once and waits for all of them to settle.
    ///
    /// The output has one entry per input pair, in input order, whatever
    /// order the lookups complete in. A failed lookup becomes an
    /// `Unavailable` entry instead of failing the whole table.
    #[tracing::instrument(skip_all, fields(pairs = pairs.len()))]
    pub async fn aggregate(&self, pairs: &[CurrencyPair]) -> Vec<PopularPairResult> {
        let lookups = pairs.iter().map(|pair| async move {
            if pair.is_same_currency() {
                return PopularPairResult::failed(pair.clone(), "same currency on both sides");
            }
            match self.provider.latest_rate(&pair.from, &pair.to).await {
                Ok(quote) => PopularPairResult::ok(pair.clone(), quote.rate()),
                Err(err) => {
                    tracing::warn!(%pair, error = %err, "popular rate unavailable");
                    PopularPairResult::failed(pair.clone(), err.to_string())
                }
            }
        });
        join_all(lookups).await
    }
}
