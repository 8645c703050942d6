//! Service unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use fx_types::{
        ConversionError, CurrencyCode, CurrencyList, CurrencyPair, DateWindow, QUOTES, RateError,
        RateProvider, RateQuote, Theme, TrendError, TrendPoint, TrendSeries,
    };

    use crate::{
        ConversionEngine, PopularRatesAggregator, RetainedChart, TrendSeriesBuilder,
        WidgetSession, default_popular_pairs,
    };

    #[derive(Clone, Copy)]
    pub enum Failure {
        UnknownPair,
        Unavailable,
        Malformed,
        Empty,
    }

    /// Simple in-memory provider for testing the service layer.
    pub struct MockProvider {
        currencies: Vec<(&'static str, &'static str)>,
        rates: HashMap<(String, String), f64>,
        failures: HashMap<(String, String), Failure>,
        delays: HashMap<(String, String), Duration>,
        history: Vec<(NaiveDate, f64)>,
        calls: AtomicUsize,
        in_flight: AtomicUsize,
        max_in_flight: AtomicUsize,
        last_window: Mutex<Option<DateWindow>>,
    }

    fn key(from: &CurrencyCode, to: &CurrencyCode) -> (String, String) {
        (from.to_string(), to.to_string())
    }

    impl MockProvider {
        pub fn new() -> Self {
            Self {
                currencies: vec![("EUR", "Euro"), ("USD", "US Dollar")],
                rates: HashMap::new(),
                failures: HashMap::new(),
                delays: HashMap::new(),
                history: Vec::new(),
                calls: AtomicUsize::new(0),
                in_flight: AtomicUsize::new(0),
                max_in_flight: AtomicUsize::new(0),
                last_window: Mutex::new(None),
            }
        }

        pub fn with_rate(mut self, from: &str, to: &str, rate: f64) -> Self {
            self.rates.insert((from.into(), to.into()), rate);
            self
        }

        pub fn with_failure(mut self, from: &str, to: &str, failure: Failure) -> Self {
            self.failures.insert((from.into(), to.into()), failure);
            self
        }

        pub fn with_delay(mut self, from: &str, to: &str, delay: Duration) -> Self {
            self.delays.insert((from.into(), to.into()), delay);
            self
        }

        pub fn with_history(mut self, history: Vec<(NaiveDate, f64)>) -> Self {
            self.history = history;
            self
        }

        pub fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        pub fn last_window(&self) -> Option<DateWindow> {
            *self.last_window.lock().unwrap()
        }

        fn fail(&self, failure: Failure, from: &CurrencyCode, to: &CurrencyCode) -> RateError {
            match failure {
                Failure::UnknownPair => RateError::UnknownPair {
                    from: from.clone(),
                    to: to.clone(),
                },
                Failure::Unavailable => RateError::ProviderUnavailable("HTTP 503".into()),
                Failure::Malformed => RateError::MalformedResponse("rates missing".into()),
                Failure::Empty => RateError::EmptySeries {
                    from: from.clone(),
                    to: to.clone(),
                    start: NaiveDate::MIN,
                    end: NaiveDate::MIN,
                },
            }
        }
    }

    #[async_trait]
    impl RateProvider for MockProvider {
        async fn list_currencies(&self) -> Result<CurrencyList, RateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .currencies
                .iter()
                .map(|(code, name)| (code.parse().unwrap(), name.to_string()))
                .collect())
        }

        async fn latest_rate(
            &self,
            from: &CurrencyCode,
            to: &CurrencyCode,
        ) -> Result<RateQuote, RateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
            self.max_in_flight.fetch_max(now, Ordering::SeqCst);

            if let Some(delay) = self.delays.get(&key(from, to)) {
                tokio::time::sleep(*delay).await;
            }
            self.in_flight.fetch_sub(1, Ordering::SeqCst);

            if let Some(failure) = self.failures.get(&key(from, to)) {
                return Err(self.fail(*failure, from, to));
            }
            let rate = self
                .rates
                .get(&key(from, to))
                .copied()
                .ok_or_else(|| self.fail(Failure::UnknownPair, from, to))?;
            Ok(RateQuote::new(
                from.clone(),
                to.clone(),
                rate,
                NaiveDate::from_ymd_opt(2025, 4, 10).unwrap(),
            )
            .unwrap())
        }

        async fn historical_series(
            &self,
            from: &CurrencyCode,
            to: &CurrencyCode,
            window: DateWindow,
        ) -> Result<TrendSeries, RateError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            *self.last_window.lock().unwrap() = Some(window);
            if let Some(failure) = self.failures.get(&key(from, to)) {
                return Err(self.fail(*failure, from, to));
            }
            let points = self
                .history
                .iter()
                .map(|(date, rate)| TrendPoint {
                    date: *date,
                    rate: *rate,
                })
                .collect();
            Ok(TrendSeries::new(from.clone(), to.clone(), points))
        }
    }

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn pair(s: &str) -> CurrencyPair {
        s.parse().unwrap()
    }

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // ConversionEngine
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_convert_eur_usd() {
        let provider = Arc::new(MockProvider::new().with_rate("EUR", "USD", 1.0850));
        let mut engine = ConversionEngine::new(provider.clone());

        let result = engine.convert(&code("EUR"), &code("USD"), 100.0).await.unwrap();

        assert!(close(result.converted, 108.50));
        assert_eq!(result.from, code("EUR"));
        assert_eq!(result.to, code("USD"));
        assert_eq!(provider.calls(), 1);
        let cached = engine.last_rate().unwrap();
        assert_eq!(cached.pair(), pair("EUR/USD"));
        assert!(close(cached.rate, 1.0850));
    }

    #[tokio::test]
    async fn test_converted_is_amount_times_rate() {
        let rates = [("EUR", "USD", 1.0850), ("USD", "JPY", 143.27), ("GBP", "EUR", 1.1712)];
        let mut provider = MockProvider::new();
        for (from, to, rate) in rates {
            provider = provider.with_rate(from, to, rate);
        }
        let mut engine = ConversionEngine::new(Arc::new(provider));

        for (from, to, rate) in rates {
            for amount in [0.01, 1.0, 99.99, 12_345.678, 1e9] {
                let result = engine.convert(&code(from), &code(to), amount).await.unwrap();
                assert!(
                    close(result.converted, amount * rate),
                    "{amount} {from}->{to}: {}",
                    result.converted
                );
            }
        }
    }

    #[tokio::test]
    async fn test_same_currency_rejected_without_network_call() {
        let provider = Arc::new(MockProvider::new().with_rate("EUR", "EUR", 1.0));
        let mut engine = ConversionEngine::new(provider.clone());

        for amount in [100.0, 0.0, -3.0, f64::NAN] {
            let err = engine.convert(&code("EUR"), &code("EUR"), amount).await.unwrap_err();
            assert!(matches!(err, ConversionError::SameCurrency(ref c) if c.as_str() == "EUR"));
        }
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn test_invalid_amount_rejected_without_network_call() {
        let provider = Arc::new(MockProvider::new().with_rate("EUR", "USD", 1.085));
        let mut engine = ConversionEngine::new(provider.clone());

        for amount in [0.0, -0.01, -100.0, f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = engine.convert(&code("EUR"), &code("USD"), amount).await.unwrap_err();
            assert!(matches!(err, ConversionError::InvalidAmount(_)), "{amount}");
        }
        assert_eq!(provider.calls(), 0);
        assert!(engine.last_rate().is_none());
    }

    #[tokio::test]
    async fn test_overflowing_conversion_rejected_and_cache_kept() {
        let provider = Arc::new(MockProvider::new().with_rate("USD", "JPY", 143.27));
        let mut engine = ConversionEngine::new(provider);

        engine.convert(&code("USD"), &code("JPY"), 10.0).await.unwrap();
        let err = engine.convert(&code("USD"), &code("JPY"), 1e307).await.unwrap_err();
        assert!(matches!(err, ConversionError::InvalidAmount(_)));

        let cached = engine.last_rate().unwrap();
        assert_eq!(cached.rate, 143.27);
        assert!(close(engine.reverse_convert(143.27).unwrap(), 1.0));
    }

    #[tokio::test]
    async fn test_subnormal_amount_caches_quoted_rate() {
        let provider = Arc::new(MockProvider::new().with_rate("USD", "JPY", 143.27));
        let mut engine = ConversionEngine::new(provider);

        engine.convert(&code("USD"), &code("JPY"), 5e-324).await.unwrap();
        assert_eq!(engine.last_rate().unwrap().rate, 143.27);
        assert!(close(engine.reverse_convert(143.27).unwrap(), 1.0));
    }

    #[tokio::test]
    async fn test_reverse_round_trips_forward_conversion() {
        let provider = Arc::new(MockProvider::new().with_rate("USD", "JPY", 143.27));
        let mut engine = ConversionEngine::new(provider.clone());

        let result = engine.convert(&code("USD"), &code("JPY"), 250.0).await.unwrap();
        let calls = provider.calls();
        let required = engine.reverse_convert(result.converted).unwrap();

        assert!(close(required, 250.0));
        assert_eq!(provider.calls(), calls, "reverse lookup must not hit the provider");
    }

    #[tokio::test]
    async fn test_reverse_without_rate_fails() {
        let provider = Arc::new(MockProvider::new().with_rate("EUR", "USD", 1.085));
        let mut engine = ConversionEngine::new(provider);

        assert!(matches!(
            engine.reverse_convert(50.0),
            Err(ConversionError::NoRateAvailable)
        ));

        engine.convert(&code("EUR"), &code("USD"), 10.0).await.unwrap();
        assert!(engine.reverse_convert(50.0).is_ok());

        engine.invalidate_rate();
        assert!(matches!(
            engine.reverse_convert(50.0),
            Err(ConversionError::NoRateAvailable)
        ));
    }

    #[tokio::test]
    async fn test_reverse_invalid_amount_is_distinct_from_missing_rate() {
        let engine = ConversionEngine::new(Arc::new(MockProvider::new()));
        for target in [0.0, -1.0, f64::NAN] {
            assert!(matches!(
                engine.reverse_convert(target),
                Err(ConversionError::InvalidAmount(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_http_422_surfaces_pair_unsupported() {
        let provider = Arc::new(MockProvider::new().with_failure("XXX", "USD", Failure::UnknownPair));
        let mut engine = ConversionEngine::new(provider);

        let err = engine.convert(&code("XXX"), &code("USD"), 100.0).await.unwrap_err();
        match err {
            ConversionError::PairUnsupported { from, to, source } => {
                assert_eq!(from, code("XXX"));
                assert_eq!(to, code("USD"));
                assert!(matches!(source, RateError::UnknownPair { .. }));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_provider_failures_surface_conversion_unavailable() {
        let provider = Arc::new(
            MockProvider::new()
                .with_rate("EUR", "USD", 1.085)
                .with_failure("EUR", "GBP", Failure::Unavailable)
                .with_failure("EUR", "JPY", Failure::Malformed),
        );
        let mut engine = ConversionEngine::new(provider);
        engine.convert(&code("EUR"), &code("USD"), 10.0).await.unwrap();

        for to in ["GBP", "JPY"] {
            let err = engine.convert(&code("EUR"), &code(to), 10.0).await.unwrap_err();
            assert!(matches!(err, ConversionError::ConversionUnavailable { .. }));
        }
        // A failed conversion leaves the previous rate in place.
        assert_eq!(engine.last_rate().unwrap().pair(), pair("EUR/USD"));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // TrendSeriesBuilder
    // ─────────────────────────────────────────────────────────────────────────────

    fn week_history() -> Vec<(NaiveDate, f64)> {
        vec![
            (d(2024, 2, 29), 1.0829),
            (d(2024, 2, 23), 1.0822),
            (d(2024, 2, 26), 1.0851),
            (d(2024, 2, 27), 1.0846),
        ]
    }

    #[tokio::test]
    async fn test_trend_window_across_leap_day() {
        let provider = Arc::new(MockProvider::new().with_history(week_history()));
        let builder = TrendSeriesBuilder::new(provider.clone());

        let series = builder.build(&code("EUR"), &code("USD"), d(2024, 3, 1)).await.unwrap();

        let window = provider.last_window().unwrap();
        assert_eq!(window.start, d(2024, 2, 23));
        assert_eq!(window.end, d(2024, 2, 29));
        assert_eq!(window.len_days(), 7);

        let dates: Vec<_> = series.points().iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![d(2024, 2, 23), d(2024, 2, 26), d(2024, 2, 27), d(2024, 2, 29)]
        );
        assert_eq!(series.pair(), pair("EUR/USD"));
    }

    #[tokio::test]
    async fn test_trend_window_across_month_rollover() {
        let provider = Arc::new(MockProvider::new().with_history(vec![(d(2025, 3, 31), 1.08)]));
        let builder = TrendSeriesBuilder::new(provider.clone());

        builder.build(&code("EUR"), &code("USD"), d(2025, 4, 2)).await.unwrap();

        let window = provider.last_window().unwrap();
        assert_eq!(window.start, d(2025, 3, 26));
        assert_eq!(window.end, d(2025, 4, 1));
    }

    #[tokio::test]
    async fn test_trend_drops_points_outside_window() {
        let provider = Arc::new(MockProvider::new().with_history(vec![
            (d(2025, 4, 3), 1.07),
            (d(2025, 4, 4), 1.09),
            (d(2025, 4, 11), 1.12),
        ]));
        let builder = TrendSeriesBuilder::new(provider);

        let series = builder.build(&code("EUR"), &code("USD"), d(2025, 4, 11)).await.unwrap();

        assert_eq!(series.len(), 1);
        assert_eq!(series.first().unwrap().date, d(2025, 4, 4));
    }

    #[tokio::test]
    async fn test_trend_failures_map_to_trend_unavailable() {
        let cases = [
            ("USD", Failure::UnknownPair),
            ("GBP", Failure::Unavailable),
            ("JPY", Failure::Malformed),
            ("CHF", Failure::Empty),
        ];
        let mut provider = MockProvider::new();
        for (to, failure) in cases {
            provider = provider.with_failure("EUR", to, failure);
        }
        let builder = TrendSeriesBuilder::new(Arc::new(provider));

        for (to, failure) in cases {
            let err = builder.build(&code("EUR"), &code(to), d(2025, 4, 11)).await.unwrap_err();
            let TrendError::TrendUnavailable { source, .. } = err else {
                panic!("expected TrendUnavailable for {to}");
            };
            let kept = match failure {
                Failure::UnknownPair => matches!(source, RateError::UnknownPair { .. }),
                Failure::Unavailable => matches!(source, RateError::ProviderUnavailable(_)),
                Failure::Malformed => matches!(source, RateError::MalformedResponse(_)),
                Failure::Empty => matches!(source, RateError::EmptySeries { .. }),
            };
            assert!(kept, "original cause lost for {to}: {source:?}");
        }
    }

    #[tokio::test]
    async fn test_trend_with_no_points_in_window_is_unavailable() {
        let provider = Arc::new(MockProvider::new().with_history(vec![(d(2020, 1, 1), 1.1)]));
        let builder = TrendSeriesBuilder::new(provider);

        let err = builder.build(&code("EUR"), &code("USD"), d(2025, 4, 11)).await.unwrap_err();
        assert!(matches!(
            err,
            TrendError::TrendUnavailable {
                source: RateError::EmptySeries { .. },
                ..
            }
        ));
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // PopularRatesAggregator
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_aggregate_preserves_order_and_isolates_failures() {
        let provider = Arc::new(
            MockProvider::new()
                .with_rate("EUR", "USD", 1.085)
                .with_delay("EUR", "USD", Duration::from_millis(60))
                .with_failure("USD", "JPY", Failure::Unavailable)
                .with_delay("USD", "JPY", Duration::from_millis(5))
                .with_rate("GBP", "EUR", 1.17)
                .with_delay("GBP", "EUR", Duration::from_millis(30)),
        );
        let aggregator = PopularRatesAggregator::new(provider.clone());
        let pairs = vec![pair("EUR/USD"), pair("USD/JPY"), pair("GBP/EUR")];

        let results = aggregator.aggregate(&pairs).await;

        assert_eq!(results.len(), 3);
        assert_eq!(results[0].from, code("EUR"));
        assert_eq!(results[0].rate(), Some(1.085));
        assert_eq!(results[1].from, code("USD"));
        assert!(results[1].is_error());
        assert_eq!(results[1].label(), "USD/JPY = unavailable");
        assert_eq!(results[2].from, code("GBP"));
        assert_eq!(results[2].rate(), Some(1.17));
        // All lookups were in flight together.
        assert_eq!(provider.max_in_flight.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_aggregate_with_every_pair_failing() {
        let provider = Arc::new(MockProvider::new());
        let aggregator = PopularRatesAggregator::new(provider);

        let results = aggregator.aggregate(&default_popular_pairs()).await;

        assert_eq!(results.len(), 4);
        assert!(results.iter().all(|r| r.is_error()));
    }

    #[tokio::test]
    async fn test_aggregate_empty_input() {
        let aggregator = PopularRatesAggregator::new(Arc::new(MockProvider::new()));
        assert!(aggregator.aggregate(&[]).await.is_empty());
    }

    #[test]
    fn test_default_popular_pairs() {
        let labels: Vec<String> = default_popular_pairs().iter().map(|p| p.to_string()).collect();
        assert_eq!(labels, vec!["EUR/USD", "USD/JPY", "GBP/EUR", "EUR/CHF"]);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // WidgetSession
    // ─────────────────────────────────────────────────────────────────────────────

    fn session(provider: MockProvider) -> WidgetSession<MockProvider, RetainedChart> {
        WidgetSession::new(Arc::new(provider), RetainedChart::default())
    }

    #[tokio::test]
    async fn test_load_currencies_selects_eur_usd() {
        let mut session = session(MockProvider::new());

        let currencies = session.load_currencies().await.unwrap();
        assert_eq!(currencies.name(&code("EUR")), Some("Euro"));
        assert_eq!(currencies.name(&code("USD")), Some("US Dollar"));
        assert_eq!(session.selection(), &pair("EUR/USD"));
    }

    #[tokio::test]
    async fn test_load_currencies_keeps_listed_selection() {
        let mut session = session(MockProvider::new().with_rate("USD", "EUR", 0.92));
        session.select(pair("USD/EUR"));
        session.convert(10.0).await.unwrap();

        session.load_currencies().await.unwrap();
        assert_eq!(session.selection(), &pair("USD/EUR"));
        assert!(session.last_rate().is_some());
    }

    #[tokio::test]
    async fn test_load_currencies_replaces_unlisted_selection() {
        let mut session = session(MockProvider::new().with_rate("GBP", "EUR", 1.17));
        session.select(pair("GBP/EUR"));
        session.convert(10.0).await.unwrap();

        session.load_currencies().await.unwrap();
        assert_eq!(session.selection(), &pair("EUR/USD"));
        assert!(session.last_rate().is_none());
    }

    #[tokio::test]
    async fn test_selection_change_invalidates_rate() {
        let mut session = session(
            MockProvider::new()
                .with_rate("EUR", "USD", 1.085)
                .with_rate("EUR", "GBP", 0.85),
        );

        let result = session.convert(100.0).await.unwrap();
        assert!(close(result.converted, 108.5));
        assert!(close(session.reverse(108.5).unwrap(), 100.0));

        assert!(!session.select(pair("EUR/USD")), "same pair is not a change");
        assert!(session.last_rate().is_some());

        assert!(session.select(pair("EUR/GBP")));
        assert!(matches!(
            session.reverse(10.0),
            Err(ConversionError::NoRateAvailable)
        ));
    }

    #[tokio::test]
    async fn test_convert_with_same_currency_selected() {
        let mut session = session(MockProvider::new());
        session.select(pair("USD/USD"));
        assert!(matches!(
            session.convert(5.0).await,
            Err(ConversionError::SameCurrency(_))
        ));
    }

    #[tokio::test]
    async fn test_stale_trend_is_discarded() {
        let provider = Arc::new(MockProvider::new().with_history(week_history()));
        let builder = TrendSeriesBuilder::new(provider.clone());
        let mut session = WidgetSession::new(provider, RetainedChart::default());

        // Fetch for EUR/USD, then the user switches before it lands.
        let series = builder.build(&code("EUR"), &code("USD"), d(2024, 3, 1)).await.unwrap();
        session.select(pair("EUR/GBP"));

        assert!(!session.apply_trend(series));
        assert!(session.chart().current().is_none());
        assert_eq!(session.chart().renders(), 0);
        assert!(session.current_trend().is_none());
    }

    #[tokio::test]
    async fn test_refresh_trend_replaces_chart() {
        let provider = Arc::new(MockProvider::new().with_history(week_history()));
        let builder = TrendSeriesBuilder::new(provider.clone());
        let mut session = WidgetSession::new(provider, RetainedChart::default());

        session.refresh_trend(&builder, d(2024, 3, 1)).await.unwrap();
        session.select(pair("EUR/GBP"));
        assert!(session.current_trend().is_none());
        session.refresh_trend(&builder, d(2024, 3, 1)).await.unwrap();

        let chart = session.chart().current().unwrap();
        assert_eq!(session.chart().renders(), 2);
        assert_eq!(chart.options.dataset_label, "EUR → GBP");
        assert_eq!(chart.labels.len(), 4);
        assert_eq!(session.current_trend().unwrap().pair(), pair("EUR/GBP"));
    }

    #[tokio::test]
    async fn test_theme_and_quote() {
        let mut session = session(MockProvider::new());
        assert_eq!(session.theme(), Theme::Light);
        assert_eq!(session.toggle_theme(), Theme::Dark);
        assert_eq!(session.toggle_theme(), Theme::Light);
        assert!(QUOTES.contains(&session.quote()));
    }
}
