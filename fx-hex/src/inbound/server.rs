//! HTTP Server configuration and startup.

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use fx_types::{CurrencyPair, NumberLocale, RateProvider};

use super::handlers::{self, AppState};
use crate::service::{PopularRatesAggregator, RetainedChart, TrendSeriesBuilder, WidgetSession};

/// HTTP Server for the currency widget API.
pub struct HttpServer<P: RateProvider> {
    state: Arc<AppState<P>>,
}

impl<P: RateProvider> HttpServer<P> {
    /// Creates a server whose session, trend builder and popular table all
    /// share `provider`.
    pub fn new(provider: Arc<P>, locale: NumberLocale, popular_pairs: Vec<CurrencyPair>) -> Self {
        let session = WidgetSession::new(provider.clone(), RetainedChart::default());
        Self {
            state: Arc::new(AppState {
                session: Mutex::new(session),
                trends: TrendSeriesBuilder::new(provider.clone()),
                popular: PopularRatesAggregator::new(provider),
                popular_pairs,
                locale,
            }),
        }
    }

    /// Loads the currency catalogue up front. A failure is logged and the
    /// catalogue is fetched again on the first `/api/currencies` request.
    pub async fn initialize(&self) {
        let mut session = self.state.session.lock().await;
        if let Err(err) = session.load_currencies().await {
            tracing::warn!(error = %err, "could not load currencies at startup");
        }
    }

    /// Builds the Axum router with all routes.
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api-docs/openapi.json", get(handlers::openapi_json))
            .route("/api/currencies", get(handlers::list_currencies::<P>))
            .route(
                "/api/selection",
                get(handlers::get_selection::<P>).put(handlers::put_selection::<P>),
            )
            .route("/api/convert", post(handlers::convert::<P>))
            .route("/api/reverse", post(handlers::reverse::<P>))
            .route("/api/trend", get(handlers::get_trend::<P>))
            .route("/api/trend/refresh", post(handlers::refresh_trend::<P>))
            .route("/api/popular", get(handlers::popular_rates::<P>))
            .route("/api/theme/toggle", post(handlers::toggle_theme::<P>))
            .route("/api/quote", get(handlers::quote::<P>))
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Runs the server on the given address with graceful shutdown.
    pub async fn run(self, addr: &str) -> anyhow::Result<()> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!("Server listening on {}", listener.local_addr()?);

        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
