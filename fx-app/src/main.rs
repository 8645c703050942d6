//! # Currency Widget Application
//!
//! Binary that wires together all the components:
//! - Load configuration from environment
//! - Build the Frankfurter rate provider
//! - Create the widget session and services
//! - Start the HTTP server

mod config;

use std::sync::Arc;

use opentelemetry::global;
use opentelemetry_sdk::{propagation::TraceContextPropagator, trace as sdktrace};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fx_client::FrankfurterClient;
use fx_hex::inbound::HttpServer;

fn init_tracer() -> anyhow::Result<(sdktrace::Tracer, sdktrace::SdkTracerProvider)> {
    global::set_text_map_propagator(TraceContextPropagator::new());

    // The exporter reads OTEL_EXPORTER_OTLP_ENDPOINT itself
    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .build()?;

    let provider = sdktrace::SdkTracerProvider::builder()
        .with_batch_exporter(exporter)
        .build();

    global::set_tracer_provider(provider.clone());

    use opentelemetry::trace::TracerProvider as _;
    Ok((provider.tracer("fx-widget"), provider))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = config::Config::from_env()?;

    let otel = match config.otlp_endpoint {
        Some(_) => Some(init_tracer()?),
        None => None,
    };
    let telemetry = otel
        .as_ref()
        .map(|(tracer, _)| tracing_opentelemetry::layer().with_tracer(tracer.clone()));

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,fx_app=debug,fx_hex=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(telemetry)
        .init();

    tracing::info!("Starting currency widget server on port {}", config.port);
    tracing::info!(
        provider = %config.provider_url,
        locale = %config.locale,
        popular_pairs = config.popular_pairs.len(),
        "Using rate provider"
    );

    let provider = FrankfurterClient::new(config.provider_url).with_timeout(config.request_timeout);

    let server = HttpServer::new(Arc::new(provider), config.locale, config.popular_pairs);
    server.initialize().await;

    let addr = format!("0.0.0.0:{}", config.port);
    server.run(&addr).await?;

    // Ensure traces are flushed before exit
    if let Some((_, provider)) = otel {
        let _ = provider.shutdown();
    }
    Ok(())
}
