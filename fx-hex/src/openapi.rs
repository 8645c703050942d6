//! OpenAPI specification and documentation.

#![allow(dead_code)] // Path functions are only used by utoipa for documentation generation

use fx_types::domain::{
    ChartOptions, ChartSpec, ConversionResult, CurrencyCode, CurrencyList, CurrencyPair,
    NumberLocale, PairOutcome, PopularPairResult, Theme, TrendPoint, TrendSeries,
};
use fx_types::dto::{
    ConvertRequest, ConvertResponse, PopularRateRow, QuoteResponse, ReverseRequest,
    ReverseResponse, SelectionRequest, SelectionResponse, ThemeResponse, TrendResponse,
};
use utoipa::OpenApi;

// Dummy functions to generate path documentation
// These are not the actual handlers, just for OpenAPI path generation

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "Service is healthy", body = inline(serde_json::Value), example = json!({"status": "healthy"}))
    )
)]
async fn health() {}

/// List the currencies the provider supports, keyed by ISO code
#[utoipa::path(
    get,
    path = "/api/currencies",
    tag = "currencies",
    responses(
        (status = 200, description = "Currency catalogue", body = CurrencyList),
        (status = 503, description = "Rate provider unavailable")
    )
)]
async fn list_currencies() {}

/// The active currency pair
#[utoipa::path(
    get,
    path = "/api/selection",
    tag = "currencies",
    responses(
        (status = 200, description = "Active pair", body = SelectionResponse)
    )
)]
async fn get_selection() {}

/// Change the active currency pair
///
/// A change drops the cached rate and rebuilds the trend in the background.
#[utoipa::path(
    put,
    path = "/api/selection",
    tag = "currencies",
    request_body = SelectionRequest,
    responses(
        (status = 200, description = "Selection applied", body = SelectionResponse),
        (status = 400, description = "Unknown currency code")
    )
)]
async fn put_selection() {}

/// Convert an amount with the active pair's latest rate
#[utoipa::path(
    post,
    path = "/api/convert",
    tag = "conversion",
    request_body = ConvertRequest,
    responses(
        (status = 200, description = "Conversion result", body = ConvertResponse),
        (status = 400, description = "Invalid amount or same currency on both sides"),
        (status = 422, description = "Pair not supported by the provider"),
        (status = 503, description = "Conversion error. Try again later.")
    )
)]
async fn convert() {}

/// Source amount needed to obtain a target amount, using the last cached rate
#[utoipa::path(
    post,
    path = "/api/reverse",
    tag = "conversion",
    request_body = ReverseRequest,
    responses(
        (status = 200, description = "Required source amount", body = ReverseResponse),
        (status = 400, description = "Invalid amount"),
        (status = 409, description = "No rate available yet for the active pair")
    )
)]
async fn reverse() {}

/// Seven-day trend for the active pair
#[utoipa::path(
    get,
    path = "/api/trend",
    tag = "trend",
    responses(
        (status = 200, description = "Trend series and chart", body = TrendResponse),
        (status = 400, description = "Same currency on both sides"),
        (status = 409, description = "Selection changed while the trend was loading"),
        (status = 503, description = "Historical data unavailable")
    )
)]
async fn get_trend() {}

/// Rebuild the trend for the active pair, replacing the chart
#[utoipa::path(
    post,
    path = "/api/trend/refresh",
    tag = "trend",
    responses(
        (status = 200, description = "Rebuilt trend series and chart", body = TrendResponse),
        (status = 400, description = "Same currency on both sides"),
        (status = 409, description = "Selection changed while the trend was loading"),
        (status = 503, description = "Historical data unavailable")
    )
)]
async fn refresh_trend() {}

/// Latest rates for the configured popular pairs
///
/// Always succeeds; pairs that could not be fetched are reported as unavailable.
#[utoipa::path(
    get,
    path = "/api/popular",
    tag = "rates",
    responses(
        (status = 200, description = "One row per configured pair, in order", body = Vec<PopularRateRow>)
    )
)]
async fn popular_rates() {}

/// Switch between light and dark theme
#[utoipa::path(
    post,
    path = "/api/theme/toggle",
    tag = "cosmetics",
    responses(
        (status = 200, description = "New theme", body = ThemeResponse)
    )
)]
async fn toggle_theme() {}

/// A random quote
#[utoipa::path(
    get,
    path = "/api/quote",
    tag = "cosmetics",
    responses(
        (status = 200, description = "Quote", body = QuoteResponse)
    )
)]
async fn quote() {}

/// OpenAPI documentation for the currency widget API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Currency Widget API",
        version = "1.0.0",
        description = "Currency conversion, reverse conversion, seven-day trends and popular rates backed by the Frankfurter exchange rate service.",
        license(name = "MIT"),
    ),
    paths(
        health,
        list_currencies,
        get_selection,
        put_selection,
        convert,
        reverse,
        get_trend,
        refresh_trend,
        popular_rates,
        toggle_theme,
        quote,
    ),
    components(
        schemas(
            SelectionRequest,
            SelectionResponse,
            ConvertRequest,
            ConvertResponse,
            ReverseRequest,
            ReverseResponse,
            TrendResponse,
            PopularRateRow,
            ThemeResponse,
            QuoteResponse,
            CurrencyCode,
            CurrencyPair,
            CurrencyList,
            ConversionResult,
            TrendSeries,
            TrendPoint,
            ChartSpec,
            ChartOptions,
            PopularPairResult,
            PairOutcome,
            Theme,
            NumberLocale,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "currencies", description = "Currency catalogue and active pair"),
        (name = "conversion", description = "Forward and reverse conversion"),
        (name = "trend", description = "Seven-day historical trend"),
        (name = "rates", description = "Popular currency pairs"),
        (name = "cosmetics", description = "Theme and quotes"),
    )
)]
pub struct ApiDoc;
