//! HTTP request handlers.

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::Utc;
use tokio::sync::Mutex;
use utoipa::OpenApi;

use fx_types::{
    AppError, ChartSpec, ConversionError, ConvertRequest, ConvertResponse, CurrencyList,
    CurrencyPair, NumberLocale, PopularRateRow, QuoteResponse, RateError, RateProvider,
    ReverseRequest, ReverseResponse, SelectionRequest, SelectionResponse, ThemeResponse,
    TrendError, TrendResponse,
};

use crate::openapi::ApiDoc;
use crate::service::{PopularRatesAggregator, RetainedChart, TrendSeriesBuilder, WidgetSession};

/// Application state shared across handlers.
pub struct AppState<P: RateProvider> {
    pub session: Mutex<WidgetSession<P, RetainedChart>>,
    pub trends: TrendSeriesBuilder<P>,
    pub popular: PopularRatesAggregator<P>,
    pub popular_pairs: Vec<CurrencyPair>,
    pub locale: NumberLocale,
}

/// Wrapper to implement IntoResponse for AppError (orphan rule workaround).
pub struct ApiError(pub AppError);

impl From<AppError> for ApiError {
    fn from(err: AppError) -> Self {
        ApiError(err)
    }
}

impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        ApiError(err.into())
    }
}

impl From<TrendError> for ApiError {
    fn from(err: TrendError) -> Self {
        ApiError(err.into())
    }
}

impl From<RateError> for ApiError {
    fn from(err: RateError) -> Self {
        ApiError(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Unprocessable(msg) => (StatusCode::UNPROCESSABLE_ENTITY, msg.clone()),
            AppError::Unavailable(msg) => (StatusCode::SERVICE_UNAVAILABLE, msg.clone()),
        };

        let body = serde_json::json!({
            "error": message,
            "code": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

/// Health check endpoint.
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "healthy" }))
}

/// OpenAPI document.
pub async fn openapi_json() -> impl IntoResponse {
    Json(ApiDoc::openapi())
}

// ─────────────────────────────────────────────────────────────────────────────
// Currencies & selection
// ─────────────────────────────────────────────────────────────────────────────

/// List available currencies, loading them on first use.
#[tracing::instrument(skip(state))]
pub async fn list_currencies<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> Result<Json<CurrencyList>, ApiError> {
    let mut session = state.session.lock().await;
    if session.currencies().is_empty() {
        session.load_currencies().await?;
    }
    Ok(Json(session.currencies().clone()))
}

#[tracing::instrument(skip(state))]
pub async fn get_selection<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> Json<SelectionResponse> {
    let session = state.session.lock().await;
    let CurrencyPair { from, to } = session.selection().clone();
    Json(SelectionResponse {
        from,
        to,
        changed: false,
    })
}

/// Change the active pair; a change drops the cached rate and rebuilds the trend
/// in the background.
#[tracing::instrument(skip(state))]
pub async fn put_selection<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<SelectionRequest>,
) -> Result<Json<SelectionResponse>, ApiError> {
    let changed = {
        let mut session = state.session.lock().await;
        let currencies = session.currencies();
        if let Some(unknown) = [&req.from, &req.to]
            .into_iter()
            .find(|code| !currencies.is_empty() && !currencies.contains(code))
        {
            return Err(AppError::BadRequest(format!("Unknown currency: {}", unknown)).into());
        }
        session.select(CurrencyPair::new(req.from.clone(), req.to.clone()))
    };

    if changed && req.from != req.to {
        let state = state.clone();
        tokio::spawn(async move {
            if let Err(err) = rebuild_trend(&state).await {
                tracing::warn!(error = %err.0, "background trend rebuild failed");
            }
        });
    }

    Ok(Json(SelectionResponse {
        from: req.from,
        to: req.to,
        changed,
    }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state))]
pub async fn convert<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<ConvertRequest>,
) -> Result<Json<ConvertResponse>, ApiError> {
    let result = state.session.lock().await.convert(req.amount).await?;
    let display = state.locale.describe_conversion(&result);
    Ok(Json(ConvertResponse { result, display }))
}

#[tracing::instrument(skip(state))]
pub async fn reverse<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
    Json(req): Json<ReverseRequest>,
) -> Result<Json<ReverseResponse>, ApiError> {
    let session = state.session.lock().await;
    let required = session.reverse(req.target_amount)?;
    let cached = session
        .last_rate()
        .ok_or(ConversionError::NoRateAvailable)?;
    Ok(Json(ReverseResponse {
        target_amount: req.target_amount,
        required,
        from: cached.from.clone(),
        to: cached.to.clone(),
        display: state.locale.describe_requirement(required, &cached.from),
    }))
}

// ─────────────────────────────────────────────────────────────────────────────
// Trend
// ─────────────────────────────────────────────────────────────────────────────

/// Fetches the trend for the current selection without holding the session
/// lock, then applies it only if the selection is unchanged.
async fn rebuild_trend<P: RateProvider>(state: &AppState<P>) -> Result<TrendResponse, ApiError> {
    let CurrencyPair { from, to } = state.session.lock().await.selection().clone();
    let series = state
        .trends
        .build(&from, &to, Utc::now().date_naive())
        .await?;

    let mut session = state.session.lock().await;
    if !session.apply_trend(series.clone()) {
        return Err(AppError::Conflict(format!(
            "Selection changed while loading the {}/{} trend",
            from, to
        ))
        .into());
    }
    let chart = session
        .chart()
        .current()
        .cloned()
        .unwrap_or_else(|| ChartSpec::from_series(&series));
    Ok(TrendResponse { series, chart })
}

/// Trend for the active pair, served from the last render when still current.
#[tracing::instrument(skip(state))]
pub async fn get_trend<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> Result<Json<TrendResponse>, ApiError> {
    {
        let session = state.session.lock().await;
        if let (Some(series), Some(chart)) = (session.current_trend(), session.chart().current())
        {
            return Ok(Json(TrendResponse {
                series: series.clone(),
                chart: chart.clone(),
            }));
        }
    }
    Ok(Json(rebuild_trend(&state).await?))
}

#[tracing::instrument(skip(state))]
pub async fn refresh_trend<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> Result<Json<TrendResponse>, ApiError> {
    Ok(Json(rebuild_trend(&state).await?))
}

// ─────────────────────────────────────────────────────────────────────────────
// Popular rates & cosmetics
// ─────────────────────────────────────────────────────────────────────────────

#[tracing::instrument(skip(state))]
pub async fn popular_rates<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> Json<Vec<PopularRateRow>> {
    let results = state.popular.aggregate(&state.popular_pairs).await;
    Json(results.into_iter().map(PopularRateRow::from).collect())
}

#[tracing::instrument(skip(state))]
pub async fn toggle_theme<P: RateProvider>(
    State(state): State<Arc<AppState<P>>>,
) -> Json<ThemeResponse> {
    let theme = state.session.lock().await.toggle_theme();
    Json(ThemeResponse {
        theme,
        icon: theme.icon().to_string(),
    })
}

pub async fn quote<P: RateProvider>(State(state): State<Arc<AppState<P>>>) -> Json<QuoteResponse> {
    let quote = state.session.lock().await.quote().to_string();
    Json(QuoteResponse { quote })
}
