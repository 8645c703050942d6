//! Data Transfer Objects (DTOs) for requests and responses.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    ChartSpec, ConversionResult, CurrencyCode, PopularPairResult, Theme, TrendSeries,
};

// ─────────────────────────────────────────────────────────────────────────────
// Selection DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to change the active currency pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SelectionRequest {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

/// The active currency pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SelectionResponse {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    /// Whether this request changed the selection (and dropped the cached rate)
    pub changed: bool,
}

// ─────────────────────────────────────────────────────────────────────────────
// Conversion DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Request to convert an amount using the active pair.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertRequest {
    #[schema(example = 100.0)]
    pub amount: f64,
}

/// Result of a forward conversion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConvertResponse {
    #[serde(flatten)]
    pub result: ConversionResult,
    /// Human readable summary, e.g. `100.00 EUR = 108.50 USD`
    pub display: String,
}

/// Request to compute how much source currency buys a target amount.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReverseRequest {
    #[schema(example = 500.0)]
    pub target_amount: f64,
}

/// Result of a reverse conversion.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReverseResponse {
    pub target_amount: f64,
    pub required: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    /// e.g. `You'll need 460.83 EUR`
    pub display: String,
}

// ─────────────────────────────────────────────────────────────────────────────
// Trend & popular rates DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// The trend series for the active pair plus its chart rendering.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrendResponse {
    pub series: TrendSeries,
    pub chart: ChartSpec,
}

/// One row of the popular rates table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PopularRateRow {
    #[serde(flatten)]
    pub result: PopularPairResult,
    /// e.g. `EUR/USD = 1.09`
    pub label: String,
}

impl From<PopularPairResult> for PopularRateRow {
    fn from(result: PopularPairResult) -> Self {
        let label = result.label();
        Self { result, label }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Cosmetic DTOs
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ThemeResponse {
    pub theme: Theme,
    pub icon: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct QuoteResponse {
    pub quote: String,
}
