//! Error types for the conversion widget.
//!
//! Provider-level failures (`RateError`) never reach the presentation layer
//! raw: each consuming service maps them to its own kind and keeps the
//! original as `source`.

use chrono::NaiveDate;

use crate::domain::CurrencyCode;

/// Domain-level errors (invalid values).
#[derive(Debug, thiserror::Error)]
pub enum DomainError {
    #[error("Invalid currency code: {0:?}")]
    InvalidCurrencyCode(String),

    #[error("Invalid currency pair: {0:?}")]
    InvalidCurrencyPair(String),

    #[error("Rate must be positive and finite, got {0}")]
    NonPositiveRate(f64),

    #[error("Invalid date window: {start} is after {end}")]
    InvalidWindow { start: NaiveDate, end: NaiveDate },

    #[error("Date out of range: {0}")]
    DateOutOfRange(NaiveDate),

    #[error("Unsupported locale: {0}")]
    UnsupportedLocale(String),
}

/// Rate provider errors (network and payload failures).
#[derive(Debug, thiserror::Error)]
pub enum RateError {
    #[error("Rate provider unavailable: {0}")]
    ProviderUnavailable(String),

    #[error("No rate published for {from} -> {to}")]
    UnknownPair { from: CurrencyCode, to: CurrencyCode },

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("No rates for {from} -> {to} between {start} and {end}")]
    EmptySeries {
        from: CurrencyCode,
        to: CurrencyCode,
        start: NaiveDate,
        end: NaiveDate,
    },
}

/// Errors surfaced by forward and reverse conversion.
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Amount must be a positive number, got {0}")]
    InvalidAmount(f64),

    #[error("Please select different currencies (both are {0})")]
    SameCurrency(CurrencyCode),

    #[error("Conversion from {from} to {to} is not supported")]
    PairUnsupported {
        from: CurrencyCode,
        to: CurrencyCode,
        #[source]
        source: RateError,
    },

    #[error("Conversion error. Try again later.")]
    ConversionUnavailable {
        #[source]
        source: RateError,
    },

    #[error("No rate available yet; convert an amount first")]
    NoRateAvailable,
}

impl ConversionError {
    /// Maps a provider failure for `from -> to` to the user-facing kind.
    pub fn from_provider(err: RateError, from: &CurrencyCode, to: &CurrencyCode) -> Self {
        match err {
            unknown @ RateError::UnknownPair { .. } => ConversionError::PairUnsupported {
                from: from.clone(),
                to: to.clone(),
                source: unknown,
            },
            other => ConversionError::ConversionUnavailable { source: other },
        }
    }
}

/// Errors surfaced when building a trend series.
#[derive(Debug, thiserror::Error)]
pub enum TrendError {
    #[error("No trend for {0} against itself")]
    SameCurrency(CurrencyCode),

    #[error("Trend for {from} -> {to} is unavailable")]
    TrendUnavailable {
        from: CurrencyCode,
        to: CurrencyCode,
        #[source]
        source: RateError,
    },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// Application-level errors (for HTTP responses).
///
/// Maps cleanly to HTTP status codes.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unprocessable: {0}")]
    Unprocessable(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

impl From<ConversionError> for AppError {
    fn from(err: ConversionError) -> Self {
        match err {
            ConversionError::InvalidAmount(_) | ConversionError::SameCurrency(_) => {
                AppError::BadRequest(err.to_string())
            }
            ConversionError::NoRateAvailable => AppError::Conflict(err.to_string()),
            ConversionError::PairUnsupported { .. } => AppError::Unprocessable(err.to_string()),
            ConversionError::ConversionUnavailable { .. } => {
                AppError::Unavailable(err.to_string())
            }
        }
    }
}

impl From<TrendError> for AppError {
    fn from(err: TrendError) -> Self {
        match err {
            TrendError::SameCurrency(_) | TrendError::Domain(_) => {
                AppError::BadRequest(err.to_string())
            }
            TrendError::TrendUnavailable { .. } => AppError::Unavailable(err.to_string()),
        }
    }
}

impl From<RateError> for AppError {
    fn from(err: RateError) -> Self {
        AppError::Unavailable(err.to_string())
    }
}

impl From<DomainError> for AppError {
    fn from(err: DomainError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}
