//! Rate quotes and conversion results.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::{CurrencyCode, CurrencyPair};
use crate::error::DomainError;

/// Amount of `quote` currency per one unit of `base`, as published on `as_of`.
///
/// Immutable once constructed; the rate is always finite and strictly positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "RateQuoteFields")]
pub struct RateQuote {
    base: CurrencyCode,
    quote: CurrencyCode,
    #[schema(example = 1.085)]
    rate: f64,
    as_of: NaiveDate,
}

#[derive(Deserialize)]
struct RateQuoteFields {
    base: CurrencyCode,
    quote: CurrencyCode,
    rate: f64,
    as_of: NaiveDate,
}

impl TryFrom<RateQuoteFields> for RateQuote {
    type Error = DomainError;

    fn try_from(fields: RateQuoteFields) -> Result<Self, Self::Error> {
        RateQuote::new(fields.base, fields.quote, fields.rate, fields.as_of)
    }
}

impl RateQuote {
    /// Creates a new quote, rejecting non-finite and non-positive rates.
    pub fn new(
        base: CurrencyCode,
        quote: CurrencyCode,
        rate: f64,
        as_of: NaiveDate,
    ) -> Result<Self, DomainError> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(DomainError::NonPositiveRate(rate));
        }
        Ok(Self {
            base,
            quote,
            rate,
            as_of,
        })
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn quote(&self) -> &CurrencyCode {
        &self.quote
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn as_of(&self) -> NaiveDate {
        self.as_of
    }

    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.base.clone(), self.quote.clone())
    }
}

/// Outcome of a forward conversion: `converted = amount * rate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ConversionResult {
    #[schema(example = 100.0)]
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    #[schema(example = 108.5)]
    pub converted: f64,
}

/// The most recently resolved rate, kept for reverse lookups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CachedRate {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub rate: f64,
}

impl CachedRate {
    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.from.clone(), self.to.clone())
    }
}
