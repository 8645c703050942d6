//! # FX Types
//!
//! Domain types and port traits for the currency conversion widget.
//! This crate has ZERO IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (CurrencyCode, RateQuote, TrendSeries, ...)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain, provider and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    CachedRate, ChartOptions, ChartSpec, ConversionResult, CurrencyCode, CurrencyList,
    CurrencyPair, DateWindow, NumberLocale, PairOutcome, PopularPairResult, QUOTES, RateQuote,
    Theme, TrendPoint, TrendSeries,
};
pub use dto::*;
pub use error::{AppError, ConversionError, DomainError, RateError, TrendError};
pub use ports::{ChartSink, RateProvider};
