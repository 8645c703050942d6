//! # FX Hex
//!
//! Application services and HTTP adapter for the currency conversion widget.
//!
//! ## Architecture
//!
//! - `service/` - Application services (conversion, trend, popular rates, session)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! Every service is generic over `P: RateProvider`, allowing different
//! provider implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use service::{
    ConversionEngine, PopularRatesAggregator, RetainedChart, TrendSeriesBuilder, WidgetSession,
    default_popular_pairs,
};
