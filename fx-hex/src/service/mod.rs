//! Application services.
//!
//! Orchestrate provider calls through the `RateProvider` port.
//! Contain NO infrastructure logic - pure business orchestration.

mod chart;
mod conversion;
mod popular;
mod session;
mod trend;

pub use chart::RetainedChart;
pub use conversion::ConversionEngine;
pub use popular::{PopularRatesAggregator, default_popular_pairs};
pub use session::WidgetSession;
pub use trend::TrendSeriesBuilder;
