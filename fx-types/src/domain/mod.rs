//! Domain models for the conversion widget.

pub mod chart;
pub mod currency;
pub mod display;
pub mod popular;
pub mod quote;
pub mod trend;

pub use chart::{ChartOptions, ChartSpec};
pub use currency::{CurrencyCode, CurrencyList, CurrencyPair};
pub use display::{NumberLocale, QUOTES, Theme};
pub use popular::{PairOutcome, PopularPairResult};
pub use quote::{CachedRate, ConversionResult, RateQuote};
pub use trend::{DateWindow, TrendPoint, TrendSeries};
