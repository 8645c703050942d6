//! Historical rate windows and series.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::{CurrencyCode, CurrencyPair};
use crate::error::DomainError;

/// Number of calendar days covered by a trend chart.
pub const TREND_WINDOW_DAYS: u64 = 7;

/// An inclusive range of calendar dates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidWindow { start, end });
        }
        Ok(Self { start, end })
    }

    /// The seven days ending the day before `today`: `[today-7, today-1]`.
    ///
    /// Today's rate may not be published yet, so it is never requested.
    pub fn trailing_week(today: NaiveDate) -> Result<Self, DomainError> {
        let end = today
            .checked_sub_days(Days::new(1))
            .ok_or(DomainError::DateOutOfRange(today))?;
        let start = today
            .checked_sub_days(Days::new(TREND_WINDOW_DAYS))
            .ok_or(DomainError::DateOutOfRange(today))?;
        Self::new(start, end)
    }

    pub fn len_days(&self) -> u64 {
        (self.end - self.start).num_days() as u64 + 1
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every date in the window, ascending.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

/// A single observed rate on a given date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrendPoint {
    pub date: NaiveDate,
    #[schema(example = 1.0823)]
    pub rate: f64,
}

/// Chronologically ordered rates for one currency pair.
///
/// Points are strictly ascending by date. Gaps (weekends, holidays) are
/// kept as gaps; nothing is interpolated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(from = "TrendSeriesFields")]
pub struct TrendSeries {
    base: CurrencyCode,
    quote: CurrencyCode,
    points: Vec<TrendPoint>,
}

#[derive(Deserialize)]
struct TrendSeriesFields {
    base: CurrencyCode,
    quote: CurrencyCode,
    points: Vec<TrendPoint>,
}

impl From<TrendSeriesFields> for TrendSeries {
    fn from(fields: TrendSeriesFields) -> Self {
        TrendSeries::new(fields.base, fields.quote, fields.points)
    }
}

impl TrendSeries {
    /// Builds a series, sorting by date and keeping the last entry for any repeated date.
    pub fn new(base: CurrencyCode, quote: CurrencyCode, mut points: Vec<TrendPoint>) -> Self {
        // Stable sort keeps input order among equal dates, so the last one survives below.
        points.sort_by_key(|p| p.date);
        let mut deduped: Vec<TrendPoint> = Vec::with_capacity(points.len());
        for point in points {
            match deduped.last_mut() {
                Some(last) if last.date == point.date => *last = point,
                _ => deduped.push(point),
            }
        }
        Self {
            base,
            quote,
            points: deduped,
        }
    }

    pub fn base(&self) -> &CurrencyCode {
        &self.base
    }

    pub fn quote(&self) -> &CurrencyCode {
        &self.quote
    }

    pub fn pair(&self) -> CurrencyPair {
        CurrencyPair::new(self.base.clone(), self.quote.clone())
    }

    pub fn points(&self) -> &[TrendPoint] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first(&self) -> Option<&TrendPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrendPoint> {
        self.points.last()
    }
}
