//! Line chart specification handed to a chart sink.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::trend::TrendSeries;

/// Display options for the trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartOptions {
    /// Dataset label, e.g. `EUR → USD`
    pub dataset_label: String,
    #[schema(example = "blue")]
    pub border_color: String,
    pub fill: bool,
    #[schema(example = 0.3)]
    pub tension: f64,
    /// Whether the y axis starts at zero
    pub begin_at_zero: bool,
}

/// Ordered labels and values for a single-dataset line chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartSpec {
    pub labels: Vec<String>,
    pub data: Vec<f64>,
    pub options: ChartOptions,
}

impl ChartSpec {
    pub fn from_series(series: &TrendSeries) -> Self {
        let (labels, data) = series
            .points()
            .iter()
            .map(|p| (p.date.format("%Y-%m-%d").to_string(), p.rate))
            .unzip();
        Self {
            labels,
            data,
            options: ChartOptions {
                dataset_label: format!("{} → {}", series.base(), series.quote()),
                border_color: "blue".to_string(),
                fill: false,
                tension: 0.3,
                begin_at_zero: false,
            },
        }
    }

    pub fn min(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::min)
    }

    pub fn max(&self) -> Option<f64> {
        self.data.iter().copied().reduce(f64::max)
    }
}
