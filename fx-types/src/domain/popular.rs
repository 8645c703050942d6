//! Per-pair results for the popular rates table.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::{CurrencyCode, CurrencyPair};

/// Whether a popular pair resolved to a rate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PairOutcome {
    Rate { rate: f64 },
    Unavailable { reason: String },
}

/// One row of the popular rates table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PopularPairResult {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    #[serde(flatten)]
    pub outcome: PairOutcome,
}

impl PopularPairResult {
    pub fn ok(pair: CurrencyPair, rate: f64) -> Self {
        Self {
            from: pair.from,
            to: pair.to,
            outcome: PairOutcome::Rate { rate },
        }
    }

    pub fn failed(pair: CurrencyPair, reason: impl Into<String>) -> Self {
        Self {
            from: pair.from,
            to: pair.to,
            outcome: PairOutcome::Unavailable {
                reason: reason.into(),
            },
        }
    }

    pub fn rate(&self) -> Option<f64> {
        match self.outcome {
            PairOutcome::Rate { rate } => Some(rate),
            PairOutcome::Unavailable { .. } => None,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self.outcome, PairOutcome::Unavailable { .. })
    }

    /// Display label, e.g. `EUR/USD = 1.09`.
    pub fn label(&self) -> String {
        match &self.outcome {
            PairOutcome::Rate { rate } => format!("{}/{} = {:.2}", self.from, self.to, rate),
            PairOutcome::Unavailable { .. } => format!("{}/{} = unavailable", self.from, self.to),
        }
    }
}
