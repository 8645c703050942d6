//! Forward and reverse currency conversion.

use std::sync::Arc;

use fx_types::{CachedRate, ConversionError, ConversionResult, CurrencyCode, RateProvider};

/// Converts amounts between currencies and remembers the last resolved rate.
///
/// The cached rate is a single slot: written on every successful forward
/// conversion, cleared by [`ConversionEngine::invalidate_rate`]. Reverse
/// lookups read it without touching the network.
pub struct ConversionEngine<P: RateProvider> {
    provider: Arc<P>,
    last_rate: Option<CachedRate>,
}

impl<P: RateProvider> ConversionEngine<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self {
            provider,
            last_rate: None,
        }
    }

    /// The rate cached by the last successful conversion, if still valid.
    pub fn last_rate(&self) -> Option<&CachedRate> {
        self.last_rate.as_ref()
    }

    /// Converts `amount` of `from` into `to` at the latest published rate.
    #[tracing::instrument(skip(self))]
    pub async fn convert(
        &mut self,
        from: &CurrencyCode,
        to: &CurrencyCode,
        amount: f64,
    ) -> Result<ConversionResult, ConversionError> {
        if from == to {
            return Err(ConversionError::SameCurrency(from.clone()));
        }
        validate_amount(amount)?;

        let quote = self.provider.latest_rate(from, to).await.map_err(|err| {
            tracing::warn!(error = %err, "latest rate lookup failed");
            ConversionError::from_provider(err, from, to)
        })?;

        let converted = amount * quote.rate();
        if !converted.is_finite() {
            return Err(ConversionError::InvalidAmount(amount));
        }

        let result = ConversionResult {
            amount,
            from: from.clone(),
            to: to.clone(),
            converted,
        };
        self.last_rate = Some(CachedRate {
            from: from.clone(),
            to: to.clone(),
            rate: quote.rate(),
        });

        tracing::debug!(converted = result.converted, as_of = %quote.as_of(), "conversion resolved");
        Ok(result)
    }

    /// How much of the cached source currency buys `target_amount` of the target.
    pub fn reverse_convert(&self, target_amount: f64) -> Result<f64, ConversionError> {
        validate_amount(target_amount)?;
        let cached = self
            .last_rate
            .as_ref()
            .ok_or(ConversionError::NoRateAvailable)?;
        Ok(target_amount / cached.rate)
    }

    /// Drops the cached rate. Called whenever the selected pair changes.
    pub fn invalidate_rate(&mut self) {
        if self.last_rate.take().is_some() {
            tracing::debug!("cached rate invalidated");
        }
    }
}

fn validate_amount(amount: f64) -> Result<(), ConversionError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(ConversionError::InvalidAmount(amount))
    }
}
