//! Currency codes, pairs and the provider's currency catalogue.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::DomainError;

/// A three-letter ISO 4217 style currency identifier, always upper case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "String", into = "String")]
#[schema(value_type = String, example = "EUR")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Parses and normalises a currency code.
    pub fn new(code: &str) -> Result<Self, DomainError> {
        let trimmed = code.trim();
        if trimmed.len() != 3 || !trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(DomainError::InvalidCurrencyCode(code.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// An ordered (from, to) pair of currencies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct CurrencyPair {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl CurrencyPair {
    pub fn new(from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { from, to }
    }

    /// Returns true when both sides name the same currency.
    pub fn is_same_currency(&self) -> bool {
        self.from == self.to
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.from, self.to)
    }
}

/// Parses `EUR/USD` (also accepts `EUR-USD` and `EURUSD`).
impl FromStr for CurrencyPair {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (from, to) = match s.split_once(['/', '-']) {
            Some(parts) => parts,
            None if s.len() == 6 && s.is_ascii() => s.split_at(3),
            None => return Err(DomainError::InvalidCurrencyPair(s.to_string())),
        };
        Ok(Self::new(from.parse()?, to.parse()?))
    }
}

/// Mapping of currency code to human-readable name, as published by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = BTreeMap<String, String>)]
pub struct CurrencyList(BTreeMap<CurrencyCode, String>);

impl CurrencyList {
    pub fn new(entries: BTreeMap<CurrencyCode, String>) -> Self {
        Self(entries)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, code: &CurrencyCode) -> bool {
        self.0.contains_key(code)
    }

    pub fn name(&self, code: &CurrencyCode) -> Option<&str> {
        self.0.get(code).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyCode, &str)> {
        self.0.iter().map(|(code, name)| (code, name.as_str()))
    }

    /// The selection a fresh widget starts with: EUR to USD when both are
    /// listed, otherwise the first two listed codes.
    pub fn default_selection(&self) -> CurrencyPair {
        let eur = CurrencyCode("EUR".to_string());
        let usd = CurrencyCode("USD".to_string());
        if (self.contains(&eur) && self.contains(&usd)) || self.0.len() < 2 {
            return CurrencyPair::new(eur, usd);
        }
        let mut codes = self.0.keys().cloned();
        match (codes.next(), codes.next()) {
            (Some(from), Some(to)) => CurrencyPair::new(from, to),
            _ => CurrencyPair::new(eur, usd),
        }
    }
}

impl FromIterator<(CurrencyCode, String)> for CurrencyList {
    fn from_iter<I: IntoIterator<Item = (CurrencyCode, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
