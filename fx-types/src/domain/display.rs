//! Presentation helpers: number formatting, theme and quotes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::currency::CurrencyCode;
use super::quote::ConversionResult;
use crate::error::DomainError;

/// Number formatting conventions for displayed amounts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum NumberLocale {
    /// `1,234.56`
    #[default]
    En,
    /// `1.234,56`
    De,
    /// `1 234,56`
    Fr,
    /// `1'234.56`
    Ch,
}

impl NumberLocale {
    fn separators(&self) -> (char, char) {
        match self {
            NumberLocale::En => (',', '.'),
            NumberLocale::De => ('.', ','),
            NumberLocale::Fr => ('\u{202f}', ','),
            NumberLocale::Ch => ('\'', '.'),
        }
    }

    /// Formats `value` with two decimals and digit grouping.
    pub fn format_amount(&self, value: f64) -> String {
        if !value.is_finite() {
            return value.to_string();
        }
        let (group, decimal) = self.separators();
        let fixed = format!("{:.2}", value.abs());
        let (int_part, frac_part) = fixed.split_once('.').unwrap_or((&fixed, "00"));

        let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
        for (i, digit) in int_part.chars().enumerate() {
            if i > 0 && (int_part.len() - i) % 3 == 0 {
                grouped.push(group);
            }
            grouped.push(digit);
        }

        // -0.001 rounds to 0.00, which should not print a sign
        let sign = if value < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
            "-"
        } else {
            ""
        };
        format!("{sign}{grouped}{decimal}{frac_part}")
    }

    /// `100 EUR = 108.50 USD`
    pub fn describe_conversion(&self, result: &ConversionResult) -> String {
        format!(
            "{} {} = {} {}",
            self.format_amount(result.amount),
            result.from,
            self.format_amount(result.converted),
            result.to
        )
    }

    /// `You'll need 92.17 EUR`
    pub fn describe_requirement(&self, required: f64, from: &CurrencyCode) -> String {
        format!("You'll need {} {}", self.format_amount(required), from)
    }
}

impl FromStr for NumberLocale {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lang = s
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match lang.as_str() {
            "en" => Ok(NumberLocale::En),
            "de" | "nl" | "it" | "es" => Ok(NumberLocale::De),
            "fr" => Ok(NumberLocale::Fr),
            "ch" => Ok(NumberLocale::Ch),
            _ => Err(DomainError::UnsupportedLocale(s.to_string())),
        }
    }
}

impl fmt::Display for NumberLocale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            NumberLocale::En => "en",
            NumberLocale::De => "de",
            NumberLocale::Fr => "fr",
            NumberLocale::Ch => "ch",
        };
        f.write_str(tag)
    }
}

/// Cosmetic display mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Icon shown on the toggle: the mode you would switch to.
    pub fn icon(&self) -> &'static str {
        match self {
            Theme::Light => "🌙",
            Theme::Dark => "☀️",
        }
    }
}

/// Rotating finance quotes shown under the widget.
pub const QUOTES: &[&str] = &[
    "“An investment in knowledge pays the best interest.” – Benjamin Franklin",
    "“Price is what you pay. Value is what you get.” – Warren Buffett",
    "“It’s not your salary that makes you rich, it’s your spending habits.”",
    "“Don’t tell me what you value. Show me your budget.” – Joe Biden",
];
