//! FX CLI
//!
//! Command-line currency converter. Talks to the Frankfurter API directly
//! through the same services the HTTP server uses.

mod chart;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};

use fx_client::{DEFAULT_BASE_URL, FrankfurterClient};
use fx_hex::{
    ConversionEngine, PopularRatesAggregator, TrendSeriesBuilder, WidgetSession,
    default_popular_pairs,
};
use fx_types::{CurrencyCode, CurrencyPair, NumberLocale, RateProvider};

use chart::TerminalChart;

#[derive(Parser)]
#[command(name = "fx")]
#[command(author, version, about = "Currency converter CLI", long_about = None)]
struct Cli {
    /// Base URL of the exchange rate provider
    #[arg(long, env = "FX_PROVIDER_URL", default_value = DEFAULT_BASE_URL)]
    provider_url: String,

    /// Number formatting locale (en, de, fr, ch)
    #[arg(long, env = "FX_LOCALE", default_value = "en")]
    locale: NumberLocale,

    /// Request timeout in seconds
    #[arg(long, env = "FX_REQUEST_TIMEOUT_SECS", default_value_t = 10)]
    timeout: u64,

    /// Print raw JSON instead of formatted text
    #[arg(long)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported currencies
    Currencies,
    /// Convert an amount with the latest rate
    Convert {
        from: CurrencyCode,
        to: CurrencyCode,
        amount: f64,
        /// Also show how much FROM is needed to obtain this much TO
        #[arg(long)]
        need: Option<f64>,
    },
    /// Show the rates for the seven days before today
    Trend {
        from: CurrencyCode,
        to: CurrencyCode,
        /// Day the window ends before (defaults to today, UTC)
        #[arg(long)]
        today: Option<NaiveDate>,
    },
    /// Latest rates for a set of popular pairs
    Popular {
        /// Pairs to fetch, e.g. EUR/USD (repeatable or comma-separated)
        #[arg(long = "pair", value_delimiter = ',')]
        pairs: Vec<CurrencyPair>,
    },
    /// Print a random quote
    Quote,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let provider = Arc::new(
        FrankfurterClient::new(&cli.provider_url).with_timeout(Duration::from_secs(cli.timeout)),
    );
    let locale = cli.locale;
    tracing::debug!(provider = %cli.provider_url, %locale, timeout_secs = cli.timeout, "using rate provider");

    match cli.command {
        Commands::Currencies => {
            let currencies = provider.list_currencies().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&currencies)?);
            } else {
                for (code, name) in currencies.iter() {
                    println!("{code}  {name}");
                }
            }
        }

        Commands::Convert {
            from,
            to,
            amount,
            need,
        } => {
            let mut engine = ConversionEngine::new(provider);
            let result = engine.convert(&from, &to, amount).await?;
            let required = need
                .map(|target| engine.reverse_convert(target))
                .transpose()?;

            if cli.json {
                let body = serde_json::json!({
                    "conversion": result,
                    "required": required,
                });
                println!("{}", serde_json::to_string_pretty(&body)?);
            } else {
                println!("{}", locale.describe_conversion(&result));
                if let Some(required) = required {
                    println!("{}", locale.describe_requirement(required, &from));
                }
            }
        }

        Commands::Trend { from, to, today } => {
            let today = today.unwrap_or_else(|| Utc::now().date_naive());
            tracing::debug!(%from, %to, %today, "building trend");
            let trends = TrendSeriesBuilder::new(provider.clone());
            let mut session = WidgetSession::new(provider, TerminalChart::default());
            session.select(CurrencyPair::new(from, to));

            let series = session.refresh_trend(&trends, today).await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&series)?);
            } else if let Some(output) = session.chart().output() {
                print!("{output}");
            }
        }

        Commands::Popular { pairs } => {
            let pairs = if pairs.is_empty() {
                default_popular_pairs()
            } else {
                pairs
            };
            let results = PopularRatesAggregator::new(provider).aggregate(&pairs).await;
            let unavailable = results.iter().filter(|r| r.is_error()).count();
            if unavailable > 0 {
                tracing::warn!(unavailable, total = results.len(), "some popular rates are unavailable");
            }
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&results)?);
            } else {
                for result in &results {
                    println!("{}", result.label());
                }
            }
        }

        Commands::Quote => {
            let session = WidgetSession::new(provider, TerminalChart::default());
            println!("{}", session.quote());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_convert_with_need() {
        let cli = Cli::try_parse_from(["fx", "convert", "eur", "USD", "100", "--need", "50"]).unwrap();
        match cli.command {
            Commands::Convert {
                from,
                to,
                amount,
                need,
            } => {
                assert_eq!(from.as_str(), "EUR");
                assert_eq!(to.as_str(), "USD");
                assert_eq!(amount, 100.0);
                assert_eq!(need, Some(50.0));
            }
            _ => panic!("expected convert"),
        }
    }

    #[test]
    fn test_parse_popular_pairs() {
        let cli = Cli::try_parse_from(["fx", "popular", "--pair", "EUR/USD,GBP/CHF", "--pair", "USDJPY"])
            .unwrap();
        match cli.command {
            Commands::Popular { pairs } => {
                let pairs: Vec<String> = pairs.iter().map(|p| p.to_string()).collect();
                assert_eq!(pairs, ["EUR/USD", "GBP/CHF", "USD/JPY"]);
            }
            _ => panic!("expected popular"),
        }
    }

    #[test]
    fn test_invalid_currency_rejected() {
        assert!(Cli::try_parse_from(["fx", "convert", "EURO", "USD", "1"]).is_err());
    }
}
