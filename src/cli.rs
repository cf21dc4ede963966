//! CLI argument parsing for the `eth-price` binary.
//!
//! Uses clap for argument parsing with environment variable fallbacks.

use crate::fiat::FiatCurrency;
use crate::price_feed::FeedConfig;
use crate::quote::AmountUnit;
use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use std::str::FromStr;
use std::time::Duration;

/// Fetch the ETH price and gas fee, then quote an amount in ETH and fiat.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct PriceArgs {
    /// Comma-separated fiat currencies to price (eur, usd, gbp)
    #[arg(
        short = 'f',
        long = "fiat",
        env = "ETH_PRICE_FIATS",
        value_delimiter = ',',
        value_parser = parse_fiat,
        default_value = "eur,usd,gbp"
    )]
    pub fiats: Vec<FiatCurrency>,

    /// Amount to quote
    #[arg(short = 'a', long = "amount", default_value = "1.0")]
    pub amount: f64,

    /// Unit of --amount: eth or fiat (priced in the first --fiat currency)
    #[arg(
        short = 'u',
        long = "unit",
        value_parser = parse_unit,
        default_value = "eth"
    )]
    pub unit: AmountUnit,

    /// Wallet balance in ETH, used for the affordability check
    #[arg(short = 'w', long = "wallet", env = "ETH_PRICE_WALLET")]
    pub wallet: Option<f64>,

    /// CoinGecko simple-price endpoint
    #[arg(
        long = "coingecko-url",
        env = "COINGECKO_URL",
        value_hint = ValueHint::Url
    )]
    pub coingecko_url: Option<String>,

    /// Etherscan API endpoint
    #[arg(
        long = "etherscan-url",
        env = "ETHERSCAN_URL",
        value_hint = ValueHint::Url
    )]
    pub etherscan_url: Option<String>,

    /// Etherscan API key
    #[arg(long = "etherscan-api-key", env = "ETHERSCAN_API_KEY", hide_env_values = true)]
    pub etherscan_api_key: Option<String>,

    /// Print the report as JSON
    #[arg(long = "json")]
    pub json: bool,

    /// Request timeout in seconds
    #[arg(long = "timeout-secs", env = "ETH_PRICE_TIMEOUT_SECS", default_value = "10")]
    pub timeout_secs: u64,
}

impl PriceArgs {
    pub fn feed_config(&self) -> Result<FeedConfig> {
        let mut builder = FeedConfig::builder();
        builder.timeout(Duration::from_secs(self.timeout_secs));
        if let Some(url) = &self.coingecko_url {
            builder.coingecko_url(url.clone());
        }
        if let Some(url) = &self.etherscan_url {
            builder.etherscan_url(url.clone());
        }
        if let Some(key) = &self.etherscan_api_key {
            builder.etherscan_api_key(key.clone());
        }
        builder.build().context("Failed to build feed configuration")
    }

    /// Currency the quote is shown in.
    pub fn quote_fiat(&self) -> Option<FiatCurrency> {
        self.fiats.first().copied()
    }
}

fn parse_fiat(s: &str) -> Result<FiatCurrency, String> {
    let code = s.trim().to_ascii_lowercase();
    FiatCurrency::lookup(&code).ok_or_else(|| {
        let supported = FiatCurrency::supported()
            .iter()
            .map(FiatCurrency::code)
            .collect::<Vec<_>>()
            .join(", ");
        format!("unsupported fiat '{s}'; expected one of: {supported}")
    })
}

fn parse_unit(s: &str) -> Result<AmountUnit, String> {
    AmountUnit::from_str(&s.trim().to_ascii_lowercase())
        .map_err(|_| format!("invalid unit '{s}'; expected one of: eth, fiat"))
}
