//! ETH price and gas price sources.
//!
//! [`PriceFetching`] is the seam between [`crate::EthPrice`] and the outside
//! world. [`NetworkPriceFeed`] talks to CoinGecko and Etherscan over HTTP,
//! [`StubPriceFeed`] serves canned values for tests and previews.

pub(crate) mod coingecko;
mod config;
pub(crate) mod etherscan;
mod network;
pub mod request;
mod stub;

pub use config::{FeedConfig, FeedConfigBuilder};
pub use network::NetworkPriceFeed;
pub use stub::StubPriceFeed;

use crate::fiat::FiatCurrency;
use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Failures surfaced by a price load.
///
/// Transport and decoding errors are never exposed directly; they are logged
/// and folded into one of these kinds.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceError {
    #[error("No ETH prices available")]
    NoPricesAvailable,
    #[error("No gas price available")]
    NoGasPriceAvailable,
}

#[async_trait]
pub trait PriceFetching: Send + Sync {
    /// Price of one ETH in each of `currencies`.
    ///
    /// Currencies the source quotes but this crate does not support are
    /// dropped from the result.
    async fn fiat_prices(
        &self,
        currencies: &[FiatCurrency],
    ) -> Result<HashMap<FiatCurrency, f64>, PriceError>;

    /// Current "fast" tier gas price, in gwei.
    async fn fast_gas_price(&self) -> Result<f64, PriceError>;
}
