//! ETH price feed for wallet front-ends.
//!
//! [`EthPrice`] loads the ETH price in a set of fiat currencies plus the fast
//! gas price, publishes its loading state to observers, and converts amounts
//! between ETH and fiat using the last successful load.

pub mod cli;
pub mod fiat;
pub mod format;
pub mod price_feed;
pub mod quote;
pub mod report;
pub mod service;
pub mod utils;

pub use fiat::FiatCurrency;
pub use format::{format_eth, format_fee, format_fiat, format_fiat_with_symbol};
pub use price_feed::{
    FeedConfig, NetworkPriceFeed, PriceError, PriceFetching, StubPriceFeed,
};
pub use quote::{AmountUnit, SendQuote};
pub use report::PriceReport;
pub use service::{
    estimated_network_fee, EthPrice, LoadPhase, LoadState, PriceSnapshot, StateSubscription,
    STANDARD_TRANSFER_GAS_UNITS, UNIT_CONVERSION_FACTOR,
};
