use crate::price_feed::{coingecko, etherscan};
use derive_builder::Builder;
use std::time::Duration;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Endpoints and transport settings for [`super::NetworkPriceFeed`].
///
/// Fields left unset on the builder take their value from [`Default`].
#[derive(Builder, Clone, Debug)]
#[builder(default)]
pub struct FeedConfig {
    /// CoinGecko simple-price endpoint
    #[builder(setter(into))]
    pub(crate) coingecko_url: String,
    /// Etherscan API endpoint
    #[builder(setter(into))]
    pub(crate) etherscan_url: String,
    /// CoinGecko id of the priced asset
    #[builder(setter(into))]
    pub(crate) asset_id: String,
    /// Sent as `apikey` when set; Etherscan throttles anonymous callers hard
    #[builder(setter(into, strip_option))]
    pub(crate) etherscan_api_key: Option<String>,
    /// Whole-request timeout, connect through body
    pub(crate) timeout: Duration,
    /// Honour `HTTP_PROXY`/`HTTPS_PROXY` from the environment
    pub(crate) system_proxy: bool,
}

impl FeedConfig {
    pub fn builder() -> FeedConfigBuilder {
        FeedConfigBuilder::default()
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            coingecko_url: coingecko::SIMPLE_PRICE_URL.to_string(),
            etherscan_url: etherscan::API_URL.to_string(),
            asset_id: coingecko::ETHEREUM_ID.to_string(),
            etherscan_api_key: None,
            timeout: DEFAULT_TIMEOUT,
            system_proxy: true,
        }
    }
}
