use crate::fiat::FiatCurrency;
use crate::price_feed::request::Request;
use crate::price_feed::{coingecko, etherscan, FeedConfig, PriceError, PriceFetching};
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Url};
use std::collections::HashMap;
use tracing::{debug, warn};

/// HTTP-backed price feed: CoinGecko for fiat prices, Etherscan for gas.
///
/// Holds no mutable state; every call is a single GET with no retry.
#[derive(Debug, Clone)]
pub struct NetworkPriceFeed {
    client: Client,
    coingecko_url: Url,
    etherscan_url: Url,
    asset_id: String,
    etherscan_api_key: Option<String>,
}

impl NetworkPriceFeed {
    pub fn new(config: FeedConfig) -> Result<Self> {
        let coingecko_url =
            Url::parse(&config.coingecko_url).context("Invalid CoinGecko base URL")?;
        let etherscan_url =
            Url::parse(&config.etherscan_url).context("Invalid Etherscan base URL")?;

        let mut builder = Client::builder().timeout(config.timeout);
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            coingecko_url,
            etherscan_url,
            asset_id: config.asset_id,
            etherscan_api_key: config.etherscan_api_key,
        })
    }

    /// Issue `request` against `base` and return the full response body.
    async fn get(&self, request: &Request, base: &Url) -> Result<Vec<u8>> {
        let url = request.url(base);
        debug!("GET {}", redact_api_key(&url));

        let resp = self
            .client
            .request(request.method(), url)
            .header("accept", "application/json")
            .send()
            .await
            .context("request failed")?
            .error_for_status()
            .context("non-success status")?;

        let body = resp.bytes().await.context("read body failed")?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl PriceFetching for NetworkPriceFeed {
    async fn fiat_prices(
        &self,
        currencies: &[FiatCurrency],
    ) -> Result<HashMap<FiatCurrency, f64>, PriceError> {
        let request = Request::eth_price(self.asset_id.as_str(), currencies);
        let body = self
            .get(&request, &self.coingecko_url)
            .await
            .map_err(|err| {
                warn!("coingecko: {err:#}");
                PriceError::NoPricesAvailable
            })?;

        coingecko::decode_fiat_prices(&body, &self.asset_id)
    }

    async fn fast_gas_price(&self) -> Result<f64, PriceError> {
        let request = Request::gas_price(self.etherscan_api_key.clone());
        let body = self
            .get(&request, &self.etherscan_url)
            .await
            .map_err(|err| {
                warn!("etherscan: {err:#}");
                PriceError::NoGasPriceAvailable
            })?;

        etherscan::decode_fast_gas_price(&body)
    }
}

/// Render `url` for logs with any `apikey` value masked.
fn redact_api_key(url: &Url) -> String {
    if !url.query_pairs().any(|(k, _)| k == "apikey") {
        return url.to_string();
    }

    let mut redacted = url.clone();
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == "apikey" { "***".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted.to_string()
}
