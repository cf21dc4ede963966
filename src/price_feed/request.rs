//! Outbound request descriptors.

use crate::fiat::FiatCurrency;
use reqwest::{Method, Url};

/// One of the two API calls a price load makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// ETH spot price in a set of fiat currencies (CoinGecko `/simple/price`).
    EthPrice {
        asset_id: String,
        currencies: Vec<FiatCurrency>,
    },
    /// Gas oracle tiers (Etherscan `gastracker/gasoracle`).
    GasPrice { api_key: Option<String> },
}

impl Request {
    pub fn eth_price(asset_id: impl Into<String>, currencies: &[FiatCurrency]) -> Self {
        Self::EthPrice {
            asset_id: asset_id.into(),
            currencies: currencies.to_vec(),
        }
    }

    pub fn gas_price(api_key: Option<String>) -> Self {
        Self::GasPrice { api_key }
    }

    pub fn method(&self) -> Method {
        match self {
            Self::EthPrice { .. } | Self::GasPrice { .. } => Method::GET,
        }
    }

    /// Query parameters, in the order they are appended to the URL.
    pub fn query_parameters(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::EthPrice {
                asset_id,
                currencies,
            } => {
                let codes = currencies
                    .iter()
                    .map(FiatCurrency::code)
                    .collect::<Vec<_>>()
                    .join(",");
                vec![("ids", asset_id.clone()), ("vs_currencies", codes)]
            }
            Self::GasPrice { api_key } => {
                let mut params = vec![
                    ("module", "gastracker".to_string()),
                    ("action", "gasoracle".to_string()),
                ];
                if let Some(key) = api_key {
                    params.push(("apikey", key.clone()));
                }
                params
            }
        }
    }

    /// Full request URL: `base` with the encoded query parameters appended.
    pub fn url(&self, base: &Url) -> Url {
        let mut url = base.clone();
        url.query_pairs_mut()
            .extend_pairs(self.query_parameters().iter().map(|(k, v)| (*k, v.as_str())));
        url
    }
}
