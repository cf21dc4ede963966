//! CoinGecko `/simple/price` response decoding.

use crate::fiat::FiatCurrency;
use crate::price_feed::PriceError;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

pub(crate) const SIMPLE_PRICE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";
pub(crate) const ETHEREUM_ID: &str = "ethereum";

/// Decode a body shaped like `{"ethereum": {"eur": 1800.5, "usd": 1950.1}}`.
///
/// The entry for `asset_id` is used when present, otherwise the first
/// top-level entry. Unsupported currency codes are dropped whatever their
/// value, and so are supported ones whose price is not a finite, strictly
/// positive number. An entry left with no usable price is an error.
pub(crate) fn decode_fiat_prices(
    body: &[u8],
    asset_id: &str,
) -> Result<HashMap<FiatCurrency, f64>, PriceError> {
    let parsed: HashMap<String, HashMap<String, Value>> =
        serde_json::from_slice(body).map_err(|err| {
            warn!("coingecko: parse JSON failed: {err}");
            PriceError::NoPricesAvailable
        })?;

    let quotes = match parsed.get(asset_id) {
        Some(quotes) => quotes,
        None => parsed
            .values()
            .next()
            .ok_or(PriceError::NoPricesAvailable)?,
    };

    let mut prices = HashMap::with_capacity(quotes.len());
    for (code, value) in quotes {
        let Some(currency) = FiatCurrency::lookup(code) else {
            debug!("coingecko: ignoring unsupported currency {code:?}");
            continue;
        };
        match value.as_f64() {
            Some(price) if price.is_finite() && price > 0.0 => {
                prices.insert(currency, price);
            }
            _ => warn!("coingecko: dropping invalid {currency} price {value}"),
        }
    }

    if prices.is_empty() {
        warn!("coingecko: no usable price in response");
        return Err(PriceError::NoPricesAvailable);
    }
    Ok(prices)
}
