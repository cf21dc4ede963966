//! Etherscan gas oracle response decoding.

use crate::price_feed::PriceError;
use crate::utils::serialization::de_f64_lenient;
use serde::Deserialize;
use tracing::warn;

pub(crate) const API_URL: &str = "https://api.etherscan.io/api";

#[derive(Debug, Deserialize)]
struct GasOracleResponse {
    result: GasOracleResult,
}

#[derive(Debug, Deserialize)]
struct GasOracleResult {
    // Published as a string, e.g. "35"
    #[serde(rename = "FastGasPrice", deserialize_with = "de_f64_lenient")]
    fast_gas_price: f64,
}

/// Decode `{"result": {"FastGasPrice": "35", ...}}` into the fast tier price.
pub(crate) fn decode_fast_gas_price(body: &[u8]) -> Result<f64, PriceError> {
    let parsed: GasOracleResponse = serde_json::from_slice(body).map_err(|err| {
        warn!("etherscan: parse JSON failed: {err}");
        PriceError::NoGasPriceAvailable
    })?;

    let price = parsed.result.fast_gas_price;
    if price < 0.0 {
        warn!("etherscan: negative fast gas price {price}");
        return Err(PriceError::NoGasPriceAvailable);
    }

    Ok(price)
}
