//! Serializable summary of a loaded service.

use crate::fiat::FiatCurrency;
use crate::quote::SendQuote;
use crate::service::EthPrice;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceReport {
    /// ETH price keyed by lowercase fiat code
    pub fiat_prices: BTreeMap<FiatCurrency, f64>,
    /// Fast tier, `None` before the first successful load
    pub gas_price: Option<f64>,
    pub estimated_network_fee: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote: Option<QuoteReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QuoteReport {
    #[serde(flatten)]
    pub quote: SendQuote,
    /// Set when a wallet balance was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub affordable: Option<bool>,
}

impl PriceReport {
    pub fn new<F>(service: &EthPrice<F>) -> Self {
        Self {
            fiat_prices: service.fiat_prices().into_iter().collect(),
            gas_price: service.gas_price(),
            estimated_network_fee: service.estimated_network_fees(),
            quote: None,
        }
    }

    pub fn with_quote(mut self, quote: SendQuote, wallet_eth: Option<f64>) -> Self {
        let affordable = wallet_eth.map(|wallet| quote.is_affordable(wallet));
        self.quote = Some(QuoteReport { quote, affordable });
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_feed::StubPriceFeed;
    use crate::quote::AmountUnit;
    use serde_json::json;
    use std::collections::HashMap;

    #[test]
    fn before_first_load() {
        let service = EthPrice::with_all_fiats(StubPriceFeed::new());
        let report = serde_json::to_value(PriceReport::new(&service)).unwrap();

        assert_eq!(
            report,
            json!({"fiat_prices": {}, "gas_price": null, "estimated_network_fee": 0.0})
        );
    }

    #[tokio::test]
    async fn loaded_with_quote() {
        let feed = StubPriceFeed::new()
            .with_fiat_prices(HashMap::from([
                (FiatCurrency::Eur, 2000.0),
                (FiatCurrency::Gbp, 1600.0),
            ]))
            .with_gas_price(100.0);
        let service = EthPrice::with_all_fiats(feed);
        service.load().await.unwrap();

        let quote = SendQuote::new(&service, 0.5, AmountUnit::Eth, FiatCurrency::Gbp);
        let report = PriceReport::new(&service).with_quote(quote, Some(0.25));

        assert_eq!(
            serde_json::to_value(report).unwrap(),
            json!({
                "fiat_prices": {"eur": 2000.0, "gbp": 1600.0},
                "gas_price": 100.0,
                "estimated_network_fee": 0.021,
                "quote": {
                    "unit": "eth",
                    "fiat": "gbp",
                    "amount": 0.5,
                    "eth_amount": 0.5,
                    "fiat_amount": 800.0,
                    "affordable": false
                }
            })
        );
    }
}
