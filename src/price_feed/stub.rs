use crate::fiat::FiatCurrency;
use crate::price_feed::{PriceError, PriceFetching};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct Responses {
    fiat_prices: HashMap<FiatCurrency, f64>,
    gas_price: f64,
    fiat_error: Option<PriceError>,
    gas_error: Option<PriceError>,
}

/// In-memory [`PriceFetching`] with canned answers.
///
/// Responses can be changed between loads through `&self`, and every call is
/// counted so callers can check which requests a load actually made.
#[derive(Debug, Default)]
pub struct StubPriceFeed {
    responses: Mutex<Responses>,
    fiat_calls: AtomicUsize,
    gas_calls: AtomicUsize,
}

impl StubPriceFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fiat_prices(self, prices: HashMap<FiatCurrency, f64>) -> Self {
        self.set_fiat_prices(prices);
        self
    }

    pub fn with_gas_price(self, gas_price: f64) -> Self {
        self.set_gas_price(gas_price);
        self
    }

    /// Fail both operations with `error`.
    pub fn with_error(self, error: PriceError) -> Self {
        self.set_error(Some(error));
        self
    }

    pub fn set_fiat_prices(&self, prices: HashMap<FiatCurrency, f64>) {
        self.responses().fiat_prices = prices;
    }

    pub fn set_gas_price(&self, gas_price: f64) {
        self.responses().gas_price = gas_price;
    }

    pub fn set_error(&self, error: Option<PriceError>) {
        let mut responses = self.responses();
        responses.fiat_error = error;
        responses.gas_error = error;
    }

    pub fn set_fiat_error(&self, error: Option<PriceError>) {
        self.responses().fiat_error = error;
    }

    pub fn set_gas_error(&self, error: Option<PriceError>) {
        self.responses().gas_error = error;
    }

    pub fn fiat_calls(&self) -> usize {
        self.fiat_calls.load(Ordering::SeqCst)
    }

    pub fn gas_calls(&self) -> usize {
        self.gas_calls.load(Ordering::SeqCst)
    }

    fn responses(&self) -> MutexGuard<'_, Responses> {
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl PriceFetching for StubPriceFeed {
    async fn fiat_prices(
        &self,
        _currencies: &[FiatCurrency],
    ) -> Result<HashMap<FiatCurrency, f64>, PriceError> {
        self.fiat_calls.fetch_add(1, Ordering::SeqCst);
        let responses = self.responses();
        match responses.fiat_error {
            Some(err) => Err(err),
            None => Ok(responses.fiat_prices.clone()),
        }
    }

    async fn fast_gas_price(&self) -> Result<f64, PriceError> {
        self.gas_calls.fetch_add(1, Ordering::SeqCst);
        let responses = self.responses();
        match responses.gas_error {
            Some(err) => Err(err),
            None => Ok(responses.gas_price),
        }
    }
}
