//! The price service observed by wallet front-ends.

mod state;

pub use state::{LoadPhase, LoadState, PriceSnapshot, StateSubscription};

use crate::fiat::FiatCurrency;
use crate::price_feed::{FeedConfig, NetworkPriceFeed, PriceError, PriceFetching};
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::{broadcast, watch};
use tracing::{debug, info, warn};

/// Gas consumed by a plain ETH transfer.
pub const STANDARD_TRANSFER_GAS_UNITS: f64 = 21_000.0;
/// Divisor turning `gas units * gas price` into the displayed fee.
pub const UNIT_CONVERSION_FACTOR: f64 = 100_000_000.0;

/// Buffered transitions per subscriber before it starts lagging.
const TRANSITION_BUFFER: usize = 64;

/// Fee of one standard transfer at `gas_price`.
pub fn estimated_network_fee(gas_price: f64) -> f64 {
    STANDARD_TRANSFER_GAS_UNITS * gas_price / UNIT_CONVERSION_FACTOR
}

/// Loads ETH prices for a fixed set of fiat currencies and converts amounts
/// against the last successful load.
///
/// Every state change goes through a single lock and replaces the whole
/// [`LoadState`], so observers never see half of a transition.
pub struct EthPrice<F = NetworkPriceFeed> {
    fiats: Vec<FiatCurrency>,
    feed: F,
    state: watch::Sender<LoadState>,
    transitions: broadcast::Sender<LoadState>,
}

impl<F: PriceFetching> EthPrice<F> {
    pub fn new(fiats: Vec<FiatCurrency>, feed: F) -> Self {
        let (state, _) = watch::channel(LoadState::default());
        let (transitions, _) = broadcast::channel(TRANSITION_BUFFER);
        Self {
            fiats,
            feed,
            state,
            transitions,
        }
    }

    /// Service over every supported currency.
    pub fn with_all_fiats(feed: F) -> Self {
        Self::new(FiatCurrency::supported(), feed)
    }

    /// Fetch fiat prices, then the gas price, and publish the result.
    ///
    /// `is_loading` is published as `true` on the first poll, before any
    /// request is made, and back to `false` whatever the outcome. On failure
    /// the previous snapshot stays in place and the error is both recorded and
    /// returned. A fiat price failure skips the gas request.
    ///
    /// Concurrent calls are not serialized: each runs to completion and the
    /// one that finishes last determines the published state. Dropping the
    /// future mid-flight publishes `is_loading = false` and keeps the previous
    /// snapshot.
    pub async fn load(&self) -> Result<(), PriceError> {
        self.publish(|state| {
            state.is_loading = true;
            state.error = None;
        });
        let loading = LoadingGuard::new(self);

        match self.fetch_snapshot().await {
            Ok(snapshot) => {
                info!(
                    "loaded {} fiat prices, fast gas {} gwei",
                    snapshot.fiat_prices.len(),
                    snapshot.gas_price
                );
                loading.finish(|state| state.snapshot = Some(snapshot));
                Ok(())
            }
            Err(err) => {
                warn!("price load failed: {err}");
                loading.finish(|state| state.error = Some(err));
                Err(err)
            }
        }
    }

    async fn fetch_snapshot(&self) -> Result<PriceSnapshot, PriceError> {
        if self.fiats.is_empty() {
            debug!("no fiat currencies configured");
            return Err(PriceError::NoPricesAvailable);
        }

        let fiat_prices = self.feed.fiat_prices(&self.fiats).await?;
        let gas_price = self.feed.fast_gas_price().await?;

        Ok(PriceSnapshot {
            fiat_prices,
            gas_price,
            fetched_at: Utc::now(),
        })
    }

    pub fn feed(&self) -> &F {
        &self.feed
    }
}

impl EthPrice<NetworkPriceFeed> {
    /// Every supported currency priced over the public endpoints.
    pub fn with_defaults() -> anyhow::Result<Self> {
        let feed = NetworkPriceFeed::new(FeedConfig::default())?;
        Ok(Self::with_all_fiats(feed))
    }
}

impl<F> EthPrice<F> {
    fn publish(&self, update: impl FnOnce(&mut LoadState)) {
        // Broadcast under the watch write lock so the transition log has the
        // same order as the stored state.
        self.state.send_modify(|state| {
            update(state);
            let _ = self.transitions.send(state.clone());
        });
    }

    pub fn fiats(&self) -> &[FiatCurrency] {
        &self.fiats
    }

    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    pub fn last_error(&self) -> Option<PriceError> {
        self.state.borrow().error
    }

    /// Prices of the last successful load; empty before the first one.
    pub fn fiat_prices(&self) -> HashMap<FiatCurrency, f64> {
        self.state
            .borrow()
            .snapshot
            .as_ref()
            .map(|s| s.fiat_prices.clone())
            .unwrap_or_default()
    }

    pub fn fiat_price(&self, currency: FiatCurrency) -> Option<f64> {
        self.state
            .borrow()
            .snapshot
            .as_ref()
            .and_then(|s| s.fiat_prices.get(&currency).copied())
    }

    pub fn gas_price(&self) -> Option<f64> {
        self.state.borrow().snapshot.as_ref().map(|s| s.gas_price)
    }

    /// Fee of one transfer at the cached gas price, `0` before the first load.
    pub fn estimated_network_fees(&self) -> f64 {
        self.gas_price().map(estimated_network_fee).unwrap_or(0.0)
    }

    /// `amount` ETH in `currency`. Falls back to a rate of 1 when no price is
    /// cached, so callers always get a number.
    pub fn convert_eth_to_fiat(&self, amount: f64, currency: FiatCurrency) -> f64 {
        amount * self.fiat_price(currency).unwrap_or(1.0)
    }

    /// `amount` of `currency` in ETH, with the same fallback rate of 1.
    pub fn convert_fiat_to_eth(&self, amount: f64, currency: FiatCurrency) -> f64 {
        amount / self.fiat_price(currency).unwrap_or(1.0)
    }

    /// Latest-value view of the state, for observers that only need the
    /// current value.
    pub fn watch(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Every transition from now on, starting with the current state.
    pub fn subscribe(&self) -> StateSubscription {
        // Holding the read guard keeps a publish from landing between the
        // snapshot and the receiver.
        let current = self.state.borrow();
        let rx = self.transitions.subscribe();
        StateSubscription::new(current.clone(), rx)
    }
}

/// Clears `is_loading` when a load is dropped before it publishes an outcome.
struct LoadingGuard<'a, F> {
    service: &'a EthPrice<F>,
    armed: bool,
}

impl<'a, F> LoadingGuard<'a, F> {
    fn new(service: &'a EthPrice<F>) -> Self {
        Self {
            service,
            armed: true,
        }
    }

    /// Publish the outcome of the load together with `is_loading = false`.
    fn finish(mut self, update: impl FnOnce(&mut LoadState)) {
        self.armed = false;
        self.service.publish(|state| {
            state.is_loading = false;
            update(state);
        });
    }
}

impl<F> Drop for LoadingGuard<'_, F> {
    fn drop(&mut self) {
        if self.armed {
            debug!("price load cancelled");
            self.service.publish(|state| state.is_loading = false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::price_feed::StubPriceFeed;

    fn prices() -> HashMap<FiatCurrency, f64> {
        HashMap::from([
            (FiatCurrency::Eur, 10.0),
            (FiatCurrency::Gbp, 20.0),
            (FiatCurrency::Usd, 30.0),
        ])
    }

    #[test]
    fn network_fee_formula() {
        assert_eq!(estimated_network_fee(20.0), 21_000.0 * 20.0 / 100_000_000.0);
        assert_eq!(estimated_network_fee(0.0), 0.0);
    }

    #[test]
    fn conversions_fall_back_to_identity() {
        let service = EthPrice::with_all_fiats(StubPriceFeed::new());

        assert_eq!(service.convert_eth_to_fiat(2.5, FiatCurrency::Eur), 2.5);
        assert_eq!(service.convert_fiat_to_eth(2.5, FiatCurrency::Usd), 2.5);
        assert_eq!(service.estimated_network_fees(), 0.0);
    }

    #[tokio::test]
    async fn conversions_use_cached_prices() {
        let feed = StubPriceFeed::new().with_fiat_prices(prices());
        let service = EthPrice::with_all_fiats(feed);
        service.load().await.unwrap();

        assert_eq!(service.convert_eth_to_fiat(10.0, FiatCurrency::Eur), 100.0);
        assert_eq!(service.convert_eth_to_fiat(10.0, FiatCurrency::Gbp), 200.0);
        assert_eq!(service.convert_fiat_to_eth(10.0, FiatCurrency::Usd), 10.0 / 30.0);
    }

    #[test]
    fn defaults_price_every_supported_fiat() {
        let service = EthPrice::with_defaults().unwrap();

        assert_eq!(service.fiats(), FiatCurrency::supported().as_slice());
        assert_eq!(service.state().phase(), LoadPhase::Idle);
    }

    #[tokio::test]
    async fn phase_follows_outcome() {
        let feed = StubPriceFeed::new().with_fiat_prices(prices());
        let service = EthPrice::with_all_fiats(feed);
        assert_eq!(service.state().phase(), LoadPhase::Idle);

        service.load().await.unwrap();
        assert_eq!(service.state().phase(), LoadPhase::Loaded);

        service.feed().set_gas_error(Some(PriceError::NoGasPriceAvailable));
        assert!(service.load().await.is_err());
        assert_eq!(service.state().phase(), LoadPhase::Failed);
        assert_eq!(service.last_error(), Some(PriceError::NoGasPriceAvailable));
    }
}
