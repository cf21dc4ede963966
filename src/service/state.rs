use crate::fiat::FiatCurrency;
use crate::price_feed::PriceError;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tracing::warn;

/// Prices from one successful load. Replaced whole, never patched.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    pub fiat_prices: HashMap<FiatCurrency, f64>,
    /// Fast tier gas price, in gwei
    pub gas_price: f64,
    pub fetched_at: DateTime<Utc>,
}

/// What observers of [`crate::EthPrice`] see.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadState {
    pub is_loading: bool,
    /// Last successful snapshot; kept when a later load fails
    pub snapshot: Option<PriceSnapshot>,
    /// Error of the most recent finished load, cleared when a new one starts
    pub error: Option<PriceError>,
}

impl LoadState {
    pub fn phase(&self) -> LoadPhase {
        match (self.is_loading, &self.error, &self.snapshot) {
            (true, _, _) => LoadPhase::Loading,
            (false, Some(_), _) => LoadPhase::Failed,
            (false, None, Some(_)) => LoadPhase::Loaded,
            (false, None, None) => LoadPhase::Idle,
        }
    }
}

/// Coarse view of [`LoadState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Stream of [`LoadState`] values: the state at subscription time, then
/// every transition published after it.
#[derive(Debug)]
pub struct StateSubscription {
    current: Option<LoadState>,
    rx: broadcast::Receiver<LoadState>,
}

impl StateSubscription {
    pub(crate) fn new(current: LoadState, rx: broadcast::Receiver<LoadState>) -> Self {
        Self {
            current: Some(current),
            rx,
        }
    }

    /// Wait for the next state. `None` once the service is dropped.
    pub async fn next(&mut self) -> Option<LoadState> {
        if let Some(state) = self.current.take() {
            return Some(state);
        }
        loop {
            match self.rx.recv().await {
                Ok(state) => return Some(state),
                Err(RecvError::Lagged(skipped)) => {
                    warn!("state subscriber lagged, skipped {skipped} transitions");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    }

    /// Next already-published state, without waiting.
    pub fn try_next(&mut self) -> Option<LoadState> {
        if let Some(state) = self.current.take() {
            return Some(state);
        }
        loop {
            match self.rx.try_recv() {
                Ok(state) => return Some(state),
                Err(TryRecvError::Lagged(skipped)) => {
                    warn!("state subscriber lagged, skipped {skipped} transitions");
                }
                Err(TryRecvError::Empty | TryRecvError::Closed) => return None,
            }
        }
    }

    /// Drain every already-published state.
    pub fn drain(&mut self) -> Vec<LoadState> {
        std::iter::from_fn(|| self.try_next()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> PriceSnapshot {
        PriceSnapshot {
            fiat_prices: HashMap::from([(FiatCurrency::Eur, 10.0)]),
            gas_price: 20.0,
            fetched_at: Utc::now(),
        }
    }

    #[test]
    fn phases() {
        let mut state = LoadState::default();
        assert_eq!(state.phase(), LoadPhase::Idle);

        state.is_loading = true;
        assert_eq!(state.phase(), LoadPhase::Loading);

        state.is_loading = false;
        state.snapshot = Some(snapshot());
        assert_eq!(state.phase(), LoadPhase::Loaded);

        state.error = Some(PriceError::NoGasPriceAvailable);
        assert_eq!(state.phase(), LoadPhase::Failed);
    }

    #[test]
    fn subscription_yields_current_then_published() {
        let (tx, rx) = broadcast::channel(4);
        let mut sub = StateSubscription::new(LoadState::default(), rx);

        tx.send(LoadState {
            is_loading: true,
            ..Default::default()
        })
        .unwrap();

        let states = sub.drain();
        assert_eq!(
            states.iter().map(|s| s.is_loading).collect::<Vec<_>>(),
            vec![false, true]
        );
        assert!(sub.try_next().is_none());
    }
}
