//! Amount entry for the send flow: an amount typed in ETH or in fiat,
//! shown in both units.

use crate::fiat::FiatCurrency;
use crate::format::{format_eth, format_fee, format_fiat_with_symbol};
use crate::service::EthPrice;
use serde::Serialize;
use strum::{Display, EnumString};

/// Unit the user typed the amount in.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AmountUnit {
    #[default]
    Eth,
    Fiat,
}

impl AmountUnit {
    pub fn other(self) -> Self {
        match self {
            Self::Eth => Self::Fiat,
            Self::Fiat => Self::Eth,
        }
    }
}

/// An entered amount together with its value in the other unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SendQuote {
    pub unit: AmountUnit,
    pub fiat: FiatCurrency,
    /// Amount as entered, in `unit`
    pub amount: f64,
    pub eth_amount: f64,
    pub fiat_amount: f64,
}

impl SendQuote {
    pub fn new<F>(service: &EthPrice<F>, amount: f64, unit: AmountUnit, fiat: FiatCurrency) -> Self {
        let (eth_amount, fiat_amount) = match unit {
            AmountUnit::Eth => (amount, service.convert_eth_to_fiat(amount, fiat)),
            AmountUnit::Fiat => (service.convert_fiat_to_eth(amount, fiat), amount),
        };
        Self {
            unit,
            fiat,
            amount,
            eth_amount,
            fiat_amount,
        }
    }

    /// Largest quote the wallet allows, expressed in `unit`.
    pub fn max<F>(service: &EthPrice<F>, wallet_eth: f64, unit: AmountUnit, fiat: FiatCurrency) -> Self {
        let amount = match unit {
            AmountUnit::Eth => wallet_eth,
            AmountUnit::Fiat => service.convert_eth_to_fiat(wallet_eth, fiat),
        };
        Self::new(service, amount, unit, fiat)
    }

    /// Switch the entry unit, carrying the entered amount over converted.
    pub fn toggled<F>(&self, service: &EthPrice<F>) -> Self {
        let unit = self.unit.other();
        let amount = match unit {
            AmountUnit::Eth => service.convert_fiat_to_eth(self.amount, self.fiat),
            AmountUnit::Fiat => service.convert_eth_to_fiat(self.amount, self.fiat),
        };
        Self::new(service, amount, unit, self.fiat)
    }

    pub fn is_affordable(&self, wallet_eth: f64) -> bool {
        wallet_eth >= self.eth_amount
    }

    /// Amount shown next to the input, in the other unit.
    pub fn counter_label(&self) -> String {
        match self.unit {
            AmountUnit::Eth => format_fiat_with_symbol(self.fiat_amount, self.fiat),
            AmountUnit::Fiat => format!("{} ETH", format_eth(self.eth_amount)),
        }
    }

    /// Network fee caption, e.g. `~0.0004 ETH`.
    pub fn fee_label<F>(&self, service: &EthPrice<F>) -> String {
        format_fee(service.estimated_network_fees())
    }

    /// Send button caption.
    pub fn send_label(&self, wallet_eth: f64) -> String {
        if !self.is_affordable(wallet_eth) {
            return "Insufficient funds".to_string();
        }
        match self.unit {
            AmountUnit::Eth => format!("Send {} ETH", format_eth(self.eth_amount)),
            AmountUnit::Fiat => format!(
                "Send {} of ETH",
                format_fiat_with_symbol(self.fiat_amount, self.fiat)
            ),
        }
    }
}
