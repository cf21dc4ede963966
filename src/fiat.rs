//! Supported fiat currencies.
//!
//! The set is closed: prices quoted in any other currency are ignored when
//! decoding external payloads.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

/// A fiat currency ETH amounts can be displayed in.
///
/// The string form (`Display`, `FromStr`, `Serialize`) is the lowercase code used by
/// the price API, e.g. `"eur"`.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    EnumIter,
    EnumString,
    IntoStaticStr,
    Serialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FiatCurrency {
    Eur,
    Usd,
    Gbp,
}

impl FiatCurrency {
    /// All supported currencies, in display order.
    pub fn supported() -> Vec<FiatCurrency> {
        Self::iter().collect()
    }

    /// Resolve an external currency code.
    ///
    /// Matching is exact: `"EUR"` or `" eur"` do not resolve.
    pub fn lookup(code: &str) -> Option<FiatCurrency> {
        Self::iter().find(|c| c.code() == code)
    }

    /// Code used in API requests and responses.
    pub fn code(&self) -> &'static str {
        self.into()
    }

    /// Singular name of the monetary unit.
    pub fn display_unit(&self) -> &'static str {
        match self {
            Self::Eur => "Euro",
            Self::Usd => "Dollar",
            Self::Gbp => "Pound",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Eur => "€",
            Self::Usd => "$",
            Self::Gbp => "£",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn supported_keeps_display_order() {
        assert_eq!(
            FiatCurrency::supported(),
            vec![FiatCurrency::Eur, FiatCurrency::Usd, FiatCurrency::Gbp]
        );
    }

    #[test]
    fn lookup_known_codes() {
        assert_eq!(FiatCurrency::lookup("eur"), Some(FiatCurrency::Eur));
        assert_eq!(FiatCurrency::lookup("usd"), Some(FiatCurrency::Usd));
        assert_eq!(FiatCurrency::lookup("gbp"), Some(FiatCurrency::Gbp));
    }

    #[test]
    fn lookup_unknown_code_returns_none() {
        assert!(FiatCurrency::lookup("xyz").is_none());
        assert!(FiatCurrency::lookup("EUR").is_none());
        assert!(FiatCurrency::lookup("").is_none());
    }

    #[test]
    fn metadata() {
        assert_eq!(FiatCurrency::Gbp.code(), "gbp");
        assert_eq!(FiatCurrency::Gbp.to_string(), "gbp");
        assert_eq!(FiatCurrency::Usd.display_unit(), "Dollar");
        assert_eq!(FiatCurrency::Eur.symbol(), "€");
        assert_eq!(FiatCurrency::from_str("usd").unwrap(), FiatCurrency::Usd);
    }
}
