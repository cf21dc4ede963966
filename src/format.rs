//! Display formatting for fiat and ETH amounts.
//!
//! Both formats group thousands with a plain space regardless of locale and
//! render an exact zero as `0`.

use crate::fiat::FiatCurrency;

const GROUP_SEPARATOR: char = ' ';

/// Fiat amount with exactly two fractional digits: `1 234.50`.
pub fn format_fiat(amount: f64) -> String {
    format_decimal(amount, 2, 2)
}

/// Fiat amount prefixed with the currency symbol: `€1 234.50`.
pub fn format_fiat_with_symbol(amount: f64, currency: FiatCurrency) -> String {
    format!("{}{}", currency.symbol(), format_fiat(amount))
}

/// ETH amount with two to five fractional digits: `0.12346`, `3.10`.
pub fn format_eth(amount: f64) -> String {
    format_decimal(amount, 2, 5)
}

/// Estimated fee label: `~0.0004 ETH`.
pub fn format_fee(fee: f64) -> String {
    format!("~{fee:.4} ETH")
}

/// Round to `max_frac` digits, trim trailing zeros down to `min_frac`, group
/// the integer part.
fn format_decimal(value: f64, min_frac: usize, max_frac: usize) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let rounded = format!("{:.*}", max_frac, value.abs());
    let (int_part, frac_part) = rounded.split_once('.').unwrap_or((&rounded, ""));

    let keep = frac_part.trim_end_matches('0').len().max(min_frac);
    let frac_part = &frac_part[..keep.min(frac_part.len())];

    let is_negative = value < 0.0 && rounded.bytes().any(|b| matches!(b, b'1'..=b'9'));

    let mut out = String::with_capacity(rounded.len() + int_part.len() / 3 + 1);
    if is_negative {
        out.push('-');
    }
    out.push_str(&group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    out
}
