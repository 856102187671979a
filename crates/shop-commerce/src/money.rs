//! Server-supplied monetary amounts.
//!
//! The shop API prices everything in New Taiwan dollars and sends plain
//! JSON numbers. Amounts are normally whole dollars, but coupon totals
//! can carry a fraction, so the value is kept as received.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Currency symbol used when rendering amounts.
pub const CURRENCY_SYMBOL: &str = "NT$";

/// A monetary value as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(f64);

impl Amount {
    /// Wrap a raw value.
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// A zero amount.
    pub fn zero() -> Self {
        Self(0.0)
    }

    /// The raw value.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }

    /// Format with the currency symbol (e.g., "NT$1,200").
    pub fn display(&self) -> String {
        if self.0 < 0.0 {
            format!("-{}{}", CURRENCY_SYMBOL, Amount(-self.0).display_amount())
        } else {
            format!("{}{}", CURRENCY_SYMBOL, self.display_amount())
        }
    }

    /// Format without the symbol, grouping thousands (e.g., "1,234.50").
    ///
    /// Whole amounts print without decimals.
    pub fn display_amount(&self) -> String {
        let rounded = (self.0.abs() * 100.0).round() / 100.0;
        let whole = rounded.trunc() as u64;
        let cents = ((rounded - rounded.trunc()) * 100.0).round() as u64;

        let mut out = String::new();
        if self.0 < 0.0 && (whole > 0 || cents > 0) {
            out.push('-');
        }
        out.push_str(&group_thousands(whole));
        if cents > 0 {
            out.push_str(&format!(".{:02}", cents));
        }
        out
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

impl From<u32> for Amount {
    fn from(value: u32) -> Self {
        Self(value as f64)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_whole_amount() {
        assert_eq!(Amount::new(1200.0).display(), "NT$1,200");
        assert_eq!(Amount::new(999.0).display(), "NT$999");
        assert_eq!(Amount::new(1234567.0).display(), "NT$1,234,567");
    }

    #[test]
    fn test_display_fractional_amount() {
        assert_eq!(Amount::new(1234.5).display(), "NT$1,234.50");
        assert_eq!(Amount::new(0.05).display_amount(), "0.05");
    }

    #[test]
    fn test_display_zero_and_negative() {
        assert_eq!(Amount::zero().display(), "NT$0");
        assert_eq!(Amount::new(-300.0).display(), "-NT$300");
    }

    #[test]
    fn test_deserializes_integers_and_floats() {
        let whole: Amount = serde_json::from_str("2500").unwrap();
        assert_eq!(whole.value(), 2500.0);

        let fractional: Amount = serde_json::from_str("2499.5").unwrap();
        assert_eq!(fractional.value(), 2499.5);
    }
}
