//! Currency amount type for spreadsheet-exported values.
//!
//! Uses `rust_decimal` internally so amounts parse exactly and render
//! with the same scale they were written with (`$30.00` stays `30.00`,
//! `$50` stays `50`).

use rust_decimal::Decimal;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

/// An exact currency amount parsed from a spreadsheet cell.
///
/// Parsing accepts the export's formatting: a leading `$` and comma
/// thousands separators are stripped before the decimal parse.
///
/// # Examples
///
/// ```
/// use std::str::FromStr;
/// use sheet2ledger::Amount;
///
/// let amount = Amount::from_str("$1,234.56").unwrap();
/// assert_eq!(amount.to_string(), "1234.56");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Amount(Decimal);

impl Amount {
    /// Zero value.
    pub const ZERO: Self = Amount(Decimal::ZERO);

    /// Creates an `Amount` from a raw `Decimal`.
    pub fn new(value: Decimal) -> Self {
        Amount(value)
    }

    /// Returns `true` if this value is zero.
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl FromStr for Amount {
    type Err = rust_decimal::Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let trimmed = s.trim();
        let bare = trimmed.strip_prefix('$').unwrap_or(trimmed);
        let decimal = Decimal::from_str(&bare.replace(',', ""))?;
        Ok(Amount(decimal))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Neg for Amount {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Amount(-self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_dollar_sign() {
        let a = Amount::from_str("$30.00").unwrap();
        assert_eq!(a.to_string(), "30.00");
    }

    #[test]
    fn test_strips_thousands_separators() {
        let a = Amount::from_str("$1,234.56").unwrap();
        assert_eq!(a.to_string(), "1234.56");
    }

    #[test]
    fn test_preserves_scale() {
        assert_eq!(Amount::from_str("50").unwrap().to_string(), "50");
        assert_eq!(Amount::from_str("50.0").unwrap().to_string(), "50.0");
        assert_eq!(Amount::from_str("$7.5").unwrap().to_string(), "7.5");
    }

    #[test]
    fn test_negation() {
        let a = Amount::from_str("$50").unwrap();
        assert_eq!((-a).to_string(), "-50");
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(Amount::from_str("$abc").is_err());
        assert!(Amount::from_str("").is_err());
    }

    #[test]
    fn test_zero_constant() {
        assert!(Amount::ZERO.is_zero());
    }
}
