//! 余额值对象（非负，精确小数）

use std::{fmt, str::FromStr};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Result, WalletError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct Balance(Decimal);

impl Balance {
    pub fn new(amount: Decimal) -> Result<Self> {
        if amount.is_sign_negative() && !amount.is_zero() {
            return Err(WalletError::InvalidBalance(format!(
                "balance cannot be negative: {}",
                amount
            )));
        }
        Ok(Self(amount))
    }

    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl TryFrom<f64> for Balance {
    type Error = WalletError;

    fn try_from(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(WalletError::InvalidBalance(format!(
                "balance must be finite: {}",
                value
            )));
        }
        let amount = Decimal::try_from(value)
            .map_err(|e| WalletError::InvalidBalance(format!("{}: {}", value, e)))?;
        Self::new(amount)
    }
}

impl FromStr for Balance {
    type Err = WalletError;

    fn from_str(s: &str) -> Result<Self> {
        let amount = Decimal::from_str(s.trim())
            .map_err(|e| WalletError::InvalidBalance(format!("{}: {}", s, e)))?;
        Self::new(amount)
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            Balance::new(Decimal::from(-1)),
            Err(WalletError::InvalidBalance(_))
        ));
        assert!(Balance::try_from(-0.5).is_err());
    }

    #[test]
    fn test_zero_accepted() {
        let zero = Balance::new(Decimal::ZERO).unwrap();
        assert!(zero.is_zero());
        assert_eq!(zero, Balance::zero());
        assert_eq!(Balance::default(), Balance::zero());
    }

    #[test]
    fn test_from_f64_and_str() {
        let b = Balance::try_from(1.5).unwrap();
        assert_eq!(b.amount(), Decimal::new(15, 1));
        assert_eq!("2.25".parse::<Balance>().unwrap().amount(), Decimal::new(225, 2));
        assert!("abc".parse::<Balance>().is_err());
        assert!("-3".parse::<Balance>().is_err());
        assert!(Balance::try_from(f64::NAN).is_err());
    }
}
