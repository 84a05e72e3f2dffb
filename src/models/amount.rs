//! Monetary amounts and the cross-currency exchange rate
//!
//! Amounts are validated at construction: non-numeric, non-finite, and
//! negative values are rejected with a validation error instead of being
//! coerced into a NaN that poisons every downstream sum.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{HearthError, HearthResult};

/// A positive monetary amount in some region's native currency
///
/// Stored as an f64 because secondary-region amounts are normalized by
/// dividing through the exchange rate; conversions are compared to
/// floating-point tolerance, not exact cents.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Amount(f64);

impl Amount {
    /// Create a validated amount
    ///
    /// # Errors
    ///
    /// Rejects NaN, infinite, and negative values.
    pub fn new(value: f64) -> HearthResult<Self> {
        if !value.is_finite() {
            return Err(HearthError::Validation(
                "Amount must be a number".to_string(),
            ));
        }
        if value < 0.0 {
            return Err(HearthError::Validation(
                "Amount cannot be negative".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Get the raw value
    pub fn value(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Amount {
    type Error = HearthError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Amount> for f64 {
    fn from(amount: Amount) -> f64 {
        amount.0
    }
}

impl FromStr for Amount {
    type Err = HearthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| HearthError::Validation(format!("Invalid amount: '{}'", s)))?;
        Self::new(value)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

/// Exchange rate: secondary-currency units per one primary-currency unit
///
/// Normalization always divides by the rate, never multiplies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    /// Create a validated exchange rate
    ///
    /// # Errors
    ///
    /// Rejects zero, negative, and non-finite rates.
    pub fn new(rate: f64) -> HearthResult<Self> {
        if !rate.is_finite() || rate <= 0.0 {
            return Err(HearthError::Validation(
                "Exchange rate must be a positive number".to_string(),
            ));
        }
        Ok(Self(rate))
    }

    /// Get the raw rate
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Convert a secondary-currency value into the primary currency
    pub fn to_primary(&self, secondary: f64) -> f64 {
        secondary / self.0
    }

    /// Convert a primary-currency value into the secondary currency
    pub fn to_secondary(&self, primary: f64) -> f64 {
        primary * self.0
    }
}

impl Default for ExchangeRate {
    fn default() -> Self {
        Self(1.0)
    }
}

impl TryFrom<f64> for ExchangeRate {
    type Error = HearthError;

    fn try_from(rate: f64) -> Result<Self, Self::Error> {
        Self::new(rate)
    }
}

impl From<ExchangeRate> for f64 {
    fn from(rate: ExchangeRate) -> f64 {
        rate.0
    }
}

impl FromStr for ExchangeRate {
    type Err = HearthError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: f64 = s
            .trim()
            .parse()
            .map_err(|_| HearthError::Validation(format!("Invalid exchange rate: '{}'", s)))?;
        Self::new(value)
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.4}", self.0)
    }
}
