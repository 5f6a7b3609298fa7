//! Spending Value Object
//!
//! Non-negative monetary amount. Campaign budgets and customer lifetime
//! spend are displayed as currency with two decimal places.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Non-negative monetary amount
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Spending(Decimal);

impl Spending {
    /// Create a spending amount; negative amounts are rejected
    pub fn new(amount: Decimal) -> Result<Self, SpendingError> {
        if amount < Decimal::ZERO {
            return Err(SpendingError::Negative);
        }
        Ok(Self(amount))
    }

    /// Zero spending
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Get the raw amount
    pub fn amount(&self) -> Decimal {
        self.0
    }

    /// Amount rounded to two decimal places for currency display
    pub fn rounded(&self) -> Decimal {
        self.0.round_dp(2)
    }

    /// Add another amount; non-negative amounts are closed under addition
    pub fn add(&self, other: Spending) -> Spending {
        Spending(self.0 + other.0)
    }

    pub fn is_zero(&self) -> bool {
        self.0 == Decimal::ZERO
    }
}

impl Default for Spending {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Spending {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpendingError {
    Negative,
}

impl std::error::Error for SpendingError {}

impl fmt::Display for SpendingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Negative => write!(f, "Spending cannot be negative"),
        }
    }
}
