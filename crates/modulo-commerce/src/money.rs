//! Money type for representing prices.
//!
//! Prices are whole currency units held in an `i64`. There is a single
//! storefront currency, so no currency tag is carried.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul};

/// A whole-unit monetary amount.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Money(i64);

impl Money {
    /// Zero.
    pub const ZERO: Money = Money(0);

    /// The zero amount.
    pub const fn zero() -> Self {
        Self::ZERO
    }

    /// Create a Money value.
    pub const fn new(amount: i64) -> Self {
        Self(amount)
    }

    /// The amount in whole units.
    pub fn amount(&self) -> i64 {
        self.0
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Multiply by a line quantity. Saturates instead of overflowing.
    pub fn times(&self, quantity: u32) -> Money {
        Money(self.0.saturating_mul(i64::from(quantity)))
    }

    /// Format as a display string (e.g., "$126").
    pub fn display(&self) -> String {
        if self.0 < 0 {
            format!("-${}", self.0.unsigned_abs())
        } else {
            format!("${}", self.0)
        }
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, other: Money) {
        *self = *self + other;
    }
}

impl Mul<u32> for Money {
    type Output = Money;

    fn mul(self, quantity: u32) -> Money {
        self.times(quantity)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Money {
        iter.copied().sum()
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display())
    }
}
