//! Finish colours and their price multipliers.

use crate::ids::FinishId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An exact price multiplier in basis points (1.05 = 10 500).
///
/// Values below 1.0 are allowed; the standard catalog simply has none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Multiplier(u32);

impl Multiplier {
    /// Basis points per 1.0.
    pub const SCALE: u32 = 10_000;

    /// No surcharge.
    pub const ONE: Multiplier = Multiplier(Self::SCALE);

    /// Create a multiplier from basis points.
    pub const fn from_basis_points(bp: u32) -> Self {
        Self(bp)
    }

    /// The multiplier in basis points.
    pub fn basis_points(&self) -> u32 {
        self.0
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Self::ONE
    }
}

impl fmt::Display for Multiplier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let whole = self.0 / Self::SCALE;
        let frac = format!("{:04}", self.0 % Self::SCALE);
        let frac = frac.trim_end_matches('0');
        write!(f, "{}.{:0<2}", whole, frac)
    }
}

/// A finish colour applicable to the front or the sides of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishSpec {
    /// Catalog identifier (e.g. "light-wood").
    pub id: FinishId,
    /// Display label.
    pub label: String,
    /// Price multiplier.
    pub multiplier: Multiplier,
}

impl FinishSpec {
    /// Create a finish record.
    pub fn new(id: impl Into<FinishId>, label: impl Into<String>, basis_points: u32) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            multiplier: Multiplier::from_basis_points(basis_points),
        }
    }
}

/// The five standard finishes.
pub(crate) fn standard_finishes() -> Vec<FinishSpec> {
    vec![
        FinishSpec::new("light-wood", "Light wood", 10_500),
        FinishSpec::new("matte-white", "Matte white", 10_000),
        FinishSpec::new("graphite", "Graphite", 10_800),
        FinishSpec::new("sand", "Sand", 10_300),
        FinishSpec::new("sage", "Sage green", 10_600),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_display() {
        assert_eq!(Multiplier::ONE.to_string(), "1.00");
        assert_eq!(Multiplier::from_basis_points(10_500).to_string(), "1.05");
        assert_eq!(Multiplier::from_basis_points(10_825).to_string(), "1.0825");
        assert_eq!(Multiplier::from_basis_points(9_000).to_string(), "0.90");
    }
}
