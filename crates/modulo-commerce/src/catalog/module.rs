//! Module shapes.

use crate::ids::ModuleId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A fixed-dimension furniture module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleSpec {
    /// Catalog identifier ("A".."E").
    pub id: ModuleId,
    /// Display name.
    pub name: String,
    /// Width in millimetres.
    pub width_mm: u32,
    /// Height in millimetres.
    pub height_mm: u32,
    /// Depth in millimetres.
    pub depth_mm: u32,
    /// Price before finish multipliers.
    pub base_price: Money,
}

impl ModuleSpec {
    /// Create a module record.
    pub fn new(
        id: impl Into<ModuleId>,
        name: impl Into<String>,
        (width_mm, height_mm, depth_mm): (u32, u32, u32),
        base_price: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            width_mm,
            height_mm,
            depth_mm,
            base_price: Money::new(i64::from(base_price)),
        }
    }

    /// Dimensions formatted in centimetres, e.g. "60 × 31.8 × 31.8 cm".
    pub fn dimensions_cm(&self) -> String {
        format!(
            "{} × {} × {} cm",
            mm_to_cm(self.width_mm),
            mm_to_cm(self.height_mm),
            mm_to_cm(self.depth_mm)
        )
    }
}

fn mm_to_cm(mm: u32) -> String {
    if mm % 10 == 0 {
        format!("{}", mm / 10)
    } else {
        format!("{}.{}", mm / 10, mm % 10)
    }
}

/// The five standard modules.
pub(crate) fn standard_modules() -> Vec<ModuleSpec> {
    vec![
        ModuleSpec::new("A", "Module A", (600, 318, 318), 120),
        ModuleSpec::new("B", "Module B", (800, 318, 318), 135),
        ModuleSpec::new("C", "Module C", (900, 318, 318), 145),
        ModuleSpec::new("D", "Module D", (450, 318, 318), 110),
        ModuleSpec::new("E", "Module E", (600, 520, 450), 170),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_cm() {
        let a = ModuleSpec::new("A", "Module A", (600, 318, 318), 120);
        assert_eq!(a.dimensions_cm(), "60 × 31.8 × 31.8 cm");
    }

    #[test]
    fn test_base_price_is_never_negative() {
        let top = ModuleSpec::new("Z", "Module Z", (100, 100, 100), u32::MAX);
        assert_eq!(top.base_price.amount(), i64::from(u32::MAX));
        assert!(standard_modules()
            .iter()
            .all(|m| m.base_price.amount() > 0));
    }
}
