//! Pricing engine.
//!
//! `price = round_half_up(base_price × front_multiplier × sides_multiplier)`,
//! computed exactly on basis points in integer arithmetic.

use crate::cart::LineItem;
use crate::catalog::{Catalog, Multiplier};
use crate::error::CommerceError;
use crate::ids::{FinishId, LineItemId, ModuleId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Prices module/finish combinations against a catalog.
///
/// Pure: holds only a shared reference to read-only data.
#[derive(Debug, Clone, Copy)]
pub struct PricingEngine<'a> {
    catalog: &'a Catalog,
}

impl<'a> PricingEngine<'a> {
    /// Create an engine over a catalog.
    pub fn new(catalog: &'a Catalog) -> Self {
        Self { catalog }
    }

    /// Unit price of a module with the given finishes.
    ///
    /// Fails only for an unknown module; unknown finishes price as 1.0.
    pub fn price_of(
        &self,
        module_id: &ModuleId,
        front: &FinishId,
        sides: &FinishId,
    ) -> Result<Money, CommerceError> {
        let module = self.catalog.module(module_id)?;
        Ok(apply_multipliers(
            module.base_price,
            self.catalog.multiplier(front),
            self.catalog.multiplier(sides),
        ))
    }

    /// Unit price times quantity.
    pub fn line_total(&self, item: &LineItem) -> Result<Money, CommerceError> {
        let unit = self.price_of(&item.module_id, &item.front_finish_id, &item.sides_finish_id)?;
        Ok(unit.times(item.quantity))
    }

    /// Per-line pricing breakdown.
    pub fn quote(&self, items: &[LineItem]) -> Result<CartPricing, CommerceError> {
        let line_items = items
            .iter()
            .map(|item| {
                let unit_price = self.price_of(
                    &item.module_id,
                    &item.front_finish_id,
                    &item.sides_finish_id,
                )?;
                Ok(LineItemPricing {
                    line_item_id: item.id.clone(),
                    unit_price,
                    quantity: item.quantity,
                    total: unit_price.times(item.quantity),
                })
            })
            .collect::<Result<Vec<_>, CommerceError>>()?;

        let subtotal = line_items.iter().map(|l| l.total).sum();

        Ok(CartPricing {
            subtotal,
            line_items,
        })
    }
}

/// Apply two multipliers to a base price, rounding half up.
pub fn apply_multipliers(base: Money, front: Multiplier, sides: Multiplier) -> Money {
    let scale = i128::from(Multiplier::SCALE) * i128::from(Multiplier::SCALE);
    let product = i128::from(base.amount())
        * i128::from(front.basis_points())
        * i128::from(sides.basis_points());
    let rounded = (product + scale / 2).div_euclid(scale);
    Money::new(i64::try_from(rounded).unwrap_or(i64::MAX))
}

/// Complete pricing breakdown for a cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartPricing {
    /// Sum of line totals.
    pub subtotal: Money,
    /// Per-line-item pricing breakdown.
    pub line_items: Vec<LineItemPricing>,
}

impl CartPricing {
    /// Amount due. No discounts, tax or shipping are modelled.
    pub fn grand_total(&self) -> Money {
        self.subtotal
    }
}

/// Pricing breakdown for a single line item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LineItemPricing {
    /// Line item ID.
    pub line_item_id: LineItemId,
    /// Unit price after finish multipliers.
    pub unit_price: Money,
    /// Quantity.
    pub quantity: u32,
    /// unit_price * quantity.
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{FinishSpec, ModuleSpec};

    fn ids(m: &str, f: &str, s: &str) -> (ModuleId, FinishId, FinishId) {
        (ModuleId::new(m), FinishId::new(f), FinishId::new(s))
    }

    #[test]
    fn test_price_of_reference_values() {
        let catalog = Catalog::standard();
        let engine = PricingEngine::new(&catalog);

        let (m, f, s) = ids("A", "matte-white", "light-wood");
        assert_eq!(engine.price_of(&m, &f, &s).unwrap(), Money::new(126));

        // 135 × 1.08 × 1.08 = 157.464
        let (m, f, s) = ids("B", "graphite", "graphite");
        assert_eq!(engine.price_of(&m, &f, &s).unwrap(), Money::new(157));

        // 170 × 1.06 × 1.03 = 185.606
        let (m, f, s) = ids("E", "sage", "sand");
        assert_eq!(engine.price_of(&m, &f, &s).unwrap(), Money::new(186));
    }

    #[test]
    fn test_unknown_finish_prices_as_base() {
        let catalog = Catalog::standard();
        let engine = PricingEngine::new(&catalog);
        let (m, f, s) = ids("D", "unknown", "also-unknown");
        assert_eq!(engine.price_of(&m, &f, &s).unwrap(), Money::new(110));
    }

    #[test]
    fn test_unknown_module_fails() {
        let catalog = Catalog::standard();
        let engine = PricingEngine::new(&catalog);
        let (m, f, s) = ids("Z", "sand", "sand");
        assert!(matches!(
            engine.price_of(&m, &f, &s),
            Err(CommerceError::ModuleNotFound(_))
        ));
    }

    #[test]
    fn test_half_rounds_up() {
        // 10 × 1.05 = 10.5
        assert_eq!(
            apply_multipliers(
                Money::new(10),
                Multiplier::from_basis_points(10_500),
                Multiplier::ONE
            ),
            Money::new(11)
        );
        // 10 × 1.04 = 10.4
        assert_eq!(
            apply_multipliers(
                Money::new(10),
                Multiplier::from_basis_points(10_400),
                Multiplier::ONE
            ),
            Money::new(10)
        );
    }

    #[test]
    fn test_discount_multiplier_is_accepted() {
        let catalog = Catalog::new(
            vec![ModuleSpec::new("X", "Module X", (100, 100, 100), 200)],
            vec![FinishSpec::new("outlet", "Outlet", 9_000)],
        );
        let engine = PricingEngine::new(&catalog);
        let (m, f, s) = ids("X", "outlet", "outlet");
        // 200 × 0.9 × 0.9 = 162
        assert_eq!(engine.price_of(&m, &f, &s).unwrap(), Money::new(162));
    }

    #[test]
    fn test_quote_breakdown() {
        let catalog = Catalog::standard();
        let engine = PricingEngine::new(&catalog);
        let items = vec![
            LineItem {
                id: LineItemId::new("li-1"),
                module_id: ModuleId::new("A"),
                quantity: 3,
                front_finish_id: FinishId::new("matte-white"),
                sides_finish_id: FinishId::new("light-wood"),
                group_tag: None,
            },
            LineItem {
                id: LineItemId::new("li-2"),
                module_id: ModuleId::new("D"),
                quantity: 1,
                front_finish_id: FinishId::new("matte-white"),
                sides_finish_id: FinishId::new("matte-white"),
                group_tag: None,
            },
        ];

        let pricing = engine.quote(&items).unwrap();
        assert_eq!(pricing.line_items.len(), 2);
        assert_eq!(pricing.line_items[0].unit_price, Money::new(126));
        assert_eq!(pricing.line_items[0].total, Money::new(378));
        assert_eq!(pricing.grand_total(), Money::new(488));
        assert_eq!(engine.line_total(&items[0]).unwrap(), Money::new(378));
    }
}
