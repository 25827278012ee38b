//! Checkout summary and simulated payment.
//!
//! No payment provider is contacted: paying captures the summary, clears the
//! cart and hands back a receipt.

use crate::cart::{CartStore, ItemGroup};
use crate::error::CommerceError;
use crate::ids::OrderId;
use crate::money::Money;
use chrono::{DateTime, Utc};
use modulo_cache::KeyValueStore;
use serde::{Deserialize, Serialize};

/// What the checkout page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSummary {
    /// Items grouped by design.
    pub groups: Vec<ItemGroup>,
    /// Amount due.
    pub total: Money,
    /// Total quantity.
    pub item_count: u64,
}

impl CheckoutSummary {
    /// Build the summary for a store's current contents.
    pub fn from_store<S: KeyValueStore>(store: &CartStore<S>) -> Self {
        Self {
            groups: store.grouped_view(),
            total: store.total(),
            item_count: store.item_count(),
        }
    }

    /// Whether there is nothing to pay for.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Proof of a completed (simulated) payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receipt {
    pub order_id: OrderId,
    pub groups: Vec<ItemGroup>,
    pub total: Money,
    pub item_count: u64,
    pub paid_at: DateTime<Utc>,
}

/// Pay for the cart and empty it.
pub fn pay<S: KeyValueStore>(store: &mut CartStore<S>) -> Result<Receipt, CommerceError> {
    let summary = CheckoutSummary::from_store(store);
    if summary.is_empty() {
        return Err(CommerceError::EmptyCart);
    }

    store.clear();

    let receipt = Receipt {
        order_id: OrderId::generate(),
        groups: summary.groups,
        total: summary.total,
        item_count: summary.item_count,
        paid_at: Utc::now(),
    };
    store
        .logger()
        .info_builder("checkout paid")
        .field("order_id", receipt.order_id.as_str())
        .field_i64("total", receipt.total.amount())
        .field_u64("item_count", receipt.item_count)
        .emit();
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::AddItem;
    use crate::catalog::Catalog;
    use modulo_cache::MemoryStore;

    #[test]
    fn test_summary_matches_store() {
        let mut cart = CartStore::open(MemoryStore::new(), Catalog::standard());
        cart.add(AddItem::new("A", "matte-white", "light-wood").quantity(3))
            .unwrap();

        let summary = CheckoutSummary::from_store(&cart);
        assert_eq!(summary.total, Money::new(378));
        assert_eq!(summary.item_count, 3);
        assert_eq!(summary.groups.len(), 1);
    }

    #[test]
    fn test_pay_clears_cart() {
        let backend = MemoryStore::new();
        let mut cart = CartStore::open(backend.clone(), Catalog::standard());
        cart.add(AddItem::new("B", "graphite", "graphite").group("design-7"))
            .unwrap();

        let receipt = pay(&mut cart).unwrap();

        assert_eq!(receipt.total, Money::new(157));
        assert_eq!(receipt.groups[0].label, "design-7");
        assert!(cart.is_empty());
        assert!(CartStore::open(backend, Catalog::standard()).is_empty());
    }

    #[test]
    fn test_pay_empty_cart_fails() {
        let mut cart = CartStore::open(MemoryStore::new(), Catalog::standard());
        assert!(matches!(pay(&mut cart), Err(CommerceError::EmptyCart)));
        assert_eq!(cart.version(), 0);
    }
}
