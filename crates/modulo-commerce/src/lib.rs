//! Catalog, pricing and cart logic for a modular-furniture storefront.
//!
//! - **Catalog**: five module shapes and five finish colours, loaded once
//! - **Pricing**: base price × front multiplier × sides multiplier, rounded half up
//! - **Cart**: a persisted line-item store that merges duplicate selections
//! - **Grouping**: items partitioned by design tag for checkout
//! - **Design**: intake for generated design proposals
//! - **Checkout**: summary and simulated payment
//!
//! # Example
//!
//! ```rust
//! use modulo_cache::MemoryStore;
//! use modulo_commerce::prelude::*;
//!
//! let mut cart = CartStore::open(MemoryStore::new(), Catalog::standard());
//!
//! cart.add(AddItem::new("A", "matte-white", "light-wood").quantity(2)).unwrap();
//! cart.add(AddItem::new("A", "matte-white", "light-wood")).unwrap();
//!
//! assert_eq!(cart.unique_item_count(), 1);
//! assert_eq!(cart.total(), Money::new(378));
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod design;
pub mod pricing;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{Catalog, FinishSpec, ModuleSpec, Multiplier};

    // Pricing
    pub use crate::pricing::{CartPricing, LineItemPricing, PricingEngine};

    // Cart
    pub use crate::cart::{
        AddItem, CartStore, ItemGroup, LineItem, SharedCart, StoreOptions,
        DEFAULT_STORAGE_KEY, DEFAULT_UNGROUPED_LABEL,
    };

    // Design and checkout
    pub use crate::checkout::{CheckoutSummary, Receipt};
    pub use crate::design::{DesignProposal, ProposalItem};
}
