//! A store handle shared between event sources.

use crate::cart::{AddItem, CartStore, ItemGroup, LineItem};
use crate::error::CommerceError;
use crate::ids::LineItemId;
use crate::money::Money;
use modulo_cache::KeyValueStore;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to one [`CartStore`].
///
/// Each call locks the store for its whole read-modify-write, so two rapid
/// adds from different sources both land; neither works from a stale copy.
pub struct SharedCart<S> {
    inner: Arc<Mutex<CartStore<S>>>,
}

impl<S> Clone for SharedCart<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: KeyValueStore> SharedCart<S> {
    /// Take ownership of a store.
    pub fn new(store: CartStore<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run `f` with exclusive access to the store.
    pub fn with<R>(&self, f: impl FnOnce(&mut CartStore<S>) -> R) -> R {
        f(&mut self.inner.lock())
    }

    /// Add a candidate, merging into an equal item.
    pub fn add(&self, candidate: AddItem) -> Result<LineItemId, CommerceError> {
        self.inner.lock().add(candidate)
    }

    /// Adjust an item's quantity by `delta`, floored at the minimum.
    pub fn set_quantity_delta(&self, id: &LineItemId, delta: i64) -> Option<u32> {
        self.inner.lock().set_quantity_delta(id, delta)
    }

    /// Set an item's quantity, floored at the minimum.
    pub fn set_quantity(&self, id: &LineItemId, quantity: i64) -> Option<u32> {
        self.inner.lock().set_quantity(id, quantity)
    }

    /// Remove an item; `false` when the id is unknown.
    pub fn remove_item(&self, id: &LineItemId) -> bool {
        self.inner.lock().remove_item(id)
    }

    /// Drop every item.
    pub fn clear(&self) {
        self.inner.lock().clear()
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Money {
        self.inner.lock().total()
    }

    /// Snapshot of the items in insertion order.
    pub fn items(&self) -> Vec<LineItem> {
        self.inner.lock().items()
    }

    /// Items grouped by label.
    pub fn grouped_view(&self) -> Vec<ItemGroup> {
        self.inner.lock().grouped_view()
    }

    /// Sum of line totals for one group label.
    pub fn group_total(&self, label: &str) -> Money {
        self.inner.lock().group_total(label)
    }
}
