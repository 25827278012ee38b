//! The line-item store.

use crate::cart::grouping::{group_items, group_label, ItemGroup, DEFAULT_UNGROUPED_LABEL};
use crate::cart::line_item::{floor_quantity, mint_id, AddItem, LineItem};
use crate::cart::snapshot::{self, SnapshotStore, DEFAULT_STORAGE_KEY};
use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::ids::LineItemId;
use crate::money::Money;
use crate::pricing::{CartPricing, LineItemPricing, PricingEngine};
use modulo_cache::KeyValueStore;
use modulo_observability::StructuredLogger;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreOptions {
    /// Key the snapshot is persisted under.
    pub storage_key: String,
    /// Label for items without a group tag.
    pub ungrouped_label: String,
}

impl Default for StoreOptions {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            ungrouped_label: DEFAULT_UNGROUPED_LABEL.to_string(),
        }
    }
}

/// Owns the cart's line items and keeps the persisted snapshot in step.
///
/// Every mutating method takes `&mut self` and runs read, compute and
/// write-back as one step, so no two mutations can interleave. Share one
/// store between event sources through [`SharedCart`](crate::cart::SharedCart).
///
/// Invariants:
/// - every item's module is in the catalog;
/// - every quantity is at least [`MIN_QUANTITY`](crate::cart::MIN_QUANTITY);
/// - no two items share an identity key or an id.
pub struct CartStore<S> {
    items: Vec<LineItem>,
    version: u64,
    catalog: Arc<Catalog>,
    snapshots: SnapshotStore<S>,
    options: StoreOptions,
    logger: StructuredLogger,
}

impl<S: KeyValueStore> CartStore<S> {
    /// Open a store with default options, restoring any saved cart.
    pub fn open(backend: S, catalog: Arc<Catalog>) -> Self {
        Self::open_with(
            backend,
            catalog,
            StoreOptions::default(),
            StructuredLogger::new("cart-store"),
        )
    }

    /// Open a store, restoring any saved cart.
    ///
    /// A missing or unreadable snapshot yields an empty cart; the failure is
    /// logged, never returned.
    pub fn open_with(
        backend: S,
        catalog: Arc<Catalog>,
        options: StoreOptions,
        logger: StructuredLogger,
    ) -> Self {
        let snapshots = SnapshotStore::new(backend, options.storage_key.clone());
        let items = match snapshots.load(&catalog) {
            Ok(Some((items, report))) => {
                logger
                    .info_builder("cart restored")
                    .field("key", snapshots.key())
                    .field_u64("items", report.restored as u64)
                    .emit();
                if !report.is_clean() {
                    logger
                        .warn_builder("snapshot repaired during restore")
                        .field_u64("dropped_unknown_module", report.dropped_unknown_module as u64)
                        .field_u64("merged_duplicates", report.merged_duplicates as u64)
                        .field_u64("floored_quantities", report.floored_quantities as u64)
                        .field_u64("reminted_ids", report.reminted_ids as u64)
                        .emit();
                }
                items
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                let message = if e.is_corrupt() {
                    "snapshot unreadable, starting with an empty cart"
                } else {
                    "snapshot read failed, starting with an empty cart"
                };
                logger
                    .warn_builder(message)
                    .field("key", snapshots.key())
                    .field("error", e.to_string())
                    .emit();
                Vec::new()
            }
        };

        Self {
            items,
            version: 0,
            catalog,
            snapshots,
            options,
            logger,
        }
    }

    /// Add a selection, merging into an existing item with the same identity
    /// key. Returns the id of the item that now holds the quantity.
    ///
    /// A merge adds the candidate's quantity as given, so merging zero leaves
    /// the cart untouched. A new item holds at least
    /// [`MIN_QUANTITY`](crate::cart::MIN_QUANTITY).
    pub fn add(&mut self, candidate: AddItem) -> Result<LineItemId, CommerceError> {
        self.catalog.module(&candidate.module_id)?;

        let position = self
            .items
            .iter()
            .position(|i| i.identity_key() == candidate.identity_key());

        let (id, added, quantity) = match position {
            Some(pos) => {
                let existing = &mut self.items[pos];
                if candidate.quantity == 0 {
                    return Ok(existing.id.clone());
                }
                existing.quantity = existing.quantity.saturating_add(candidate.quantity);
                (existing.id.clone(), candidate.quantity, existing.quantity)
            }
            None => {
                let id = mint_id(|id| self.items.iter().any(|i| &i.id == id));
                let item = LineItem::from_candidate(id.clone(), candidate);
                let quantity = item.quantity;
                self.items.push(item);
                (id, quantity, quantity)
            }
        };

        self.logger
            .debug_builder("item added")
            .field("line_item_id", id.as_str())
            .field_u64("added", u64::from(added))
            .field_u64("quantity", u64::from(quantity))
            .emit();
        self.commit();
        Ok(id)
    }

    /// Shift an item's quantity by `delta`, never below one.
    ///
    /// Returns the new quantity, or `None` if no item has this id.
    pub fn set_quantity_delta(&mut self, id: &LineItemId, delta: i64) -> Option<u32> {
        let current = self.get(id)?.quantity;
        let next = floor_quantity(i64::from(current).saturating_add(delta));
        Some(self.assign_quantity(id, next))
    }

    /// Set an item's quantity, clamped to at least one.
    ///
    /// Returns the new quantity, or `None` if no item has this id.
    pub fn set_quantity(&mut self, id: &LineItemId, quantity: i64) -> Option<u32> {
        self.get(id)?;
        Some(self.assign_quantity(id, floor_quantity(quantity)))
    }

    fn assign_quantity(&mut self, id: &LineItemId, quantity: u32) -> u32 {
        let Some(item) = self.items.iter_mut().find(|i| &i.id == id) else {
            return quantity;
        };
        if item.quantity == quantity {
            return quantity;
        }
        item.quantity = quantity;

        self.logger
            .debug_builder("quantity changed")
            .field("line_item_id", id.as_str())
            .field_u64("quantity", u64::from(quantity))
            .emit();
        self.commit();
        quantity
    }

    /// Remove an item. Removing an unknown id is a no-op returning `false`.
    pub fn remove_item(&mut self, id: &LineItemId) -> bool {
        let len_before = self.items.len();
        self.items.retain(|i| &i.id != id);
        let removed = self.items.len() < len_before;
        if removed {
            self.logger
                .debug_builder("item removed")
                .field("line_item_id", id.as_str())
                .emit();
            self.commit();
        }
        removed
    }

    /// Remove every item.
    pub fn clear(&mut self) {
        let dropped = self.items.len();
        self.items.clear();
        self.logger
            .debug_builder("cart cleared")
            .field_u64("dropped", dropped as u64)
            .emit();
        self.commit();
    }

    /// Sum of all line totals.
    pub fn total(&self) -> Money {
        self.items.iter().map(|i| self.line_total(i)).sum()
    }

    /// Copy of the current items in cart order.
    pub fn items(&self) -> Vec<LineItem> {
        self.items.clone()
    }

    /// Look up an item by id.
    pub fn get(&self, id: &LineItemId) -> Option<&LineItem> {
        self.items.iter().find(|i| &i.id == id)
    }

    /// Items partitioned by group label in first-appearance order.
    pub fn grouped_view(&self) -> Vec<ItemGroup> {
        group_items(&self.items, &self.options.ungrouped_label, |i| {
            self.line_total(i)
        })
    }

    /// Sum of line totals for one group label; zero for unknown labels.
    pub fn group_total(&self, label: &str) -> Money {
        self.items
            .iter()
            .filter(|i| group_label(i, &self.options.ungrouped_label) == label)
            .map(|i| self.line_total(i))
            .sum()
    }

    /// Per-line pricing breakdown.
    pub fn quote(&self) -> CartPricing {
        let line_items = self
            .items
            .iter()
            .map(|item| {
                let total = self.line_total(item);
                LineItemPricing {
                    line_item_id: item.id.clone(),
                    unit_price: self.unit_price(item),
                    quantity: item.quantity,
                    total,
                }
            })
            .collect::<Vec<_>>();
        CartPricing {
            subtotal: line_items.iter().map(|l| l.total).sum(),
            line_items,
        }
    }

    /// Total quantity across items (the cart badge count).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Number of distinct line items.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Check if cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Counter bumped by every state change.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Serialized form of the current items.
    pub fn snapshot(&self) -> Result<Vec<u8>, CommerceError> {
        snapshot::encode(&self.items)
    }

    /// The catalog prices are computed against.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Store settings.
    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    /// Pricing engine over this store's catalog.
    pub fn pricing(&self) -> PricingEngine<'_> {
        PricingEngine::new(&self.catalog)
    }

    /// The key-value backend.
    pub fn backend(&self) -> &S {
        self.snapshots.backend()
    }

    pub(crate) fn logger(&self) -> &StructuredLogger {
        &self.logger
    }

    // Items only ever hold catalog modules (checked on add and restore), so
    // pricing cannot fail here.
    fn unit_price(&self, item: &LineItem) -> Money {
        self.pricing()
            .price_of(&item.module_id, &item.front_finish_id, &item.sides_finish_id)
            .unwrap_or_default()
    }

    fn line_total(&self, item: &LineItem) -> Money {
        self.unit_price(item).times(item.quantity)
    }

    fn commit(&mut self) {
        self.version += 1;
        if let Err(e) = self.snapshots.save(&self.items) {
            self.logger
                .warn_builder("snapshot write failed")
                .field("key", self.snapshots.key())
                .field("error", e.to_string())
                .field_u64("version", self.version)
                .emit();
        }
    }
}
