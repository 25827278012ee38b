//! Persisted cart snapshots.
//!
//! A snapshot is a JSON array of line-item records stored under one key.
//! Reads are forward compatible: unknown fields are ignored. Restored records
//! are reconciled against the catalog before the store accepts them.

use crate::cart::line_item::{mint_id, MIN_QUANTITY};
use crate::cart::LineItem;
use crate::catalog::Catalog;
use crate::error::CommerceError;
use modulo_cache::{Cache, CacheError, KeyValueStore};
use std::collections::HashSet;

/// Default key the cart is stored under.
pub const DEFAULT_STORAGE_KEY: &str = "cart.v1";

/// Serialize items into snapshot bytes.
pub fn encode(items: &[LineItem]) -> Result<Vec<u8>, CommerceError> {
    Ok(serde_json::to_vec(items)?)
}

/// Parse snapshot bytes and reconcile them against a catalog.
pub fn decode(
    bytes: &[u8],
    catalog: &Catalog,
) -> Result<(Vec<LineItem>, RestoreReport), CommerceError> {
    let records: Vec<LineItem> = serde_json::from_slice(bytes)?;
    Ok(reconcile(records, catalog))
}

/// What reconciliation changed while restoring.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RestoreReport {
    /// Records accepted into the cart.
    pub restored: usize,
    /// Records dropped because their module is not in the catalog.
    pub dropped_unknown_module: usize,
    /// Records folded into an earlier record with the same identity key.
    pub merged_duplicates: usize,
    /// Records whose quantity was raised to the minimum.
    pub floored_quantities: usize,
    /// Records given a fresh id because theirs was already taken.
    pub reminted_ids: usize,
}

impl RestoreReport {
    /// Whether the snapshot was accepted as-is.
    pub fn is_clean(&self) -> bool {
        self.dropped_unknown_module == 0
            && self.merged_duplicates == 0
            && self.floored_quantities == 0
            && self.reminted_ids == 0
    }
}

/// Bring restored records back in line with the store's invariants.
pub fn reconcile(records: Vec<LineItem>, catalog: &Catalog) -> (Vec<LineItem>, RestoreReport) {
    let mut report = RestoreReport::default();
    let mut items: Vec<LineItem> = Vec::with_capacity(records.len());
    let mut seen_ids = HashSet::new();

    for mut record in records {
        if !catalog.has_module(&record.module_id) {
            report.dropped_unknown_module += 1;
            continue;
        }

        if record.quantity < MIN_QUANTITY {
            record.quantity = MIN_QUANTITY;
            report.floored_quantities += 1;
        }

        if let Some(existing) = items
            .iter_mut()
            .find(|i| i.identity_key() == record.identity_key())
        {
            existing.quantity = existing.quantity.saturating_add(record.quantity);
            report.merged_duplicates += 1;
            continue;
        }

        if seen_ids.contains(&record.id) {
            record.id = mint_id(|id| seen_ids.contains(id));
            report.reminted_ids += 1;
        }
        seen_ids.insert(record.id.clone());
        items.push(record);
    }

    report.restored = items.len();
    (items, report)
}

/// Reads and writes snapshots through a key-value backend.
#[derive(Debug, Clone)]
pub struct SnapshotStore<S> {
    cache: Cache<S>,
    key: String,
}

impl<S: KeyValueStore> SnapshotStore<S> {
    /// Bind a backend and key.
    pub fn new(backend: S, key: impl Into<String>) -> Self {
        Self {
            cache: Cache::new(backend),
            key: key.into(),
        }
    }

    /// The key snapshots live under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load and reconcile the stored snapshot, `None` when absent.
    pub fn load(
        &self,
        catalog: &Catalog,
    ) -> Result<Option<(Vec<LineItem>, RestoreReport)>, CacheError> {
        Ok(self
            .cache
            .get::<Vec<LineItem>>(&self.key)?
            .map(|records| reconcile(records, catalog)))
    }

    /// Overwrite the stored snapshot.
    pub fn save(&self, items: &[LineItem]) -> Result<(), CacheError> {
        self.cache.set(&self.key, items)
    }

    /// Borrow the backend.
    pub fn backend(&self) -> &S {
        self.cache.store()
    }
}
