//! Shopping cart module.
//!
//! Contains the line-item store, its persisted snapshots and the grouped
//! checkout view.

mod grouping;
mod line_item;
mod shared;
pub mod snapshot;
mod store;

pub use grouping::{group_items, group_label, ItemGroup, DEFAULT_UNGROUPED_LABEL};
pub use line_item::{floor_quantity, AddItem, IdentityKey, LineItem, MIN_QUANTITY};
pub use shared::SharedCart;
pub use snapshot::{RestoreReport, SnapshotStore, DEFAULT_STORAGE_KEY};
pub use store::{CartStore, StoreOptions};
