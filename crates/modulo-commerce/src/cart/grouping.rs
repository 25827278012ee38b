//! Grouped view of cart contents for checkout summaries.

use crate::cart::LineItem;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Label for items without a group tag.
pub const DEFAULT_UNGROUPED_LABEL: &str = "ungrouped";

/// Items sharing one group label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemGroup {
    /// Group tag, or the ungrouped label.
    pub label: String,
    /// Items in cart order.
    pub items: Vec<LineItem>,
    /// Sum of line totals in this group.
    pub total: Money,
}

impl ItemGroup {
    /// Sum of quantities in this group.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }
}

/// The label an item is grouped under.
pub fn group_label<'a>(item: &'a LineItem, ungrouped_label: &'a str) -> &'a str {
    item.group_tag
        .as_ref()
        .map(|t| t.as_str())
        .unwrap_or(ungrouped_label)
}

/// Partition items by group label.
///
/// Groups appear in order of first appearance; items keep their relative
/// order inside each group. A tag equal to `ungrouped_label` shares the
/// ungrouped bucket.
pub fn group_items(
    items: &[LineItem],
    ungrouped_label: &str,
    line_total: impl Fn(&LineItem) -> Money,
) -> Vec<ItemGroup> {
    let mut groups: Vec<ItemGroup> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for item in items {
        let label = group_label(item, ungrouped_label);
        let slot = *index.entry(label).or_insert_with(|| {
            groups.push(ItemGroup {
                label: label.to_string(),
                items: Vec::new(),
                total: Money::ZERO,
            });
            groups.len() - 1
        });
        let group = &mut groups[slot];
        group.total += line_total(item);
        group.items.push(item.clone());
    }

    groups
}
