//! Line items and add candidates.

use crate::catalog::Catalog;
use crate::error::CommerceError;
use crate::ids::{FinishId, GroupTag, LineItemId, ModuleId};
use serde::{Deserialize, Serialize};

/// Smallest quantity a line item can hold.
pub const MIN_QUANTITY: u32 = 1;

/// Clamp a requested quantity into `MIN_QUANTITY..=u32::MAX`.
pub fn floor_quantity(requested: i64) -> u32 {
    u32::try_from(requested.max(i64::from(MIN_QUANTITY))).unwrap_or(u32::MAX)
}

/// Mint a line item id not rejected by `taken`.
pub(crate) fn mint_id(taken: impl Fn(&LineItemId) -> bool) -> LineItemId {
    loop {
        let id = LineItemId::generate();
        if !taken(&id) {
            return id;
        }
    }
}

/// A line item in the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Unique line item identifier.
    pub id: LineItemId,
    /// Module shape.
    pub module_id: ModuleId,
    /// Quantity, never below [`MIN_QUANTITY`].
    pub quantity: u32,
    /// Finish on the front surface.
    pub front_finish_id: FinishId,
    /// Finish on the side surfaces.
    pub sides_finish_id: FinishId,
    /// Design or purchase group this item came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_tag: Option<GroupTag>,
}

impl LineItem {
    /// Build a fresh line item from a candidate.
    pub(crate) fn from_candidate(id: LineItemId, candidate: AddItem) -> Self {
        Self {
            id,
            module_id: candidate.module_id,
            quantity: candidate.quantity.max(MIN_QUANTITY),
            front_finish_id: candidate.front_finish_id,
            sides_finish_id: candidate.sides_finish_id,
            group_tag: candidate.group_tag,
        }
    }

    /// Key deciding whether two adds merge.
    pub fn identity_key(&self) -> IdentityKey<'_> {
        IdentityKey {
            module_id: &self.module_id,
            front_finish_id: &self.front_finish_id,
            sides_finish_id: &self.sides_finish_id,
            group_tag: self.group_tag.as_ref(),
        }
    }

    /// Display name, e.g. "Module A – Front Matte white / Sides Light wood".
    pub fn display_name(&self, catalog: &Catalog) -> Result<String, CommerceError> {
        catalog.describe(&self.module_id, &self.front_finish_id, &self.sides_finish_id)
    }
}

/// Merge identity: module, both finishes and the group tag. The line item id
/// is not part of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IdentityKey<'a> {
    pub module_id: &'a ModuleId,
    pub front_finish_id: &'a FinishId,
    pub sides_finish_id: &'a FinishId,
    pub group_tag: Option<&'a GroupTag>,
}

/// A request to add a module selection to the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub module_id: ModuleId,
    pub front_finish_id: FinishId,
    pub sides_finish_id: FinishId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_tag: Option<GroupTag>,
}

fn default_quantity() -> u32 {
    MIN_QUANTITY
}

impl AddItem {
    /// One unit of a module with the given finishes, ungrouped.
    pub fn new(
        module_id: impl Into<ModuleId>,
        front: impl Into<FinishId>,
        sides: impl Into<FinishId>,
    ) -> Self {
        Self {
            module_id: module_id.into(),
            front_finish_id: front.into(),
            sides_finish_id: sides.into(),
            quantity: MIN_QUANTITY,
            group_tag: None,
        }
    }

    /// Set the quantity. Zero adds nothing to an existing item; a new item
    /// holds at least one.
    pub fn quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    /// Set the group tag.
    pub fn group(mut self, tag: impl Into<GroupTag>) -> Self {
        self.group_tag = Some(tag.into());
        self
    }

    /// Key this candidate merges under.
    pub fn identity_key(&self) -> IdentityKey<'_> {
        IdentityKey {
            module_id: &self.module_id,
            front_finish_id: &self.front_finish_id,
            sides_finish_id: &self.sides_finish_id,
            group_tag: self.group_tag.as_ref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_quantity() {
        assert_eq!(floor_quantity(-10), 1);
        assert_eq!(floor_quantity(0), 1);
        assert_eq!(floor_quantity(7), 7);
        assert_eq!(floor_quantity(i64::MAX), u32::MAX);
    }

    #[test]
    fn test_identity_key_ignores_id_and_quantity() {
        let candidate = AddItem::new("A", "sand", "sage").quantity(4).group("design-7");
        let item = LineItem::from_candidate(LineItemId::new("li-1"), candidate.clone());
        assert_eq!(item.identity_key(), candidate.identity_key());
    }

    #[test]
    fn test_identity_key_includes_group_tag() {
        let plain = AddItem::new("A", "sand", "sage");
        let tagged = plain.clone().group("design-7");
        assert_ne!(plain.identity_key(), tagged.identity_key());
    }

    #[test]
    fn test_zero_quantity_candidate_becomes_one() {
        let item = LineItem::from_candidate(
            LineItemId::new("li-1"),
            AddItem::new("A", "sand", "sage").quantity(0),
        );
        assert_eq!(item.quantity, 1);
    }

    #[test]
    fn test_add_item_defaults_quantity_when_deserialized() {
        let candidate: AddItem = serde_json::from_str(
            r#"{"module_id":"C","front_finish_id":"sand","sides_finish_id":"sand"}"#,
        )
        .unwrap();
        assert_eq!(candidate.quantity, 1);
        assert!(candidate.group_tag.is_none());
    }
}
