//! Intake for generated design proposals.
//!
//! A proposal is a list of module selections sharing one group tag. The
//! generator lives elsewhere; this module only turns its output into cart
//! additions.

use crate::cart::{AddItem, CartStore, MIN_QUANTITY};
use crate::error::CommerceError;
use crate::ids::{FinishId, GroupTag, LineItemId, ModuleId};
use modulo_cache::KeyValueStore;
use serde::{Deserialize, Serialize};

/// One module selection inside a proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalItem {
    pub module_id: ModuleId,
    pub front_finish_id: FinishId,
    pub sides_finish_id: FinishId,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    MIN_QUANTITY
}

impl ProposalItem {
    /// Create a selection.
    pub fn new(
        module_id: impl Into<ModuleId>,
        front: impl Into<FinishId>,
        sides: impl Into<FinishId>,
        quantity: u32,
    ) -> Self {
        Self {
            module_id: module_id.into(),
            front_finish_id: front.into(),
            sides_finish_id: sides.into(),
            quantity,
        }
    }
}

/// A generated design: selections that belong together at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignProposal {
    pub tag: GroupTag,
    #[serde(default)]
    pub items: Vec<ProposalItem>,
}

impl DesignProposal {
    /// An empty proposal.
    pub fn new(tag: impl Into<GroupTag>) -> Self {
        Self {
            tag: tag.into(),
            items: Vec::new(),
        }
    }

    /// Append a selection.
    pub fn with_item(mut self, item: ProposalItem) -> Self {
        self.items.push(item);
        self
    }

    /// Selections as tagged add candidates.
    pub fn candidates(&self) -> impl Iterator<Item = AddItem> + '_ {
        self.items.iter().map(|item| {
            AddItem::new(
                item.module_id.clone(),
                item.front_finish_id.clone(),
                item.sides_finish_id.clone(),
            )
            .quantity(item.quantity)
            .group(self.tag.clone())
        })
    }
}

impl<S: KeyValueStore> CartStore<S> {
    /// Add every selection of a proposal under its tag.
    ///
    /// All module ids are checked first; if any is unknown nothing is added.
    /// Returns the line item id for each selection, in proposal order.
    pub fn add_design(
        &mut self,
        proposal: &DesignProposal,
    ) -> Result<Vec<LineItemId>, CommerceError> {
        for item in &proposal.items {
            self.catalog().module(&item.module_id)?;
        }

        let ids = proposal
            .candidates()
            .map(|candidate| self.add(candidate))
            .collect::<Result<Vec<_>, _>>()?;

        self.logger()
            .info_builder("design added")
            .field("group_tag", proposal.tag.as_str())
            .field_u64("selections", ids.len() as u64)
            .emit();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use modulo_cache::MemoryStore;

    fn proposal() -> DesignProposal {
        DesignProposal::new("design-7")
            .with_item(ProposalItem::new("A", "light-wood", "light-wood", 2))
            .with_item(ProposalItem::new("E", "sage", "matte-white", 1))
    }

    #[test]
    fn test_add_design_tags_every_item() {
        let mut cart = CartStore::open(MemoryStore::new(), Catalog::standard());
        let ids = cart.add_design(&proposal()).unwrap();

        assert_eq!(ids.len(), 2);
        let items = cart.items();
        assert!(items
            .iter()
            .all(|i| i.group_tag.as_ref().map(|t| t.as_str()) == Some("design-7")));

        let groups = cart.grouped_view();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].label, "design-7");
    }

    #[test]
    fn test_add_design_twice_merges() {
        let mut cart = CartStore::open(MemoryStore::new(), Catalog::standard());
        let first = cart.add_design(&proposal()).unwrap();
        let second = cart.add_design(&proposal()).unwrap();

        assert_eq!(first, second);
        assert_eq!(cart.unique_item_count(), 2);
        assert_eq!(cart.items()[0].quantity, 4);
    }

    #[test]
    fn test_add_design_is_all_or_nothing() {
        let mut cart = CartStore::open(MemoryStore::new(), Catalog::standard());
        let bad = proposal().with_item(ProposalItem::new("Q", "sand", "sand", 1));

        assert!(matches!(
            cart.add_design(&bad),
            Err(CommerceError::ModuleNotFound(_))
        ));
        assert!(cart.is_empty());
    }

    #[test]
    fn test_proposal_from_json() {
        let proposal: DesignProposal = serde_json::from_str(
            r#"{"tag": "living-room", "items": [
                {"module_id": "B", "front_finish_id": "sand", "sides_finish_id": "sage"}
            ]}"#,
        )
        .unwrap();
        assert_eq!(proposal.items[0].quantity, 1);
        assert_eq!(proposal.candidates().count(), 1);
    }
}
