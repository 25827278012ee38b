//! End-to-end cart scenarios against the in-memory backend.

use modulo_cache::{KeyValueStore, MemoryStore};
use modulo_commerce::cart::snapshot;
use modulo_commerce::checkout::{self, CheckoutSummary};
use modulo_commerce::prelude::*;

fn open(backend: &MemoryStore) -> CartStore<MemoryStore> {
    CartStore::open(backend.clone(), Catalog::standard())
}

#[test]
fn reference_price_and_merge() {
    let catalog = Catalog::standard();
    let engine = PricingEngine::new(&catalog);
    assert_eq!(
        engine
            .price_of(
                &ModuleId::new("A"),
                &FinishId::new("matte-white"),
                &FinishId::new("light-wood")
            )
            .unwrap(),
        Money::new(126)
    );

    let backend = MemoryStore::new();
    let mut cart = open(&backend);
    cart.add(AddItem::new("A", "matte-white", "light-wood").quantity(2))
        .unwrap();
    cart.add(AddItem::new("A", "matte-white", "light-wood").quantity(1))
        .unwrap();

    let items = cart.items();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].quantity, 3);
    assert_eq!(cart.total(), Money::new(378));
}

#[test]
fn stale_remove_leaves_cart_unchanged() {
    let backend = MemoryStore::new();
    let mut cart = open(&backend);
    cart.add(AddItem::new("B", "graphite", "graphite").group("design-7"))
        .unwrap();
    let before = cart.items();
    let stored_before = backend.get(DEFAULT_STORAGE_KEY).unwrap();

    assert!(!cart.remove_item(&LineItemId::new("li_stale")));

    assert_eq!(cart.items(), before);
    assert_eq!(backend.get(DEFAULT_STORAGE_KEY).unwrap(), stored_before);
}

#[test]
fn restore_ignores_unknown_fields() {
    let backend = MemoryStore::new();
    let mut cart = open(&backend);
    cart.add(AddItem::new("C", "sand", "sage").quantity(2)).unwrap();
    cart.add(AddItem::new("E", "graphite", "matte-white").group("design-7"))
        .unwrap();

    let mut records: serde_json::Value =
        serde_json::from_slice(&cart.snapshot().unwrap()).unwrap();
    for record in records.as_array_mut().unwrap() {
        record["assembly_notes"] = serde_json::json!("leave at the door");
    }
    let legacy = MemoryStore::new();
    legacy
        .set(DEFAULT_STORAGE_KEY, &serde_json::to_vec(&records).unwrap())
        .unwrap();

    let restored = open(&legacy);
    assert_eq!(restored.items(), cart.items());
}

#[test]
fn snapshot_roundtrip_reproduces_items() {
    let backend = MemoryStore::new();
    let mut cart = open(&backend);
    cart.add(AddItem::new("D", "sage", "sage")).unwrap();

    let bytes = cart.snapshot().unwrap();
    let (decoded, report) = snapshot::decode(&bytes, cart.catalog()).unwrap();
    assert!(report.is_clean());
    assert_eq!(decoded, cart.items());

    assert_eq!(open(&backend).items(), cart.items());
}

#[test]
fn missing_or_corrupt_snapshot_gives_empty_cart() {
    let empty = MemoryStore::new();
    assert!(open(&empty).is_empty());

    let corrupt = MemoryStore::new();
    corrupt.set(DEFAULT_STORAGE_KEY, &[0xff, 0x00, 0x13]).unwrap();
    let mut cart = open(&corrupt);
    assert!(cart.is_empty());

    // The first add into the recovered cart overwrites the bad snapshot.
    cart.add(AddItem::new("A", "sand", "sand")).unwrap();
    assert_eq!(open(&corrupt).items(), cart.items());
}

#[test]
fn design_then_catalog_purchase_then_checkout() {
    let backend = MemoryStore::new();
    let mut cart = open(&backend);

    let design = DesignProposal::new("design-7")
        .with_item(ProposalItem::new("A", "light-wood", "light-wood", 2))
        .with_item(ProposalItem::new("B", "graphite", "graphite", 1));
    cart.add_design(&design).unwrap();
    let single = cart
        .add(AddItem::new("A", "light-wood", "light-wood"))
        .unwrap();
    cart.set_quantity_delta(&single, 2);

    let summary = CheckoutSummary::from_store(&cart);
    let labels: Vec<&str> = summary.groups.iter().map(|g| g.label.as_str()).collect();
    assert_eq!(labels, vec!["design-7", DEFAULT_UNGROUPED_LABEL]);

    // A light-wood/light-wood: round(120 × 1.05 × 1.05) = round(132.3) = 132
    assert_eq!(cart.group_total("design-7"), Money::new(2 * 132 + 157));
    assert_eq!(cart.group_total(DEFAULT_UNGROUPED_LABEL), Money::new(3 * 132));
    assert_eq!(summary.total, Money::new(2 * 132 + 157 + 3 * 132));
    assert_eq!(summary.item_count, 6);

    let receipt = checkout::pay(&mut cart).unwrap();
    assert_eq!(receipt.total, summary.total);
    assert!(cart.is_empty());
    assert!(open(&backend).is_empty());
}

#[test]
fn display_names_use_catalog_labels() {
    let mut cart = open(&MemoryStore::new());
    let id = cart.add(AddItem::new("E", "sage", "sand")).unwrap();
    let item = cart.get(&id).unwrap();
    assert_eq!(
        item.display_name(cart.catalog()).unwrap(),
        "Module E – Front Sage green / Sides Sand"
    );
}
