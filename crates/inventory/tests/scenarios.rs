//! Black-box scenarios through the public engine API.

use stashlens_core::{DomainError, ItemId};
use stashlens_inventory::{
    CatalogLookup, Direction, EMPTY_SLOT, InventoryEngine, MISCELLANEOUS, Phase, Snapshot,
    StaticCatalog, Summary, ValueChange,
};

fn engine() -> InventoryEngine<StaticCatalog> {
    InventoryEngine::new(
        StaticCatalog::new()
            .with_item(1, "Bronze dagger", 1_000)
            .with_item(2, "Twisted bow", 2_000_000)
            .with_item(3, "Gold bar", 150),
    )
}

#[test]
fn split_stacks_are_merged_before_counting() {
    let engine = engine();
    let snapshot = Snapshot::from_pairs([(1, 5), (2, 1), (1, 3)]);

    let summary = engine.recompute(Some(&snapshot));

    assert_eq!(summary.total_items(), 9);
    assert_eq!(summary.unique_items(), 2);
    assert_eq!(summary.total_value(), 2_008_000);
    assert_eq!(engine.total_items(), 9);
    assert_eq!(engine.unique_items(), 2);
    assert_eq!(engine.total_value(), 2_008_000);
    assert_eq!(engine.formatted_value(), "2,008,000");
}

#[test]
fn value_change_between_recomputes() {
    let catalog = StaticCatalog::new().with_item(10, "Coins", 1);
    let engine = InventoryEngine::new(catalog);

    engine.recompute(Some(&Snapshot::from_pairs([(10, 1_000_000)])));
    engine.recompute(Some(&Snapshot::from_pairs([(10, 2_500_000)])));

    assert_eq!(
        engine.detect_value_change(1_000_000),
        Ok(Some(ValueChange {
            direction: Direction::Increased,
            magnitude: 1_500_000,
        }))
    );
    assert_eq!(engine.detect_value_change(2_000_000), Ok(None));

    engine.recompute(Some(&Snapshot::from_pairs([(10, 100_000)])));
    assert_eq!(
        engine.detect_value_change(1_000_000),
        Ok(Some(ValueChange {
            direction: Direction::Decreased,
            magnitude: 2_400_000,
        }))
    );
}

#[test]
fn capacity_warning_at_ninety_percent() {
    let engine = InventoryEngine::new(StaticCatalog::new());
    engine.recompute(Some(&Snapshot::from_pairs((1..=750).map(|id| (id, 1)))));

    assert_eq!(engine.unique_items(), 750);
    assert_eq!(engine.detect_capacity_warning(816, 90), Ok(true));
    assert_eq!(engine.space_utilization(816).map(|u| u.to_string()), Ok("91.9%".to_string()));

    engine.reset_warning_flag();
    assert_eq!(engine.detect_capacity_warning(816, 90), Ok(true));

    assert!(matches!(
        engine.detect_capacity_warning(-1, 90),
        Err(DomainError::InvalidParameter(_))
    ));
}

#[test]
fn empty_or_missing_container_is_all_zero() {
    let engine = engine();
    let empty = Snapshot::from_pairs([(EMPTY_SLOT, 0), (EMPTY_SLOT, 0)]);

    for snapshot in [None, Some(&empty), Some(&Snapshot::default())] {
        engine.recompute(Some(&Snapshot::from_pairs([(2, 1)])));
        let summary = engine.recompute(snapshot);

        assert_eq!(summary, Summary::empty());
        assert_eq!(engine.phase(), Phase::Empty);
        assert_eq!(engine.detect_value_change(1), Ok(None));
    }

    for threshold in [0, 1, 1_000_000] {
        assert!(engine.find_valuable(&empty, threshold).unwrap().is_empty());
    }
}

#[test]
fn unknown_items_count_but_are_worthless() {
    let engine = engine();
    let snapshot = Snapshot::from_pairs([(424_242, 3), (1, 1)]);

    let summary = engine.recompute(Some(&snapshot));

    assert_eq!(summary.unique_items(), 2);
    assert_eq!(summary.total_items(), 4);
    assert_eq!(summary.total_value(), 1_000);
    assert_eq!(engine.catalog().price_of(ItemId::new(424_242)), 0);
    assert_eq!(engine.category_value(&snapshot, MISCELLANEOUS), 1_000);
}

#[test]
fn category_values_partition_the_total() {
    let engine = engine();
    let snapshot = Snapshot::from_pairs([(1, 2), (2, 1), (3, 40), (3, 2)]);
    let summary = engine.recompute(Some(&snapshot));

    let total: i64 = engine
        .list_categories()
        .into_iter()
        .chain([MISCELLANEOUS])
        .map(|c| engine.category_value(&snapshot, c))
        .sum();

    assert_eq!(total, summary.total_value());
    assert_eq!(engine.category_value(&snapshot, "Smithing"), 6_300);
    assert_eq!(summary.category_value("Smithing"), 6_300);
}
