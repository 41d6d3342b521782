//! Aggregate statistics derived from one snapshot.

use std::collections::BTreeMap;

use serde::Serialize;

use stashlens_core::ItemId;

/// Derived, immutable statistics for a snapshot.
///
/// Built fresh by [`crate::InventoryEngine::recompute`]; never mutated in place.
/// `category_value` only carries categories with a non-zero total.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub(crate) total_value: i64,
    pub(crate) total_items: i64,
    pub(crate) unique_items: i64,
    pub(crate) per_item_quantity: BTreeMap<ItemId, i64>,
    pub(crate) category_value: BTreeMap<String, i64>,
}

impl Summary {
    /// The all-zero summary of an absent or empty container.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn total_value(&self) -> i64 {
        self.total_value
    }

    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    pub fn unique_items(&self) -> i64 {
        self.unique_items
    }

    pub fn per_item_quantity(&self) -> &BTreeMap<ItemId, i64> {
        &self.per_item_quantity
    }

    pub fn quantity_of(&self, id: ItemId) -> i64 {
        self.per_item_quantity.get(&id).copied().unwrap_or(0)
    }

    /// Non-zero category totals, keyed by category name.
    pub fn category_values(&self) -> &BTreeMap<String, i64> {
        &self.category_value
    }

    /// Total for one category; zero if unknown or empty.
    pub fn category_value(&self, category: &str) -> i64 {
        self.category_value.get(category).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.unique_items == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_summary_is_all_zero() {
        let summary = Summary::empty();
        assert!(summary.is_empty());
        assert_eq!(summary.total_value(), 0);
        assert_eq!(summary.total_items(), 0);
        assert_eq!(summary.unique_items(), 0);
        assert_eq!(summary.category_value("Combat"), 0);
        assert_eq!(summary.quantity_of(ItemId::new(1)), 0);
    }

    #[test]
    fn serializes_for_display() {
        let mut summary = Summary::empty();
        summary.total_value = 8_000;
        summary.total_items = 8;
        summary.unique_items = 1;
        summary.per_item_quantity.insert(ItemId::new(1), 8);
        summary.category_value.insert("Food".to_string(), 8_000);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["total_value"], 8_000);
        assert_eq!(json["per_item_quantity"]["1"], 8);
        assert_eq!(json["category_value"]["Food"], 8_000);
    }
}
