//! Host-provided collaborators: the item catalog and the snapshot source.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use stashlens_core::ItemId;

use crate::stack::Snapshot;

/// Name reported for identifiers the catalog does not know.
pub const UNKNOWN_ITEM_NAME: &str = "Unknown item";

/// Source of item display names and current unit prices.
///
/// Implementations must be total: unknown or untradeable items price at 0 and
/// get a placeholder name. The engine looks prices up once per distinct item on
/// every recompute and never caches them across snapshots.
pub trait CatalogLookup {
    fn price_of(&self, id: ItemId) -> i64;
    fn name_of(&self, id: ItemId) -> String;
}

impl<T> CatalogLookup for &T
where
    T: CatalogLookup + ?Sized,
{
    fn price_of(&self, id: ItemId) -> i64 {
        (**self).price_of(id)
    }

    fn name_of(&self, id: ItemId) -> String {
        (**self).name_of(id)
    }
}

impl<T> CatalogLookup for Arc<T>
where
    T: CatalogLookup + ?Sized,
{
    fn price_of(&self, id: ItemId) -> i64 {
        (**self).price_of(id)
    }

    fn name_of(&self, id: ItemId) -> String {
        (**self).name_of(id)
    }
}

/// Catalog record for [`StaticCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub id: ItemId,
    pub name: String,
    #[serde(default)]
    pub price: i64,
}

/// In-memory catalog for tests, demos and hosts with a fixed price list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticCatalog {
    entries: BTreeMap<ItemId, CatalogEntry>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_item(mut self, id: u32, name: impl Into<String>, price: i64) -> Self {
        self.insert(CatalogEntry {
            id: ItemId::new(id),
            name: name.into(),
            price,
        });
        self
    }

    pub fn insert(&mut self, entry: CatalogEntry) {
        self.entries.insert(entry.id, entry);
    }

    /// Replace the price of a known item (prices move between snapshots).
    pub fn set_price(&mut self, id: ItemId, price: i64) {
        if let Some(entry) = self.entries.get_mut(&id) {
            entry.price = price;
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Load from a JSON array of `{ "id", "name", "price" }` records.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<CatalogEntry> = serde_json::from_str(json)?;
        Ok(entries.into_iter().collect())
    }
}

impl FromIterator<CatalogEntry> for StaticCatalog {
    fn from_iter<I: IntoIterator<Item = CatalogEntry>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for entry in iter {
            catalog.insert(entry);
        }
        catalog
    }
}

impl CatalogLookup for StaticCatalog {
    fn price_of(&self, id: ItemId) -> i64 {
        self.entries.get(&id).map(|e| e.price).unwrap_or(0)
    }

    fn name_of(&self, id: ItemId) -> String {
        self.entries
            .get(&id)
            .map(|e| e.name.clone())
            .unwrap_or_else(|| UNKNOWN_ITEM_NAME.to_string())
    }
}

/// Where the host reads the container from; `None` means "no container".
pub trait SnapshotSource {
    fn current_snapshot(&self) -> Option<Snapshot>;
}

impl SnapshotSource for Option<Snapshot> {
    fn current_snapshot(&self) -> Option<Snapshot> {
        self.clone()
    }
}

impl SnapshotSource for Snapshot {
    fn current_snapshot(&self) -> Option<Snapshot> {
        Some(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_items_price_at_zero_with_placeholder_name() {
        let catalog = StaticCatalog::new().with_item(4151, "Abyssal whip", 1_500_000);

        assert_eq!(catalog.price_of(ItemId::new(4151)), 1_500_000);
        assert_eq!(catalog.name_of(ItemId::new(4151)), "Abyssal whip");
        assert_eq!(catalog.price_of(ItemId::new(99_999)), 0);
        assert_eq!(catalog.name_of(ItemId::new(99_999)), UNKNOWN_ITEM_NAME);
    }

    #[test]
    fn loads_from_json_and_defaults_missing_price() {
        let catalog = StaticCatalog::from_json(
            r#"[{"id": 385, "name": "Shark", "price": 900}, {"id": 526, "name": "Bones"}]"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.price_of(ItemId::new(385)), 900);
        assert_eq!(catalog.price_of(ItemId::new(526)), 0);
    }

    #[test]
    fn set_price_updates_known_items_only() {
        let mut catalog = StaticCatalog::new().with_item(385, "Shark", 900);
        catalog.set_price(ItemId::new(385), 1_100);
        catalog.set_price(ItemId::new(4151), 1_500_000);

        assert_eq!(catalog.price_of(ItemId::new(385)), 1_100);
        assert_eq!(catalog.price_of(ItemId::new(4151)), 0);
    }

    #[test]
    fn lookups_work_through_shared_handles() {
        let catalog = Arc::new(StaticCatalog::new().with_item(561, "Nature rune", 180));
        let by_ref: &dyn CatalogLookup = &*catalog;

        assert_eq!(catalog.price_of(ItemId::new(561)), 180);
        assert_eq!(by_ref.name_of(ItemId::new(561)), "Nature rune");
    }

    #[test]
    fn optional_snapshot_is_a_source() {
        let none: Option<Snapshot> = None;
        assert!(none.current_snapshot().is_none());

        let some = Some(Snapshot::from_pairs([(1, 1)]));
        assert_eq!(some.current_snapshot().map(|s| s.len()), Some(1));
    }
}
