//! Snapshot input types as delivered by the host.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stashlens_core::ItemId;

/// Raw identifier the host uses for an unoccupied slot.
pub const EMPTY_SLOT: i32 = -1;

/// One `(identifier, quantity)` record within a snapshot.
///
/// The raw identifier is kept exactly as the host sent it so a snapshot can be
/// echoed back (e.g. by [`crate::InventoryEngine::sort_by_value`]) without
/// losing slots.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub id: i32,
    pub quantity: i64,
}

impl ItemStack {
    pub fn new(id: i32, quantity: i64) -> Self {
        Self { id, quantity }
    }

    pub fn empty() -> Self {
        Self::new(EMPTY_SLOT, 0)
    }

    /// The item this stack holds, or `None` for an empty slot.
    ///
    /// Stacks with a non-positive quantity are treated as empty as well.
    pub fn item_id(&self) -> Option<ItemId> {
        if self.quantity <= 0 {
            return None;
        }
        ItemId::from_raw(self.id)
    }
}

/// Point-in-time read of every slot in a container.
///
/// May contain the same identifier more than once (split stacks).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    stacks: Vec<ItemStack>,
}

impl Snapshot {
    pub fn new(stacks: Vec<ItemStack>) -> Self {
        Self { stacks }
    }

    /// Build a snapshot from `(raw id, quantity)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (i32, i64)>) -> Self {
        Self::new(
            pairs
                .into_iter()
                .map(|(id, quantity)| ItemStack::new(id, quantity))
                .collect(),
        )
    }

    pub fn stacks(&self) -> &[ItemStack] {
        &self.stacks
    }

    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    /// True when no slot holds an item.
    pub fn is_effectively_empty(&self) -> bool {
        self.stacks.iter().all(|s| s.item_id().is_none())
    }

    /// Quantity per distinct item, duplicates summed, empty slots skipped.
    pub fn merged(&self) -> BTreeMap<ItemId, i64> {
        let mut merged = BTreeMap::new();
        for stack in &self.stacks {
            if let Some(id) = stack.item_id() {
                let slot = merged.entry(id).or_insert(0i64);
                *slot = slot.saturating_add(stack.quantity);
            }
        }
        merged
    }
}

impl FromIterator<ItemStack> for Snapshot {
    fn from_iter<I: IntoIterator<Item = ItemStack>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
