//! Strongly-typed item identifier.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of an item kind as known to the host's catalog.
///
/// Hosts deliver raw slot identifiers as signed integers where negative values
/// (conventionally `-1`) mark an empty slot. `ItemId` only ever holds a real,
/// non-negative identifier; use [`ItemId::from_raw`] at the host boundary.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(u32);

impl ItemId {
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Convert a raw host slot identifier; `None` for the empty-slot sentinel.
    pub fn from_raw(raw: i32) -> Option<Self> {
        u32::try_from(raw).ok().map(Self)
    }

    pub const fn get(self) -> u32 {
        self.0
    }
}

impl core::fmt::Display for ItemId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

impl From<u32> for ItemId {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<ItemId> for u32 {
    fn from(value: ItemId) -> Self {
        value.0
    }
}

impl FromStr for ItemId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let id = s
            .trim()
            .parse::<u32>()
            .map_err(|e| DomainError::validation(format!("ItemId: {s:?}: {e}")))?;
        Ok(Self(id))
    }
}
