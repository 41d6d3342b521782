//! Inventory analytics for a host-observed container.
//!
//! This crate contains the classification, aggregation and change-detection
//! rules, implemented as deterministic logic over injected collaborators
//! (catalog lookup, snapshot source). No IO, no rendering.

pub mod catalog;
pub mod category;
pub mod classifier;
pub mod config;
pub mod detection;
pub mod engine;
pub mod format;
pub mod monitor;
pub mod stack;
pub mod summary;

pub use catalog::{CatalogEntry, CatalogLookup, SnapshotSource, StaticCatalog, UNKNOWN_ITEM_NAME};
pub use category::{Category, CategoryTable, MISCELLANEOUS};
pub use classifier::{Classifier, FallbackRule};
pub use config::{DEFAULT_CAPACITY, EngineConfig};
pub use detection::{Direction, Utilization, ValueChange};
pub use engine::{EngineState, InventoryEngine, Phase, ValuableItems};
pub use format::Grouping;
pub use monitor::{ContainerMonitor, Notice};
pub use stack::{EMPTY_SLOT, ItemStack, Snapshot};
pub use summary::Summary;
