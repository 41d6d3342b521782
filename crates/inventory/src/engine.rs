//! Inventory analytics engine.
//!
//! Recomputes a [`Summary`] from each snapshot, keeps the current/previous pair
//! for change detection, and answers ad-hoc queries against a snapshot.
//!
//! State lives in an [`EngineState`] value that is swapped wholesale on every
//! recompute. Readers clone the `Arc` and never see a current summary paired
//! with a previous one from a different recompute.

use std::cmp::Reverse;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;

use stashlens_core::{DomainResult, ItemId};

use crate::catalog::{CatalogLookup, SnapshotSource};
use crate::category::MISCELLANEOUS;
use crate::classifier::Classifier;
use crate::detection::{
    Utilization, ValueChange, ensure_non_negative_threshold, ensure_percent,
    ensure_positive_threshold,
};
use crate::format::Grouping;
use crate::stack::{ItemStack, Snapshot};
use crate::summary::Summary;

/// Whether the engine currently reflects a non-empty container.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Empty,
    Populated,
}

/// Two-slot state: the latest summary and the one before it.
///
/// `previous` is `None` ("unset") until two populated recomputes have happened
/// in a row; an empty recompute clears it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineState {
    phase: Phase,
    current: Summary,
    previous: Option<Summary>,
    warning_issued: bool,
}

impl EngineState {
    fn initial() -> Self {
        Self {
            phase: Phase::Empty,
            current: Summary::empty(),
            previous: None,
            warning_issued: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current(&self) -> &Summary {
        &self.current
    }

    pub fn previous(&self) -> Option<&Summary> {
        self.previous.as_ref()
    }

    pub fn warning_issued(&self) -> bool {
        self.warning_issued
    }

    fn with_warning_issued(&self, warning_issued: bool) -> Self {
        Self {
            warning_issued,
            ..self.clone()
        }
    }
}

/// Distinct items whose total value met a threshold.
///
/// Ordered by descending value, ties broken by ascending identifier, so any
/// "first N" truncation by the host is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValuableItems {
    items: Vec<(ItemId, i64)>,
}

impl ValuableItems {
    fn from_unsorted(mut items: Vec<(ItemId, i64)>) -> Self {
        items.sort_by_key(|&(id, value)| (Reverse(value), id));
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: ItemId) -> Option<i64> {
        self.items.iter().find(|(i, _)| *i == id).map(|&(_, v)| v)
    }

    pub fn contains(&self, id: ItemId) -> bool {
        self.get(id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ItemId, i64)> + '_ {
        self.items.iter().copied()
    }

    /// At most `n` entries from the top.
    pub fn top(&self, n: usize) -> &[(ItemId, i64)] {
        &self.items[..n.min(self.items.len())]
    }

    pub fn into_map(self) -> BTreeMap<ItemId, i64> {
        self.items.into_iter().collect()
    }
}

/// The analytics engine over a host-injected catalog.
#[derive(Debug)]
pub struct InventoryEngine<C> {
    classifier: Classifier,
    catalog: C,
    grouping: Grouping,
    state: RwLock<Arc<EngineState>>,
}

impl<C> InventoryEngine<C>
where
    C: CatalogLookup,
{
    /// Engine with the built-in category table and name rules.
    pub fn new(catalog: C) -> Self {
        Self::with_classifier(catalog, Classifier::standard())
    }

    pub fn with_classifier(catalog: C, classifier: Classifier) -> Self {
        Self {
            classifier,
            catalog,
            grouping: Grouping::default(),
            state: RwLock::new(Arc::new(EngineState::initial())),
        }
    }

    pub fn with_grouping(mut self, grouping: Grouping) -> Self {
        self.grouping = grouping;
        self
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    // -------------------------------------------------------------------------
    // Recompute
    // -------------------------------------------------------------------------

    /// Recompute the summary for `snapshot` (`None`: no container) and publish it.
    ///
    /// The previous current summary becomes `previous` only if the engine was
    /// populated; an absent or all-empty snapshot moves the engine to
    /// [`Phase::Empty`], clears `previous` and clears the warning flag.
    pub fn recompute(&self, snapshot: Option<&Snapshot>) -> Summary {
        let summary = match snapshot {
            Some(s) if !s.is_effectively_empty() => self.summarize(s),
            _ => Summary::empty(),
        };

        self.replace_state(|old| {
            if summary.is_empty() {
                tracing::debug!("container absent or empty; engine state reset");
                EngineState::initial()
            } else {
                let previous = match old.phase {
                    Phase::Populated => Some(old.current.clone()),
                    Phase::Empty => None,
                };
                EngineState {
                    phase: Phase::Populated,
                    current: summary.clone(),
                    previous,
                    warning_issued: old.warning_issued,
                }
            }
        });

        tracing::debug!(
            total_value = summary.total_value,
            total_items = summary.total_items,
            unique_items = summary.unique_items,
            "inventory summary recomputed"
        );

        summary
    }

    /// Poll `source` and recompute from whatever it returns.
    pub fn refresh<S>(&self, source: &S) -> Summary
    where
        S: SnapshotSource + ?Sized,
    {
        let snapshot = source.current_snapshot();
        self.recompute(snapshot.as_ref())
    }

    fn summarize(&self, snapshot: &Snapshot) -> Summary {
        let merged = snapshot.merged();
        let mut summary = Summary::empty();

        for (&id, &quantity) in &merged {
            let value = self.value_of(id, quantity);

            summary.total_value = summary.total_value.saturating_add(value);
            summary.total_items = summary.total_items.saturating_add(quantity);
            summary.unique_items += 1;
            if value != 0 {
                let category = self.classifier.categorize(id, &self.catalog);
                let slot = summary
                    .category_value
                    .entry(category.to_string())
                    .or_insert(0);
                *slot = slot.saturating_add(value);
            }
        }

        summary.per_item_quantity = merged;
        summary
    }

    fn value_of(&self, id: ItemId, quantity: i64) -> i64 {
        self.catalog.price_of(id).saturating_mul(quantity)
    }

    fn replace_state(&self, next: impl FnOnce(&EngineState) -> EngineState) {
        let mut guard = match self.state.write() {
            Ok(g) => g,
            Err(poisoned) => poisoned.into_inner(),
        };
        let replacement = next(&guard);
        *guard = Arc::new(replacement);
    }

    // -------------------------------------------------------------------------
    // Pure queries
    // -------------------------------------------------------------------------

    /// Distinct items whose merged value is at least `threshold`.
    pub fn find_valuable(&self, snapshot: &Snapshot, threshold: i64) -> DomainResult<ValuableItems> {
        ensure_non_negative_threshold("valuable threshold", threshold)?;

        let items = snapshot
            .merged()
            .into_iter()
            .map(|(id, quantity)| (id, self.value_of(id, quantity)))
            .filter(|&(_, value)| value >= threshold)
            .collect();

        Ok(ValuableItems::from_unsorted(items))
    }

    /// Total value of the snapshot's items in `category`; zero if unknown.
    pub fn category_value(&self, snapshot: &Snapshot, category: &str) -> i64 {
        snapshot
            .merged()
            .into_iter()
            .filter(|&(id, _)| self.classifier.categorize(id, &self.catalog) == category)
            .fold(0i64, |acc, (id, quantity)| {
                acc.saturating_add(self.value_of(id, quantity))
            })
    }

    /// Static category names plus [`MISCELLANEOUS`] with their totals, in table order.
    pub fn category_breakdown(&self, snapshot: &Snapshot) -> Vec<(String, i64)> {
        let summary = self.summarize(snapshot);
        self.classifier
            .list_categories()
            .into_iter()
            .chain(core::iter::once(MISCELLANEOUS))
            .map(|name| (name.to_string(), summary.category_value(name)))
            .collect()
    }

    pub fn list_categories(&self) -> Vec<&str> {
        self.classifier.list_categories()
    }

    /// Occupied slots sorted by unit price (stable for equal prices).
    pub fn sort_by_value(&self, snapshot: &Snapshot, ascending: bool) -> Vec<ItemStack> {
        let mut priced: Vec<(i64, ItemStack)> = snapshot
            .stacks()
            .iter()
            .filter_map(|s| s.item_id().map(|id| (self.catalog.price_of(id), *s)))
            .collect();
        if ascending {
            priced.sort_by_key(|&(price, _)| price);
        } else {
            priced.sort_by_key(|&(price, _)| Reverse(price));
        }
        priced.into_iter().map(|(_, s)| s).collect()
    }

    /// Occupied slots sorted by display name (stable for equal names).
    pub fn sort_by_name(&self, snapshot: &Snapshot) -> Vec<ItemStack> {
        let mut named: Vec<(String, ItemStack)> = snapshot
            .stacks()
            .iter()
            .filter_map(|s| s.item_id().map(|id| (self.catalog.name_of(id), *s)))
            .collect();
        named.sort_by(|a, b| a.0.cmp(&b.0));
        named.into_iter().map(|(_, s)| s).collect()
    }

    // -------------------------------------------------------------------------
    // Change detection
    // -------------------------------------------------------------------------

    /// Compare the current total value with the previous one.
    ///
    /// `None` when there is no previous summary or the change is smaller than
    /// `threshold_abs`. Fails for a non-positive threshold.
    pub fn detect_value_change(&self, threshold_abs: i64) -> DomainResult<Option<ValueChange>> {
        ensure_positive_threshold("value change threshold", threshold_abs)?;

        let state = self.state();
        let Some(previous) = state.previous() else {
            return Ok(None);
        };
        Ok(ValueChange::between(
            previous.total_value,
            state.current.total_value,
            threshold_abs,
        ))
    }

    /// Whether distinct items fill at least `threshold_percent` of `capacity`.
    ///
    /// Not rate-limited: a sustained over-threshold state reports `true` on
    /// every call. Callers suppress repeats with [`Self::warning_issued`].
    pub fn detect_capacity_warning(&self, capacity: i64, threshold_percent: u8) -> DomainResult<bool> {
        ensure_percent(threshold_percent)?;
        Ok(self.space_utilization(capacity)?.reaches(threshold_percent))
    }

    pub fn space_utilization(&self, capacity: i64) -> DomainResult<Utilization> {
        Utilization::new(self.unique_items(), capacity)
    }

    /// Start a new observation window (e.g. the container was reopened).
    pub fn reset_warning_flag(&self) {
        self.replace_state(|old| old.with_warning_issued(false));
    }

    pub fn mark_warning_issued(&self) {
        self.replace_state(|old| old.with_warning_issued(true));
    }

    // -------------------------------------------------------------------------
    // Read accessors
    // -------------------------------------------------------------------------

    /// Consistent view of the current/previous pair.
    pub fn state(&self) -> Arc<EngineState> {
        match self.state.read() {
            Ok(g) => Arc::clone(&g),
            Err(poisoned) => Arc::clone(&poisoned.into_inner()),
        }
    }

    pub fn summary(&self) -> Summary {
        self.state().current.clone()
    }

    pub fn phase(&self) -> Phase {
        self.state().phase
    }

    pub fn warning_issued(&self) -> bool {
        self.state().warning_issued
    }

    pub fn total_value(&self) -> i64 {
        self.state().current.total_value
    }

    pub fn total_items(&self) -> i64 {
        self.state().current.total_items
    }

    pub fn unique_items(&self) -> i64 {
        self.state().current.unique_items
    }

    /// Current total value as a grouped decimal string (e.g. `2,008,000`).
    pub fn formatted_value(&self) -> String {
        self.grouping.format(self.total_value())
    }

    pub fn format_value(&self, value: i64) -> String {
        self.grouping.format(value)
    }

    pub fn grouping(&self) -> Grouping {
        self.grouping
    }
}
