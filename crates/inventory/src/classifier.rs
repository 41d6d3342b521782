//! Item classification: static table first, then display-name rules.

use stashlens_core::{DomainError, DomainResult, ItemId};

use crate::catalog::CatalogLookup;
use crate::category::{CategoryTable, MISCELLANEOUS};

/// Name rule: any needle found in the lower-cased display name selects `category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackRule {
    needles: Vec<String>,
    category: String,
}

impl FallbackRule {
    pub fn new<S: Into<String>>(needles: impl IntoIterator<Item = S>, category: impl Into<String>) -> Self {
        Self {
            needles: needles
                .into_iter()
                .map(|n| n.into().to_lowercase())
                .collect(),
            category: category.into(),
        }
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    fn matches(&self, lowered_name: &str) -> bool {
        self.needles.iter().any(|n| lowered_name.contains(n.as_str()))
    }
}

/// Rules in priority order; the first match wins.
pub fn standard_rules() -> Vec<FallbackRule> {
    vec![
        FallbackRule::new(["potion"], "Potions"),
        FallbackRule::new(["rune"], "Magic"),
        FallbackRule::new(["ore", "bar"], "Smithing"),
        FallbackRule::new(["log"], "Woodcutting"),
        FallbackRule::new(["seed"], "Farming"),
        FallbackRule::new(["fish", "food"], "Food"),
    ]
}

/// Deterministic, total mapping from item identifier to category name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classifier {
    table: CategoryTable,
    rules: Vec<FallbackRule>,
}

impl Classifier {
    /// Every rule must name a category from `table`, so that the static
    /// categories plus [`MISCELLANEOUS`] partition all items.
    pub fn new(table: CategoryTable, rules: Vec<FallbackRule>) -> DomainResult<Self> {
        if let Some(rule) = rules.iter().find(|r| !table.contains(&r.category)) {
            return Err(DomainError::configuration(format!(
                "fallback rule targets unknown category {}",
                rule.category
            )));
        }
        Ok(Self { table, rules })
    }

    pub fn standard() -> Self {
        Self {
            table: CategoryTable::standard(),
            rules: standard_rules(),
        }
    }

    /// Category of `id`. Asks the catalog for the display name at most once,
    /// and only when the static table has no entry.
    pub fn categorize<C>(&self, id: ItemId, catalog: &C) -> &str
    where
        C: CatalogLookup + ?Sized,
    {
        self.categorize_with(id, || catalog.name_of(id))
    }

    /// Like [`Classifier::categorize`] with the name supplied lazily by the caller.
    pub fn categorize_with(&self, id: ItemId, name: impl FnOnce() -> String) -> &str {
        if let Some(category) = self.table.lookup(id) {
            return category;
        }
        self.categorize_name(&name()).unwrap_or(MISCELLANEOUS)
    }

    /// Category chosen by the name rules alone.
    pub fn categorize_name(&self, name: &str) -> Option<&str> {
        let lowered = name.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.category.as_str())
    }

    /// Statically defined category names, in table order.
    pub fn list_categories(&self) -> Vec<&str> {
        self.table.names().collect()
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    pub fn rules(&self) -> &[FallbackRule] {
        &self.rules
    }
}

impl Default for Classifier {
    fn default() -> Self {
        Self::standard()
    }
}
