//! Static category table: named groups of item identifiers.
//!
//! The table is immutable once built and validated at construction time, so
//! an identifier can never belong to two categories.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use stashlens_core::{DomainError, DomainResult, ItemId};

/// Category for items no static entry or name rule claims.
pub const MISCELLANEOUS: &str = "Miscellaneous";

/// A named set of identifiers that belong to the category by definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    pub items: BTreeSet<ItemId>,
}

impl Category {
    pub fn new(name: impl Into<String>, items: impl IntoIterator<Item = u32>) -> Self {
        Self {
            name: name.into(),
            items: items.into_iter().map(ItemId::new).collect(),
        }
    }
}

/// Ordered, validated list of categories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    categories: Vec<Category>,
    index: BTreeMap<ItemId, usize>,
}

impl CategoryTable {
    /// Build a table, rejecting overlapping identifier sets and bad names.
    pub fn new(categories: Vec<Category>) -> DomainResult<Self> {
        let mut index = BTreeMap::new();

        for (pos, category) in categories.iter().enumerate() {
            let name = category.name.trim();
            if name.is_empty() {
                return Err(DomainError::configuration("category name cannot be empty"));
            }
            if name.eq_ignore_ascii_case(MISCELLANEOUS) {
                return Err(DomainError::configuration(format!(
                    "{MISCELLANEOUS} is reserved for unclassified items"
                )));
            }
            if categories[..pos].iter().any(|c| c.name == category.name) {
                return Err(DomainError::configuration(format!(
                    "category {} is declared twice",
                    category.name
                )));
            }
            for &id in &category.items {
                if let Some(&other) = index.get(&id) {
                    let other: &Category = &categories[other];
                    return Err(DomainError::configuration(format!(
                        "item {id} is listed in both {} and {}",
                        other.name, category.name
                    )));
                }
                index.insert(id, pos);
            }
        }

        Ok(Self { categories, index })
    }

    /// Load from a JSON array of `{ "name", "items": [ids] }` objects.
    pub fn from_json(json: &str) -> DomainResult<Self> {
        let categories: Vec<Category> = serde_json::from_str(json)
            .map_err(|e| DomainError::configuration(format!("category table: {e}")))?;
        Self::new(categories)
    }

    /// The built-in table. Its membership is disjoint, so it is indexed
    /// directly; `standard_table_passes_validation` keeps that true.
    pub fn standard() -> Self {
        let categories = standard_categories();
        let index = categories
            .iter()
            .enumerate()
            .flat_map(|(pos, c)| c.items.iter().map(move |&id| (id, pos)))
            .collect();
        Self { categories, index }
    }

    /// Category that lists `id`, if any.
    pub fn lookup(&self, id: ItemId) -> Option<&str> {
        self.index
            .get(&id)
            .map(|&pos| self.categories[pos].name.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.categories.iter().any(|c| c.name == name)
    }

    /// Category names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

impl Default for CategoryTable {
    fn default() -> Self {
        Self::standard()
    }
}

fn standard_categories() -> Vec<Category> {
    vec![
        Category::new(
            "Combat",
            [
                4151,  // Abyssal whip
                4587,  // Dragon scimitar
                1333,  // Rune scimitar
                1127,  // Rune platebody
                21892, // Dragon platebody
                7462,  // Barrows gloves
                11840, // Dragon boots
                4131,  // Rune boots
                11126, // Combat bracelet
            ],
        ),
        Category::new(
            "Skilling",
            [
                11920, // Dragon pickaxe
                1275,  // Rune pickaxe
                6739,  // Dragon axe
                1359,  // Rune axe
                21028, // Dragon harpoon
                301,   // Lobster pot
                303,   // Small fishing net
                309,   // Fly fishing rod
            ],
        ),
        Category::new(
            "Potions",
            [
                12695, // Super combat potion(4)
                2436,  // Super attack(4)
                2440,  // Super strength(4)
                2442,  // Super defence(4)
                2444,  // Ranging potion(4)
                3040,  // Magic potion(4)
                2434,  // Prayer potion(4)
                3024,  // Super restore(4)
                2452,  // Antifire potion(4)
            ],
        ),
        Category::new(
            "Food",
            [
                385,  // Shark
                379,  // Lobster
                373,  // Swordfish
                361,  // Tuna
                329,  // Salmon
                333,  // Trout
                7946, // Monkfish
                3144, // Cooked karambwan
            ],
        ),
        Category::new(
            "Magic",
            [
                561, 563, 560, 565, 566, 564, // nature, law, death, blood, soul, cosmic
                562, 554, 555, 556, 557, 558, // chaos, fire, water, air, earth, mind
            ],
        ),
        Category::new(
            "Smithing",
            [
                440, 453, 444, 447, 449, 451, // iron, coal, gold, mithril, adamantite, runite ore
                2351, 2353, 2357, 2359, 2361, 2363, // iron, steel, gold, mithril, adamantite, runite bar
            ],
        ),
        Category::new(
            "Woodcutting",
            [1511, 1521, 1519, 1517, 1515, 1513, 19669],
        ),
        Category::new(
            "Farming",
            [
                5318, 5319, 5324, 5322, 5320, 5323, // potato .. strawberry
                5321, 5295, 5300, 5304, 5313, // watermelon, ranarr, snapdragon, torstol, willow
            ],
        ),
    ]
}
