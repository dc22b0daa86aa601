//! Item definitions and the company inventory.

use crate::error::ValidationError;
use crate::ids::ItemId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Broad item families used for contract sizing and display.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ItemCategory {
    /// Raw resource, never manufactured.
    Base,
    Component,
    Appliance,
    Electronic,
}

/// One ingredient line of a recipe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipeInput {
    pub item: ItemId,
    /// Units consumed per unit produced.
    pub amount: u64,
}

/// Static description of a tradeable item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemDefinition {
    pub name: String,
    pub category: ItemCategory,
    /// Storage volume per unit.
    pub volume: u64,
    /// Purchase price per unit.
    pub base_cost: i64,
    /// Market sale price per unit.
    pub base_sell_price: i64,
    /// Ordered ingredient list; empty for raw resources.
    #[serde(default)]
    pub recipe: Vec<RecipeInput>,
    #[serde(default)]
    pub required_factory_level: Option<u32>,
    /// Days per unit at 100% efficiency.
    #[serde(default)]
    pub production_time: Option<u32>,
}

impl ItemDefinition {
    pub fn has_recipe(&self) -> bool {
        !self.recipe.is_empty()
    }

    /// Factory level needed to run this recipe (defaults to 1).
    pub fn required_level(&self) -> u32 {
        self.required_factory_level.unwrap_or(1)
    }

    /// Production time per unit if the item can be manufactured at all.
    pub fn manufacture_time(&self) -> Option<u32> {
        if self.has_recipe() {
            self.production_time
        } else {
            None
        }
    }
}

/// Item quantities held by the company.
///
/// A missing entry and a zero quantity mean the same thing; zero entries are
/// never stored.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inventory(BTreeMap<ItemId, u64>);

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quantity(&self, item: &ItemId) -> u64 {
        self.0.get(item).copied().unwrap_or(0)
    }

    pub fn contains(&self, item: &ItemId, quantity: u64) -> bool {
        self.quantity(item) >= quantity
    }

    pub fn add(&mut self, item: &ItemId, quantity: u64) {
        if quantity == 0 {
            return;
        }
        *self.0.entry(item.clone()).or_insert(0) += quantity;
    }

    /// Remove `quantity` units, failing without change if stock is short.
    pub fn remove(&mut self, item: &ItemId, quantity: u64) -> Result<(), ValidationError> {
        let available = self.quantity(item);
        if available < quantity {
            return Err(ValidationError::InsufficientInventory {
                item: item.clone(),
                required: quantity,
                available,
            });
        }
        let left = available - quantity;
        if left == 0 {
            self.0.remove(item);
        } else {
            self.0.insert(item.clone(), left);
        }
        Ok(())
    }

    /// Items with a positive quantity, in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&ItemId, u64)> {
        self.0.iter().map(|(id, q)| (id, *q))
    }

    pub fn total_units(&self) -> u64 {
        self.0.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> From<[(&str, u64); N]> for Inventory {
    fn from(entries: [(&str, u64); N]) -> Self {
        let mut inv = Inventory::new();
        for (id, q) in entries {
            inv.add(&ItemId::from(id), q);
        }
        inv
    }
}
