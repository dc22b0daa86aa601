//! Contract market generation.
//!
//! A refresh draws one pool per contract by weight, one item from that pool,
//! then sizes the offer against company value and current stock.

use crate::pricing::{contract_amount, units_for_value};
use crate::weighted::{choose_pool, Pool};
use chrono::{Days, NaiveDate};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sim_core::{
    BuildingKind, ContractKind, DayRange, EconomyConfig, FractionRange, ItemCategory, ItemId,
    ReferenceData, WorldState,
};
use std::collections::BTreeSet;

/// Where a contract's item is drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractPool {
    /// In stock and producible.
    SellStockedProducible,
    /// Recipe inputs short of one unit's worth.
    BuyNeededInputs,
    /// In stock but not producible.
    SellStockOnly,
    BuyBaseResource,
    RandomSell,
    RandomBuy,
}

impl ContractPool {
    pub const ALL: [ContractPool; 6] = [
        ContractPool::SellStockedProducible,
        ContractPool::BuyNeededInputs,
        ContractPool::SellStockOnly,
        ContractPool::BuyBaseResource,
        ContractPool::RandomSell,
        ContractPool::RandomBuy,
    ];

    pub fn weight(self) -> u32 {
        match self {
            ContractPool::SellStockedProducible => 40,
            ContractPool::BuyNeededInputs => 20,
            ContractPool::SellStockOnly => 15,
            ContractPool::BuyBaseResource => 15,
            ContractPool::RandomSell => 5,
            ContractPool::RandomBuy => 5,
        }
    }

    pub fn kind(self) -> ContractKind {
        match self {
            ContractPool::SellStockedProducible
            | ContractPool::SellStockOnly
            | ContractPool::RandomSell => ContractKind::Sell,
            ContractPool::BuyNeededInputs
            | ContractPool::BuyBaseResource
            | ContractPool::RandomBuy => ContractKind::Buy,
        }
    }

    /// Fallback pools may offer SELL contracts for items not in stock.
    pub fn is_fallback(self) -> bool {
        matches!(self, ContractPool::RandomSell | ContractPool::RandomBuy)
    }
}

/// What the company can make, holds and lacks, as seen by the market.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MarketContext {
    /// Recipe items some owned factory is high enough level to run.
    pub producible: BTreeSet<ItemId>,
    /// Items with positive stock.
    pub stocked: BTreeSet<ItemId>,
    /// Inputs of producible items held below one unit's requirement.
    pub needed_inputs: BTreeSet<ItemId>,
}

impl MarketContext {
    pub fn from_world(world: &WorldState, data: &ReferenceData) -> Self {
        let top_factory = world
            .buildings_of(BuildingKind::Factory)
            .map(|b| b.level)
            .max();
        let producible: BTreeSet<ItemId> = match top_factory {
            Some(level) => data
                .items()
                .filter(|(_, def)| def.has_recipe() && def.required_level() <= level)
                .map(|(id, _)| id.clone())
                .collect(),
            None => BTreeSet::new(),
        };
        let stocked = world
            .inventory
            .iter()
            .filter(|(id, q)| *q > 0 && data.item(id).is_some())
            .map(|(id, _)| id.clone())
            .collect();
        let needed_inputs = producible
            .iter()
            .filter_map(|id| data.item(id))
            .flat_map(|def| def.recipe.iter())
            .filter(|input| world.inventory.quantity(&input.item) < input.amount)
            .map(|input| input.item.clone())
            .collect();
        Self {
            producible,
            stocked,
            needed_inputs,
        }
    }

    /// Candidate items for every pool, in [`ContractPool::ALL`] order.
    pub fn pools(&self, data: &ReferenceData) -> Vec<CandidatePool> {
        let producible_unstocked: Vec<ItemId> = self
            .producible
            .iter()
            .filter(|id| !self.stocked.contains(*id))
            .cloned()
            .collect();
        let random_sell = if producible_unstocked.is_empty() {
            data.items()
                .filter(|(_, def)| def.base_sell_price > 0)
                .map(|(id, _)| id.clone())
                .collect()
        } else {
            producible_unstocked
        };
        ContractPool::ALL
            .into_iter()
            .map(|pool| {
                let items = match pool {
                    ContractPool::SellStockedProducible => self
                        .stocked
                        .iter()
                        .filter(|id| self.producible.contains(*id))
                        .cloned()
                        .collect(),
                    ContractPool::BuyNeededInputs => self.needed_inputs.iter().cloned().collect(),
                    ContractPool::SellStockOnly => self
                        .stocked
                        .iter()
                        .filter(|id| !self.producible.contains(*id))
                        .cloned()
                        .collect(),
                    ContractPool::BuyBaseResource => {
                        data.items_in(ItemCategory::Base).cloned().collect()
                    }
                    ContractPool::RandomSell => random_sell.clone(),
                    ContractPool::RandomBuy => data
                        .items()
                        .filter(|(_, def)| def.base_cost > 0)
                        .map(|(id, _)| id.clone())
                        .collect(),
                };
                CandidatePool { pool, items }
            })
            .collect()
    }
}

/// Items eligible for one pool.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CandidatePool {
    pub pool: ContractPool,
    pub items: Vec<ItemId>,
}

impl Pool for CandidatePool {
    fn weight(&self) -> u32 {
        self.pool.weight()
    }

    fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// A generated contract before it is given an id.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractOffer {
    pub pool: ContractPool,
    pub kind: ContractKind,
    pub item: ItemId,
    pub quantity: u64,
    /// Non-negative payout (SELL) or price (BUY).
    pub amount: i64,
    pub travel_time: u32,
    pub expiration_date: NaiveDate,
}

/// Result of one market refresh.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MarketRefresh {
    pub offers: Vec<ContractOffer>,
    /// Open market slots at the time of the refresh.
    pub slots: usize,
    pub next_contract_date: NaiveDate,
}

impl MarketRefresh {
    /// No room was left for new offers.
    pub fn market_full(&self) -> bool {
        self.slots == 0
    }
}

pub(crate) fn days_in<R: Rng + ?Sized>(rng: &mut R, range: DayRange) -> u32 {
    let (lo, hi) = (range.min.min(range.max), range.min.max(range.max));
    rng.gen_range(lo..=hi)
}

fn fraction_in<R: Rng + ?Sized>(rng: &mut R, range: FractionRange) -> f64 {
    if range.max > range.min {
        rng.gen_range(range.min..=range.max)
    } else {
        range.min
    }
}

/// Open slots: the highest Logistics Center level, capped by room under the
/// pending-contract limit.
pub fn open_slots(world: &WorldState, cfg: &EconomyConfig) -> usize {
    let top_level = world
        .buildings_of(BuildingKind::LogisticsCenter)
        .map(|b| b.level as usize)
        .max()
        .unwrap_or(0);
    let room = cfg
        .max_pending_contracts
        .saturating_sub(world.pending_contracts());
    top_level.min(room)
}

/// Draw a batch of new offers for the market.
///
/// `world` should already have stale contracts pruned so the pending count is
/// current. Dates are relative to `world.date`.
pub fn generate_contracts<R: Rng + ?Sized>(
    world: &WorldState,
    data: &ReferenceData,
    cfg: &EconomyConfig,
    rng: &mut R,
) -> MarketRefresh {
    let today = world.date;
    let slots = open_slots(world, cfg);
    let context = MarketContext::from_world(world, data);
    let pools = context.pools(data);

    let mut offers = Vec::with_capacity(slots);
    let mut attempts = slots * cfg.contract_attempts_per_slot;
    while offers.len() < slots && attempts > 0 {
        attempts -= 1;
        if let Some(offer) = draw_offer(world, data, cfg, &pools, rng) {
            offers.push(offer);
        }
    }
    if offers.len() < slots {
        tracing::debug!(wanted = slots, drawn = offers.len(), "market draw gave up early");
    }

    let wait = days_in(rng, cfg.contract_refresh_days);
    MarketRefresh {
        offers,
        slots,
        next_contract_date: today + Days::new(u64::from(wait)),
    }
}

fn draw_offer<R: Rng + ?Sized>(
    world: &WorldState,
    data: &ReferenceData,
    cfg: &EconomyConfig,
    pools: &[CandidatePool],
    rng: &mut R,
) -> Option<ContractOffer> {
    let chosen = choose_pool(rng, pools)?;
    let item = chosen.items.choose(rng)?.clone();
    let def = data.item(&item)?;
    let kind = chosen.pool.kind();

    let max_value = world.company_value.max(0) as f64 * cfg.contract_value_share;
    let category_factor = if def.category == ItemCategory::Base {
        cfg.base_resource_factor
    } else {
        1.0
    };
    let target_value = rng.gen::<f64>() * max_value * category_factor;
    let unit_price = match kind {
        ContractKind::Sell => def.base_sell_price,
        ContractKind::Buy => def.base_cost,
    };
    let mut quantity = units_for_value(target_value, unit_price);

    if kind == ContractKind::Sell {
        let stock = world.inventory.quantity(&item);
        if stock > 0 {
            quantity = quantity.min(stock);
        } else if !chosen.pool.is_fallback() {
            return None;
        }
    }

    let travel_time = days_in(rng, cfg.travel_time_days);
    let markup = match kind {
        ContractKind::Sell => fraction_in(rng, cfg.sell_margin),
        ContractKind::Buy => fraction_in(rng, cfg.buy_premium),
    };
    let amount = match contract_amount(quantity, unit_price, markup) {
        Ok(amount) => amount,
        Err(err) => {
            tracing::warn!(%item, %err, "discarding contract draw");
            return None;
        }
    };
    let expires_in = days_in(rng, cfg.contract_expiry_days);

    Some(ContractOffer {
        pool: chosen.pool,
        kind,
        item,
        quantity,
        amount,
        travel_time,
        expiration_date: world.date + Days::new(u64::from(expires_in)),
    })
}
