//! Trucks and market contracts.

use crate::ids::{ContractId, ItemId, TruckId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruckStatus {
    Idle,
    Delivering,
    Returning,
}

/// Trip state of a truck. A job exists exactly when the truck is not idle.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TruckState {
    Idle,
    Delivering { job: ContractId, days_left: u32 },
    Returning { job: ContractId, days_left: u32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Truck {
    pub id: TruckId,
    /// "Truck {n}" in purchase order.
    pub name: String,
    pub state: TruckState,
    /// Price paid when the truck was bought.
    pub purchase_cost: i64,
    /// Lifetime SELL payouts settled by this truck.
    pub total_revenue: i64,
    /// Lifetime BUY prices of goods this truck brought back.
    pub total_expenses: i64,
    /// Round trips settled.
    pub jobs_completed: u32,
}

impl Truck {
    pub fn new(id: TruckId, name: String, purchase_cost: i64) -> Self {
        Self {
            id,
            name,
            state: TruckState::Idle,
            purchase_cost,
            total_revenue: 0,
            total_expenses: 0,
            jobs_completed: 0,
        }
    }

    pub fn status(&self) -> TruckStatus {
        match self.state {
            TruckState::Idle => TruckStatus::Idle,
            TruckState::Delivering { .. } => TruckStatus::Delivering,
            TruckState::Returning { .. } => TruckStatus::Returning,
        }
    }

    pub fn job(&self) -> Option<&ContractId> {
        match &self.state {
            TruckState::Idle => None,
            TruckState::Delivering { job, .. } | TruckState::Returning { job, .. } => Some(job),
        }
    }

    /// Days left on the current leg; zero when idle.
    pub fn time_remaining(&self) -> u32 {
        match self.state {
            TruckState::Idle => 0,
            TruckState::Delivering { days_left, .. } | TruckState::Returning { days_left, .. } => {
                days_left
            }
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self.state, TruckState::Idle)
    }

    /// Lifetime result including the purchase price.
    pub fn net_profit(&self) -> i64 {
        self.total_revenue - self.total_expenses - self.purchase_cost
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractKind {
    /// Deliver goods from inventory for a payout.
    Sell,
    /// Pay up front, receive goods on return.
    Buy,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractStatus {
    Pending,
    Active,
    Completed,
}

/// A market offer fulfilled by a truck round trip.
///
/// `amount` is always a non-negative magnitude: the payout of a SELL contract or
/// the price of a BUY contract. [`Contract::reward`] gives the signed view.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    pub id: ContractId,
    pub kind: ContractKind,
    pub status: ContractStatus,
    /// Goods delivered (SELL) or received (BUY).
    pub item: ItemId,
    pub quantity: u64,
    /// Payout or price; see [`Contract::reward`] for the signed view.
    pub amount: i64,
    /// One-way days; the round trip takes twice as long.
    pub travel_time: u32,
    /// Last day the offer can be accepted.
    pub expiration_date: NaiveDate,
}

impl Contract {
    /// Money effect: positive for SELL payouts, negative for BUY costs.
    pub fn reward(&self) -> i64 {
        match self.kind {
            ContractKind::Sell => self.amount,
            ContractKind::Buy => -self.amount,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == ContractStatus::Pending
    }
}
