#![deny(warnings)]

//! Simulation runtime for Factory Tycoon.
//!
//! Owns every transition of the world: the daily tick (production, logistics,
//! market refreshes, payroll) and the player commands. Both are pure functions
//! from one snapshot to the next; [`Engine`] wraps them around a single mutable
//! world.

pub mod commands;
pub mod day;
pub mod engine;
pub mod logistics;
pub mod production;

#[cfg(test)]
mod fixtures;

pub use commands::{apply_command, Command, CommandOutcome};
pub use day::{advance_day, daily_costs, prune_contracts, CashFlow, DayReport};
pub use engine::{Engine, SimSnapshot};
pub use logistics::{dispatch, run_logistics, LogisticsOutcome};
pub use production::{advance_factory, effective_efficiency, run_production};
