//! Single-writer engine around one world.
//!
//! Commands and day advances are serialized behind a mutex and the RNG is only
//! advanced when a day commits, so a rejected day can be retried with the same
//! draws.

use crate::commands::{apply_command, Command};
use crate::day::{advance_day, DayReport};
use chrono::NaiveDate;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use sim_core::{ContractStatus, ReferenceData, SimConfig, ValidationError, WorldState};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Aggregated KPIs for reporting.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimSnapshot {
    pub days_run: u32,
    pub date: NaiveDate,
    pub money: i64,
    pub company_value: i64,
    pub inventory_units: u64,
    pub storage_used: u64,
    pub storage_capacity: u64,
    pub pending_contracts: usize,
    pub active_contracts: usize,
    pub trucks: usize,
    pub employees: usize,
    pub candidates: usize,
}

impl SimSnapshot {
    pub fn capture(world: &WorldState, data: &ReferenceData, days_run: u32) -> Self {
        Self {
            days_run,
            date: world.date,
            money: world.money,
            company_value: world.company_value,
            inventory_units: world.inventory.total_units(),
            storage_used: data.storage_used(&world.inventory),
            storage_capacity: world.storage_capacity(),
            pending_contracts: world.pending_contracts(),
            active_contracts: world
                .contracts
                .iter()
                .filter(|c| c.status == ContractStatus::Active)
                .count(),
            trucks: world.trucks.len(),
            employees: world.employees.len(),
            candidates: world.candidates.len(),
        }
    }
}

struct EngineState {
    world: WorldState,
    rng: ChaCha8Rng,
    days_run: u32,
}

pub struct Engine {
    data: ReferenceData,
    config: SimConfig,
    inner: Mutex<EngineState>,
}

impl Engine {
    pub fn new(data: ReferenceData, config: SimConfig, world: WorldState) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.rng_seed);
        Self {
            data,
            config,
            inner: Mutex::new(EngineState {
                world,
                rng,
                days_run: 0,
            }),
        }
    }

    /// Engine over a fresh company founded on `start`.
    pub fn new_game(data: ReferenceData, config: SimConfig, start: NaiveDate) -> Self {
        let world = WorldState::new_game(&data, start);
        Self::new(data, config, world)
    }

    fn lock(&self) -> MutexGuard<'_, EngineState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn data(&self) -> &ReferenceData {
        &self.data
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Copy of the current world.
    pub fn world(&self) -> WorldState {
        self.lock().world.clone()
    }

    pub fn world_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.lock().world)
    }

    pub fn apply(&self, command: &Command) -> Result<String, ValidationError> {
        let mut st = self.lock();
        let outcome = apply_command(&st.world, &self.data, &self.config.economy, command)?;
        st.world = outcome.state;
        Ok(outcome.event)
    }

    pub fn advance_day(&self) -> Result<DayReport, ValidationError> {
        let mut st = self.lock();
        let mut rng = st.rng.clone();
        let report = advance_day(&st.world, &self.data, &self.config.economy, &mut rng)?;
        st.world = report.state.clone();
        st.rng = rng;
        st.days_run += 1;
        Ok(report)
    }

    /// Advance up to `days` days, stopping at the first day that cannot be paid for.
    pub fn run_days(&self, days: u32) -> Result<SimSnapshot, ValidationError> {
        for _ in 0..days {
            self.advance_day()?;
        }
        Ok(self.snapshot())
    }

    pub fn snapshot(&self) -> SimSnapshot {
        let st = self.lock();
        SimSnapshot::capture(&st.world, &self.data, st.days_run)
    }
}
