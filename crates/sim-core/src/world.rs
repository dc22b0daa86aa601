//! The world snapshot and its invariants.

use crate::building::{Building, BuildingDetail, BuildingKind, Factory};
use crate::catalog::ReferenceData;
use crate::error::InvariantError;
use crate::ids::{BuildingId, ContractId, EmployeeId, TruckId};
use crate::item::Inventory;
use crate::logistics::{Contract, ContractStatus, Truck};
use crate::staff::{Candidate, Employee};
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, VecDeque};

/// Max entries kept in the event log.
pub const EVENT_LOG_CAPACITY: usize = 20;

/// Human-readable log, most recent first, capped at [`EVENT_LOG_CAPACITY`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventLog(VecDeque<String>);

impl EventLog {
    /// Prepend a batch, keeping the batch's own order, and drop the oldest overflow.
    pub fn record<I>(&mut self, batch: I)
    where
        I: IntoIterator<Item = String>,
        I::IntoIter: DoubleEndedIterator,
    {
        for event in batch.into_iter().rev() {
            self.0.push_front(event);
        }
        self.0.truncate(EVENT_LOG_CAPACITY);
    }

    pub fn push(&mut self, event: String) {
        self.record([event]);
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn latest(&self) -> Option<&str> {
        self.0.front().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Complete state of one company's simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct WorldState {
    /// Display name of the company owner.
    pub player_name: String,
    /// Cash on hand in whole currency units; never negative.
    pub money: i64,
    /// Current in-game day.
    pub date: NaiveDate,
    /// Grows with every capital expenditure; never decreases.
    pub company_value: i64,
    pub inventory: Inventory,
    /// Insertion ordered.
    pub buildings: Vec<Building>,
    /// Fleet in purchase order; the first idle truck takes the next contract.
    pub trucks: Vec<Truck>,
    /// Pending offers and contracts out on a truck.
    pub contracts: Vec<Contract>,
    /// Payroll; every entry is paid its salary daily.
    pub employees: Vec<Employee>,
    /// Latest recruitment report, replaced on every refresh.
    pub candidates: Vec<Candidate>,
    /// First day the next market draw may run.
    pub next_contract_date: NaiveDate,
    /// First day the next recruitment report may run.
    pub next_candidate_refresh_date: NaiveDate,
    /// Newest first.
    pub events: EventLog,
    /// Sequence behind generated entity ids.
    #[serde(default)]
    pub id_seq: u64,
}

impl WorldState {
    /// The opening position of a new company on `start`.
    pub fn new_game(data: &ReferenceData, start: NaiveDate) -> Self {
        let warehouse = data
            .building(BuildingKind::Warehouse)
            .instantiate(BuildingKind::Warehouse, "WAREHOUSE-1".into());
        let mut events = EventLog::default();
        events.record([
            "You founded your new company. The future is yours!".to_string(),
            "Your first warehouse is ready.".to_string(),
        ]);
        let first_reports = start + Days::new(1);
        Self {
            player_name: "Rookie CEO".to_string(),
            money: 10_000,
            date: start,
            company_value: 12_500,
            inventory: Inventory::from([
                ("base_iron_ore", 50),
                ("base_copper_ore", 30),
                ("base_crude_oil", 20),
                ("base_sand", 40),
                ("base_wood", 100),
            ]),
            buildings: vec![warehouse],
            trucks: Vec::new(),
            contracts: Vec::new(),
            employees: Vec::new(),
            candidates: Vec::new(),
            next_contract_date: first_reports,
            next_candidate_refresh_date: first_reports,
            events,
            id_seq: 0,
        }
    }

    /// Next id of the form "{prefix}-{n}".
    pub fn allocate_id(&mut self, prefix: &str) -> String {
        self.id_seq += 1;
        format!("{prefix}-{}", self.id_seq)
    }

    /// Id for a new building of `kind`, numbered after existing ones of that kind.
    pub fn next_building_id(&self, kind: BuildingKind) -> BuildingId {
        let ordinal = self.buildings_of(kind).count() + 1;
        BuildingId(format!("{}-{ordinal}", kind.tag()))
    }

    pub fn building(&self, id: &BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|b| &b.id == id)
    }

    pub fn building_mut(&mut self, id: &BuildingId) -> Option<&mut Building> {
        self.buildings.iter_mut().find(|b| &b.id == id)
    }

    pub fn buildings_of(&self, kind: BuildingKind) -> impl Iterator<Item = &Building> {
        self.buildings.iter().filter(move |b| b.kind() == kind)
    }

    pub fn has_building(&self, kind: BuildingKind) -> bool {
        self.buildings_of(kind).next().is_some()
    }

    pub fn factories(&self) -> impl Iterator<Item = (&Building, &Factory)> {
        self.buildings
            .iter()
            .filter_map(|b| b.as_factory().map(|f| (b, f)))
    }

    pub fn total_maintenance(&self) -> i64 {
        self.buildings.iter().map(|b| b.maintenance_cost).sum()
    }

    pub fn total_salaries(&self) -> i64 {
        self.employees.iter().map(|e| e.profile.salary).sum()
    }

    pub fn total_truck_slots(&self) -> u32 {
        self.buildings.iter().map(Building::truck_slots).sum()
    }

    /// Roster cap summed over HR departments; zero without one.
    pub fn employee_capacity(&self) -> u32 {
        self.buildings
            .iter()
            .filter_map(Building::as_hr_department)
            .map(|hr| hr.max_employees)
            .sum()
    }

    /// Informational warehouse volume; never enforced.
    pub fn storage_capacity(&self) -> u64 {
        self.buildings
            .iter()
            .map(|b| match &b.detail {
                BuildingDetail::Warehouse(w) => w.capacity,
                _ => 0,
            })
            .sum()
    }

    pub fn employee(&self, id: &EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| &e.id == id)
    }

    pub fn employee_mut(&mut self, id: &EmployeeId) -> Option<&mut Employee> {
        self.employees.iter_mut().find(|e| &e.id == id)
    }

    pub fn contract(&self, id: &ContractId) -> Option<&Contract> {
        self.contracts.iter().find(|c| &c.id == id)
    }

    pub fn pending_contracts(&self) -> usize {
        self.contracts.iter().filter(|c| c.is_pending()).count()
    }

    pub fn truck(&self, id: &TruckId) -> Option<&Truck> {
        self.trucks.iter().find(|t| &t.id == id)
    }
}

/// Check cross-entity invariants of a snapshot.
pub fn validate_world(world: &WorldState) -> Result<(), InvariantError> {
    if world.money < 0 {
        return Err(InvariantError::NegativeMoney(world.money));
    }

    let mut ids: BTreeSet<&str> = BTreeSet::new();
    let all_ids = world
        .buildings
        .iter()
        .map(|b| b.id.as_str())
        .chain(world.trucks.iter().map(|t| t.id.as_str()))
        .chain(world.contracts.iter().map(|c| c.id.as_str()))
        .chain(world.employees.iter().map(|e| e.id.as_str()))
        .chain(world.candidates.iter().map(|c| c.id.as_str()));
    for id in all_ids {
        if !ids.insert(id) {
            return Err(InvariantError::DuplicateId(id.to_string()));
        }
    }

    for b in &world.buildings {
        if b.level == 0 {
            return Err(InvariantError::ZeroLevel(b.id.clone()));
        }
        if let Some(manager) = b.manager() {
            let mutual = world
                .employee(manager)
                .is_some_and(|e| e.assigned_building.as_ref() == Some(&b.id));
            if !mutual {
                return Err(InvariantError::ManagerMismatch {
                    building: b.id.clone(),
                    employee: manager.clone(),
                });
            }
        }
    }
    for e in &world.employees {
        if let Some(building) = &e.assigned_building {
            let mutual = world
                .building(building)
                .is_some_and(|b| b.manager() == Some(&e.id));
            if !mutual {
                return Err(InvariantError::ManagerMismatch {
                    building: building.clone(),
                    employee: e.id.clone(),
                });
            }
        }
    }

    let mut carried: BTreeSet<&ContractId> = BTreeSet::new();
    for t in &world.trucks {
        if let Some(job) = t.job() {
            if world.contract(job).is_none() {
                return Err(InvariantError::DanglingJob {
                    truck: t.id.clone(),
                    contract: job.clone(),
                });
            }
            if !carried.insert(job) {
                return Err(InvariantError::SharedContract(job.clone()));
            }
        }
    }
    for c in &world.contracts {
        if c.status == ContractStatus::Active && !carried.contains(&c.id) {
            return Err(InvariantError::OrphanedContract(c.id.clone()));
        }
    }
    Ok(())
}
