//! Shared worlds for unit tests.

use chrono::{Days, NaiveDate};
use sim_core::{
    BuildingKind, Contract, ContractKind, ContractStatus, Employee, EmployeeId, Inventory,
    Profile, ReferenceData, Sex, Specialty, Truck, TruckId, WorldState,
};

pub fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// A new game plus free buildings of `kinds`, in order.
pub fn world_with(kinds: &[BuildingKind]) -> (ReferenceData, WorldState) {
    let data = ReferenceData::builtin().unwrap();
    let mut world = WorldState::new_game(&data, start());
    for &kind in kinds {
        let id = world.next_building_id(kind);
        world.buildings.push(data.building(kind).instantiate(kind, id));
    }
    (data, world)
}

/// Warehouse at index 0, level-1 factory at index 1, ore and coal in stock.
pub fn factory_world() -> (ReferenceData, WorldState) {
    let (data, mut world) = world_with(&[BuildingKind::Factory]);
    world.inventory = Inventory::from([
        ("base_iron_ore", 50),
        ("base_coal", 30),
        ("base_copper_ore", 20),
        ("base_wood", 100),
    ]);
    (data, world)
}

/// Warehouse at index 0, logistics center at index 1.
pub fn logistics_world() -> (ReferenceData, WorldState) {
    world_with(&[BuildingKind::LogisticsCenter])
}

pub fn add_truck(world: &mut WorldState) -> TruckId {
    let id = TruckId(world.allocate_id("truck"));
    let name = format!("Truck {}", world.trucks.len() + 1);
    world.trucks.push(Truck::new(id.clone(), name, 5000));
    id
}

pub fn contract(
    id: &str,
    kind: ContractKind,
    item: &str,
    quantity: u64,
    amount: i64,
    travel_time: u32,
) -> Contract {
    Contract {
        id: id.into(),
        kind,
        status: ContractStatus::Pending,
        item: item.into(),
        quantity,
        amount,
        travel_time,
        expiration_date: start() + Days::new(7),
    }
}

/// Put an unassigned employee on the roster.
pub fn hire(world: &mut WorldState, specialty: Specialty, skill_level: u32) -> EmployeeId {
    let id = EmployeeId(world.allocate_id("emp"));
    world.employees.push(Employee {
        id: id.clone(),
        profile: Profile {
            name: format!("Test {}", id),
            age: 35,
            sex: Sex::Female,
            specialty,
            skill_level,
            salary: 50 + 2 * i64::from(skill_level),
        },
        assigned_building: None,
    });
    id
}

/// Hire a factory manager and seat them in the building at `index`.
pub fn manager(world: &mut WorldState, index: usize, skill_level: u32) -> EmployeeId {
    let id = hire(world, Specialty::FactoryManager, skill_level);
    let building = &mut world.buildings[index];
    if let Some(slot) = building.manager_slot_mut() {
        *slot = Some(id.clone());
    }
    let building_id = building.id.clone();
    if let Some(e) = world.employee_mut(&id) {
        e.assigned_building = Some(building_id);
    }
    id
}
