//! Player commands. Each one validates against the current world and either
//! fails with a [`ValidationError`] or commits all of its effects.

use crate::logistics::dispatch;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sim_core::{
    BuildingId, BuildingKind, CandidateId, ContractId, EconomyConfig, Employee, EmployeeId,
    ItemId, ProductionBatch, ReferenceData, Truck, TruckId, ValidationError, WorldState,
};

/// A discrete player action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    PurchaseBuilding {
        kind: BuildingKind,
    },
    StartProduction {
        factory: BuildingId,
        item: ItemId,
        quantity: u64,
    },
    UpgradeBuilding {
        building: BuildingId,
    },
    SellItem {
        item: ItemId,
        quantity: u64,
    },
    AcceptContract {
        contract: ContractId,
    },
    PurchaseTruck,
    HireEmployee {
        candidate: CandidateId,
    },
    FireEmployee {
        employee: EmployeeId,
    },
    AssignEmployee {
        employee: EmployeeId,
        building: BuildingId,
    },
    UnassignEmployee {
        employee: EmployeeId,
    },
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::PurchaseBuilding { .. } => "purchase_building",
            Command::StartProduction { .. } => "start_production",
            Command::UpgradeBuilding { .. } => "upgrade_building",
            Command::SellItem { .. } => "sell_item",
            Command::AcceptContract { .. } => "accept_contract",
            Command::PurchaseTruck => "purchase_truck",
            Command::HireEmployee { .. } => "hire_employee",
            Command::FireEmployee { .. } => "fire_employee",
            Command::AssignEmployee { .. } => "assign_employee",
            Command::UnassignEmployee { .. } => "unassign_employee",
        }
    }
}

/// A committed command.
#[derive(Clone, Debug, PartialEq)]
pub struct CommandOutcome {
    pub state: WorldState,
    pub event: String,
}

fn require_funds(world: &WorldState, required: i64) -> Result<(), ValidationError> {
    if world.money < required {
        return Err(ValidationError::InsufficientFunds {
            required,
            available: world.money,
        });
    }
    Ok(())
}

/// Validate `command` against `state` and return the next state.
///
/// `state` is never modified; a rejected command leaves nothing behind.
pub fn apply_command(
    state: &WorldState,
    data: &ReferenceData,
    cfg: &EconomyConfig,
    command: &Command,
) -> Result<CommandOutcome, ValidationError> {
    let mut next = state.clone();
    let result = match command {
        Command::PurchaseBuilding { kind } => purchase_building(&mut next, data, *kind),
        Command::StartProduction {
            factory,
            item,
            quantity,
        } => start_production(&mut next, data, factory, item, *quantity),
        Command::UpgradeBuilding { building } => upgrade_building(&mut next, data, building),
        Command::SellItem { item, quantity } => sell_item(&mut next, data, item, *quantity),
        Command::AcceptContract { contract } => dispatch(&mut next, contract),
        Command::PurchaseTruck => purchase_truck(&mut next, cfg),
        Command::HireEmployee { candidate } => hire_employee(&mut next, data, candidate),
        Command::FireEmployee { employee } => fire_employee(&mut next, cfg, employee),
        Command::AssignEmployee { employee, building } => {
            assign_employee(&mut next, employee, building)
        }
        Command::UnassignEmployee { employee } => unassign_employee(&mut next, employee),
    };
    match result {
        Ok(event) => {
            tracing::debug!(command = command.name(), %event, "command applied");
            next.events.push(event.clone());
            Ok(CommandOutcome { state: next, event })
        }
        Err(err) => {
            tracing::warn!(command = command.name(), %err, "command rejected");
            Err(err)
        }
    }
}

fn purchase_building(
    world: &mut WorldState,
    data: &ReferenceData,
    kind: BuildingKind,
) -> Result<String, ValidationError> {
    let spec = data.building(kind);
    require_funds(world, spec.cost)?;
    let id = world.next_building_id(kind);
    world.money -= spec.cost;
    world.company_value += spec.cost;
    world.buildings.push(spec.instantiate(kind, id.clone()));
    Ok(format!("Built a new {} ({id}).", spec.name))
}

fn start_production(
    world: &mut WorldState,
    data: &ReferenceData,
    factory_id: &BuildingId,
    item: &ItemId,
    quantity: u64,
) -> Result<String, ValidationError> {
    if quantity == 0 {
        return Err(ValidationError::InvalidQuantity);
    }
    let building = world
        .building(factory_id)
        .ok_or_else(|| ValidationError::BuildingNotFound(factory_id.clone()))?;
    let factory = building
        .as_factory()
        .ok_or_else(|| ValidationError::NotAFactory(factory_id.clone()))?;
    let def = data
        .item(item)
        .ok_or_else(|| ValidationError::UnknownItem(item.clone()))?;
    let days_per_unit = def
        .manufacture_time()
        .ok_or_else(|| ValidationError::NotManufacturable(item.clone()))?;
    if !factory.has_free_slot() {
        return Err(ValidationError::NoProductionSlot {
            factory: factory_id.clone(),
            slots: factory.production_slots,
        });
    }
    if building.level < def.required_level() {
        return Err(ValidationError::FactoryLevelTooLow {
            factory: factory_id.clone(),
            item: item.clone(),
            required: def.required_level(),
            actual: building.level,
        });
    }

    let mut needs = Vec::with_capacity(def.recipe.len());
    for input in &def.recipe {
        let required = input.amount.saturating_mul(quantity);
        let available = world.inventory.quantity(&input.item);
        if available < required {
            return Err(ValidationError::InsufficientInventory {
                item: input.item.clone(),
                required,
                available,
            });
        }
        needs.push((input.item.clone(), required));
    }
    for (input, required) in &needs {
        world.inventory.remove(input, *required)?;
    }

    let event = format!(
        "Started production of {quantity}x {} at {factory_id}.",
        def.name
    );
    if let Some(factory) = world
        .building_mut(factory_id)
        .and_then(|b| b.as_factory_mut())
    {
        factory.production_queue.push(ProductionBatch {
            item: item.clone(),
            quantity,
            time_remaining: Decimal::from(days_per_unit) * Decimal::from(quantity),
        });
    }
    Ok(event)
}

fn upgrade_building(
    world: &mut WorldState,
    data: &ReferenceData,
    building_id: &BuildingId,
) -> Result<String, ValidationError> {
    let building = world
        .building(building_id)
        .ok_or_else(|| ValidationError::BuildingNotFound(building_id.clone()))?;
    let spec = data.building(building.kind());
    let next_level = building.level + 1;
    let upgrade = spec
        .level(next_level)
        .filter(|_| next_level <= spec.max_level)
        .ok_or(ValidationError::MaxLevelReached {
            building: building_id.clone(),
            level: building.level,
        })?;
    require_funds(world, upgrade.cost)?;

    world.money -= upgrade.cost;
    world.company_value += upgrade.cost;
    if let Some(b) = world.building_mut(building_id) {
        b.level = next_level;
        b.maintenance_cost = upgrade.maintenance_cost;
        b.apply_stats(&upgrade.stats);
    }
    Ok(format!("{} {building_id} upgraded to level {next_level}!", spec.name))
}

fn sell_item(
    world: &mut WorldState,
    data: &ReferenceData,
    item: &ItemId,
    quantity: u64,
) -> Result<String, ValidationError> {
    let def = data
        .item(item)
        .ok_or_else(|| ValidationError::UnknownItem(item.clone()))?;
    if quantity == 0 {
        return Err(ValidationError::InvalidQuantity);
    }
    let revenue = i64::try_from(quantity)
        .ok()
        .and_then(|q| q.checked_mul(def.base_sell_price))
        .ok_or(ValidationError::InvalidQuantity)?;
    world.inventory.remove(item, quantity)?;
    world.money += revenue;
    Ok(format!("Sold {quantity}x {} for ${revenue}.", def.name))
}

fn purchase_truck(world: &mut WorldState, cfg: &EconomyConfig) -> Result<String, ValidationError> {
    let slots = world.total_truck_slots();
    if world.trucks.len() >= slots as usize {
        return Err(ValidationError::TruckSlotsFull { slots });
    }
    require_funds(world, cfg.truck_cost)?;
    let id = TruckId(world.allocate_id("truck"));
    let name = format!("Truck {}", world.trucks.len() + 1);
    world.money -= cfg.truck_cost;
    world.company_value += cfg.truck_cost;
    let event = format!("Bought {name} for ${}.", cfg.truck_cost);
    world.trucks.push(Truck::new(id, name, cfg.truck_cost));
    Ok(event)
}

fn hire_employee(
    world: &mut WorldState,
    data: &ReferenceData,
    candidate_id: &CandidateId,
) -> Result<String, ValidationError> {
    let capacity = world.employee_capacity();
    if world.employees.len() >= capacity as usize {
        return Err(ValidationError::RosterFull { capacity });
    }
    let idx = world
        .candidates
        .iter()
        .position(|c| &c.id == candidate_id)
        .ok_or_else(|| ValidationError::CandidateNotFound(candidate_id.clone()))?;
    require_funds(world, world.candidates[idx].hiring_fee)?;

    let candidate = world.candidates.remove(idx);
    world.money -= candidate.hiring_fee;
    let id = EmployeeId(world.allocate_id("emp"));
    let role = &data.specialty(candidate.profile.specialty).name;
    let event = format!(
        "Hired {} as {role} for a ${} fee.",
        candidate.profile.name, candidate.hiring_fee
    );
    world.employees.push(Employee {
        id,
        profile: candidate.profile,
        assigned_building: None,
    });
    Ok(event)
}

fn fire_employee(
    world: &mut WorldState,
    cfg: &EconomyConfig,
    employee_id: &EmployeeId,
) -> Result<String, ValidationError> {
    let idx = world
        .employees
        .iter()
        .position(|e| &e.id == employee_id)
        .ok_or_else(|| ValidationError::EmployeeNotFound(employee_id.clone()))?;
    let severance = world.employees[idx].severance(cfg.severance_days);
    require_funds(world, severance)?;

    let employee = world.employees.remove(idx);
    world.money -= severance;
    if let Some(building) = &employee.assigned_building {
        if let Some(slot) = world
            .building_mut(building)
            .and_then(|b| b.manager_slot_mut())
        {
            *slot = None;
        }
    }
    Ok(format!(
        "{} was let go; severance paid: ${severance}.",
        employee.profile.name
    ))
}

fn assign_employee(
    world: &mut WorldState,
    employee_id: &EmployeeId,
    building_id: &BuildingId,
) -> Result<String, ValidationError> {
    let employee = world
        .employee(employee_id)
        .ok_or_else(|| ValidationError::EmployeeNotFound(employee_id.clone()))?;
    let building = world
        .building(building_id)
        .ok_or_else(|| ValidationError::BuildingNotFound(building_id.clone()))?;
    let kind = building.kind();
    if matches!(kind, BuildingKind::Warehouse | BuildingKind::HrDepartment) {
        return Err(ValidationError::NoManagerSlot(building_id.clone()));
    }
    if let Some(manager) = building.manager() {
        return Err(ValidationError::BuildingOccupied {
            building: building_id.clone(),
            manager: manager.clone(),
        });
    }
    if let Some(current) = &employee.assigned_building {
        return Err(ValidationError::EmployeeAlreadyAssigned {
            employee: employee_id.clone(),
            building: current.clone(),
        });
    }
    let specialty = employee.profile.specialty;
    if specialty.managed_kind() != kind {
        return Err(ValidationError::IncompatibleSpecialty { specialty, kind });
    }
    let name = employee.profile.name.clone();

    if let Some(slot) = world
        .building_mut(building_id)
        .and_then(|b| b.manager_slot_mut())
    {
        *slot = Some(employee_id.clone());
    }
    if let Some(e) = world.employee_mut(employee_id) {
        e.assigned_building = Some(building_id.clone());
    }
    Ok(format!("{name} now manages {building_id}."))
}

fn unassign_employee(
    world: &mut WorldState,
    employee_id: &EmployeeId,
) -> Result<String, ValidationError> {
    let employee = world
        .employee_mut(employee_id)
        .ok_or_else(|| ValidationError::EmployeeNotFound(employee_id.clone()))?;
    let building_id = employee
        .assigned_building
        .take()
        .ok_or_else(|| ValidationError::EmployeeNotAssigned(employee_id.clone()))?;
    let name = employee.profile.name.clone();
    if let Some(slot) = world
        .building_mut(&building_id)
        .and_then(|b| b.manager_slot_mut())
    {
        *slot = None;
    }
    Ok(format!("{name} no longer manages {building_id}."))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{add_truck, contract, factory_world, hire, logistics_world, manager, world_with};
    use proptest::prelude::*;
    use sim_core::{validate_world, Candidate, ContractKind, Profile, Sex, Specialty};

    fn cfg() -> EconomyConfig {
        EconomyConfig::default()
    }

    fn apply(world: &WorldState, data: &ReferenceData, cmd: Command) -> Result<CommandOutcome, ValidationError> {
        apply_command(world, data, &cfg(), &cmd)
    }

    #[test]
    fn purchase_building_numbers_per_kind() {
        let (data, world) = world_with(&[]);
        let out = apply(&world, &data, Command::PurchaseBuilding { kind: BuildingKind::Factory }).unwrap();
        let s = out.state;
        assert_eq!(s.money, 5000);
        assert_eq!(s.company_value, 17_500);
        assert_eq!(s.buildings[1].id.as_str(), "FACTORY-1");
        assert_eq!(s.events.latest(), Some(out.event.as_str()));

        let out = apply(&s, &data, Command::PurchaseBuilding { kind: BuildingKind::Factory }).unwrap();
        assert_eq!(out.state.buildings[2].id.as_str(), "FACTORY-2");
        assert_eq!(out.state.money, 0);
        let err = apply(&out.state, &data, Command::PurchaseBuilding { kind: BuildingKind::Warehouse }).unwrap_err();
        assert_eq!(err, ValidationError::InsufficientFunds { required: 2500, available: 0 });
    }

    #[test]
    fn start_production_debits_recipe() {
        let (data, world) = factory_world();
        let out = apply(
            &world,
            &data,
            Command::StartProduction {
                factory: "FACTORY-1".into(),
                item: "comp_steel_plate".into(),
                quantity: 5,
            },
        )
        .unwrap();
        let s = out.state;
        assert_eq!(s.inventory.quantity(&"base_iron_ore".into()), 40);
        assert_eq!(s.inventory.quantity(&"base_coal".into()), 25);
        let queue = &s.buildings[1].as_factory().unwrap().production_queue;
        assert_eq!(queue.len(), 1);
        assert_eq!(queue[0].quantity, 5);
        assert_eq!(queue[0].time_remaining, Decimal::from(5));
    }

    #[test]
    fn start_production_rejections() {
        let (data, mut world) = factory_world();
        let start = |factory: &str, item: &str, quantity| Command::StartProduction {
            factory: factory.into(),
            item: item.into(),
            quantity,
        };
        assert_eq!(
            apply(&world, &data, start("FACTORY-1", "comp_steel_plate", 0)),
            Err(ValidationError::InvalidQuantity)
        );
        assert_eq!(
            apply(&world, &data, start("FACTORY-9", "comp_steel_plate", 1)),
            Err(ValidationError::BuildingNotFound("FACTORY-9".into()))
        );
        assert_eq!(
            apply(&world, &data, start("WAREHOUSE-1", "comp_steel_plate", 1)),
            Err(ValidationError::NotAFactory("WAREHOUSE-1".into()))
        );
        assert_eq!(
            apply(&world, &data, start("FACTORY-1", "base_coal", 1)),
            Err(ValidationError::NotManufacturable("base_coal".into()))
        );
        assert!(matches!(
            apply(&world, &data, start("FACTORY-1", "comp_steel_plate", 26)),
            Err(ValidationError::InsufficientInventory { required: 52, available: 50, .. })
        ));
        let high_tier = data
            .items()
            .find(|(_, d)| d.has_recipe() && d.required_level() > 1)
            .map(|(id, _)| id.clone())
            .unwrap();
        assert!(matches!(
            apply(&world, &data, start("FACTORY-1", high_tier.as_str(), 1)),
            Err(ValidationError::FactoryLevelTooLow { actual: 1, .. })
        ));

        let f = world.buildings[1].as_factory_mut().unwrap();
        f.production_queue = vec![
            ProductionBatch { item: "comp_steel_plate".into(), quantity: 1, time_remaining: Decimal::ONE },
            ProductionBatch { item: "comp_steel_plate".into(), quantity: 1, time_remaining: Decimal::ONE },
        ];
        assert_eq!(
            apply(&world, &data, start("FACTORY-1", "comp_steel_plate", 1)),
            Err(ValidationError::NoProductionSlot { factory: "FACTORY-1".into(), slots: 2 })
        );
    }

    #[test]
    fn upgrade_merges_next_level() {
        let (data, mut world) = factory_world();
        world.money = 200_000;
        let out = apply(&world, &data, Command::UpgradeBuilding { building: "FACTORY-1".into() }).unwrap();
        let b = &out.state.buildings[1];
        assert_eq!(b.level, 2);
        assert_eq!(b.maintenance_cost, 150);
        let f = b.as_factory().unwrap();
        assert_eq!((f.production_slots, f.efficiency), (3, 110));
        assert_eq!(out.state.money, 200_000 - 12_000);
        assert_eq!(out.state.company_value, world.company_value + 12_000);

        let (data, mut world) = world_with(&[BuildingKind::ResearchLab]);
        world.money = 200_000;
        assert_eq!(
            apply(&world, &data, Command::UpgradeBuilding { building: "RESEARCH_LAB-1".into() }),
            Err(ValidationError::MaxLevelReached { building: "RESEARCH_LAB-1".into(), level: 1 })
        );
    }

    #[test]
    fn sell_item_credits_base_price() {
        let (data, world) = factory_world();
        let price = data.item(&"base_wood".into()).unwrap().base_sell_price;
        let out = apply(&world, &data, Command::SellItem { item: "base_wood".into(), quantity: 10 }).unwrap();
        assert_eq!(out.state.money, world.money + 10 * price);
        assert_eq!(out.state.inventory.quantity(&"base_wood".into()), 90);
        assert_eq!(
            apply(&world, &data, Command::SellItem { item: "unobtainium".into(), quantity: 1 }),
            Err(ValidationError::UnknownItem("unobtainium".into()))
        );
        assert!(matches!(
            apply(&world, &data, Command::SellItem { item: "base_wood".into(), quantity: 101 }),
            Err(ValidationError::InsufficientInventory { .. })
        ));
    }

    #[test]
    fn accept_contract_goes_through_dispatch() {
        let (data, mut world) = logistics_world();
        add_truck(&mut world);
        world.contracts.push(contract("contract-1", ContractKind::Sell, "base_wood", 10, 150, 1));
        let out = apply(&world, &data, Command::AcceptContract { contract: "contract-1".into() }).unwrap();
        assert!(!out.state.trucks[0].is_idle());
        assert_eq!(out.state.inventory.quantity(&"base_wood".into()), 90);
        validate_world(&out.state).unwrap();
    }

    #[test]
    fn truck_slots_cap_the_fleet() {
        let (data, world) = logistics_world();
        let out = apply(&world, &data, Command::PurchaseTruck).unwrap();
        assert_eq!(out.state.trucks[0].name, "Truck 1");
        assert_eq!(out.state.money, 5000);
        let mut rich = out.state.clone();
        rich.money = 1_000_000;
        assert_eq!(
            apply(&rich, &data, Command::PurchaseTruck),
            Err(ValidationError::TruckSlotsFull { slots: 1 })
        );
        let (data, world) = world_with(&[]);
        assert_eq!(
            apply(&world, &data, Command::PurchaseTruck),
            Err(ValidationError::TruckSlotsFull { slots: 0 })
        );
    }

    fn candidate(id: &str, specialty: Specialty, fee: i64) -> Candidate {
        Candidate {
            id: id.into(),
            profile: Profile {
                name: "Vera Ortega".into(),
                age: 41,
                sex: Sex::Female,
                specialty,
                skill_level: 40,
                salary: 140,
            },
            hiring_fee: fee,
        }
    }

    #[test]
    fn hiring_needs_hr_capacity_and_fee() {
        let (data, mut world) = world_with(&[]);
        world.candidates.push(candidate("cand-1", Specialty::FactoryManager, 900));
        assert_eq!(
            apply(&world, &data, Command::HireEmployee { candidate: "cand-1".into() }),
            Err(ValidationError::RosterFull { capacity: 0 })
        );

        let (data, mut world) = world_with(&[BuildingKind::HrDepartment]);
        world.candidates.push(candidate("cand-1", Specialty::FactoryManager, 900));
        let out = apply(&world, &data, Command::HireEmployee { candidate: "cand-1".into() }).unwrap();
        assert!(out.state.candidates.is_empty());
        assert_eq!(out.state.employees.len(), 1);
        assert_eq!(out.state.money, world.money - 900);
        assert_eq!(
            apply(&out.state, &data, Command::HireEmployee { candidate: "cand-1".into() }),
            Err(ValidationError::CandidateNotFound("cand-1".into()))
        );

        world.money = 899;
        assert!(matches!(
            apply(&world, &data, Command::HireEmployee { candidate: "cand-1".into() }),
            Err(ValidationError::InsufficientFunds { required: 900, .. })
        ));
    }

    #[test]
    fn firing_a_manager_frees_the_building() {
        let (data, world) = factory_world();
        let mut world = world;
        let emp = manager(&mut world, 1, 30);
        let salary = world.employee(&emp).unwrap().profile.salary;
        let out = apply(&world, &data, Command::FireEmployee { employee: emp.clone() }).unwrap();
        assert!(out.state.employees.is_empty());
        assert_eq!(out.state.buildings[1].manager(), None);
        assert_eq!(out.state.money, world.money - salary * 7);
        validate_world(&out.state).unwrap();

        world.money = salary * 7 - 1;
        assert!(matches!(
            apply(&world, &data, Command::FireEmployee { employee: emp }),
            Err(ValidationError::InsufficientFunds { .. })
        ));
    }

    #[test]
    fn manager_seats_are_exclusive() {
        let (data, mut world) = factory_world();
        let a = manager(&mut world, 1, 30);
        let b = hire(&mut world, Specialty::FactoryManager, 50);
        let err = apply(
            &world,
            &data,
            Command::AssignEmployee { employee: b.clone(), building: "FACTORY-1".into() },
        )
        .unwrap_err();
        assert_eq!(err, ValidationError::BuildingOccupied { building: "FACTORY-1".into(), manager: a.clone() });
        assert_eq!(world.buildings[1].manager(), Some(&a));

        let out = apply(&world, &data, Command::UnassignEmployee { employee: a.clone() }).unwrap();
        let out = apply(
            &out.state,
            &data,
            Command::AssignEmployee { employee: b.clone(), building: "FACTORY-1".into() },
        )
        .unwrap();
        assert_eq!(out.state.buildings[1].manager(), Some(&b));
        assert_eq!(out.state.employee(&a).unwrap().assigned_building, None);
        validate_world(&out.state).unwrap();
    }

    #[test]
    fn assignment_checks_seat_and_specialty() {
        let (data, mut world) = factory_world();
        let sales = hire(&mut world, Specialty::SalesExecutive, 50);
        assert_eq!(
            apply(&world, &data, Command::AssignEmployee { employee: sales.clone(), building: "WAREHOUSE-1".into() }),
            Err(ValidationError::NoManagerSlot("WAREHOUSE-1".into()))
        );
        assert_eq!(
            apply(&world, &data, Command::AssignEmployee { employee: sales.clone(), building: "FACTORY-1".into() }),
            Err(ValidationError::IncompatibleSpecialty {
                specialty: Specialty::SalesExecutive,
                kind: BuildingKind::Factory
            })
        );
        assert_eq!(
            apply(&world, &data, Command::UnassignEmployee { employee: sales.clone() }),
            Err(ValidationError::EmployeeNotAssigned(sales))
        );
    }

    #[test]
    fn commands_roundtrip_through_json() {
        let cmd = Command::StartProduction {
            factory: "FACTORY-1".into(),
            item: "comp_steel_plate".into(),
            quantity: 5,
        };
        let s = serde_json::to_string(&cmd).unwrap();
        assert!(s.contains("\"command\":\"start_production\""));
        assert_eq!(serde_json::from_str::<Command>(&s).unwrap(), cmd);
        let truck: Command = serde_json::from_str(r#"{"command":"purchase_truck"}"#).unwrap();
        assert_eq!(truck, Command::PurchaseTruck);
    }

    fn arb_command() -> impl Strategy<Value = Command> {
        let items = prop::sample::select(vec![
            "base_wood", "base_iron_ore", "base_coal", "comp_steel_plate", "comp_copper_wire",
        ]);
        prop_oneof![
            prop::sample::select(BuildingKind::ALL.to_vec())
                .prop_map(|kind| Command::PurchaseBuilding { kind }),
            (items.clone(), 0u64..40).prop_map(|(item, quantity)| Command::StartProduction {
                factory: "FACTORY-1".into(),
                item: item.into(),
                quantity,
            }),
            (items, 0u64..120).prop_map(|(item, quantity)| Command::SellItem {
                item: item.into(),
                quantity,
            }),
            Just(Command::UpgradeBuilding { building: "FACTORY-1".into() }),
            Just(Command::PurchaseTruck),
        ]
    }

    proptest! {
        #[test]
        fn rejected_commands_are_idempotent(cmds in prop::collection::vec(arb_command(), 1..30)) {
            let (data, mut world) = factory_world();
            for cmd in cmds {
                match apply(&world, &data, cmd.clone()) {
                    Ok(out) => {
                        prop_assert!(out.state.money >= 0);
                        prop_assert!(validate_world(&out.state).is_ok());
                        world = out.state;
                    }
                    Err(first) => {
                        let second = apply(&world, &data, cmd).unwrap_err();
                        prop_assert_eq!(first, second);
                    }
                }
            }
        }
    }
}
