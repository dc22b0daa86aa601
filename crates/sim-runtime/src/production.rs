//! Production scheduler: one day of progress for every factory queue.

use rust_decimal::Decimal;
use sim_core::{Building, Employee, Inventory, ReferenceData, WorldState};

/// Baseline efficiency plus half the manager's skill, in percent.
pub fn effective_efficiency(building: &Building, employees: &[Employee]) -> Decimal {
    let Some(factory) = building.as_factory() else {
        return Decimal::ZERO;
    };
    let bonus = factory
        .manager
        .as_ref()
        .and_then(|id| employees.iter().find(|e| &e.id == id))
        .map_or(Decimal::ZERO, |m| {
            Decimal::from(m.profile.skill_level) / Decimal::TWO
        });
    Decimal::from(factory.efficiency) + bonus
}

/// Advance one factory's queue by a day at `efficiency` percent.
///
/// Finished batches move into `inventory` whole and leave the queue; the rest
/// keep their order. Returns one event per finished batch.
pub fn advance_factory(
    building: &mut Building,
    efficiency: Decimal,
    inventory: &mut Inventory,
    data: &ReferenceData,
) -> Vec<String> {
    let id = building.id.clone();
    let Some(factory) = building.as_factory_mut() else {
        return Vec::new();
    };
    let step = efficiency / Decimal::ONE_HUNDRED;
    let mut events = Vec::new();
    factory.production_queue.retain_mut(|batch| {
        batch.time_remaining -= step;
        if batch.time_remaining > Decimal::ZERO {
            return true;
        }
        inventory.add(&batch.item, batch.quantity);
        let name = data.item(&batch.item).map_or(batch.item.as_str(), |d| d.name.as_str());
        tracing::debug!(factory = %id, item = %batch.item, quantity = batch.quantity, "batch finished");
        events.push(format!(
            "Production of {}x {name} completed at {id}.",
            batch.quantity
        ));
        false
    });
    events
}

/// Run every factory in building order.
pub fn run_production(world: &mut WorldState, data: &ReferenceData) -> Vec<String> {
    let mut events = Vec::new();
    for building in world.buildings.iter_mut() {
        if building.as_factory().is_none() {
            continue;
        }
        let efficiency = effective_efficiency(building, &world.employees);
        events.extend(advance_factory(
            building,
            efficiency,
            &mut world.inventory,
            data,
        ));
    }
    events
}
