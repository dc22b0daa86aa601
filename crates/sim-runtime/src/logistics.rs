//! Logistics dispatcher: truck round trips and contract settlement.

use sim_core::{
    ContractId, ContractKind, ContractStatus, Truck, TruckState, ValidationError, WorldState,
};

/// What the fleet produced during one day.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LogisticsOutcome {
    /// Cash settled on return; SELL payouts only.
    pub money: i64,
    pub events: Vec<String>,
}

/// Advance every truck by one day in fleet order.
///
/// Settlement moves inventory and truck stats directly; the cash part is
/// returned so the day orchestrator can book it with the rest of the cash flow.
pub fn run_logistics(world: &mut WorldState) -> LogisticsOutcome {
    let mut out = LogisticsOutcome::default();
    for truck in world.trucks.iter_mut() {
        let Some(job) = truck.job().cloned() else {
            continue;
        };
        let Some(contract) = world.contracts.iter_mut().find(|c| c.id == job) else {
            tracing::warn!(truck = %truck.id, contract = %job, "job vanished; truck reset to idle");
            truck.state = TruckState::Idle;
            continue;
        };
        match &mut truck.state {
            TruckState::Idle => {}
            TruckState::Delivering { days_left, .. } => {
                *days_left = days_left.saturating_sub(1);
                if *days_left == 0 {
                    truck.state = TruckState::Returning {
                        job,
                        days_left: contract.travel_time,
                    };
                    out.events.push(format!(
                        "{} reached the client for contract {} and is heading back.",
                        truck.name, contract.id
                    ));
                }
            }
            TruckState::Returning { days_left, .. } => {
                *days_left = days_left.saturating_sub(1);
                if *days_left > 0 {
                    continue;
                }
                match contract.kind {
                    ContractKind::Sell => {
                        out.money += contract.amount;
                        truck.total_revenue += contract.amount;
                        out.events.push(format!(
                            "{} is back: contract {} paid ${}.",
                            truck.name, contract.id, contract.amount
                        ));
                    }
                    ContractKind::Buy => {
                        world.inventory.add(&contract.item, contract.quantity);
                        truck.total_expenses += contract.amount;
                        out.events.push(format!(
                            "{} is back with {}x {} for contract {}.",
                            truck.name, contract.quantity, contract.item, contract.id
                        ));
                    }
                }
                tracing::debug!(truck = %truck.id, contract = %contract.id, "contract settled");
                contract.status = ContractStatus::Completed;
                truck.jobs_completed += 1;
                truck.state = TruckState::Idle;
            }
        }
    }
    out
}

/// Send the first idle truck on a pending contract.
///
/// The side of the trade the company gives up moves now: stock for SELL, cash
/// for BUY. The other side settles when the truck returns.
pub fn dispatch(world: &mut WorldState, contract_id: &ContractId) -> Result<String, ValidationError> {
    let contract = world
        .contract(contract_id)
        .ok_or_else(|| ValidationError::ContractNotFound(contract_id.clone()))?;
    if !contract.is_pending() {
        return Err(ValidationError::ContractNotPending(contract_id.clone()));
    }
    let truck_idx = world
        .trucks
        .iter()
        .position(Truck::is_idle)
        .ok_or(ValidationError::NoIdleTruck)?;
    match contract.kind {
        ContractKind::Sell => {
            let available = world.inventory.quantity(&contract.item);
            if available < contract.quantity {
                return Err(ValidationError::InsufficientInventory {
                    item: contract.item.clone(),
                    required: contract.quantity,
                    available,
                });
            }
        }
        ContractKind::Buy => {
            if world.money < contract.amount {
                return Err(ValidationError::InsufficientFunds {
                    required: contract.amount,
                    available: world.money,
                });
            }
        }
    }

    let (kind, item, quantity, amount, travel_time) = (
        contract.kind,
        contract.item.clone(),
        contract.quantity,
        contract.amount,
        contract.travel_time,
    );
    match kind {
        ContractKind::Sell => world.inventory.remove(&item, quantity)?,
        ContractKind::Buy => world.money -= amount,
    }
    if let Some(c) = world.contracts.iter_mut().find(|c| &c.id == contract_id) {
        c.status = ContractStatus::Active;
    }
    let truck = &mut world.trucks[truck_idx];
    truck.state = TruckState::Delivering {
        job: contract_id.clone(),
        days_left: travel_time,
    };
    Ok(format!(
        "{} dispatched for contract {contract_id} ({quantity}x {item}, {travel_time} days each way).",
        truck.name
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{add_truck, contract, logistics_world};
    use sim_core::TruckStatus;

    #[test]
    fn sell_round_trip_settles_on_return() {
        let (_, mut world) = logistics_world();
        add_truck(&mut world);
        world.contracts.push(contract("contract-1", ContractKind::Sell, "base_wood", 10, 150, 2));
        let money = world.money;

        dispatch(&mut world, &"contract-1".into()).unwrap();
        assert_eq!(world.inventory.quantity(&"base_wood".into()), 90);
        assert_eq!(world.money, money);
        assert_eq!(world.contracts[0].status, ContractStatus::Active);

        let day1 = run_logistics(&mut world);
        assert!(day1.events.is_empty());
        assert_eq!(world.trucks[0].time_remaining(), 1);

        let day2 = run_logistics(&mut world);
        assert_eq!(day2.events.len(), 1);
        assert_eq!(world.trucks[0].status(), TruckStatus::Returning);
        assert_eq!(world.trucks[0].time_remaining(), 2);

        run_logistics(&mut world);
        let day4 = run_logistics(&mut world);
        assert_eq!(day4.money, 150);
        let t = &world.trucks[0];
        assert!(t.is_idle() && t.job().is_none());
        assert_eq!((t.total_revenue, t.jobs_completed), (150, 1));
        assert_eq!(world.contracts[0].status, ContractStatus::Completed);
    }

    #[test]
    fn buy_pays_up_front_and_delivers_goods() {
        let (_, mut world) = logistics_world();
        add_truck(&mut world);
        world.contracts.push(contract("contract-1", ContractKind::Buy, "base_coal", 20, 230, 1));
        let money = world.money;
        dispatch(&mut world, &"contract-1".into()).unwrap();
        assert_eq!(world.money, money - 230);

        run_logistics(&mut world);
        let back = run_logistics(&mut world);
        assert_eq!(back.money, 0);
        assert_eq!(world.inventory.quantity(&"base_coal".into()), 20);
        assert_eq!(world.trucks[0].total_expenses, 230);
    }

    #[test]
    fn sell_without_stock_is_rejected_untouched() {
        let (_, mut world) = logistics_world();
        add_truck(&mut world);
        world.inventory = sim_core::Inventory::from([("comp_steel_plate", 5)]);
        world.contracts.push(contract("contract-1", ContractKind::Sell, "comp_steel_plate", 10, 500, 1));
        let before = world.clone();
        let err = dispatch(&mut world, &"contract-1".into()).unwrap_err();
        assert!(matches!(err, ValidationError::InsufficientInventory { required: 10, available: 5, .. }));
        assert_eq!(world, before);
    }

    #[test]
    fn busy_fleet_and_stale_contracts_are_rejected() {
        let (_, mut world) = logistics_world();
        world.contracts.push(contract("contract-1", ContractKind::Buy, "base_coal", 1, 10, 1));
        assert_eq!(dispatch(&mut world, &"contract-1".into()), Err(ValidationError::NoIdleTruck));
        add_truck(&mut world);
        dispatch(&mut world, &"contract-1".into()).unwrap();
        assert_eq!(
            dispatch(&mut world, &"contract-1".into()),
            Err(ValidationError::ContractNotPending("contract-1".into()))
        );
        assert_eq!(
            dispatch(&mut world, &"contract-9".into()),
            Err(ValidationError::ContractNotFound("contract-9".into()))
        );
    }

    #[test]
    fn lost_job_resets_truck_without_settlement() {
        let (_, mut world) = logistics_world();
        add_truck(&mut world);
        world.trucks[0].state = TruckState::Returning {
            job: "contract-404".into(),
            days_left: 1,
        };
        let out = run_logistics(&mut world);
        assert_eq!(out, LogisticsOutcome::default());
        assert!(world.trucks[0].is_idle());
        assert_eq!(world.trucks[0].jobs_completed, 0);
    }
}
