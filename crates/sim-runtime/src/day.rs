//! Day advancement: sequences production, logistics, markets and payroll into
//! one atomic transition.

use crate::logistics::run_logistics;
use crate::production::run_production;
use chrono::Days;
use rand::Rng;
use serde::{Deserialize, Serialize};
use sim_core::{
    BuildingKind, Candidate, CandidateId, Contract, ContractId, ContractStatus, EconomyConfig,
    ReferenceData, ValidationError, WorldState,
};
use sim_econ::{generate_candidates, generate_contracts};

/// Money movements booked by one day advance.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CashFlow {
    pub income: i64,
    /// Base daily cost plus building maintenance.
    pub operating_costs: i64,
    pub salaries: i64,
    /// SELL settlements of trucks that came back today.
    pub logistics: i64,
    pub net: i64,
}

/// A committed day.
#[derive(Clone, Debug, PartialEq)]
pub struct DayReport {
    pub state: WorldState,
    /// Today's events in emission order.
    pub events: Vec<String>,
    pub cash: CashFlow,
}

/// Money needed on hand before a day may start.
pub fn daily_costs(world: &WorldState, cfg: &EconomyConfig) -> i64 {
    cfg.base_daily_cost + world.total_maintenance()
}

/// Drop completed contracts and pending offers whose last acceptance day has passed.
pub fn prune_contracts(world: &mut WorldState) {
    let tomorrow = world.date + Days::new(1);
    world.contracts.retain(|c| match c.status {
        ContractStatus::Completed => false,
        ContractStatus::Pending => c.expiration_date >= tomorrow,
        ContractStatus::Active => true,
    });
}

fn refresh_candidates<R: Rng + ?Sized>(
    world: &mut WorldState,
    data: &ReferenceData,
    cfg: &EconomyConfig,
    rng: &mut R,
    events: &mut Vec<String>,
) {
    let Some(report) = generate_candidates(world, data, cfg, rng) else {
        return;
    };
    let count = report.candidates.len();
    let mut candidates = Vec::with_capacity(count);
    for offer in report.candidates {
        candidates.push(Candidate {
            id: CandidateId(world.allocate_id("cand")),
            profile: offer.profile,
            hiring_fee: offer.hiring_fee,
        });
    }
    world.candidates = candidates;
    world.next_candidate_refresh_date = report.next_refresh_date;
    tracing::info!(count, "candidate pool refreshed");
    events.push(format!("New recruitment report: {count} candidates available."));
}

fn refresh_contracts<R: Rng + ?Sized>(
    world: &mut WorldState,
    data: &ReferenceData,
    cfg: &EconomyConfig,
    rng: &mut R,
    events: &mut Vec<String>,
) {
    let refresh = generate_contracts(world, data, cfg, rng);
    world.next_contract_date = refresh.next_contract_date;
    if refresh.market_full() {
        events.push("The contract market is full; no new offers today.".to_string());
        return;
    }
    let count = refresh.offers.len();
    for offer in refresh.offers {
        let id = ContractId(world.allocate_id("contract"));
        world.contracts.push(Contract {
            id,
            kind: offer.kind,
            status: ContractStatus::Pending,
            item: offer.item,
            quantity: offer.quantity,
            amount: offer.amount,
            travel_time: offer.travel_time,
            expiration_date: offer.expiration_date,
        });
    }
    tracing::info!(count, slots = refresh.slots, "contract market refreshed");
    if count > 0 {
        events.push(format!("{count} new contracts on the market."));
    }
}

/// Advance `state` by one day.
///
/// Fails without any change when the company cannot cover today's costs: the
/// base cost plus maintenance must be on hand before the day starts
/// ([`ValidationError::InsufficientFunds`]), and the day's cash flow, salaries
/// included, must not leave money negative ([`ValidationError::PayrollShortfall`]).
pub fn advance_day<R: Rng + ?Sized>(
    state: &WorldState,
    data: &ReferenceData,
    cfg: &EconomyConfig,
    rng: &mut R,
) -> Result<DayReport, ValidationError> {
    let upkeep = daily_costs(state, cfg);
    if state.money < upkeep {
        return Err(ValidationError::InsufficientFunds {
            required: upkeep,
            available: state.money,
        });
    }

    let mut next = state.clone();
    let today = state.date;
    let mut events = run_production(&mut next, data);

    let logistics = run_logistics(&mut next);
    events.extend(logistics.events);

    prune_contracts(&mut next);

    if today >= next.next_candidate_refresh_date {
        refresh_candidates(&mut next, data, cfg, rng, &mut events);
    }
    if today >= next.next_contract_date && next.has_building(BuildingKind::LogisticsCenter) {
        refresh_contracts(&mut next, data, cfg, rng, &mut events);
    }

    let operating_costs = daily_costs(&next, cfg);
    let salaries = next.total_salaries();
    let cash = CashFlow {
        income: cfg.daily_income,
        operating_costs,
        salaries,
        logistics: logistics.money,
        net: cfg.daily_income - operating_costs - salaries + logistics.money,
    };
    if next.money + cash.net < 0 {
        return Err(ValidationError::PayrollShortfall {
            costs: operating_costs,
            salaries,
            available: state.money + cash.income + cash.logistics,
        });
    }

    next.money += cash.net;
    next.date = today + Days::new(1);
    events.push(format!(
        "Day advanced. Income: ${}, costs: ${}, salaries: ${}.",
        cash.income, cash.operating_costs, cash.salaries
    ));
    next.events.record(events.clone());
    tracing::info!(date = %next.date, money = next.money, net = cash.net, "day committed");

    Ok(DayReport {
        state: next,
        events,
        cash,
    })
}
