#![deny(warnings)]

//! Economic models for Factory Tycoon: market and recruiting generators.
//!
//! Everything here is a pure function of a world snapshot, the reference data,
//! the economy config and an injected RNG. Generators return drafts without ids;
//! the runtime assigns ids and commits them.

pub mod market;
pub mod pricing;
pub mod recruiting;
pub mod weighted;

pub use market::{
    generate_contracts, open_slots, CandidatePool, ContractOffer, ContractPool, MarketContext,
    MarketRefresh,
};
pub use pricing::{contract_amount, units_for_value, EconError};
pub use recruiting::{generate_candidates, CandidateOffer, RecruitmentReport};
pub use weighted::{choose_pool, Pool};
