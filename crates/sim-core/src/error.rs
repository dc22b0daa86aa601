//! Error types for commands, world invariants and reference data.

use crate::building::BuildingKind;
use crate::ids::{BuildingId, CandidateId, ContractId, EmployeeId, ItemId, TruckId};
use crate::staff::Specialty;
use std::path::PathBuf;
use thiserror::Error;

/// Business-rule rejection of a command or day advance.
///
/// Every variant is recoverable: the world is left untouched and the caller
/// may resubmit once the condition changes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("insufficient funds: need ${required}, have ${available}")]
    InsufficientFunds { required: i64, available: i64 },
    #[error("cannot cover today's bills: ${costs} upkeep plus ${salaries} salaries, ${available} on hand")]
    PayrollShortfall {
        costs: i64,
        salaries: i64,
        available: i64,
    },
    #[error("insufficient {item}: need {required}, have {available}")]
    InsufficientInventory {
        item: ItemId,
        required: u64,
        available: u64,
    },
    #[error("unknown item: {0}")]
    UnknownItem(ItemId),
    #[error("{0} cannot be manufactured")]
    NotManufacturable(ItemId),
    #[error("quantity must be greater than zero")]
    InvalidQuantity,
    #[error("building not found: {0}")]
    BuildingNotFound(BuildingId),
    #[error("{0} is not a factory")]
    NotAFactory(BuildingId),
    #[error("all {slots} production slots of {factory} are busy")]
    NoProductionSlot { factory: BuildingId, slots: u32 },
    #[error("{item} requires factory level {required}, {factory} is level {actual}")]
    FactoryLevelTooLow {
        factory: BuildingId,
        item: ItemId,
        required: u32,
        actual: u32,
    },
    #[error("{building} is already at max level {level}")]
    MaxLevelReached { building: BuildingId, level: u32 },
    #[error("contract not found: {0}")]
    ContractNotFound(ContractId),
    #[error("contract {0} is no longer pending")]
    ContractNotPending(ContractId),
    #[error("no idle truck available")]
    NoIdleTruck,
    #[error("all {slots} truck slots are in use")]
    TruckSlotsFull { slots: u32 },
    #[error("employee roster is full ({capacity} max)")]
    RosterFull { capacity: u32 },
    #[error("candidate not found: {0}")]
    CandidateNotFound(CandidateId),
    #[error("employee not found: {0}")]
    EmployeeNotFound(EmployeeId),
    #[error("{building} is already managed by {manager}")]
    BuildingOccupied {
        building: BuildingId,
        manager: EmployeeId,
    },
    #[error("{0} has no manager position")]
    NoManagerSlot(BuildingId),
    #[error("a {specialty} cannot manage a {kind}")]
    IncompatibleSpecialty {
        specialty: Specialty,
        kind: BuildingKind,
    },
    #[error("{employee} already manages {building}")]
    EmployeeAlreadyAssigned {
        employee: EmployeeId,
        building: BuildingId,
    },
    #[error("{0} is not assigned to any building")]
    EmployeeNotAssigned(EmployeeId),
}

/// Broken invariant found by [`crate::validate_world`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvariantError {
    #[error("money is negative: {0}")]
    NegativeMoney(i64),
    #[error("duplicate id: {0}")]
    DuplicateId(String),
    #[error("building {0} has level 0")]
    ZeroLevel(BuildingId),
    #[error("truck {truck} references missing contract {contract}")]
    DanglingJob { truck: TruckId, contract: ContractId },
    #[error("contract {0} is carried by more than one truck")]
    SharedContract(ContractId),
    #[error("contract {0} is active but no truck carries it")]
    OrphanedContract(ContractId),
    #[error("manager link between {building} and {employee} is not mutual")]
    ManagerMismatch {
        building: BuildingId,
        employee: EmployeeId,
    },
}

/// Failure to load or cross-check reference data.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse reference data {file}: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("failed to read reference data from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("recipe of {item} references unknown input {input}")]
    UnknownRecipeInput { item: ItemId, input: ItemId },
    #[error("upgrade table of {kind} is missing level {level}")]
    MissingLevel { kind: BuildingKind, level: u32 },
    #[error("name lists must not be empty")]
    EmptyNames,
}
