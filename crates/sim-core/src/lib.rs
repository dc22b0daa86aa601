#![deny(warnings)]

//! Core domain models and invariants for Factory Tycoon.
//!
//! This crate defines the serializable world snapshot, the read-only reference
//! data the engine consumes, the configuration types and the error taxonomy.
//! Nothing in here advances time; see `sim-runtime` for that.

pub mod building;
pub mod catalog;
pub mod config;
pub mod error;
pub mod ids;
pub mod item;
pub mod logistics;
pub mod staff;
pub mod world;

pub use building::{
    Building, BuildingDetail, BuildingKind, BuildingStats, Factory, HrDepartment,
    LogisticsCenter, MarketingOffice, ProductionBatch, ResearchLab, Warehouse,
};
pub use catalog::{BuildingSpec, NameTable, ReferenceData, SpecialtyInfo, UpgradeLevel};
pub use config::{ConfigError, DayRange, EconomyConfig, FractionRange, SimConfig};
pub use error::{CatalogError, InvariantError, ValidationError};
pub use ids::{BuildingId, CandidateId, ContractId, EmployeeId, ItemId, TruckId};
pub use item::{Inventory, ItemCategory, ItemDefinition, RecipeInput};
pub use logistics::{Contract, ContractKind, ContractStatus, Truck, TruckState, TruckStatus};
pub use staff::{Candidate, Employee, EmploymentStatus, Profile, Sex, Specialty};
pub use world::{validate_world, EventLog, WorldState, EVENT_LOG_CAPACITY};
