//! Simulation configuration.
//!
//! Every field has a default so a partial YAML file only overrides what it names.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{fs, io};
use thiserror::Error;

/// Inclusive range of whole days.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRange {
    pub min: u32,
    pub max: u32,
}

impl DayRange {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }
}

/// Inclusive range of fractions, e.g. a 5%..20% margin.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FractionRange {
    pub min: f64,
    pub max: f64,
}

impl FractionRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Tunable constants of the daily economy and the markets.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EconomyConfig {
    /// Fixed income credited every day.
    pub daily_income: i64,
    /// Fixed cost added on top of building maintenance every day.
    pub base_daily_cost: i64,
    pub truck_cost: i64,
    /// Cap on simultaneously pending market contracts.
    pub max_pending_contracts: usize,
    /// Salary days paid when firing.
    pub severance_days: u32,
    pub candidate_refresh_days: u32,
    pub contract_refresh_days: DayRange,
    pub contract_expiry_days: DayRange,
    pub travel_time_days: DayRange,
    /// Upper bound of one contract's value as a share of company value.
    pub contract_value_share: f64,
    /// Value multiplier for contracts on raw resources.
    pub base_resource_factor: f64,
    pub sell_margin: FractionRange,
    pub buy_premium: FractionRange,
    /// Draws allowed per open market slot before a refresh gives up.
    pub contract_attempts_per_slot: usize,
}

impl Default for EconomyConfig {
    fn default() -> Self {
        Self {
            daily_income: 500,
            base_daily_cost: 150,
            truck_cost: 5000,
            max_pending_contracts: 10,
            severance_days: 7,
            candidate_refresh_days: 3,
            contract_refresh_days: DayRange::new(3, 7),
            contract_expiry_days: DayRange::new(3, 7),
            travel_time_days: DayRange::new(1, 3),
            contract_value_share: 0.1,
            base_resource_factor: 0.5,
            sell_margin: FractionRange::new(0.05, 0.20),
            buy_premium: FractionRange::new(0.05, 0.15),
            contract_attempts_per_slot: 5,
        }
    }
}

/// Simulation configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for deterministic RNG.
    pub rng_seed: u64,
    pub economy: EconomyConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            rng_seed: 42,
            economy: EconomyConfig::default(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("failed to read config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl SimConfig {
    pub fn from_yaml_str(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_yaml_str(&contents)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_yaml_keeps_defaults() {
        let cfg = SimConfig::from_yaml_str("rng_seed: 7\neconomy:\n  truck_cost: 8000\n").unwrap();
        assert_eq!(cfg.rng_seed, 7);
        assert_eq!(cfg.economy.truck_cost, 8000);
        assert_eq!(cfg.economy.daily_income, 500);
        assert_eq!(cfg.economy.contract_refresh_days, DayRange::new(3, 7));
    }

    #[test]
    fn empty_document_is_default() {
        let cfg = SimConfig::from_yaml_str("{}").unwrap();
        assert_eq!(cfg, SimConfig::default());
    }
}
