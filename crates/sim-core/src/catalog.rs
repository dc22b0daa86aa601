//! Read-only reference data: items, building tables, specialties and names.
//!
//! The builtin tables are compiled in from `data/*.yaml`; [`ReferenceData::from_dir`]
//! loads the same three files from disk for modded or rebalanced games.

use crate::building::{Building, BuildingDetail, BuildingKind, BuildingStats};
use crate::error::CatalogError;
use crate::ids::{BuildingId, ItemId};
use crate::item::{Inventory, ItemCategory, ItemDefinition};
use crate::staff::Specialty;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub const BUILTIN_ITEMS: &str = include_str!("../data/items.yaml");
pub const BUILTIN_BUILDINGS: &str = include_str!("../data/buildings.yaml");
pub const BUILTIN_STAFF: &str = include_str!("../data/staff.yaml");

/// Stats, cost and upkeep that apply from `level` onwards.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpgradeLevel {
    pub level: u32,
    pub cost: i64,
    pub maintenance_cost: i64,
    #[serde(flatten)]
    pub stats: BuildingStats,
}

/// Purchase data and upgrade table for one building kind.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingSpec {
    pub name: String,
    pub cost: i64,
    /// Level-1 upkeep.
    pub maintenance_cost: i64,
    pub max_level: u32,
    /// Level-1 stats.
    #[serde(default)]
    pub base: BuildingStats,
    #[serde(default)]
    pub levels: Vec<UpgradeLevel>,
}

impl BuildingSpec {
    pub fn level(&self, level: u32) -> Option<&UpgradeLevel> {
        self.levels.iter().find(|l| l.level == level)
    }

    /// A fresh level-1 building of `kind`.
    pub fn instantiate(&self, kind: BuildingKind, id: BuildingId) -> Building {
        let mut building = Building {
            id,
            level: 1,
            maintenance_cost: self.maintenance_cost,
            detail: BuildingDetail::blank(kind),
        };
        building.apply_stats(&self.base);
        building
    }
}

/// One spec per building kind; lookups are total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildingCatalog {
    pub factory: BuildingSpec,
    pub warehouse: BuildingSpec,
    pub research_lab: BuildingSpec,
    pub marketing_office: BuildingSpec,
    pub hr_department: BuildingSpec,
    pub logistics_center: BuildingSpec,
}

impl BuildingCatalog {
    pub fn get(&self, kind: BuildingKind) -> &BuildingSpec {
        match kind {
            BuildingKind::Factory => &self.factory,
            BuildingKind::Warehouse => &self.warehouse,
            BuildingKind::ResearchLab => &self.research_lab,
            BuildingKind::MarketingOffice => &self.marketing_office,
            BuildingKind::HrDepartment => &self.hr_department,
            BuildingKind::LogisticsCenter => &self.logistics_center,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyInfo {
    pub name: String,
    /// Template with a `{value}` placeholder for the skill-scaled bonus.
    pub bonus: String,
    /// Skill is divided by this to produce the bonus value.
    pub bonus_divisor: f64,
}

impl SpecialtyInfo {
    pub fn describe_bonus(&self, skill_level: u32) -> String {
        let value = f64::from(skill_level) / self.bonus_divisor;
        self.bonus.replace("{value}", &format!("{value:.1}"))
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpecialtyCatalog {
    pub factory_manager: SpecialtyInfo,
    pub logistics_coordinator: SpecialtyInfo,
    pub sales_executive: SpecialtyInfo,
    pub research_lead: SpecialtyInfo,
}

impl SpecialtyCatalog {
    pub fn get(&self, specialty: Specialty) -> &SpecialtyInfo {
        match specialty {
            Specialty::FactoryManager => &self.factory_manager,
            Specialty::LogisticsCoordinator => &self.logistics_coordinator,
            Specialty::SalesExecutive => &self.sales_executive,
            Specialty::ResearchLead => &self.research_lead,
        }
    }
}

/// Word lists for cosmetic candidate names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameTable {
    pub first: Vec<String>,
    pub last: Vec<String>,
}

#[derive(Deserialize)]
struct StaffFile {
    specialties: SpecialtyCatalog,
    names: NameTable,
}

/// Immutable tables consumed by the engine.
#[derive(Clone, Debug)]
pub struct ReferenceData {
    items: BTreeMap<ItemId, ItemDefinition>,
    buildings: BuildingCatalog,
    specialties: SpecialtyCatalog,
    names: NameTable,
}

fn parse<T: for<'de> Deserialize<'de>>(file: &str, text: &str) -> Result<T, CatalogError> {
    serde_yaml::from_str(text).map_err(|source| CatalogError::Parse {
        file: file.to_string(),
        source,
    })
}

impl ReferenceData {
    /// Tables shipped with the game.
    pub fn builtin() -> Result<Self, CatalogError> {
        Self::from_yaml(BUILTIN_ITEMS, BUILTIN_BUILDINGS, BUILTIN_STAFF)
    }

    pub fn from_yaml(items: &str, buildings: &str, staff: &str) -> Result<Self, CatalogError> {
        let items: BTreeMap<ItemId, ItemDefinition> = parse("items.yaml", items)?;
        let buildings: BuildingCatalog = parse("buildings.yaml", buildings)?;
        let staff: StaffFile = parse("staff.yaml", staff)?;
        let data = Self {
            items,
            buildings,
            specialties: staff.specialties,
            names: staff.names,
        };
        data.check()?;
        tracing::debug!(items = data.items.len(), "reference data loaded");
        Ok(data)
    }

    /// Load `items.yaml`, `buildings.yaml` and `staff.yaml` from `dir`.
    pub fn from_dir(dir: &Path) -> Result<Self, CatalogError> {
        let read = |name: &str| {
            let path = dir.join(name);
            fs::read_to_string(&path).map_err(|source| CatalogError::Read { path, source })
        };
        Self::from_yaml(
            &read("items.yaml")?,
            &read("buildings.yaml")?,
            &read("staff.yaml")?,
        )
    }

    fn check(&self) -> Result<(), CatalogError> {
        for (id, def) in &self.items {
            for input in &def.recipe {
                if !self.items.contains_key(&input.item) {
                    return Err(CatalogError::UnknownRecipeInput {
                        item: id.clone(),
                        input: input.item.clone(),
                    });
                }
            }
        }
        for kind in BuildingKind::ALL {
            let spec = self.buildings.get(kind);
            for level in 2..=spec.max_level {
                if spec.level(level).is_none() {
                    return Err(CatalogError::MissingLevel { kind, level });
                }
            }
        }
        if self.names.first.is_empty() || self.names.last.is_empty() {
            return Err(CatalogError::EmptyNames);
        }
        Ok(())
    }

    pub fn item(&self, id: &ItemId) -> Option<&ItemDefinition> {
        self.items.get(id)
    }

    /// All items in id order.
    pub fn items(&self) -> impl Iterator<Item = (&ItemId, &ItemDefinition)> {
        self.items.iter()
    }

    pub fn items_in(&self, category: ItemCategory) -> impl Iterator<Item = &ItemId> {
        self.items
            .iter()
            .filter(move |(_, def)| def.category == category)
            .map(|(id, _)| id)
    }

    pub fn building(&self, kind: BuildingKind) -> &BuildingSpec {
        self.buildings.get(kind)
    }

    pub fn specialty(&self, specialty: Specialty) -> &SpecialtyInfo {
        self.specialties.get(specialty)
    }

    pub fn names(&self) -> &NameTable {
        &self.names
    }

    /// Volume occupied by `inventory`; unknown items count as zero.
    pub fn storage_used(&self, inventory: &Inventory) -> u64 {
        inventory
            .iter()
            .map(|(id, q)| self.item(id).map_or(0, |def| def.volume * q))
            .sum()
    }
}
