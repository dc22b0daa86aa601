//! Buildings as a closed set of variants.
//!
//! Every kind-specific field lives in [`BuildingDetail`]; call sites match on it
//! exhaustively instead of probing for optional fields.

use crate::ids::{BuildingId, EmployeeId, ItemId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Discriminant of a building variant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingKind {
    Factory,
    Warehouse,
    ResearchLab,
    MarketingOffice,
    HrDepartment,
    LogisticsCenter,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 6] = [
        BuildingKind::Factory,
        BuildingKind::Warehouse,
        BuildingKind::ResearchLab,
        BuildingKind::MarketingOffice,
        BuildingKind::HrDepartment,
        BuildingKind::LogisticsCenter,
    ];

    /// Tag used as the id prefix, e.g. "FACTORY".
    pub fn tag(self) -> &'static str {
        match self {
            BuildingKind::Factory => "FACTORY",
            BuildingKind::Warehouse => "WAREHOUSE",
            BuildingKind::ResearchLab => "RESEARCH_LAB",
            BuildingKind::MarketingOffice => "MARKETING_OFFICE",
            BuildingKind::HrDepartment => "HR_DEPARTMENT",
            BuildingKind::LogisticsCenter => "LOGISTICS_CENTER",
        }
    }
}

impl fmt::Display for BuildingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// One entry of a factory production queue; the whole batch completes at once.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionBatch {
    pub item: ItemId,
    pub quantity: u64,
    /// Days left for the whole batch at 100% efficiency.
    pub time_remaining: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Factory {
    /// Max concurrent queue entries.
    pub production_slots: u32,
    /// Baseline efficiency in percent.
    pub efficiency: u32,
    /// Insertion order is priority order.
    #[serde(default)]
    pub production_queue: Vec<ProductionBatch>,
    #[serde(default)]
    pub manager: Option<EmployeeId>,
}

impl Factory {
    pub fn has_free_slot(&self) -> bool {
        self.production_queue.len() < self.production_slots as usize
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    /// Informational storage volume; never enforced.
    pub capacity: u64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchLab {
    pub research_slots: u32,
    pub research_points_per_day: u32,
    #[serde(default)]
    pub manager: Option<EmployeeId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarketingOffice {
    pub campaign_slots: u32,
    pub brand_awareness: u32,
    #[serde(default)]
    pub manager: Option<EmployeeId>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HrDepartment {
    pub max_employees: u32,
    pub training_speed_bonus: u32,
    /// Candidates produced per recruitment report.
    pub recruitment_level: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogisticsCenter {
    pub truck_slots: u32,
    /// Percent; descriptive only.
    pub shipping_cost_reduction: u32,
    #[serde(default)]
    pub manager: Option<EmployeeId>,
}

/// Kind-specific state of a building.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BuildingDetail {
    Factory(Factory),
    Warehouse(Warehouse),
    ResearchLab(ResearchLab),
    MarketingOffice(MarketingOffice),
    HrDepartment(HrDepartment),
    LogisticsCenter(LogisticsCenter),
}

impl BuildingDetail {
    /// Zeroed variant of `kind`, to be filled from a stat table.
    pub fn blank(kind: BuildingKind) -> Self {
        match kind {
            BuildingKind::Factory => BuildingDetail::Factory(Factory {
                production_slots: 0,
                efficiency: 0,
                production_queue: Vec::new(),
                manager: None,
            }),
            BuildingKind::Warehouse => BuildingDetail::Warehouse(Warehouse { capacity: 0 }),
            BuildingKind::ResearchLab => BuildingDetail::ResearchLab(ResearchLab {
                research_slots: 0,
                research_points_per_day: 0,
                manager: None,
            }),
            BuildingKind::MarketingOffice => BuildingDetail::MarketingOffice(MarketingOffice {
                campaign_slots: 0,
                brand_awareness: 0,
                manager: None,
            }),
            BuildingKind::HrDepartment => BuildingDetail::HrDepartment(HrDepartment {
                max_employees: 0,
                training_speed_bonus: 0,
                recruitment_level: 0,
            }),
            BuildingKind::LogisticsCenter => BuildingDetail::LogisticsCenter(LogisticsCenter {
                truck_slots: 0,
                shipping_cost_reduction: 0,
                manager: None,
            }),
        }
    }
}

/// Stat overrides from a level table. Fields that do not belong to the
/// building's kind are ignored when merged.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildingStats {
    pub production_slots: Option<u32>,
    pub efficiency: Option<u32>,
    pub capacity: Option<u64>,
    pub research_slots: Option<u32>,
    pub research_points_per_day: Option<u32>,
    pub campaign_slots: Option<u32>,
    pub brand_awareness: Option<u32>,
    pub max_employees: Option<u32>,
    pub training_speed_bonus: Option<u32>,
    pub recruitment_level: Option<u32>,
    pub truck_slots: Option<u32>,
    pub shipping_cost_reduction: Option<u32>,
}

fn merge<T: Copy>(field: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *field = v;
    }
}

/// A constructed building.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub id: BuildingId,
    pub level: u32,
    /// Paid every day regardless of use.
    pub maintenance_cost: i64,
    #[serde(flatten)]
    pub detail: BuildingDetail,
}

impl Building {
    pub fn kind(&self) -> BuildingKind {
        match &self.detail {
            BuildingDetail::Factory(_) => BuildingKind::Factory,
            BuildingDetail::Warehouse(_) => BuildingKind::Warehouse,
            BuildingDetail::ResearchLab(_) => BuildingKind::ResearchLab,
            BuildingDetail::MarketingOffice(_) => BuildingKind::MarketingOffice,
            BuildingDetail::HrDepartment(_) => BuildingKind::HrDepartment,
            BuildingDetail::LogisticsCenter(_) => BuildingKind::LogisticsCenter,
        }
    }

    pub fn as_factory(&self) -> Option<&Factory> {
        match &self.detail {
            BuildingDetail::Factory(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_factory_mut(&mut self) -> Option<&mut Factory> {
        match &mut self.detail {
            BuildingDetail::Factory(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_hr_department(&self) -> Option<&HrDepartment> {
        match &self.detail {
            BuildingDetail::HrDepartment(hr) => Some(hr),
            _ => None,
        }
    }

    pub fn as_logistics_center(&self) -> Option<&LogisticsCenter> {
        match &self.detail {
            BuildingDetail::LogisticsCenter(lc) => Some(lc),
            _ => None,
        }
    }

    /// Current manager, if this kind has a manager position and it is filled.
    pub fn manager(&self) -> Option<&EmployeeId> {
        match &self.detail {
            BuildingDetail::Factory(f) => f.manager.as_ref(),
            BuildingDetail::ResearchLab(l) => l.manager.as_ref(),
            BuildingDetail::MarketingOffice(m) => m.manager.as_ref(),
            BuildingDetail::LogisticsCenter(lc) => lc.manager.as_ref(),
            BuildingDetail::Warehouse(_) | BuildingDetail::HrDepartment(_) => None,
        }
    }

    /// Manager position, or `None` for kinds without one.
    pub fn manager_slot_mut(&mut self) -> Option<&mut Option<EmployeeId>> {
        match &mut self.detail {
            BuildingDetail::Factory(f) => Some(&mut f.manager),
            BuildingDetail::ResearchLab(l) => Some(&mut l.manager),
            BuildingDetail::MarketingOffice(m) => Some(&mut m.manager),
            BuildingDetail::LogisticsCenter(lc) => Some(&mut lc.manager),
            BuildingDetail::Warehouse(_) | BuildingDetail::HrDepartment(_) => None,
        }
    }

    /// Truck slots contributed to the fleet; zero for non-logistics kinds.
    pub fn truck_slots(&self) -> u32 {
        match &self.detail {
            BuildingDetail::LogisticsCenter(lc) => lc.truck_slots,
            BuildingDetail::Factory(_)
            | BuildingDetail::Warehouse(_)
            | BuildingDetail::ResearchLab(_)
            | BuildingDetail::MarketingOffice(_)
            | BuildingDetail::HrDepartment(_) => 0,
        }
    }

    /// Merge the stat fields that apply to this kind.
    pub fn apply_stats(&mut self, stats: &BuildingStats) {
        match &mut self.detail {
            BuildingDetail::Factory(f) => {
                merge(&mut f.production_slots, stats.production_slots);
                merge(&mut f.efficiency, stats.efficiency);
            }
            BuildingDetail::Warehouse(w) => merge(&mut w.capacity, stats.capacity),
            BuildingDetail::ResearchLab(l) => {
                merge(&mut l.research_slots, stats.research_slots);
                merge(&mut l.research_points_per_day, stats.research_points_per_day);
            }
            BuildingDetail::MarketingOffice(m) => {
                merge(&mut m.campaign_slots, stats.campaign_slots);
                merge(&mut m.brand_awareness, stats.brand_awareness);
            }
            BuildingDetail::HrDepartment(hr) => {
                merge(&mut hr.max_employees, stats.max_employees);
                merge(&mut hr.training_speed_bonus, stats.training_speed_bonus);
                merge(&mut hr.recruitment_level, stats.recruitment_level);
            }
            BuildingDetail::LogisticsCenter(lc) => {
                merge(&mut lc.truck_slots, stats.truck_slots);
                merge(&mut lc.shipping_cost_reduction, stats.shipping_cost_reduction);
            }
        }
    }
}
