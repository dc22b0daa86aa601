//! Employees, hiring candidates and specialties.

use crate::building::BuildingKind;
use crate::ids::{BuildingId, CandidateId, EmployeeId};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Specialty {
    FactoryManager,
    LogisticsCoordinator,
    SalesExecutive,
    ResearchLead,
}

impl Specialty {
    pub const ALL: [Specialty; 4] = [
        Specialty::FactoryManager,
        Specialty::LogisticsCoordinator,
        Specialty::SalesExecutive,
        Specialty::ResearchLead,
    ];

    /// The building kind this specialty may manage.
    pub fn managed_kind(self) -> BuildingKind {
        match self {
            Specialty::FactoryManager => BuildingKind::Factory,
            Specialty::LogisticsCoordinator => BuildingKind::LogisticsCenter,
            Specialty::SalesExecutive => BuildingKind::MarketingOffice,
            Specialty::ResearchLead => BuildingKind::ResearchLab,
        }
    }
}

impl fmt::Display for Specialty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Specialty::FactoryManager => "FACTORY_MANAGER",
            Specialty::LogisticsCoordinator => "LOGISTICS_COORDINATOR",
            Specialty::SalesExecutive => "SALES_EXECUTIVE",
            Specialty::ResearchLead => "RESEARCH_LEAD",
        };
        f.write_str(s)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sex {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EmploymentStatus {
    Unassigned,
    Assigned,
}

/// Personal and professional data shared by candidates and employees.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub age: u32,
    pub sex: Sex,
    pub specialty: Specialty,
    /// 1..=100
    pub skill_level: u32,
    /// Paid every day while on the roster.
    pub salary: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    #[serde(flatten)]
    pub profile: Profile,
    /// Weak reference to the managed building.
    #[serde(default)]
    pub assigned_building: Option<BuildingId>,
}

impl Employee {
    pub fn status(&self) -> EmploymentStatus {
        if self.assigned_building.is_some() {
            EmploymentStatus::Assigned
        } else {
            EmploymentStatus::Unassigned
        }
    }

    /// Days of salary owed when let go.
    pub fn severance(&self, days: u32) -> i64 {
        self.profile.salary * i64::from(days)
    }
}

/// A hireable person from the latest recruitment report.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    #[serde(flatten)]
    pub profile: Profile,
    /// One-time fee paid on hire.
    pub hiring_fee: i64,
}
