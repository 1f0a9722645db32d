use serde::{Deserialize, Serialize};

use crate::holiday::OffDay;

/// Job role of an employee.
///
/// Multi-team eligibility is a capability of the role, queried through
/// [`Role::multi_team`] instead of comparing role names at call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Product Owner")]
    ProductOwner,
    #[serde(rename = "Product Designer")]
    ProductDesigner,
    #[serde(rename = "Developer")]
    Developer,
    #[serde(rename = "Tester")]
    Tester,
    #[serde(rename = "Scrum Master")]
    ScrumMaster,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::ProductOwner => "Product Owner",
            Role::ProductDesigner => "Product Designer",
            Role::Developer => "Developer",
            Role::Tester => "Tester",
            Role::ScrumMaster => "Scrum Master",
        }
    }

    pub fn from_str(input: &str) -> Option<Self> {
        match input.trim() {
            "Product Owner" => Some(Role::ProductOwner),
            "Product Designer" => Some(Role::ProductDesigner),
            "Developer" => Some(Role::Developer),
            "Tester" => Some(Role::Tester),
            "Scrum Master" => Some(Role::ScrumMaster),
            _ => None,
        }
    }

    /// Whether the role may hold membership in several teams at once.
    pub fn multi_team(&self) -> bool {
        matches!(self, Role::ProductOwner | Role::ProductDesigner)
    }
}

/// A person with capacity rates and personal leave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    pub id: String,
    pub name: String,
    pub role: Role,
    /// Contracted hours per working day. Positive.
    pub hours_per_day: f64,
    /// Story points the employee can take on per iteration.
    pub sp_capacity: u32,
    /// Personal leave, one record per day.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub off_days: Vec<OffDay>,
}

impl Employee {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        role: Role,
        hours_per_day: f64,
        sp_capacity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            hours_per_day,
            sp_capacity,
            off_days: Vec::new(),
        }
    }

    pub fn with_off_day(mut self, off_day: OffDay) -> Self {
        self.off_days.push(off_day);
        self
    }
}
