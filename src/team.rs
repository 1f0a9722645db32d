use serde::{Deserialize, Serialize};

use crate::holiday::OffDay;

/// A team holding member references and team-wide leave.
///
/// Members are stored as employee ids (weak references); the owning
/// organization resolves them to employee records on demand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub member_ids: Vec<String>,
    /// Team-wide leave, one record per day.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub off_days: Vec<OffDay>,
}

impl Team {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            member_ids: Vec::new(),
            off_days: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn has_member(&self, employee_id: &str) -> bool {
        self.member_ids.iter().any(|id| id == employee_id)
    }
}
