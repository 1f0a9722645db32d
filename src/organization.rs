use std::fmt;

use serde::{Deserialize, Serialize};

use crate::employee::Employee;
use crate::holiday::{Holiday, OffDaySpan, PublicHoliday};
use crate::roster_validation;
use crate::team::Team;

#[derive(Debug, Clone)]
pub enum RosterError {
    DuplicateEmployee(String),
    DuplicateTeam(String),
    UnknownEmployee(String),
    UnknownTeam(String),
    SingleTeamRole {
        employee_id: String,
        team_id: String,
    },
    EmptyTeamSelection,
    InvalidHours {
        employee_id: String,
        hours: f64,
    },
}

impl fmt::Display for RosterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RosterError::DuplicateEmployee(id) => write!(f, "duplicate employee id {id}"),
            RosterError::DuplicateTeam(id) => write!(f, "duplicate team id {id}"),
            RosterError::UnknownEmployee(id) => write!(f, "unknown employee id {id}"),
            RosterError::UnknownTeam(id) => write!(f, "unknown team id {id}"),
            RosterError::SingleTeamRole {
                employee_id,
                team_id,
            } => write!(
                f,
                "employee {employee_id} has a single-team role and cannot join team {team_id} while assigned elsewhere"
            ),
            RosterError::EmptyTeamSelection => {
                write!(f, "team off-day span requires at least one team")
            }
            RosterError::InvalidHours { employee_id, hours } => {
                write!(f, "employee {employee_id} has invalid hours per day {hours}")
            }
        }
    }
}

impl std::error::Error for RosterError {}

pub type RosterResult<T> = Result<T, RosterError>;

/// Normalized entity store: one record per employee, teams referencing them
/// by id. Flat views and the unified holiday list are derived on demand.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Organization {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub employees: Vec<Employee>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub teams: Vec<Team>,
}

impl Organization {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn employee(&self, employee_id: &str) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == employee_id)
    }

    pub fn team(&self, team_id: &str) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == team_id)
    }

    /// Resolve a team's member list, in member-list order.
    /// Ids that no longer match an employee are skipped.
    pub fn team_members(&self, team: &Team) -> Vec<&Employee> {
        team.member_ids
            .iter()
            .filter_map(|id| self.employee(id))
            .collect()
    }

    /// Every employee belonging to at least one of the given teams, in store
    /// order. Each employee appears once however many teams match.
    pub fn members_of_teams(&self, team_ids: &[&str]) -> Vec<&Employee> {
        self.employees
            .iter()
            .filter(|employee| {
                self.teams
                    .iter()
                    .any(|team| team_ids.contains(&team.id.as_str()) && team.has_member(&employee.id))
            })
            .collect()
    }

    /// Teams the employee currently belongs to.
    pub fn employee_teams(&self, employee_id: &str) -> Vec<&Team> {
        self.teams
            .iter()
            .filter(|team| team.has_member(employee_id))
            .collect()
    }

    /// Flatten the store plus the organization-wide public holidays into the
    /// unified records the resolver consumes. Derived fresh on every call;
    /// the store never keeps a second synchronized copy.
    pub fn holidays(&self, public_holidays: &[PublicHoliday]) -> Vec<Holiday> {
        let mut holidays = Vec::new();

        for public in public_holidays {
            let mut record = Holiday::public(public.id.clone(), public.name.clone(), public.date);
            record.day_part = public.day_part;
            holidays.push(record);
        }

        for employee in &self.employees {
            for off in &employee.off_days {
                let name = off
                    .reason
                    .clone()
                    .unwrap_or_else(|| "Personal Leave".to_string());
                let mut record =
                    Holiday::personal(off.id.clone(), name, off.date, employee.id.clone());
                record.day_part = off.day_part;
                holidays.push(record);
            }
        }

        for team in &self.teams {
            for off in &team.off_days {
                let name = off.reason.clone().unwrap_or_else(|| "Team Off".to_string());
                let mut record = Holiday::team(off.id.clone(), name, off.date, team.id.clone());
                record.day_part = off.day_part;
                holidays.push(record);
            }
        }

        holidays
    }

    /// Check store-wide invariants: unique ids, valid rates, and the
    /// single-team rule. Intended for freshly decoded documents.
    pub fn validate(&self) -> RosterResult<()> {
        roster_validation::validate_organization(self)
    }

    /// Insert the employee, or replace the record with the same id.
    pub fn upsert_employee(&mut self, employee: Employee) -> RosterResult<()> {
        roster_validation::validate_employee(&employee)?;
        match self.employees.iter_mut().find(|e| e.id == employee.id) {
            Some(existing) => *existing = employee,
            None => self.employees.push(employee),
        }
        Ok(())
    }

    /// Remove employees and cascade them out of every team's member list.
    /// Their personal leave goes with them.
    pub fn remove_employees(&mut self, employee_ids: &[&str]) {
        self.employees
            .retain(|employee| !employee_ids.contains(&employee.id.as_str()));
        for team in self.teams.iter_mut() {
            team.member_ids
                .retain(|member_id| !employee_ids.contains(&member_id.as_str()));
        }
    }

    /// Insert the team, or replace the one with the same id.
    ///
    /// Member ids whose employee has a single-team role and already belongs
    /// to another team are dropped from the incoming list; the dropped ids
    /// are returned so the caller can report them. Ids with no matching
    /// employee are kept (derivations skip them until the employee appears).
    pub fn upsert_team(&mut self, team: Team) -> Vec<String> {
        let mut team = team;
        let mut skipped = Vec::new();

        let mut admitted = Vec::with_capacity(team.member_ids.len());
        for member_id in &team.member_ids {
            if roster_validation::violates_single_team(self, member_id, &team.id) {
                skipped.push(member_id.clone());
            } else {
                admitted.push(member_id.clone());
            }
        }
        team.member_ids = admitted;

        match self.teams.iter_mut().find(|t| t.id == team.id) {
            Some(existing) => *existing = team,
            None => self.teams.push(team),
        }
        skipped
    }

    /// Remove teams. Their members stay in the store as teamless employees.
    pub fn remove_teams(&mut self, team_ids: &[&str]) {
        self.teams
            .retain(|team| !team_ids.contains(&team.id.as_str()));
    }

    /// Add an employee to a team's member list.
    ///
    /// Re-assigning an existing member is a no-op. Fails when either id is
    /// unknown or the single-team rule would be violated.
    pub fn assign_member(&mut self, team_id: &str, employee_id: &str) -> RosterResult<()> {
        roster_validation::ensure_assignable(self, team_id, employee_id)?;
        if let Some(team) = self.teams.iter_mut().find(|t| t.id == team_id) {
            if !team.has_member(employee_id) {
                team.member_ids.push(employee_id.to_string());
            }
        }
        Ok(())
    }

    /// Drop an employee from a team's member list.
    pub fn unassign_member(&mut self, team_id: &str, employee_id: &str) -> RosterResult<()> {
        let team = self
            .teams
            .iter_mut()
            .find(|t| t.id == team_id)
            .ok_or_else(|| RosterError::UnknownTeam(team_id.to_string()))?;
        team.member_ids.retain(|member_id| member_id != employee_id);
        Ok(())
    }

    /// Expand a leave span into per-day records on the employee.
    /// Returns how many day records were created.
    pub fn add_personal_off_span(
        &mut self,
        employee_id: &str,
        span: &OffDaySpan,
    ) -> RosterResult<usize> {
        let employee = self
            .employees
            .iter_mut()
            .find(|e| e.id == employee_id)
            .ok_or_else(|| RosterError::UnknownEmployee(employee_id.to_string()))?;
        let records = span.expand();
        let created = records.len();
        employee.off_days.extend(records);
        Ok(created)
    }

    /// Expand a leave span onto every selected team, one record set per team.
    /// Unknown team ids are skipped; an empty selection is rejected.
    /// Returns how many day records were created across all teams.
    pub fn add_team_off_span(&mut self, team_ids: &[&str], span: &OffDaySpan) -> RosterResult<usize> {
        if team_ids.is_empty() {
            return Err(RosterError::EmptyTeamSelection);
        }
        let mut created = 0;
        for team in self.teams.iter_mut() {
            if !team_ids.contains(&team.id.as_str()) {
                continue;
            }
            let records = span.expand();
            created += records.len();
            team.off_days.extend(records);
        }
        Ok(created)
    }

    /// Remove every off-day record with the given id, wherever it is stored.
    /// Span expansion shares per-day ids across selected teams, so one id can
    /// name the same day on several teams.
    pub fn remove_off_day(&mut self, off_day_id: &str) -> bool {
        let mut removed = false;
        for employee in self.employees.iter_mut() {
            let before = employee.off_days.len();
            employee.off_days.retain(|off| off.id != off_day_id);
            removed |= employee.off_days.len() != before;
        }
        for team in self.teams.iter_mut() {
            let before = team.off_days.len();
            team.off_days.retain(|off| off.id != off_day_id);
            removed |= team.off_days.len() != before;
        }
        removed
    }
}
