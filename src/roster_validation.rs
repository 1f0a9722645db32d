use std::collections::HashSet;

use crate::employee::Employee;
use crate::organization::{Organization, RosterError, RosterResult};

pub(crate) fn validate_employee(employee: &Employee) -> RosterResult<()> {
    if !employee.hours_per_day.is_finite() || employee.hours_per_day <= 0.0 {
        return Err(RosterError::InvalidHours {
            employee_id: employee.id.clone(),
            hours: employee.hours_per_day,
        });
    }
    Ok(())
}

pub(crate) fn validate_organization(organization: &Organization) -> RosterResult<()> {
    let mut employee_ids = HashSet::with_capacity(organization.employees.len());
    for employee in &organization.employees {
        if !employee_ids.insert(employee.id.as_str()) {
            return Err(RosterError::DuplicateEmployee(employee.id.clone()));
        }
        validate_employee(employee)?;
    }

    let mut team_ids = HashSet::with_capacity(organization.teams.len());
    for team in &organization.teams {
        if !team_ids.insert(team.id.as_str()) {
            return Err(RosterError::DuplicateTeam(team.id.clone()));
        }
    }

    // single-team roles must not appear in a second member list
    for employee in &organization.employees {
        if employee.role.multi_team() {
            continue;
        }
        let second_team = organization
            .teams
            .iter()
            .filter(|team| team.has_member(&employee.id))
            .nth(1);
        if let Some(team) = second_team {
            return Err(RosterError::SingleTeamRole {
                employee_id: employee.id.clone(),
                team_id: team.id.clone(),
            });
        }
    }
    Ok(())
}

/// True when admitting the employee into the team would leave a single-team
/// role assigned to two teams at once.
pub(crate) fn violates_single_team(
    organization: &Organization,
    employee_id: &str,
    joining_team_id: &str,
) -> bool {
    let employee = match organization.employee(employee_id) {
        Some(employee) => employee,
        None => return false,
    };
    if employee.role.multi_team() {
        return false;
    }
    organization
        .teams
        .iter()
        .any(|team| team.id != joining_team_id && team.has_member(employee_id))
}

pub(crate) fn ensure_assignable(
    organization: &Organization,
    team_id: &str,
    employee_id: &str,
) -> RosterResult<()> {
    if organization.team(team_id).is_none() {
        return Err(RosterError::UnknownTeam(team_id.to_string()));
    }
    if organization.employee(employee_id).is_none() {
        return Err(RosterError::UnknownEmployee(employee_id.to_string()));
    }
    if violates_single_team(organization, employee_id, team_id) {
        return Err(RosterError::SingleTeamRole {
            employee_id: employee_id.to_string(),
            team_id: team_id.to_string(),
        });
    }
    Ok(())
}
