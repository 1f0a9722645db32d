use std::collections::HashMap;

use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::capacity::working_days::{self, OffDayDetail};
use crate::employee::{Employee, Role};
use crate::holiday::{Holiday, PublicHoliday};
use crate::organization::Organization;
use crate::pi::{Iteration, PiConfig, PiConfigResult};
use crate::resolver::HolidayResolver;
use crate::team::Team;

/// Headline numbers for the whole PI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiSummary {
    /// Inclusive calendar length of the window.
    pub total_days: i64,
    /// Non-weekend days with no public holiday; team and personal leave do
    /// not reduce this organization-wide figure.
    pub working_days: i64,
    pub iteration_count: u32,
    pub team_count: usize,
    pub employee_count: usize,
    /// Sum of employee day rates times `working_days`.
    pub total_hours: f64,
    /// Sum of employee SP rates times `iteration_count`. Flat, never
    /// availability-adjusted.
    pub total_sp: u32,
}

/// One team's capacity over the PI window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamCapacity {
    pub team_id: String,
    pub team_name: String,
    pub member_count: usize,
    /// Rounded average of member working days (public, team and personal
    /// leave all applied).
    pub working_days: i64,
    /// Per-member-day tally over the window.
    pub off_days: u32,
    /// Sum of member day rates.
    pub hours_per_day: f64,
    pub total_hours: f64,
    /// Sum of member SP rates.
    pub sp_per_iteration: u32,
    /// `sp_per_iteration` times the iteration count, never
    /// availability-adjusted; the adjusted view lives on iteration summaries.
    pub total_sp: u32,
}

/// Capacity of one iteration for a team selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationSummary {
    pub number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub member_count: usize,
    pub working_days: i64,
    pub off_days: u32,
    pub total_hours: f64,
    /// Availability-adjusted story points: each member contributes their SP
    /// rate scaled by worked weekdays over the iteration's weekday total.
    pub total_sp: f64,
}

/// Per-member drill-down row of an iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberIterationCapacity {
    pub employee_id: String,
    pub name: String,
    pub role: Role,
    pub working_days: f64,
    pub hours: f64,
    /// Availability-adjusted SP, rounded to whole points for display.
    pub adjusted_sp: u32,
    pub off_days: Vec<OffDayDetail>,
}

/// Aggregated capacity of one role within an iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoleCapacity {
    pub role: Role,
    pub member_count: usize,
    pub hours: f64,
    /// Unrounded sum of the members' availability-adjusted SP.
    pub adjusted_sp: f64,
}

/// An iteration summary with its member rows and role breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationDetail {
    pub summary: IterationSummary,
    pub members: Vec<MemberIterationCapacity>,
    /// Sorted alphabetically by role name.
    pub roles: Vec<RoleCapacity>,
}

/// Assembles capacity summaries from an entity snapshot.
///
/// The unified holiday view is derived once at construction; every
/// calculation after that is a pure read. A window whose end does not follow
/// its start produces zero-valued output rather than an error.
pub struct CapacityEngine<'a> {
    organization: &'a Organization,
    config: &'a PiConfig,
    holidays: Vec<Holiday>,
}

impl<'a> CapacityEngine<'a> {
    pub fn new(
        organization: &'a Organization,
        public_holidays: &'a [PublicHoliday],
        config: &'a PiConfig,
    ) -> Self {
        let holidays = organization.holidays(public_holidays);
        Self {
            organization,
            config,
            holidays,
        }
    }

    fn resolver(&self) -> HolidayResolver<'_> {
        HolidayResolver::new(&self.holidays)
    }

    /// PI-level totals across the whole organization.
    pub fn pi_summary(&self) -> PiConfigResult<PiSummary> {
        let (start, end) = self.config.window()?;
        let team_count = self.organization.teams.len();
        let employee_count = self.organization.employees.len();

        if end <= start {
            return Ok(PiSummary {
                total_days: 0,
                working_days: 0,
                iteration_count: 0,
                team_count,
                employee_count,
                total_hours: 0.0,
                total_sp: 0,
            });
        }

        let resolver = self.resolver();
        let working_days = working_days::public_working_days(&resolver, start, end);
        let iteration_count = self.config.iterations()?.len() as u32;

        let hours_per_day: f64 = self
            .organization
            .employees
            .iter()
            .map(|employee| employee.hours_per_day)
            .sum();
        let sp_per_iteration: u32 = self
            .organization
            .employees
            .iter()
            .map(|employee| employee.sp_capacity)
            .sum();

        Ok(PiSummary {
            total_days: calendar::day_count(start, end),
            working_days,
            iteration_count,
            team_count,
            employee_count,
            total_hours: hours_per_day * working_days as f64,
            total_sp: sp_per_iteration * iteration_count,
        })
    }

    /// Capacity of every team, in store order.
    pub fn team_capacities(&self) -> PiConfigResult<Vec<TeamCapacity>> {
        let (start, end) = self.config.window()?;

        if end <= start {
            return Ok(self
                .organization
                .teams
                .iter()
                .map(|team| self.team_capacity_zero(team))
                .collect());
        }

        let iteration_count = self.config.iterations()?.len() as u32;
        Ok(self
            .organization
            .teams
            .iter()
            .map(|team| self.assemble_team(team, start, end, iteration_count))
            .collect())
    }

    /// Capacity of one team; `None` when the id matches no team.
    pub fn team_capacity(&self, team_id: &str) -> PiConfigResult<Option<TeamCapacity>> {
        let (start, end) = self.config.window()?;
        let team = match self.organization.team(team_id) {
            Some(team) => team,
            None => return Ok(None),
        };

        if end <= start {
            return Ok(Some(self.team_capacity_zero(team)));
        }
        let iteration_count = self.config.iterations()?.len() as u32;
        Ok(Some(self.assemble_team(team, start, end, iteration_count)))
    }

    /// One summary per iteration for the selected teams.
    ///
    /// A single-element selection is the per-team view, several ids the
    /// combined view, and an empty selection covers every team.
    pub fn iteration_schedule(&self, team_ids: &[&str]) -> PiConfigResult<Vec<IterationSummary>> {
        let iterations = self.config.iterations()?;

        let all_ids: Vec<&str>;
        let selected: &[&str] = if team_ids.is_empty() {
            all_ids = self
                .organization
                .teams
                .iter()
                .map(|team| team.id.as_str())
                .collect();
            &all_ids
        } else {
            team_ids
        };

        let members = self.organization.members_of_teams(selected);
        let resolver = self.resolver();
        Ok(iterations
            .iter()
            .map(|iteration| self.assemble_iteration(iteration, selected, &members, &resolver))
            .collect())
    }

    /// Drill-down for one iteration: member rows plus the role breakdown.
    /// `None` when no iteration carries the number.
    pub fn iteration_detail(
        &self,
        number: u32,
        team_ids: &[&str],
    ) -> PiConfigResult<Option<IterationDetail>> {
        let iterations = self.config.iterations()?;
        let iteration = match iterations.iter().find(|it| it.number == number) {
            Some(iteration) => *iteration,
            None => return Ok(None),
        };

        let all_ids: Vec<&str>;
        let selected: &[&str] = if team_ids.is_empty() {
            all_ids = self
                .organization
                .teams
                .iter()
                .map(|team| team.id.as_str())
                .collect();
            &all_ids
        } else {
            team_ids
        };

        let members = self.organization.members_of_teams(selected);
        let resolver = self.resolver();
        let summary = self.assemble_iteration(&iteration, selected, &members, &resolver);

        let start = iteration.start_date;
        let end = iteration.end_date;
        let weekday_total = iteration.weekday_count();

        let mut member_rows = Vec::with_capacity(members.len());
        let mut by_role: HashMap<Role, RoleCapacity> = HashMap::new();
        for employee in &members {
            let worked = working_days::member_working_days(&resolver, start, end, selected, employee);
            let ratio = if weekday_total > 0 {
                worked / weekday_total as f64
            } else {
                0.0
            };
            let raw_sp = employee.sp_capacity as f64 * ratio;

            let entry = by_role.entry(employee.role).or_insert_with(|| RoleCapacity {
                role: employee.role,
                member_count: 0,
                hours: 0.0,
                adjusted_sp: 0.0,
            });
            entry.member_count += 1;
            entry.hours += employee.hours_per_day * worked;
            entry.adjusted_sp += raw_sp;

            member_rows.push(MemberIterationCapacity {
                employee_id: employee.id.clone(),
                name: employee.name.clone(),
                role: employee.role,
                working_days: worked,
                hours: employee.hours_per_day * worked,
                adjusted_sp: raw_sp.round() as u32,
                off_days: working_days::member_off_days(&resolver, start, end, selected, &employee.id),
            });
        }

        let mut roles: Vec<RoleCapacity> = by_role.into_values().collect();
        roles.sort_by(|a, b| a.role.as_str().cmp(b.role.as_str()));

        Ok(Some(IterationDetail {
            summary,
            members: member_rows,
            roles,
        }))
    }

    /// Attributed off days for one member over an explicit range.
    pub fn member_off_days(
        &self,
        employee_id: &str,
        start: NaiveDate,
        end: NaiveDate,
        team_ids: &[&str],
    ) -> Vec<OffDayDetail> {
        let resolver = self.resolver();
        working_days::member_off_days(&resolver, start, end, team_ids, employee_id)
    }

    fn assemble_team(
        &self,
        team: &Team,
        start: NaiveDate,
        end: NaiveDate,
        iteration_count: u32,
    ) -> TeamCapacity {
        let members = self.organization.team_members(team);
        let team_ids = [team.id.as_str()];
        let resolver = self.resolver();

        let working_days =
            working_days::average_working_days(&resolver, start, end, &team_ids, &members);
        let off_days = working_days::off_day_count(&resolver, start, end, &team_ids, &members);
        let hours_per_day: f64 = members.iter().map(|member| member.hours_per_day).sum();
        let sp_per_iteration: u32 = members.iter().map(|member| member.sp_capacity).sum();

        TeamCapacity {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            member_count: members.len(),
            working_days,
            off_days,
            hours_per_day,
            total_hours: hours_per_day * working_days as f64,
            sp_per_iteration,
            total_sp: sp_per_iteration * iteration_count,
        }
    }

    fn team_capacity_zero(&self, team: &Team) -> TeamCapacity {
        let members = self.organization.team_members(team);
        TeamCapacity {
            team_id: team.id.clone(),
            team_name: team.name.clone(),
            member_count: members.len(),
            working_days: 0,
            off_days: 0,
            hours_per_day: members.iter().map(|member| member.hours_per_day).sum(),
            total_hours: 0.0,
            sp_per_iteration: members.iter().map(|member| member.sp_capacity).sum(),
            total_sp: 0,
        }
    }

    fn assemble_iteration(
        &self,
        iteration: &Iteration,
        team_ids: &[&str],
        members: &[&Employee],
        resolver: &HolidayResolver<'_>,
    ) -> IterationSummary {
        let start = iteration.start_date;
        let end = iteration.end_date;

        let working_days =
            working_days::average_working_days(resolver, start, end, team_ids, members);
        let off_days = working_days::off_day_count(resolver, start, end, team_ids, members);
        let hours_per_day: f64 = members.iter().map(|member| member.hours_per_day).sum();
        let total_sp = adjusted_sp_total(
            resolver,
            start,
            end,
            team_ids,
            members,
            iteration.weekday_count(),
        );

        IterationSummary {
            number: iteration.number,
            start_date: start,
            end_date: end,
            member_count: members.len(),
            working_days,
            off_days,
            total_hours: hours_per_day * working_days as f64,
            total_sp,
        }
    }
}

/// Sum of availability-adjusted SP across the members.
///
/// The denominator is the iteration's weekday count with holidays ignored;
/// a weekday-free range yields 0 rather than dividing by zero.
fn adjusted_sp_total(
    resolver: &HolidayResolver<'_>,
    start: NaiveDate,
    end: NaiveDate,
    team_ids: &[&str],
    members: &[&Employee],
    weekday_total: i64,
) -> f64 {
    if weekday_total <= 0 {
        return 0.0;
    }
    // Per-member day sums are exact halves and reduce the same in any order.
    // The scaled terms are not, so they fold sequentially in member order and
    // repeated reads of one snapshot stay bit-identical.
    let worked: Vec<f64> = members
        .par_iter()
        .map(|employee| working_days::member_working_days(resolver, start, end, team_ids, employee))
        .collect();
    members
        .iter()
        .zip(worked)
        .map(|(employee, days)| employee.sp_capacity as f64 * (days / weekday_total as f64))
        .sum()
}
