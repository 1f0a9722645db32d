use chrono::NaiveDate;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::calendar;
use crate::employee::Employee;
use crate::holiday::DayPart;
use crate::resolver::{DayScope, HolidayResolver};

/// Sum of one employee's working-day fractions over the inclusive range.
///
/// Weekends contribute 0, half-day holidays 0.5 and free weekdays 1.0, so
/// the total is a real number of person-days.
pub fn member_working_days(
    resolver: &HolidayResolver<'_>,
    start: NaiveDate,
    end: NaiveDate,
    team_ids: &[&str],
    employee: &Employee,
) -> f64 {
    let scope = DayScope::new(&employee.id, team_ids);
    let mut total = 0.0;
    for date in calendar::days(start, end) {
        total += resolver.day_credit(date, scope);
    }
    total
}

/// Rounded average of member working days across a member set.
///
/// Backs both the per-team figure (one team id, that team's members) and the
/// combined figure (several team ids, the merged member list). An empty
/// member set averages to 0.
pub fn average_working_days(
    resolver: &HolidayResolver<'_>,
    start: NaiveDate,
    end: NaiveDate,
    team_ids: &[&str],
    members: &[&Employee],
) -> i64 {
    if members.is_empty() {
        return 0;
    }
    let total: f64 = members
        .par_iter()
        .map(|employee| member_working_days(resolver, start, end, team_ids, employee))
        .sum();
    (total / members.len() as f64).round() as i64
}

/// Per-member-day off-day tally: every member contributes 1 for each
/// non-weekend day an applicable holiday covers. Not deduplicated across
/// members, so the tally can exceed the number of calendar days.
pub fn off_day_count(
    resolver: &HolidayResolver<'_>,
    start: NaiveDate,
    end: NaiveDate,
    team_ids: &[&str],
    members: &[&Employee],
) -> u32 {
    members
        .par_iter()
        .map(|employee| {
            let scope = DayScope::new(&employee.id, team_ids);
            let mut count = 0;
            for date in calendar::days(start, end) {
                if resolver.is_off_day(date, scope) {
                    count += 1;
                }
            }
            count
        })
        .sum()
}

/// One attributed off-day entry for a member's detail listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffDayDetail {
    pub date: NaiveDate,
    pub reason: String,
    pub day_part: DayPart,
}

/// The member's off days over the range, one entry per affected non-weekend
/// day, attributed to the single governing holiday.
pub fn member_off_days(
    resolver: &HolidayResolver<'_>,
    start: NaiveDate,
    end: NaiveDate,
    team_ids: &[&str],
    employee_id: &str,
) -> Vec<OffDayDetail> {
    let scope = DayScope::new(employee_id, team_ids);
    let mut details = Vec::new();
    for date in calendar::days(start, end) {
        if calendar::is_weekend(date) {
            continue;
        }
        if let Some(holiday) = resolver.resolve(date, scope) {
            details.push(OffDayDetail {
                date,
                reason: holiday.name.clone(),
                day_part: holiday.day_part,
            });
        }
    }
    details
}

/// Organization-wide working days: weekends and public holidays excluded.
///
/// Personal and team leave never reduce this count, and a public holiday
/// excludes the whole day whatever its day part.
pub fn public_working_days(resolver: &HolidayResolver<'_>, start: NaiveDate, end: NaiveDate) -> i64 {
    let mut count = 0;
    for date in calendar::days(start, end) {
        if !calendar::is_weekend(date) && !resolver.has_public_holiday(date) {
            count += 1;
        }
    }
    count
}
