use chrono::NaiveDate;

use crate::calendar;
use crate::holiday::{Holiday, HolidayKind};

/// Member and team context a day is resolved against.
#[derive(Debug, Clone, Copy)]
pub struct DayScope<'a> {
    pub employee_id: &'a str,
    pub team_ids: &'a [&'a str],
}

impl<'a> DayScope<'a> {
    pub fn new(employee_id: &'a str, team_ids: &'a [&'a str]) -> Self {
        Self {
            employee_id,
            team_ids,
        }
    }
}

/// Decides which single holiday record governs a day for a member.
///
/// Scopes are tried in a fixed priority order; the first scope producing a
/// match wins and the rest are never consulted, so at most one record is
/// attributed per day.
pub struct HolidayResolver<'a> {
    holidays: &'a [Holiday],
}

impl<'a> HolidayResolver<'a> {
    const PRIORITY: [HolidayKind; 3] = [
        HolidayKind::Public,
        HolidayKind::Team,
        HolidayKind::Personal,
    ];

    pub fn new(holidays: &'a [Holiday]) -> Self {
        Self { holidays }
    }

    /// The applicable holiday for `date` under public > team > personal.
    pub fn resolve(&self, date: NaiveDate, scope: DayScope<'_>) -> Option<&'a Holiday> {
        Self::PRIORITY
            .iter()
            .find_map(|kind| self.first_match(*kind, date, scope))
    }

    /// Working credit for the day: 1.0 for a free weekday, 0.5 under a
    /// half-day holiday, 0.0 under a full-day holiday or on a weekend.
    pub fn day_credit(&self, date: NaiveDate, scope: DayScope<'_>) -> f64 {
        if calendar::is_weekend(date) {
            return 0.0;
        }
        match self.resolve(date, scope) {
            Some(holiday) => holiday.day_part.working_fraction(),
            None => 1.0,
        }
    }

    /// Whether an applicable holiday makes this a countable off day.
    /// Weekends are never off days.
    pub fn is_off_day(&self, date: NaiveDate, scope: DayScope<'_>) -> bool {
        !calendar::is_weekend(date) && self.resolve(date, scope).is_some()
    }

    /// Whether any public holiday covers the date, whatever its day part.
    pub fn has_public_holiday(&self, date: NaiveDate) -> bool {
        self.holidays
            .iter()
            .any(|holiday| holiday.kind == HolidayKind::Public && holiday.applies_on(date))
    }

    fn first_match(
        &self,
        kind: HolidayKind,
        date: NaiveDate,
        scope: DayScope<'_>,
    ) -> Option<&'a Holiday> {
        self.holidays.iter().find(|holiday| {
            holiday.kind == kind && holiday.applies_on(date) && Self::in_scope(holiday, scope)
        })
    }

    fn in_scope(holiday: &Holiday, scope: DayScope<'_>) -> bool {
        match holiday.kind {
            HolidayKind::Public => true,
            HolidayKind::Team => match holiday.team_id.as_deref() {
                Some(team_id) => scope.team_ids.contains(&team_id),
                None => false,
            },
            HolidayKind::Personal => holiday.employee_id.as_deref() == Some(scope.employee_id),
        }
    }
}
