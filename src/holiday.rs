use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar;

/// How much of a day a holiday record consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayPart {
    Full,
    Half,
}

impl Default for DayPart {
    fn default() -> Self {
        DayPart::Full
    }
}

impl DayPart {
    pub fn as_str(&self) -> &'static str {
        match self {
            DayPart::Full => "full",
            DayPart::Half => "half",
        }
    }

    pub fn from_str(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "full" => Some(DayPart::Full),
            "half" => Some(DayPart::Half),
            _ => None,
        }
    }

    /// Fraction of the day still worked under a holiday of this part.
    pub fn working_fraction(&self) -> f64 {
        match self {
            DayPart::Full => 0.0,
            DayPart::Half => 0.5,
        }
    }
}

/// A single day of leave, stored on the employee (personal) or team that owns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OffDay {
    pub id: String,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default)]
    pub day_part: DayPart,
}

impl OffDay {
    pub fn new(id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            date,
            reason: None,
            day_part: DayPart::Full,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn half_day(mut self) -> Self {
        self.day_part = DayPart::Half;
        self
    }
}

/// An organization-wide holiday, stored on the plan root.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicHoliday {
    pub id: String,
    pub name: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub day_part: DayPart,
}

impl PublicHoliday {
    pub fn new(id: impl Into<String>, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            date,
            day_part: DayPart::Full,
        }
    }

    pub fn half_day(mut self) -> Self {
        self.day_part = DayPart::Half;
        self
    }
}

/// A leave span as entered by the user, before per-day expansion.
#[derive(Debug, Clone, PartialEq)]
pub struct OffDaySpan {
    pub id: String,
    pub reason: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub day_part: DayPart,
    pub exclude_weekends: bool,
}

impl OffDaySpan {
    pub fn new(id: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            reason: None,
            start_date,
            end_date,
            day_part: DayPart::Full,
            exclude_weekends: false,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn half_day(mut self) -> Self {
        self.day_part = DayPart::Half;
        self
    }

    pub fn skipping_weekends(mut self) -> Self {
        self.exclude_weekends = true;
        self
    }

    /// One [`OffDay`] record per day in the span.
    pub fn expand(&self) -> Vec<OffDay> {
        expand_span(&self.id, self.start_date, self.end_date, self.exclude_weekends)
            .into_iter()
            .map(|(id, date)| OffDay {
                id,
                date,
                reason: self.reason.clone(),
                day_part: self.day_part,
            })
            .collect()
    }
}

/// Scope of a unified holiday record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayKind {
    Public,
    Team,
    Personal,
}

impl HolidayKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            HolidayKind::Public => "public",
            HolidayKind::Team => "team",
            HolidayKind::Personal => "personal",
        }
    }

    pub fn from_str(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "public" => Some(HolidayKind::Public),
            "team" => Some(HolidayKind::Team),
            "personal" => Some(HolidayKind::Personal),
            _ => None,
        }
    }
}

/// Unified holiday record consumed by the resolver.
///
/// Derived on demand from the normalized store: public holidays, team off-days
/// and personal off-days all flatten into this shape. Exactly one scope
/// discriminator is set: `team_id` for Team, `employee_id` for Personal,
/// neither for Public. The weekend-skip flag is recorded at expansion time;
/// resolution never re-applies it (weekends carry no credit anyway).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holiday {
    pub id: String,
    pub kind: HolidayKind,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub day_part: DayPart,
    #[serde(default)]
    pub exclude_weekends: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employee_id: Option<String>,
}

impl Holiday {
    pub fn public(id: impl Into<String>, name: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            kind: HolidayKind::Public,
            name: name.into(),
            start_date: date,
            end_date: date,
            day_part: DayPart::Full,
            exclude_weekends: false,
            team_id: None,
            employee_id: None,
        }
    }

    pub fn team(
        id: impl Into<String>,
        name: impl Into<String>,
        date: NaiveDate,
        team_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: HolidayKind::Team,
            name: name.into(),
            start_date: date,
            end_date: date,
            day_part: DayPart::Full,
            exclude_weekends: false,
            team_id: Some(team_id.into()),
            employee_id: None,
        }
    }

    pub fn personal(
        id: impl Into<String>,
        name: impl Into<String>,
        date: NaiveDate,
        employee_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            kind: HolidayKind::Personal,
            name: name.into(),
            start_date: date,
            end_date: date,
            day_part: DayPart::Full,
            exclude_weekends: false,
            team_id: None,
            employee_id: Some(employee_id.into()),
        }
    }

    pub fn half_day(mut self) -> Self {
        self.day_part = DayPart::Half;
        self
    }

    /// Widen the record to an inclusive multi-day span.
    pub fn spanning(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    /// Whether the record's inclusive interval contains `date`.
    pub fn applies_on(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }
}

/// Expand an inclusive span into one `(id, date)` pair per calendar day.
///
/// Per-day ids are derived from the span id so a whole span can be traced back
/// to the action that created it. With `exclude_weekends`, Saturday and Sunday
/// produce no record at all.
pub fn expand_span(
    span_id: &str,
    start: NaiveDate,
    end: NaiveDate,
    exclude_weekends: bool,
) -> Vec<(String, NaiveDate)> {
    let mut records = Vec::new();
    for date in calendar::days(start, end) {
        if exclude_weekends && calendar::is_weekend(date) {
            continue;
        }
        records.push((format!("{span_id}_{date}"), date));
    }
    records
}
