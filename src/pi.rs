use std::fmt;

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::calendar;

#[derive(Debug, Clone)]
pub enum PiConfigError {
    /// The PI window is incomplete; calculations need both dates.
    NotConfigured,
}

impl fmt::Display for PiConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PiConfigError::NotConfigured => {
                write!(f, "program increment start and end dates are not configured")
            }
        }
    }
}

impl std::error::Error for PiConfigError {}

pub type PiConfigResult<T> = Result<T, PiConfigError>;

/// Program Increment window and iteration length.
///
/// Dates stay optional until the planning form fills them in; every
/// calculation is gated on [`PiConfig::window`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiConfig {
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    /// Iteration length in weeks.
    #[serde(default = "default_iteration_weeks")]
    pub iteration_weeks: u32,
}

fn default_iteration_weeks() -> u32 {
    2
}

impl Default for PiConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            start_date: None,
            end_date: None,
            iteration_weeks: default_iteration_weeks(),
        }
    }
}

impl PiConfig {
    pub fn new(name: impl Into<String>, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            name: name.into(),
            start_date: Some(start_date),
            end_date: Some(end_date),
            iteration_weeks: default_iteration_weeks(),
        }
    }

    pub fn with_iteration_weeks(mut self, weeks: u32) -> Self {
        self.iteration_weeks = weeks;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.start_date.is_some() && self.end_date.is_some()
    }

    /// Both window dates, or [`PiConfigError::NotConfigured`].
    pub fn window(&self) -> PiConfigResult<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(PiConfigError::NotConfigured),
        }
    }

    /// Calendar length of one iteration.
    pub fn iteration_days(&self) -> i64 {
        i64::from(self.iteration_weeks) * 7
    }

    /// Inclusive calendar days in the window (0 when the window is reversed).
    pub fn total_days(&self) -> PiConfigResult<i64> {
        let (start, end) = self.window()?;
        Ok(calendar::day_count(start, end))
    }

    /// Split the window into fixed-length iterations.
    ///
    /// The last iteration is clamped to the window end. A window whose end
    /// does not follow its start, or a zero iteration length, yields no
    /// iterations at all.
    pub fn iterations(&self) -> PiConfigResult<Vec<Iteration>> {
        let (start, end) = self.window()?;

        let mut iterations = Vec::new();
        if end <= start || self.iteration_weeks == 0 {
            return Ok(iterations);
        }

        let span = self.iteration_days();
        let planned = (calendar::day_count(start, end) + span - 1) / span;

        for n in 0..planned {
            let slot_start = start + Duration::days(n * span);
            if slot_start > end {
                // ceiling arithmetic can plan one slot past the window
                break;
            }
            let slot_end = (slot_start + Duration::days(span - 1)).min(end);
            iterations.push(Iteration {
                number: (n + 1) as u32,
                start_date: slot_start,
                end_date: slot_end,
            });
        }
        Ok(iterations)
    }
}

/// One fixed-length slice of the PI. Derived on every read, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Iteration {
    /// 1-based sequence number.
    pub number: u32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Iteration {
    /// Non-weekend days in the iteration, ignoring holidays.
    pub fn weekday_count(&self) -> i64 {
        calendar::weekday_count(self.start_date, self.end_date)
    }
}
