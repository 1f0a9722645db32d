use serde::{Deserialize, Serialize};

use crate::capacity::{
    CapacityEngine, IterationDetail, IterationSummary, PiSummary, TeamCapacity,
};
use crate::holiday::{expand_span, OffDaySpan, PublicHoliday};
use crate::organization::Organization;
use crate::pi::{PiConfig, PiConfigResult};

/// The complete planning document: PI window, public holiday calendar and
/// roster. Serializes as one self-contained JSON value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PiPlan {
    #[serde(default)]
    pub config: PiConfig,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub public_holidays: Vec<PublicHoliday>,
    #[serde(default)]
    pub organization: Organization,
}

impl PiPlan {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: PiConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// A query engine over the current state of the plan.
    pub fn engine(&self) -> CapacityEngine<'_> {
        CapacityEngine::new(&self.organization, &self.public_holidays, &self.config)
    }

    pub fn pi_summary(&self) -> PiConfigResult<PiSummary> {
        self.engine().pi_summary()
    }

    pub fn team_capacities(&self) -> PiConfigResult<Vec<TeamCapacity>> {
        self.engine().team_capacities()
    }

    pub fn team_capacity(&self, team_id: &str) -> PiConfigResult<Option<TeamCapacity>> {
        self.engine().team_capacity(team_id)
    }

    pub fn iteration_schedule(&self, team_ids: &[&str]) -> PiConfigResult<Vec<IterationSummary>> {
        self.engine().iteration_schedule(team_ids)
    }

    pub fn iteration_detail(
        &self,
        number: u32,
        team_ids: &[&str],
    ) -> PiConfigResult<Option<IterationDetail>> {
        self.engine().iteration_detail(number, team_ids)
    }

    pub fn add_public_holiday(&mut self, holiday: PublicHoliday) {
        self.public_holidays.push(holiday);
    }

    /// Records one public holiday per day of the span and returns how many
    /// were added.
    pub fn add_public_holiday_span(&mut self, name: &str, span: &OffDaySpan) -> usize {
        let expanded = expand_span(
            &span.id,
            span.start_date,
            span.end_date,
            span.exclude_weekends,
        );
        let added = expanded.len();
        for (id, date) in expanded {
            let mut holiday = PublicHoliday::new(id, name, date);
            holiday.day_part = span.day_part;
            self.public_holidays.push(holiday);
        }
        added
    }

    /// Removes every public holiday carrying the id. Returns whether any
    /// record was removed.
    pub fn remove_public_holiday(&mut self, id: &str) -> bool {
        let before = self.public_holidays.len();
        self.public_holidays.retain(|holiday| holiday.id != id);
        self.public_holidays.len() != before
    }
}
