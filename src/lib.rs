pub mod calendar;
pub mod capacity;
pub mod employee;
pub mod holiday;
pub mod organization;
pub mod pi;
pub mod plan;
pub mod resolver;
pub mod team;

pub(crate) mod roster_validation;

pub use capacity::{
    CapacityEngine, IterationDetail, IterationSummary, MemberIterationCapacity, OffDayDetail,
    PiSummary, RoleCapacity, TeamCapacity,
};
pub use employee::{Employee, Role};
pub use holiday::{DayPart, Holiday, HolidayKind, OffDay, OffDaySpan, PublicHoliday};
pub use organization::{Organization, RosterError, RosterResult};
pub use pi::{Iteration, PiConfig, PiConfigError, PiConfigResult};
pub use plan::PiPlan;
pub use resolver::{DayScope, HolidayResolver};
pub use team::Team;
