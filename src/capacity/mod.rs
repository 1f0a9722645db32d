pub mod summaries;
pub mod working_days;

pub use summaries::{
    CapacityEngine, IterationDetail, IterationSummary, MemberIterationCapacity, PiSummary,
    RoleCapacity, TeamCapacity,
};
pub use working_days::OffDayDetail;
