//! Domain model: enums, plan types, and user state.

pub mod enums;
pub mod plan;
pub mod user;

pub use enums::{BlockCategory, BlockType, CheckInStatus, HeavyLevel, MainsPaper, Phase, Subject};
pub use plan::{
    DailyPlan, PlanCard, Severity, SubjectPriority, ValidationResult, ValidationViolation,
    WeeklyPlan,
};
pub use user::{ActivityLogEntry, DayActivity, RecoveryState, Stage, TopicConfidence, UserProfile};
