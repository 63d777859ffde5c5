//! Deterministic planning engine: phase detection, budgets, fatigue caps,
//! priorities, mastery tracking, validation, and repair.

pub mod allocator;
pub mod confidence;
pub mod fatigue;
pub mod phase;
pub mod priority;
pub mod repair;
pub mod validator;

pub use allocator::{NEWS_MINUTES, allocate_minutes};
pub use confidence::{apply_completion, apply_inactivity_decay, apply_skip, process_checkin};
pub use fatigue::{compute_daily_fatigue_cap, daily_fatigue, within_cap};
pub use phase::{compute_blend_percentages, determine_phase};
pub use priority::{compute_prelims_priority, compute_recency_penalty, rank_subjects};
pub use repair::repair_consecutive_heavy;
pub use validator::validate_weekly_plan;
