//! Plan types: cards, days, weeks, and validation outcomes.
//!
//! These types double as the wire format for generated plans: a
//! [`WeeklyPlan`] deserializes directly from the JSON object the content
//! generator embeds in its response (see [`crate::generator::extract`]).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{BlockCategory, BlockType, CheckInStatus, Subject};

fn new_card_id() -> String {
    Uuid::new_v4().to_string()
}

fn default_status() -> CheckInStatus {
    CheckInStatus::Pending
}

fn now_utc() -> DateTime<Utc> {
    Utc::now()
}

// ---------------------------------------------------------------------------
// Cards and days
// ---------------------------------------------------------------------------

/// One scheduled activity block within a day.
///
/// `card_id`, `actual_duration`, and `status` are engine-owned and absent
/// from generator output; serde fills them with defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanCard {
    #[serde(default = "new_card_id")]
    pub card_id: String,
    pub block_type: BlockType,
    pub category: BlockCategory,
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default)]
    pub topic: Option<String>,
    /// Planned minutes, must be positive.
    pub planned_duration: u32,
    /// Minutes actually spent, recorded at check-in.
    #[serde(default)]
    pub actual_duration: Option<u32>,
    /// Exertion cost, 1..=4, fixed per block type by the catalog.
    pub fatigue: i32,
    /// Zero-based position within the day.
    pub order: u32,
    #[serde(default = "default_status")]
    pub status: CheckInStatus,
}

/// A calendar date with its ordered cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyPlan {
    pub date: NaiveDate,
    #[serde(default)]
    pub cards: Vec<PlanCard>,
    #[serde(default)]
    pub finalized: bool,
    #[serde(default)]
    pub finalized_at: Option<DateTime<Utc>>,
}

impl DailyPlan {
    /// Sum of planned card durations in minutes.
    pub fn total_planned_minutes(&self) -> u32 {
        self.cards.iter().map(|c| c.planned_duration).sum()
    }

    /// Sum of card fatigue values.
    pub fn total_fatigue(&self) -> i32 {
        self.cards.iter().map(|c| c.fatigue).sum()
    }
}

/// Seven [`DailyPlan`]s anchored at a Monday.
///
/// The one-day-per-date shape is enforced by the planner when accepting
/// generator output, not by this type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyPlan {
    pub user_id: String,
    /// Monday the week starts on.
    pub week_start: NaiveDate,
    #[serde(default)]
    pub days: Vec<DailyPlan>,
    #[serde(default)]
    pub narrative: String,
    #[serde(default = "now_utc")]
    pub generated_at: DateTime<Utc>,
}

impl WeeklyPlan {
    /// Total number of cards across all days.
    pub fn card_count(&self) -> usize {
        self.days.iter().map(|d| d.cards.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Validation outcomes
// ---------------------------------------------------------------------------

/// Severity of a validation violation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

/// One broken rule, with the day it was observed on where applicable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationViolation {
    /// Rule identifier (`R03`..`R13`, or `PARSE` for the synthetic
    /// unparseable-output violation).
    pub rule_id: String,
    pub message: String,
    #[serde(default)]
    pub day: Option<NaiveDate>,
    #[serde(default)]
    pub severity: Severity,
}

impl ValidationViolation {
    /// Create an error-severity violation.
    pub fn new(rule_id: impl Into<String>, message: impl Into<String>, day: Option<NaiveDate>) -> Self {
        Self {
            rule_id: rule_id.into(),
            message: message.into(),
            day,
            severity: Severity::Error,
        }
    }
}

/// Outcome of running the full rule set over a weekly plan.
///
/// Violations are kept in rule evaluation order, never reordered by
/// severity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    #[serde(default)]
    pub violations: Vec<ValidationViolation>,
}

impl ValidationResult {
    /// Build a result from a collected violation list.
    pub fn from_violations(violations: Vec<ValidationViolation>) -> Self {
        Self {
            valid: violations.is_empty(),
            violations,
        }
    }
}

// ---------------------------------------------------------------------------
// Priorities
// ---------------------------------------------------------------------------

/// One subject's scheduling priority, recomputed from scratch every
/// ranking run. Never persisted as authoritative state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubjectPriority {
    pub subject: Subject,
    pub raw_priority: f64,
    /// Perceived confidence divided by the 5.0 scale maximum.
    pub normalized_confidence: f64,
    pub weight: f64,
    pub recency_penalty: f64,
}
