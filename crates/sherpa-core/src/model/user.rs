//! User-facing state: profile, per-subject mastery, and activity records.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::enums::{BlockType, CheckInStatus, Subject};

/// Which exam stage the user is preparing for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Prelims,
    Mains,
    Both,
}

/// Immutable input to a planning run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: String,
    pub display_name: String,
    #[serde(default)]
    pub optional_subject: Option<String>,
    pub stage: Stage,
    #[serde(default)]
    pub prelims_date: Option<NaiveDate>,
    #[serde(default)]
    pub mains_date: Option<NaiveDate>,
    #[serde(default)]
    pub prelims_cleared: bool,
    /// Hours available per day, must be positive.
    pub available_hours_per_day: f64,
    pub created_at: DateTime<Utc>,
}

/// Per (user, subject) mastery state.
///
/// Mutated only by the confidence engine, one check-in at a time;
/// persistence belongs to the storage backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicConfidence {
    pub user_id: String,
    pub subject: Subject,
    /// Bounded to the configured clamp range, [1.0, 5.0] by default.
    pub perceived_confidence: f64,
    /// Consecutive successful check-ins.
    #[serde(default)]
    pub streak: u32,
    /// Consecutive skipped check-ins.
    #[serde(default)]
    pub skip_count: u32,
    #[serde(default)]
    pub total_sessions: u32,
    #[serde(default)]
    pub last_practiced_date: Option<NaiveDate>,
    /// Milestone award keys, each recorded at most once.
    #[serde(default)]
    pub milestones_awarded: Vec<String>,
}

impl TopicConfidence {
    /// Fresh record for a subject with no history.
    pub fn new(user_id: impl Into<String>, subject: Subject, perceived_confidence: f64) -> Self {
        Self {
            user_id: user_id.into(),
            subject,
            perceived_confidence,
            streak: 0,
            skip_count: 0,
            total_sessions: 0,
            last_practiced_date: None,
            milestones_awarded: Vec::new(),
        }
    }
}

/// One card's outcome inside a day's activity log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityLogEntry {
    pub card_id: String,
    pub block_type: BlockType,
    #[serde(default)]
    pub subject: Option<Subject>,
    #[serde(default)]
    pub topic: Option<String>,
    pub planned_duration: u32,
    #[serde(default)]
    pub actual_duration: Option<u32>,
    pub status: CheckInStatus,
}

/// A user's recorded activity for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayActivity {
    pub user_id: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub entries: Vec<ActivityLogEntry>,
    #[serde(default)]
    pub finalized: bool,
    #[serde(default)]
    pub finalized_at: Option<DateTime<Utc>>,
}

/// Missed-day recovery window, persisted while the user catches up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecoveryState {
    pub user_id: String,
    #[serde(default)]
    pub missed_dates: Vec<NaiveDate>,
    /// Days allowed for catch-up, 1..=7.
    pub recovery_window_days: u32,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_wire_values() {
        assert_eq!(serde_json::to_string(&Stage::Prelims).unwrap(), "\"prelims\"");
        assert_eq!(serde_json::to_string(&Stage::Both).unwrap(), "\"both\"");
    }

    #[test]
    fn fresh_confidence_has_no_history() {
        let tc = TopicConfidence::new("u1", Subject::Polity, 2.5);
        assert_eq!(tc.streak, 0);
        assert_eq!(tc.skip_count, 0);
        assert_eq!(tc.total_sessions, 0);
        assert!(tc.last_practiced_date.is_none());
        assert!(tc.milestones_awarded.is_empty());
    }

    #[test]
    fn profile_round_trips_through_json() {
        let profile = UserProfile {
            user_id: "user-1".into(),
            display_name: "Aspirant".into(),
            optional_subject: Some("Sociology".into()),
            stage: Stage::Both,
            prelims_date: NaiveDate::from_ymd_opt(2026, 5, 25),
            mains_date: NaiveDate::from_ymd_opt(2026, 9, 19),
            prelims_cleared: false,
            available_hours_per_day: 6.0,
            created_at: Utc::now(),
        };
        let json = serde_json::to_string(&profile).unwrap();
        let back: UserProfile = serde_json::from_str(&json).unwrap();
        assert_eq!(back, profile);
    }
}
