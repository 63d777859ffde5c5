//! Storage capability surface.
//!
//! The engine consumes already-loaded values and produces values for the
//! caller to persist; it never assumes a particular backend. Each backend
//! implements [`StorageBackend`]; [`memory::MemoryStorage`] is the
//! in-process implementation used by tests.

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;

use crate::model::{DayActivity, RecoveryState, TopicConfidence, UserProfile, WeeklyPlan};

pub use memory::MemoryStorage;

/// Persistence surface for profiles, mastery state, plans, and activity.
///
/// Keys are the user id plus, where applicable, a secondary date or
/// subject key. Implementations provide their own consistency guarantees;
/// the engine performs no coordination across calls.
#[async_trait]
pub trait StorageBackend: Send + Sync {
    async fn get_user_profile(&self, user_id: &str) -> Result<Option<UserProfile>>;

    async fn save_user_profile(&self, profile: &UserProfile) -> Result<()>;

    /// All confidence records for a user, one per practiced subject.
    async fn get_topic_confidences(&self, user_id: &str) -> Result<Vec<TopicConfidence>>;

    async fn save_topic_confidence(&self, user_id: &str, confidence: &TopicConfidence)
    -> Result<()>;

    async fn get_weekly_plan(&self, user_id: &str, week_start: NaiveDate)
    -> Result<Option<WeeklyPlan>>;

    async fn save_weekly_plan(&self, plan: &WeeklyPlan) -> Result<()>;

    async fn get_activity_log(&self, user_id: &str, date: NaiveDate) -> Result<Option<DayActivity>>;

    async fn save_activity_log(&self, activity: &DayActivity) -> Result<()>;

    /// Unfinalized activity days on or after `since`, for missed-day
    /// recovery.
    async fn get_pending_days(&self, user_id: &str, since: NaiveDate) -> Result<Vec<DayActivity>>;

    async fn get_recovery_state(&self, user_id: &str) -> Result<Option<RecoveryState>>;

    async fn save_recovery_state(&self, state: &RecoveryState) -> Result<()>;
}

// Compile-time assertion: StorageBackend must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn StorageBackend) {}
};
