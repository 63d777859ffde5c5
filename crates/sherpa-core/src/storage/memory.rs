//! In-process storage backend backed by hash maps.

use std::collections::HashMap;

use anyhow::Result;
use async_trait::async_trait;
use chrono::NaiveDate;
use tokio::sync::RwLock;

use crate::model::{DayActivity, RecoveryState, Subject, TopicConfidence, UserProfile, WeeklyPlan};

use super::StorageBackend;

#[derive(Default)]
struct Tables {
    profiles: HashMap<String, UserProfile>,
    confidences: HashMap<(String, Subject), TopicConfidence>,
    plans: HashMap<(String, NaiveDate), WeeklyPlan>,
    activity: HashMap<(String, NaiveDate), DayActivity>,
    recovery: HashMap<String, RecoveryState>,
}

/// Hash-map storage, suitable for tests and single-process use.
#[derive(Default)]
pub struct MemoryStorage {
    tables: RwLock<Tables>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    async fn get_user_profile(&self, user_id: &str) -> Result<Option<UserProfile>> {
        Ok(self.tables.read().await.profiles.get(user_id).cloned())
    }

    async fn save_user_profile(&self, profile: &UserProfile) -> Result<()> {
        self.tables
            .write()
            .await
            .profiles
            .insert(profile.user_id.clone(), profile.clone());
        Ok(())
    }

    async fn get_topic_confidences(&self, user_id: &str) -> Result<Vec<TopicConfidence>> {
        let tables = self.tables.read().await;
        let mut records: Vec<TopicConfidence> = tables
            .confidences
            .iter()
            .filter(|((uid, _), _)| uid.as_str() == user_id)
            .map(|(_, tc)| tc.clone())
            .collect();
        records.sort_by_key(|tc| tc.subject);
        Ok(records)
    }

    async fn save_topic_confidence(
        &self,
        user_id: &str,
        confidence: &TopicConfidence,
    ) -> Result<()> {
        self.tables
            .write()
            .await
            .confidences
            .insert((user_id.to_owned(), confidence.subject), confidence.clone());
        Ok(())
    }

    async fn get_weekly_plan(
        &self,
        user_id: &str,
        week_start: NaiveDate,
    ) -> Result<Option<WeeklyPlan>> {
        Ok(self
            .tables
            .read()
            .await
            .plans
            .get(&(user_id.to_owned(), week_start))
            .cloned())
    }

    async fn save_weekly_plan(&self, plan: &WeeklyPlan) -> Result<()> {
        self.tables
            .write()
            .await
            .plans
            .insert((plan.user_id.clone(), plan.week_start), plan.clone());
        Ok(())
    }

    async fn get_activity_log(
        &self,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<DayActivity>> {
        Ok(self
            .tables
            .read()
            .await
            .activity
            .get(&(user_id.to_owned(), date))
            .cloned())
    }

    async fn save_activity_log(&self, activity: &DayActivity) -> Result<()> {
        self.tables
            .write()
            .await
            .activity
            .insert((activity.user_id.clone(), activity.date), activity.clone());
        Ok(())
    }

    async fn get_pending_days(&self, user_id: &str, since: NaiveDate) -> Result<Vec<DayActivity>> {
        let tables = self.tables.read().await;
        let mut days: Vec<DayActivity> = tables
            .activity
            .iter()
            .filter(|((uid, date), activity)| {
                uid.as_str() == user_id && *date >= since && !activity.finalized
            })
            .map(|(_, activity)| activity.clone())
            .collect();
        days.sort_by_key(|a| a.date);
        Ok(days)
    }

    async fn get_recovery_state(&self, user_id: &str) -> Result<Option<RecoveryState>> {
        Ok(self.tables.read().await.recovery.get(user_id).cloned())
    }

    async fn save_recovery_state(&self, state: &RecoveryState) -> Result<()> {
        self.tables
            .write()
            .await
            .recovery
            .insert(state.user_id.clone(), state.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Stage, Subject};
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn profile(user_id: &str) -> UserProfile {
        UserProfile {
            user_id: user_id.into(),
            display_name: "Test".into(),
            optional_subject: None,
            stage: Stage::Both,
            prelims_date: None,
            mains_date: None,
            prelims_cleared: false,
            available_hours_per_day: 4.0,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn profile_round_trip() {
        let store = MemoryStorage::new();
        assert!(store.get_user_profile("u1").await.unwrap().is_none());

        store.save_user_profile(&profile("u1")).await.unwrap();
        let loaded = store.get_user_profile("u1").await.unwrap().unwrap();
        assert_eq!(loaded.user_id, "u1");
    }

    #[tokio::test]
    async fn confidences_are_keyed_per_subject_and_user() {
        let store = MemoryStorage::new();
        store
            .save_topic_confidence("u1", &TopicConfidence::new("u1", Subject::Polity, 2.0))
            .await
            .unwrap();
        store
            .save_topic_confidence("u1", &TopicConfidence::new("u1", Subject::History, 3.0))
            .await
            .unwrap();
        store
            .save_topic_confidence("u2", &TopicConfidence::new("u2", Subject::Polity, 4.0))
            .await
            .unwrap();

        let records = store.get_topic_confidences("u1").await.unwrap();
        assert_eq!(records.len(), 2);

        // Saving the same subject again overwrites.
        store
            .save_topic_confidence("u1", &TopicConfidence::new("u1", Subject::Polity, 2.5))
            .await
            .unwrap();
        let records = store.get_topic_confidences("u1").await.unwrap();
        assert_eq!(records.len(), 2);
        let polity = records.iter().find(|r| r.subject == Subject::Polity).unwrap();
        assert_eq!(polity.perceived_confidence, 2.5);
    }

    #[tokio::test]
    async fn pending_days_filters_finalized_and_older() {
        let store = MemoryStorage::new();
        for (day, finalized) in [
            (date(2026, 3, 2), true),
            (date(2026, 3, 3), false),
            (date(2026, 3, 4), false),
            (date(2026, 2, 20), false),
        ] {
            store
                .save_activity_log(&DayActivity {
                    user_id: "u1".into(),
                    date: day,
                    entries: vec![],
                    finalized,
                    finalized_at: None,
                })
                .await
                .unwrap();
        }

        let pending = store.get_pending_days("u1", date(2026, 3, 1)).await.unwrap();
        let dates: Vec<NaiveDate> = pending.iter().map(|a| a.date).collect();
        assert_eq!(dates, vec![date(2026, 3, 3), date(2026, 3, 4)]);
    }

    #[tokio::test]
    async fn recovery_state_round_trip() {
        let store = MemoryStorage::new();
        let state = RecoveryState {
            user_id: "u1".into(),
            missed_dates: vec![date(2026, 3, 3)],
            recovery_window_days: 3,
            created_at: Utc::now(),
        };
        store.save_recovery_state(&state).await.unwrap();
        let loaded = store.get_recovery_state("u1").await.unwrap().unwrap();
        assert_eq!(loaded.missed_dates, vec![date(2026, 3, 3)]);
    }
}
