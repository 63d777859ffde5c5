//! The structured request handed to the content generator.
//!
//! Prompt rendering is the generator's concern; the engine only assembles
//! the data a generator needs, including the violation feedback that
//! steers retry attempts toward a valid plan.

use std::collections::BTreeMap;

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::model::{
    BlockCategory, Phase, Stage, SubjectPriority, UserProfile, ValidationViolation,
};

/// The slice of a user profile a generator needs to draft a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileSummary {
    pub user_id: String,
    pub stage: Stage,
    pub optional_subject: Option<String>,
    pub prelims_date: Option<NaiveDate>,
    pub mains_date: Option<NaiveDate>,
    pub available_hours_per_day: f64,
    /// Hours converted to whole minutes.
    pub available_minutes: u32,
}

impl From<&UserProfile> for ProfileSummary {
    fn from(profile: &UserProfile) -> Self {
        Self {
            user_id: profile.user_id.clone(),
            stage: profile.stage,
            optional_subject: profile.optional_subject.clone(),
            prelims_date: profile.prelims_date,
            mains_date: profile.mains_date,
            available_hours_per_day: profile.available_hours_per_day,
            available_minutes: (profile.available_hours_per_day * 60.0) as u32,
        }
    }
}

/// Everything the content generator is given for one attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub profile: ProfileSummary,
    pub phase: Phase,
    /// Minutes per day per category, already blended for transitions.
    pub category_budgets: BTreeMap<BlockCategory, u32>,
    /// Subjects ranked by need, descending.
    pub subject_priorities: Vec<SubjectPriority>,
    /// Knowledge-base prose, passed through unmodified.
    pub kb_sections: BTreeMap<String, String>,
    /// Monday the requested week starts on.
    pub week_start: NaiveDate,
    /// Violations from the previous attempt; empty on the first.
    pub violations: Vec<ValidationViolation>,
    /// 1-based attempt number.
    pub attempt: u32,
}

impl GenerationRequest {
    /// The seven dates of the requested week, Monday first.
    pub fn week_dates(&self) -> [NaiveDate; 7] {
        std::array::from_fn(|i| self.week_start + Days::new(i as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn summary_derives_minutes_from_hours() {
        let profile = UserProfile {
            user_id: "u1".into(),
            display_name: "Test".into(),
            optional_subject: None,
            stage: Stage::Prelims,
            prelims_date: NaiveDate::from_ymd_opt(2026, 5, 25),
            mains_date: None,
            prelims_cleared: false,
            available_hours_per_day: 2.5,
            created_at: Utc::now(),
        };
        let summary = ProfileSummary::from(&profile);
        assert_eq!(summary.available_minutes, 150);
        assert_eq!(summary.user_id, "u1");
    }

    #[test]
    fn week_dates_cover_monday_through_sunday() {
        let request = GenerationRequest {
            profile: ProfileSummary {
                user_id: "u1".into(),
                stage: Stage::Both,
                optional_subject: None,
                prelims_date: None,
                mains_date: None,
                available_hours_per_day: 6.0,
                available_minutes: 360,
            },
            phase: Phase::Foundation,
            category_budgets: BTreeMap::new(),
            subject_priorities: vec![],
            kb_sections: BTreeMap::new(),
            week_start: NaiveDate::from_ymd_opt(2026, 3, 2).unwrap(),
            violations: vec![],
            attempt: 1,
        };
        let dates = request.week_dates();
        assert_eq!(dates[0], NaiveDate::from_ymd_opt(2026, 3, 2).unwrap());
        assert_eq!(dates[6], NaiveDate::from_ymd_opt(2026, 3, 8).unwrap());
    }
}
