//! Shared test utilities for sherpa integration tests.
//!
//! Provides profile/confidence fixtures, card and week builders, and a
//! scripted [`Generator`] double that replays canned responses while
//! recording every request it receives.

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::{Days, NaiveDate, Utc};

use sherpa_core::generator::{GenerationRequest, Generator};
use sherpa_core::model::{
    BlockCategory, BlockType, CheckInStatus, DailyPlan, PlanCard, Stage, Subject, TopicConfidence,
    UserProfile, WeeklyPlan,
};

/// Monday used by most fixtures: 2026-03-02.
pub fn fixture_monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

// ---------------------------------------------------------------------------
// Profiles and confidences
// ---------------------------------------------------------------------------

/// Full-time beginner: 6 hours a day, both stages, prelims 2026-05-25.
pub fn fresh_profile() -> UserProfile {
    UserProfile {
        user_id: "user-fresh".into(),
        display_name: "Fresh Beginner".into(),
        optional_subject: Some("Sociology".into()),
        stage: Stage::Both,
        prelims_date: NaiveDate::from_ymd_opt(2026, 5, 25),
        mains_date: NaiveDate::from_ymd_opt(2026, 9, 19),
        prelims_cleared: false,
        available_hours_per_day: 6.0,
        created_at: Utc::now(),
    }
}

/// Working professional: 2.5 hours a day, prelims stage only.
pub fn working_pro_profile() -> UserProfile {
    UserProfile {
        user_id: "user-workpro".into(),
        display_name: "Working Professional".into(),
        optional_subject: None,
        stage: Stage::Prelims,
        prelims_date: NaiveDate::from_ymd_opt(2026, 5, 25),
        mains_date: None,
        prelims_cleared: false,
        available_hours_per_day: 2.5,
        created_at: Utc::now(),
    }
}

/// Every prelims subject at confidence 1.0 with no history.
pub fn fresh_confidences(user_id: &str) -> Vec<TopicConfidence> {
    [
        Subject::History,
        Subject::Economy,
        Subject::Polity,
        Subject::Environment,
        Subject::Geography,
        Subject::SciTech,
    ]
    .into_iter()
    .map(|s| TopicConfidence::new(user_id, s, 1.0))
    .collect()
}

// ---------------------------------------------------------------------------
// Card and week builders
// ---------------------------------------------------------------------------

/// A card with explicit block type, category, fatigue, and subject.
pub fn make_card(
    block_type: BlockType,
    category: BlockCategory,
    fatigue: i32,
    subject: Option<Subject>,
    order: u32,
) -> PlanCard {
    PlanCard {
        card_id: format!("card-{order}"),
        block_type,
        category,
        subject,
        topic: Some("Test topic".into()),
        planned_duration: 45,
        actual_duration: None,
        fatigue,
        order,
        status: CheckInStatus::Pending,
    }
}

/// A fatigue-3 deep-study card.
pub fn heavy_card(order: u32) -> PlanCard {
    make_card(
        BlockType::DeepStudy,
        BlockCategory::CoreLearning,
        3,
        Some(Subject::Polity),
        order,
    )
}

/// A fatigue-2 revision card.
pub fn light_card(order: u32) -> PlanCard {
    make_card(
        BlockType::Revision,
        BlockCategory::CoreRetention,
        2,
        Some(Subject::History),
        order,
    )
}

/// A week of seven days starting at `week_start`, one card list per day.
pub fn make_week(user_id: &str, week_start: NaiveDate, day_cards: Vec<Vec<PlanCard>>) -> WeeklyPlan {
    let days = day_cards
        .into_iter()
        .enumerate()
        .map(|(i, cards)| DailyPlan {
            date: week_start + Days::new(i as u64),
            cards,
            finalized: false,
            finalized_at: None,
        })
        .collect();
    WeeklyPlan {
        user_id: user_id.into(),
        week_start,
        days,
        narrative: "Test plan".into(),
        generated_at: Utc::now(),
    }
}

/// Serialize a plan the way a well-behaved generator would return it.
pub fn plan_as_json(plan: &WeeklyPlan) -> String {
    serde_json::to_string_pretty(plan).expect("plan serializes")
}

// ---------------------------------------------------------------------------
// Scripted generator
// ---------------------------------------------------------------------------

/// A [`Generator`] double that pops one canned response per call and
/// records every request, so tests can assert on feedback injection.
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful text response.
    pub fn respond(self, text: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
        self
    }

    /// Queue a failed call (network error, timeout, ...).
    pub fn fail(self, error: impl Into<String>) -> Self {
        self.responses.lock().unwrap().push_back(Err(error.into()));
        self
    }

    /// All requests received so far, in call order.
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn draft(&self, request: &GenerationRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        match self.responses.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(error)) => bail!(error),
            None => bail!("scripted generator ran out of responses"),
        }
    }
}
