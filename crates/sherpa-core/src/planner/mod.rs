//! Generation orchestrator: context computation, the bounded draft ->
//! repair -> validate loop, and feedback injection between attempts.
//!
//! The planner is the only layer that turns violations into a hard
//! failure, and only after the attempt budget is spent.

use std::collections::BTreeMap;

use chrono::{Datelike, Days, NaiveDate};
use thiserror::Error;

use crate::catalog::Catalog;
use crate::engine::{
    allocate_minutes, compute_blend_percentages, determine_phase, rank_subjects,
    repair_consecutive_heavy, validate_weekly_plan, NEWS_MINUTES,
};
use crate::generator::{extract_weekly_plan, GenerationRequest, Generator, ProfileSummary};
use crate::model::{
    BlockCategory, Phase, SubjectPriority, TopicConfidence, UserProfile, ValidationViolation,
    WeeklyPlan,
};

/// Fixed attempt budget for one generation run.
pub const MAX_ATTEMPTS: u32 = 3;

/// Terminal failure: the attempt budget ran out with violations left.
///
/// Carries the final attempt's full violation set so callers and
/// operators see exactly what the last candidate broke.
#[derive(Debug, Error)]
#[error("plan generation failed after {attempts} attempts ({} violations left)", .violations.len())]
pub struct PlanGenerationError {
    pub attempts: u32,
    pub violations: Vec<ValidationViolation>,
}

/// Deterministic context computed once per run, before any generation.
#[derive(Debug, Clone)]
pub struct PlanningContext {
    pub phase: Phase,
    pub category_budgets: BTreeMap<BlockCategory, u32>,
    pub subject_priorities: Vec<SubjectPriority>,
}

/// Per-run inputs that are not part of the user's stored state.
#[derive(Debug, Clone)]
pub struct PlanOptions {
    /// Reference date for phase detection and recency scoring.
    pub today: NaiveDate,
    /// Week to plan; defaults to the next Monday on or after `today`.
    pub week_start: Option<NaiveDate>,
    /// Phase the user was in before the current one, for budget blending.
    pub previous_phase: Option<Phase>,
    /// Days spent in the current phase so far.
    pub days_in_phase: u32,
}

impl PlanOptions {
    /// Options for a run anchored at `today`, outside any phase
    /// transition window.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            today,
            week_start: None,
            previous_phase: None,
            days_in_phase: 30,
        }
    }

    /// Set the week to plan.
    pub fn week_start(mut self, week_start: NaiveDate) -> Self {
        self.week_start = Some(week_start);
        self
    }

    /// Record a recent phase transition for budget blending.
    pub fn transition(mut self, previous_phase: Phase, days_in_phase: u32) -> Self {
        self.previous_phase = Some(previous_phase);
        self.days_in_phase = days_in_phase;
        self
    }
}

/// The next Monday on or after `from` (`from` itself when it is a Monday).
pub fn next_monday(from: NaiveDate) -> NaiveDate {
    let days_ahead = (7 - i64::from(from.weekday().num_days_from_monday())) % 7;
    from + Days::new(days_ahead as u64)
}

/// Compute the deterministic planning context: phase, blended per-category
/// minute budgets, and ranked subject priorities.
pub fn compute_context(
    profile: &UserProfile,
    confidences: &[TopicConfidence],
    options: &PlanOptions,
    catalog: &Catalog,
) -> PlanningContext {
    let phase = determine_phase(
        profile.prelims_date,
        profile.mains_date,
        profile.prelims_cleared,
        options.today,
    );

    let percentages = compute_blend_percentages(
        phase,
        options.previous_phase,
        options.days_in_phase,
        catalog.blueprints(),
    );

    let available_minutes = (profile.available_hours_per_day * 60.0) as u32;
    let category_budgets = allocate_minutes(available_minutes, &percentages, NEWS_MINUTES);

    let subject_priorities = rank_subjects(confidences, catalog.subject_weights(), options.today);

    PlanningContext {
        phase,
        category_budgets,
        subject_priorities,
    }
}

/// Check that a candidate covers exactly the seven requested dates, one
/// day per date.
fn verify_week_shape(plan: &WeeklyPlan, week_start: NaiveDate) -> Result<(), String> {
    let expected: Vec<NaiveDate> = (0..7).map(|i| week_start + Days::new(i)).collect();
    let mut actual: Vec<NaiveDate> = plan.days.iter().map(|d| d.date).collect();
    actual.sort();
    if actual == expected {
        Ok(())
    } else {
        Err(format!(
            "plan must contain exactly one day per date from {week_start} through {}",
            expected[6]
        ))
    }
}

fn parse_violation(detail: &str) -> ValidationViolation {
    ValidationViolation::new(
        "PARSE",
        format!(
            "Failed to parse generator output into a weekly plan ({detail}). \
             Return ONLY valid JSON matching the schema exactly."
        ),
        None,
    )
}

/// Generate a validated weekly plan.
///
/// 1. Compute phase, budgets, and priorities once.
/// 2. Each attempt: build a request (with the previous attempt's
///    violations from attempt 2 onward) and call the generator.
/// 3. Treat any unparseable or mis-shaped output as one synthetic
///    `PARSE` violation and retry.
/// 4. On a structurally sound candidate, run auto-repair, then the
///    validator; the first fully valid plan wins.
/// 5. After [`MAX_ATTEMPTS`] the run fails terminally, surfacing the
///    final attempt's violations.
pub async fn generate_plan(
    generator: &dyn Generator,
    catalog: &Catalog,
    profile: &UserProfile,
    confidences: &[TopicConfidence],
    kb_sections: &BTreeMap<String, String>,
    options: &PlanOptions,
) -> Result<WeeklyPlan, PlanGenerationError> {
    let week_start = options.week_start.unwrap_or_else(|| next_monday(options.today));
    let context = compute_context(profile, confidences, options, catalog);

    tracing::info!(
        user_id = %profile.user_id,
        phase = %context.phase,
        %week_start,
        generator = generator.name(),
        "starting plan generation"
    );

    let mut violations: Vec<ValidationViolation> = Vec::new();

    for attempt in 1..=MAX_ATTEMPTS {
        tracing::info!(attempt, max_attempts = MAX_ATTEMPTS, "plan generation attempt");

        let request = GenerationRequest {
            profile: ProfileSummary::from(profile),
            phase: context.phase,
            category_budgets: context.category_budgets.clone(),
            subject_priorities: context.subject_priorities.clone(),
            kb_sections: kb_sections.clone(),
            week_start,
            violations: violations.clone(),
            attempt,
        };

        let raw = match generator.draft(&request).await {
            Ok(text) => text,
            Err(e) => {
                tracing::warn!(attempt, error = %e, "generator call failed");
                violations = vec![parse_violation(&e.to_string())];
                continue;
            }
        };

        let mut plan = match extract_weekly_plan(&raw) {
            Ok(plan) => plan,
            Err(e) => {
                tracing::warn!(attempt, error = %e, "generator output was unparseable");
                violations = vec![parse_violation(&e.to_string())];
                continue;
            }
        };

        if let Err(reason) = verify_week_shape(&plan, week_start) {
            tracing::warn!(attempt, %reason, "generator output had the wrong week shape");
            violations = vec![parse_violation(&reason)];
            continue;
        }

        repair_consecutive_heavy(&mut plan, catalog);

        let result = validate_weekly_plan(&plan, profile, context.phase);
        if result.valid {
            tracing::info!(
                attempt,
                days = plan.days.len(),
                cards = plan.card_count(),
                "plan validated"
            );
            return Ok(plan);
        }

        tracing::warn!(
            attempt,
            violation_count = result.violations.len(),
            "plan rejected by validator"
        );
        violations = result.violations;
    }

    Err(PlanGenerationError {
        attempts: MAX_ATTEMPTS,
        violations,
    })
}
