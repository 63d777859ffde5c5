//! Hard-rule validator for weekly plans.
//!
//! Seven independent checks run over the plan in date order, and every
//! violation is collected so one pass surfaces the complete picture. Rule
//! ids are stable across the engine and the generator feedback loop.

use std::collections::{HashMap, HashSet};

use chrono::{Days, NaiveDate};

use crate::engine::fatigue::compute_daily_fatigue_cap;
use crate::model::{
    BlockCategory, BlockType, DailyPlan, Phase, PlanCard, UserProfile, ValidationResult,
    ValidationViolation, WeeklyPlan,
};

/// A card at or above this fatigue makes its day "heavy".
pub const HEAVY_FATIGUE: i32 = 3;
/// Maximum run of consecutive heavy days allowed by R13.
pub const MAX_CONSECUTIVE_HEAVY_DAYS: u32 = 4;
/// Distinct-subject ceiling for core-learning cards per day (R09).
const MAX_CORE_LEARNING_SUBJECTS: usize = 2;
/// Distinct-subject ceiling for core-retention cards per day (R09).
const MAX_CORE_RETENTION_SUBJECTS: usize = 4;
/// Hours at or below which R12 restricts heavy cards.
const LOW_HOURS_FOR_R12: f64 = 3.0;

/// Block types that satisfy R03's assessment requirement.
const ASSESSMENT_TRIGGERS: [BlockType; 3] =
    [BlockType::FullMock, BlockType::TimedMcq, BlockType::PyqAnalysis];

fn has_block_type(cards: &[PlanCard], bt: BlockType) -> bool {
    cards.iter().any(|c| c.block_type == bt)
}

fn has_assessment_trigger(cards: &[PlanCard]) -> bool {
    cards
        .iter()
        .any(|c| ASSESSMENT_TRIGGERS.contains(&c.block_type))
}

/// Days sorted ascending by date.
fn days_sorted(plan: &WeeklyPlan) -> Vec<&DailyPlan> {
    let mut days: Vec<&DailyPlan> = plan.days.iter().collect();
    days.sort_by_key(|d| d.date);
    days
}

/// R03: error analysis must follow a high-stakes assessment on the same
/// day or the immediately preceding day.
fn validate_r03(plan: &WeeklyPlan) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    let days = days_sorted(plan);
    let day_map: HashMap<NaiveDate, &DailyPlan> = days.iter().map(|d| (d.date, *d)).collect();

    for day in &days {
        if !has_block_type(&day.cards, BlockType::ErrorAnalysis) {
            continue;
        }
        let trigger_today = has_assessment_trigger(&day.cards);
        let trigger_yesterday = day
            .date
            .checked_sub_days(Days::new(1))
            .and_then(|prev| day_map.get(&prev))
            .is_some_and(|prev_day| has_assessment_trigger(&prev_day.cards));
        if !trigger_today && !trigger_yesterday {
            violations.push(ValidationViolation::new(
                "R03",
                "Error Analysis without preceding mock/MCQ/PYQ",
                Some(day.date),
            ));
        }
    }
    violations
}

/// R04: a consolidation day allows no other card with fatigue above 2.
fn validate_r04(plan: &WeeklyPlan) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    for day in &plan.days {
        if !has_block_type(&day.cards, BlockType::ConsolidationDay) {
            continue;
        }
        if let Some(card) = day
            .cards
            .iter()
            .find(|c| c.block_type != BlockType::ConsolidationDay && c.fatigue > 2)
        {
            violations.push(ValidationViolation::new(
                "R04",
                format!("Consolidation Day has block with fatigue {} (>2)", card.fatigue),
                Some(day.date),
            ));
        }
    }
    violations
}

/// R05: full mock isolation. One per day, no other heavy card that day,
/// no back-to-back mock days.
fn validate_r05(plan: &WeeklyPlan) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    let mut mock_dates: Vec<NaiveDate> = Vec::new();

    for day in days_sorted(plan) {
        let mock_count = day
            .cards
            .iter()
            .filter(|c| c.block_type == BlockType::FullMock)
            .count();
        if mock_count == 0 {
            continue;
        }

        if mock_count > 1 {
            violations.push(ValidationViolation::new(
                "R05",
                "Multiple Full Mocks on same day",
                Some(day.date),
            ));
        }

        if let Some(card) = day
            .cards
            .iter()
            .find(|c| c.block_type != BlockType::FullMock && c.fatigue >= HEAVY_FATIGUE)
        {
            violations.push(ValidationViolation::new(
                "R05",
                format!("Heavy block {} on Full Mock day", card.block_type),
                Some(day.date),
            ));
        }

        if let Some(&last) = mock_dates.last() {
            if (day.date - last).num_days() == 1 {
                violations.push(ValidationViolation::new(
                    "R05",
                    "Back-to-back Full Mock days",
                    Some(day.date),
                ));
            }
        }
        mock_dates.push(day.date);
    }

    violations
}

/// R08: daily total fatigue must stay within the profile/phase cap.
fn validate_r08(plan: &WeeklyPlan, profile: &UserProfile, phase: Phase) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    let cap = compute_daily_fatigue_cap(profile.available_hours_per_day, phase);
    for day in &plan.days {
        let total = day.total_fatigue();
        if total > cap {
            violations.push(ValidationViolation::new(
                "R08",
                format!("Daily fatigue {total} exceeds cap {cap}"),
                Some(day.date),
            ));
        }
    }
    violations
}

/// R09: subject diversity -- at most 2 distinct core-learning subjects and
/// 4 distinct core-retention subjects per day. Cards without a subject do
/// not count.
fn validate_r09(plan: &WeeklyPlan) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    for day in &plan.days {
        let distinct = |category: BlockCategory| {
            day.cards
                .iter()
                .filter(|c| c.category == category)
                .filter_map(|c| c.subject)
                .collect::<HashSet<_>>()
                .len()
        };

        let learning = distinct(BlockCategory::CoreLearning);
        if learning > MAX_CORE_LEARNING_SUBJECTS {
            violations.push(ValidationViolation::new(
                "R09",
                format!("Core Learning has {learning} subjects (max {MAX_CORE_LEARNING_SUBJECTS})"),
                Some(day.date),
            ));
        }

        let retention = distinct(BlockCategory::CoreRetention);
        if retention > MAX_CORE_RETENTION_SUBJECTS {
            violations.push(ValidationViolation::new(
                "R09",
                format!("Core Retention has {retention} subjects (max {MAX_CORE_RETENTION_SUBJECTS})"),
                Some(day.date),
            ));
        }
    }
    violations
}

/// R12: users with 3 hours a day or less get at most one heavy card per
/// day.
fn validate_r12(plan: &WeeklyPlan, profile: &UserProfile) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    if profile.available_hours_per_day > LOW_HOURS_FOR_R12 {
        return violations;
    }
    for day in &plan.days {
        let heavy_count = day.cards.iter().filter(|c| c.fatigue >= HEAVY_FATIGUE).count();
        if heavy_count > 1 {
            violations.push(ValidationViolation::new(
                "R12",
                format!("{heavy_count} heavy blocks for <=3hr user (max 1)"),
                Some(day.date),
            ));
        }
    }
    violations
}

/// R13: at most 4 consecutive heavy days. A light day resets the run; a
/// violation is recorded on every day past the 4th.
fn validate_r13(plan: &WeeklyPlan) -> Vec<ValidationViolation> {
    let mut violations = Vec::new();
    let mut consecutive_heavy: u32 = 0;

    for day in days_sorted(plan) {
        let has_heavy = day.cards.iter().any(|c| c.fatigue >= HEAVY_FATIGUE);
        if has_heavy {
            consecutive_heavy += 1;
            if consecutive_heavy > MAX_CONSECUTIVE_HEAVY_DAYS {
                violations.push(ValidationViolation::new(
                    "R13",
                    format!(
                        "Day {consecutive_heavy} consecutive heavy (max {MAX_CONSECUTIVE_HEAVY_DAYS})"
                    ),
                    Some(day.date),
                ));
            }
        } else {
            consecutive_heavy = 0;
        }
    }

    violations
}

/// Run all hard rules on a weekly plan.
///
/// Rules never short-circuit; violations accumulate in rule order (R03,
/// R04, R05, R08, R09, R12, R13) so a single run reports every problem.
pub fn validate_weekly_plan(
    plan: &WeeklyPlan,
    profile: &UserProfile,
    phase: Phase,
) -> ValidationResult {
    let mut violations = Vec::new();
    violations.extend(validate_r03(plan));
    violations.extend(validate_r04(plan));
    violations.extend(validate_r05(plan));
    violations.extend(validate_r08(plan, profile, phase));
    violations.extend(validate_r09(plan));
    violations.extend(validate_r12(plan, profile));
    violations.extend(validate_r13(plan));
    ValidationResult::from_violations(violations)
}
