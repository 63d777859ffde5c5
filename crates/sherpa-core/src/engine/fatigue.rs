//! Daily exertion ceiling derived from available hours and phase.

use crate::model::{DailyPlan, Phase, PlanCard};

/// Hours at or below which the low-hours multipliers apply.
const LOW_HOURS_THRESHOLD: f64 = 2.0;

/// Compute the daily fatigue cap for a profile and phase.
///
/// Low-hours users get a proportionally higher ceiling so short days can
/// still hold one substantive block; the two final sprint phases raise
/// the multiplier again. The result floors any decimals.
pub fn compute_daily_fatigue_cap(hours: f64, phase: Phase) -> i32 {
    let low_hours = hours <= LOW_HOURS_THRESHOLD;
    let mult = if phase.is_final_sprint() {
        if low_hours { 3.0 } else { 2.5 }
    } else if low_hours {
        2.5
    } else {
        2.0
    };
    (hours * mult).floor() as i32
}

/// Sum of fatigue values over a set of cards.
pub fn daily_fatigue(cards: &[PlanCard]) -> i32 {
    cards.iter().map(|c| c.fatigue).sum()
}

/// Whether a day's total fatigue is within the cap.
pub fn within_cap(day: &DailyPlan, cap: i32) -> bool {
    day.total_fatigue() <= cap
}
