//! Study phase detection and phase-transition budget blending.

use std::collections::HashMap;

use chrono::NaiveDate;

use crate::catalog::PhaseBlueprint;
use crate::model::{BlockCategory, Phase};

/// Days-to-prelims threshold for the prelims sprint phase (inclusive).
const SPRINT_THRESHOLD_DAYS: i64 = 75;
/// Days-to-prelims threshold for the consolidation phase (inclusive).
const CONSOLIDATION_THRESHOLD_DAYS: i64 = 240;

/// Blend weight given to the current phase's allocation.
const BLEND_CURRENT_WEIGHT: f64 = 0.7;
/// Blend weight given to the previous phase's allocation.
const BLEND_PREVIOUS_WEIGHT: f64 = 0.3;

/// Determine the current study phase from exam dates and prelims status.
///
/// A cleared prelims overrides all date logic. Without a known prelims
/// date the user stays in foundation. Otherwise the distance to prelims
/// picks the phase, with inclusive boundaries on the closer side.
pub fn determine_phase(
    prelims_date: Option<NaiveDate>,
    _mains_date: Option<NaiveDate>,
    prelims_cleared: bool,
    today: NaiveDate,
) -> Phase {
    if prelims_cleared {
        return Phase::MainsSprint90;
    }

    let Some(prelims) = prelims_date else {
        return Phase::Foundation;
    };

    let days_to_prelims = (prelims - today).num_days();

    if days_to_prelims <= SPRINT_THRESHOLD_DAYS {
        Phase::PrelimsSprint75
    } else if days_to_prelims <= CONSOLIDATION_THRESHOLD_DAYS {
        Phase::Consolidation
    } else {
        Phase::Foundation
    }
}

/// Compute category percentages for the current phase, blending with the
/// previous phase's allocation during the transition window.
///
/// Returns the current phase's raw allocation when its blueprint disables
/// blending, there is no previous phase, the window has passed, or the
/// previous phase has no blueprint. Otherwise each category in the union
/// of both allocations gets `0.7*current + 0.3*previous` (absent
/// categories count as 0). Day `blend_window_days` itself still blends.
///
/// The returned order -- current-phase allocation order, then categories
/// only the previous phase allocates -- is the tie-break order used by
/// [`super::allocator::allocate_minutes`].
pub fn compute_blend_percentages(
    current_phase: Phase,
    previous_phase: Option<Phase>,
    days_in_phase: u32,
    blueprints: &HashMap<Phase, PhaseBlueprint>,
) -> Vec<(BlockCategory, f64)> {
    let current_bp = &blueprints[&current_phase];
    let current: Vec<(BlockCategory, f64)> = current_bp
        .allocations
        .iter()
        .map(|a| (a.category, a.percentage))
        .collect();

    let prev_bp = match previous_phase {
        Some(p) if current_bp.blend_enabled && days_in_phase <= current_bp.blend_window_days => {
            match blueprints.get(&p) {
                Some(bp) => bp,
                None => return current,
            }
        }
        _ => return current,
    };

    let prev: HashMap<BlockCategory, f64> = prev_bp
        .allocations
        .iter()
        .map(|a| (a.category, a.percentage))
        .collect();

    let mut blended: Vec<(BlockCategory, f64)> = current
        .iter()
        .map(|&(cat, cur)| {
            let prev_pct = prev.get(&cat).copied().unwrap_or(0.0);
            (
                cat,
                BLEND_CURRENT_WEIGHT * cur + BLEND_PREVIOUS_WEIGHT * prev_pct,
            )
        })
        .collect();

    // Categories the previous phase allocates but the current one does not.
    let current_cats: Vec<BlockCategory> = current.iter().map(|&(c, _)| c).collect();
    for a in &prev_bp.allocations {
        if !current_cats.contains(&a.category) {
            blended.push((a.category, BLEND_PREVIOUS_WEIGHT * a.percentage));
        }
    }

    blended
}
