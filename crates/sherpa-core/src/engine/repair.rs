//! Targeted pre-validation repair for the consecutive-heavy-day rule.
//!
//! Generators break R13 more than any other rule, and the fix is purely
//! mechanical, so it runs before validation to save generation attempts.
//! Every other rule is left to regeneration.

use crate::catalog::Catalog;
use crate::engine::validator::{HEAVY_FATIGUE, MAX_CONSECUTIVE_HEAVY_DAYS};
use crate::model::{BlockType, WeeklyPlan};

/// Light substitute for a heavy block type.
///
/// Each heavy kind maps to one specific replacement; anything unmapped
/// falls back to revision.
fn light_replacement(block_type: BlockType) -> BlockType {
    match block_type {
        BlockType::DeepStudy | BlockType::StudyTechnical => BlockType::Revision,
        BlockType::TimedMcq | BlockType::TimedAnswerWriting => BlockType::PyqAnalysis,
        BlockType::ErrorAnalysis => BlockType::WeakAreaDrill,
        BlockType::FullMock => BlockType::Revision,
        BlockType::EssayFullSim => BlockType::EssayBrainstorm,
        BlockType::InterviewSim => BlockType::Revision,
        _ => BlockType::Revision,
    }
}

/// Downgrade heavy cards on days past the 4-consecutive-heavy limit.
///
/// Walks days in date order with the same counter as R13. Once the run
/// would exceed the limit, every fatigue-3+ card on that day is replaced
/// by its light substitute, adopting the substitute's catalog category
/// and fatigue and clamping the duration into the substitute's bounds.
/// The repaired day is light, so the counter resets there.
///
/// Returns the number of downgraded cards.
pub fn repair_consecutive_heavy(plan: &mut WeeklyPlan, catalog: &Catalog) -> usize {
    let mut order: Vec<usize> = (0..plan.days.len()).collect();
    order.sort_by_key(|&i| plan.days[i].date);

    let mut consecutive_heavy: u32 = 0;
    let mut downgraded = 0;

    for idx in order {
        let day = &mut plan.days[idx];
        let has_heavy = day.cards.iter().any(|c| c.fatigue >= HEAVY_FATIGUE);

        if has_heavy {
            consecutive_heavy += 1;
        } else {
            consecutive_heavy = 0;
            continue;
        }

        if consecutive_heavy <= MAX_CONSECUTIVE_HEAVY_DAYS {
            continue;
        }

        for card in &mut day.cards {
            if card.fatigue < HEAVY_FATIGUE {
                continue;
            }
            let replacement = catalog.block(light_replacement(card.block_type));
            card.block_type = replacement.block_type;
            card.category = replacement.category;
            card.fatigue = replacement.fatigue;
            card.planned_duration = card
                .planned_duration
                .clamp(replacement.min_duration, replacement.max_duration);
            downgraded += 1;
        }
        consecutive_heavy = 0;
    }

    if downgraded > 0 {
        tracing::info!(downgraded, "downgraded heavy blocks past the consecutive-day limit");
    }

    downgraded
}
