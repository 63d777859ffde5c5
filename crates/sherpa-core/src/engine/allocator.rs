//! Per-category minute budgets from blueprint percentages.

use std::collections::BTreeMap;

use crate::model::BlockCategory;

/// Fixed daily current-affairs reading allowance, deducted before
/// category distribution.
pub const NEWS_MINUTES: u32 = 20;

/// Distribute available minutes across categories by percentage.
///
/// `news_minutes` comes off the top (floored at zero), then the remainder
/// is split proportionally using floor-then-largest-remainder so the
/// integer outputs sum exactly to the remainder. Ties on the fractional
/// part are broken by the order the categories appear in `percentages`.
pub fn allocate_minutes(
    available_minutes: u32,
    percentages: &[(BlockCategory, f64)],
    news_minutes: u32,
) -> BTreeMap<BlockCategory, u32> {
    let remaining = available_minutes.saturating_sub(news_minutes);

    let raw: Vec<(BlockCategory, f64)> = percentages
        .iter()
        .map(|&(cat, pct)| (cat, f64::from(remaining) * (pct / 100.0)))
        .collect();

    let mut floored: Vec<(BlockCategory, u32)> =
        raw.iter().map(|&(cat, v)| (cat, v as u32)).collect();
    let assigned: u32 = floored.iter().map(|&(_, v)| v).sum();
    let mut leftover = remaining - assigned;

    if leftover > 0 {
        // Indices ordered by descending fractional part; the sort is
        // stable, so exact ties keep input order.
        let mut by_fraction: Vec<usize> = (0..raw.len()).collect();
        by_fraction.sort_by(|&a, &b| {
            let fa = raw[a].1 - f64::from(floored[a].1);
            let fb = raw[b].1 - f64::from(floored[b].1);
            fb.total_cmp(&fa)
        });
        for idx in by_fraction {
            if leftover == 0 {
                break;
            }
            floored[idx].1 += 1;
            leftover -= 1;
        }
    }

    floored.into_iter().collect()
}
