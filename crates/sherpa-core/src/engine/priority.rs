//! Subject priority ranking for the qualifying stage.
//!
//! Priority grows with low confidence, high static weight, and time since
//! last practice. A floor keeps mastered subjects schedulable at a
//! minimal level instead of dropping out entirely.

use chrono::NaiveDate;

use crate::catalog::SubjectWeight;
use crate::model::{SubjectPriority, TopicConfidence};

/// Days assumed since last practice when no practice date is recorded.
const UNPRACTICED_DAYS: i64 = 21;
/// Ceiling on the days/7 recency term.
const RECENCY_CEILING: f64 = 3.0;
/// Confidence scale maximum used for normalization.
const CONFIDENCE_SCALE: f64 = 5.0;
/// Fraction of the static weight kept as the minimum priority.
const PRIORITY_FLOOR_FRACTION: f64 = 0.01;

/// Recency penalty: `1 + min(days/7, 3)`. A missing last-practice date
/// counts as 21 days, which saturates the ceiling.
pub fn compute_recency_penalty(days_since_last: Option<i64>) -> f64 {
    let days = days_since_last.unwrap_or(UNPRACTICED_DAYS);
    1.0 + (days as f64 / 7.0).min(RECENCY_CEILING)
}

/// Raw qualifying-stage priority, floored at 1% of the static weight.
pub fn compute_prelims_priority(confidence: f64, weight: f64, days_since_last: Option<i64>) -> f64 {
    let normalized = confidence / CONFIDENCE_SCALE;
    let recency = compute_recency_penalty(days_since_last);
    let raw = (1.0 - normalized) * weight * recency;
    raw.max(PRIORITY_FLOOR_FRACTION * weight)
}

/// Rank subjects by qualifying-stage priority, descending.
///
/// Subjects without a defined prelims weight are outside this ranking's
/// domain and are excluded. Exact ties keep input order.
pub fn rank_subjects(
    confidences: &[TopicConfidence],
    weights: &[SubjectWeight],
    today: NaiveDate,
) -> Vec<SubjectPriority> {
    let mut results: Vec<SubjectPriority> = Vec::new();

    for tc in confidences {
        let Some(weight) = weights
            .iter()
            .find(|w| w.subject == tc.subject)
            .and_then(|w| w.prelims_weight)
        else {
            continue;
        };

        let days_since = tc
            .last_practiced_date
            .map(|last| (today - last).num_days());
        let recency = compute_recency_penalty(days_since);
        let raw = compute_prelims_priority(tc.perceived_confidence, weight, days_since);

        results.push(SubjectPriority {
            subject: tc.subject,
            raw_priority: raw,
            normalized_confidence: tc.perceived_confidence / CONFIDENCE_SCALE,
            weight,
            recency_penalty: recency,
        });
    }

    results.sort_by(|a, b| b.raw_priority.total_cmp(&a.raw_priority));
    results
}
