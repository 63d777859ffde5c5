//! Extraction of a [`WeeklyPlan`] from free-form generator output.
//!
//! Generators are instructed to return pure JSON but routinely wrap it in
//! a ```` ```json ```` fence, a bare fence, or surrounding prose. The
//! extractor strips fences, falls back to the outermost brace span, and
//! then checks the field ranges serde cannot express. Every failure here
//! is retryable; the planner converts it into synthetic violation
//! feedback rather than an error.

use thiserror::Error;

use crate::model::WeeklyPlan;

/// Errors from locating or decoding the plan JSON.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("no JSON object found in generator output")]
    NoJsonObject,

    #[error("generator JSON does not match the weekly plan schema: {0}")]
    Schema(#[from] serde_json::Error),

    #[error("card {order} on {day} is out of range: {reason}")]
    CardOutOfRange {
        day: chrono::NaiveDate,
        order: u32,
        reason: String,
    },
}

/// Strip markdown code fences and locate the JSON object span.
fn extract_json(text: &str) -> Option<&str> {
    let trimmed = text
        .trim()
        .trim_start_matches("```json")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();

    if trimmed.starts_with('{') && trimmed.ends_with('}') {
        return Some(trimmed);
    }

    // Embedded in prose: take the outermost brace span.
    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    (start < end).then(|| &trimmed[start..=end])
}

/// Parse a weekly plan out of raw generator text.
///
/// After decoding, card fields serde cannot bound are checked: planned
/// duration must be positive and fatigue must sit in 1..=4.
pub fn extract_weekly_plan(text: &str) -> Result<WeeklyPlan, ExtractError> {
    let json = extract_json(text).ok_or(ExtractError::NoJsonObject)?;
    let plan: WeeklyPlan = serde_json::from_str(json)?;

    for day in &plan.days {
        for card in &day.cards {
            if card.planned_duration == 0 {
                return Err(ExtractError::CardOutOfRange {
                    day: day.date,
                    order: card.order,
                    reason: "planned_duration must be positive".into(),
                });
            }
            if !(1..=4).contains(&card.fatigue) {
                return Err(ExtractError::CardOutOfRange {
                    day: day.date,
                    order: card.order,
                    reason: format!("fatigue {} outside 1..=4", card.fatigue),
                });
            }
        }
    }

    Ok(plan)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAN_JSON: &str = r#"{
        "user_id": "u1",
        "week_start": "2026-03-02",
        "days": [
            {
                "date": "2026-03-02",
                "cards": [
                    {
                        "block_type": "DEEP_STUDY",
                        "category": "CORE_LEARNING",
                        "subject": "POLITY",
                        "topic": "Fundamental rights",
                        "planned_duration": 90,
                        "fatigue": 3,
                        "order": 0
                    }
                ]
            }
        ],
        "narrative": "Front-load polity."
    }"#;

    #[test]
    fn parses_bare_json() {
        let plan = extract_weekly_plan(PLAN_JSON).expect("should parse");
        assert_eq!(plan.user_id, "u1");
        assert_eq!(plan.days.len(), 1);
        assert_eq!(plan.days[0].cards[0].planned_duration, 90);
    }

    #[test]
    fn parses_json_in_labelled_fence() {
        let text = format!("```json\n{PLAN_JSON}\n```");
        let plan = extract_weekly_plan(&text).expect("should parse fenced JSON");
        assert_eq!(plan.user_id, "u1");
    }

    #[test]
    fn parses_json_in_bare_fence() {
        let text = format!("```\n{PLAN_JSON}\n```");
        let plan = extract_weekly_plan(&text).expect("should parse bare-fenced JSON");
        assert_eq!(plan.user_id, "u1");
    }

    #[test]
    fn parses_json_embedded_in_prose() {
        let text = format!("Here is your weekly plan:\n\n{PLAN_JSON}\n\nGood luck!");
        let plan = extract_weekly_plan(&text).expect("should parse prose-wrapped JSON");
        assert_eq!(plan.user_id, "u1");
    }

    #[test]
    fn no_json_is_an_error() {
        let err = extract_weekly_plan("I could not produce a plan this time.").unwrap_err();
        assert!(matches!(err, ExtractError::NoJsonObject), "got: {err}");
    }

    #[test]
    fn truncated_json_is_a_schema_error() {
        let truncated = &PLAN_JSON[..PLAN_JSON.len() - 40];
        let err = extract_weekly_plan(truncated).unwrap_err();
        assert!(
            matches!(err, ExtractError::NoJsonObject | ExtractError::Schema(_)),
            "got: {err}"
        );
    }

    #[test]
    fn unknown_block_type_is_a_schema_error() {
        let text = PLAN_JSON.replace("DEEP_STUDY", "POWER_NAP");
        let err = extract_weekly_plan(&text).unwrap_err();
        assert!(matches!(err, ExtractError::Schema(_)), "got: {err}");
    }

    #[test]
    fn zero_duration_is_out_of_range() {
        let text = PLAN_JSON.replace("\"planned_duration\": 90", "\"planned_duration\": 0");
        let err = extract_weekly_plan(&text).unwrap_err();
        assert!(matches!(err, ExtractError::CardOutOfRange { .. }), "got: {err}");
    }

    #[test]
    fn fatigue_out_of_range_is_rejected() {
        let text = PLAN_JSON.replace("\"fatigue\": 3", "\"fatigue\": 5");
        let err = extract_weekly_plan(&text).unwrap_err();
        assert!(matches!(err, ExtractError::CardOutOfRange { .. }), "got: {err}");
    }

    #[test]
    fn engine_owned_fields_default() {
        let plan = extract_weekly_plan(PLAN_JSON).unwrap();
        let card = &plan.days[0].cards[0];
        assert!(!card.card_id.is_empty());
        assert!(card.actual_duration.is_none());
    }
}
