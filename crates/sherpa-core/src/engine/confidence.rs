//! Per-topic mastery state machine driven by check-in outcomes.
//!
//! Every function takes the current [`TopicConfidence`] by reference and
//! returns the updated record; the caller persists it. All confidence
//! mutations clamp into the configured bounds before returning.

use chrono::NaiveDate;

use crate::catalog::ConfidenceConfig;
use crate::model::{CheckInStatus, TopicConfidence};

/// Recurring session milestones fire on every Nth session past their
/// threshold.
const RECURRING_SESSION_INTERVAL: u32 = 5;

/// Apply a completed (done or partial) check-in.
///
/// Streak and session counters advance, the skip counter resets, and the
/// practice date moves to `practiced_date`. Milestone bonuses then apply
/// additively in the same check-in: a streak milestone fires when the new
/// streak has reached its threshold and its key is unawarded; a one-shot
/// session milestone likewise; a recurring session milestone fires on
/// every 5th session at or past its threshold, keyed per occurrence so
/// the same occurrence never pays twice.
pub fn apply_completion(
    topic: &TopicConfidence,
    config: &ConfidenceConfig,
    practiced_date: NaiveDate,
) -> TopicConfidence {
    let mut conf = topic.perceived_confidence;
    let streak = topic.streak + 1;
    let total_sessions = topic.total_sessions + 1;
    let mut awarded = topic.milestones_awarded.clone();

    for m in &config.streak_milestones {
        let key = format!("streak_{}", m.streak);
        if streak >= m.streak && !awarded.contains(&key) {
            conf += m.bonus;
            awarded.push(key);
        }
    }

    for m in &config.session_milestones {
        if m.one_shot {
            let key = format!("total_{}", m.total_sessions);
            if total_sessions >= m.total_sessions && !awarded.contains(&key) {
                conf += m.bonus;
                awarded.push(key);
            }
        } else if total_sessions >= m.total_sessions
            && total_sessions % RECURRING_SESSION_INTERVAL == 0
        {
            let key = format!("total_{total_sessions}");
            if !awarded.contains(&key) {
                conf += m.bonus;
                awarded.push(key);
            }
        }
    }

    TopicConfidence {
        perceived_confidence: config.clamp(conf),
        streak,
        skip_count: 0,
        total_sessions,
        last_practiced_date: Some(practiced_date),
        milestones_awarded: awarded,
        ..topic.clone()
    }
}

/// Apply a skipped check-in.
///
/// The skip counter advances and the streak resets. A penalty fires only
/// on the exact crossing of its threshold (old count below, new count at
/// or above), so repeated skips past a threshold never pay it twice.
pub fn apply_skip(topic: &TopicConfidence, config: &ConfidenceConfig) -> TopicConfidence {
    let mut conf = topic.perceived_confidence;
    let new_skip_count = topic.skip_count + 1;

    for p in &config.skip_penalties {
        if topic.skip_count < p.skip_count && new_skip_count >= p.skip_count {
            conf -= p.penalty;
        }
    }

    TopicConfidence {
        perceived_confidence: config.clamp(conf),
        skip_count: new_skip_count,
        streak: 0,
        ..topic.clone()
    }
}

/// Apply time-based inactivity decay. Not a check-in: callers run this on
/// a schedule, independent of user activity.
///
/// No-op without a recorded practice date or under 7 days of inactivity.
/// Otherwise one decay step per full 7-day period, at the maintenance
/// rate when the topic has both the session and streak depth to qualify.
/// Separately, 14 days of inactivity resets the streak.
pub fn apply_inactivity_decay(
    topic: &TopicConfidence,
    config: &ConfidenceConfig,
    today: NaiveDate,
) -> TopicConfidence {
    let Some(last) = topic.last_practiced_date else {
        return topic.clone();
    };

    let days_inactive = (today - last).num_days();
    if days_inactive < 7 {
        return topic.clone();
    }

    let is_maintenance = topic.total_sessions >= config.maintenance_min_sessions
        && topic.streak >= config.maintenance_min_streak;
    let rate = if is_maintenance {
        config.maintenance_decay_per_7_days
    } else {
        config.decay_per_7_days
    };

    let periods = days_inactive / 7;
    let new_conf = config.clamp(topic.perceived_confidence - periods as f64 * rate);

    let new_streak = if days_inactive >= config.streak_reset_days {
        0
    } else {
        topic.streak
    };

    TopicConfidence {
        perceived_confidence: new_conf,
        streak: new_streak,
        ..topic.clone()
    }
}

/// Route a check-in to its handler based purely on the status.
///
/// Done and partial both count as completion; inactive and pending are
/// no-ops.
pub fn process_checkin(
    topic: &TopicConfidence,
    status: CheckInStatus,
    config: &ConfidenceConfig,
    today: NaiveDate,
) -> TopicConfidence {
    match status {
        CheckInStatus::Done | CheckInStatus::Partial => apply_completion(topic, config, today),
        CheckInStatus::Skipped => apply_skip(topic, config),
        CheckInStatus::Inactive | CheckInStatus::Pending => topic.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::model::Subject;

    fn config() -> ConfidenceConfig {
        Catalog::load().unwrap().confidence().clone()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn topic(confidence: f64) -> TopicConfidence {
        TopicConfidence::new("test", Subject::Polity, confidence)
    }

    #[test]
    fn completion_advances_counters() {
        let result = apply_completion(&topic(2.5), &config(), date(2026, 3, 1));
        assert_eq!(result.streak, 1);
        assert_eq!(result.total_sessions, 1);
        assert_eq!(result.skip_count, 0);
        assert_eq!(result.last_practiced_date, Some(date(2026, 3, 1)));
    }

    #[test]
    fn completion_resets_skip_count() {
        let t = TopicConfidence {
            skip_count: 5,
            ..topic(2.5)
        };
        let result = apply_completion(&t, &config(), date(2026, 3, 1));
        assert_eq!(result.skip_count, 0);
    }

    #[test]
    fn streak_milestone_at_5() {
        let t = TopicConfidence {
            streak: 4,
            total_sessions: 4,
            ..topic(2.0)
        };
        let result = apply_completion(&t, &config(), date(2026, 3, 1));
        assert_eq!(result.streak, 5);
        assert!(result.milestones_awarded.contains(&"streak_5".to_string()));
        assert!((result.perceived_confidence - 2.3).abs() < 1e-9);
    }

    #[test]
    fn streak_milestone_never_repeats() {
        let t = TopicConfidence {
            streak: 4,
            total_sessions: 5,
            milestones_awarded: vec!["streak_5".into()],
            ..topic(2.3)
        };
        let result = apply_completion(&t, &config(), date(2026, 3, 1));
        assert!((result.perceived_confidence - 2.3).abs() < 1e-9, "no second bonus");
    }

    #[test]
    fn session_milestone_at_10() {
        let t = TopicConfidence {
            total_sessions: 9,
            ..topic(2.0)
        };
        let result = apply_completion(&t, &config(), date(2026, 3, 1));
        assert_eq!(result.total_sessions, 10);
        assert!(result.milestones_awarded.contains(&"total_10".to_string()));
        assert!((result.perceived_confidence - 2.2).abs() < 1e-9);
    }

    #[test]
    fn recurring_milestone_at_25() {
        let t = TopicConfidence {
            total_sessions: 24,
            milestones_awarded: vec!["total_10".into(), "total_20".into()],
            ..topic(3.0)
        };
        let result = apply_completion(&t, &config(), date(2026, 3, 1));
        assert_eq!(result.total_sessions, 25);
        assert!(result.milestones_awarded.contains(&"total_25".to_string()));
        assert!((result.perceived_confidence - 3.2).abs() < 1e-9);
    }

    #[test]
    fn recurring_milestone_again_at_30() {
        let t = TopicConfidence {
            total_sessions: 29,
            milestones_awarded: vec!["total_10".into(), "total_20".into(), "total_25".into()],
            ..topic(3.0)
        };
        let result = apply_completion(&t, &config(), date(2026, 3, 1));
        assert_eq!(result.total_sessions, 30);
        assert!(result.milestones_awarded.contains(&"total_30".to_string()));
        assert!((result.perceived_confidence - 3.2).abs() < 1e-9);
    }

    #[test]
    fn no_recurring_award_off_interval() {
        let t = TopicConfidence {
            total_sessions: 26,
            milestones_awarded: vec!["total_10".into(), "total_20".into(), "total_25".into()],
            ..topic(3.0)
        };
        let result = apply_completion(&t, &config(), date(2026, 3, 1));
        assert_eq!(result.total_sessions, 27);
        assert!((result.perceived_confidence - 3.0).abs() < 1e-9);
    }

    #[test]
    fn bonuses_stack_then_clamp_at_max() {
        // streak_5 (+0.3) and total_10 (+0.2) both land: 4.9 + 0.5 -> 5.0.
        let t = TopicConfidence {
            streak: 4,
            total_sessions: 9,
            ..topic(4.9)
        };
        let result = apply_completion(&t, &config(), date(2026, 3, 1));
        assert_eq!(result.perceived_confidence, 5.0);
    }

    #[test]
    fn skip_advances_count_and_resets_streak() {
        let t = TopicConfidence {
            streak: 5,
            ..topic(2.5)
        };
        let result = apply_skip(&t, &config());
        assert_eq!(result.skip_count, 1);
        assert_eq!(result.streak, 0);
    }

    #[test]
    fn skip_penalty_fires_at_3() {
        let t = TopicConfidence {
            skip_count: 2,
            ..topic(3.0)
        };
        let result = apply_skip(&t, &config());
        assert_eq!(result.skip_count, 3);
        assert!((result.perceived_confidence - 2.8).abs() < 1e-9);
    }

    #[test]
    fn skip_penalty_fires_at_7() {
        let t = TopicConfidence {
            skip_count: 6,
            ..topic(3.0)
        };
        let result = apply_skip(&t, &config());
        assert_eq!(result.skip_count, 7);
        assert!((result.perceived_confidence - 2.7).abs() < 1e-9);
    }

    #[test]
    fn skip_penalty_fires_at_11() {
        let t = TopicConfidence {
            skip_count: 10,
            ..topic(3.0)
        };
        let result = apply_skip(&t, &config());
        assert_eq!(result.skip_count, 11);
        assert!((result.perceived_confidence - 2.6).abs() < 1e-9);
    }

    #[test]
    fn no_penalty_beyond_last_threshold() {
        let t = TopicConfidence {
            skip_count: 11,
            ..topic(2.6)
        };
        let result = apply_skip(&t, &config());
        assert_eq!(result.skip_count, 12);
        assert!((result.perceived_confidence - 2.6).abs() < 1e-9);
    }

    #[test]
    fn skip_clamps_at_min() {
        let t = TopicConfidence {
            skip_count: 2,
            ..topic(1.1)
        };
        let result = apply_skip(&t, &config());
        assert_eq!(result.perceived_confidence, 1.0);
    }

    #[test]
    fn no_decay_under_7_days() {
        let t = TopicConfidence {
            last_practiced_date: Some(date(2026, 2, 20)),
            ..topic(2.5)
        };
        let result = apply_inactivity_decay(&t, &config(), date(2026, 2, 25));
        assert_eq!(result.perceived_confidence, 2.5);
    }

    #[test]
    fn decay_at_7_days() {
        let t = TopicConfidence {
            last_practiced_date: Some(date(2026, 2, 18)),
            ..topic(2.5)
        };
        let result = apply_inactivity_decay(&t, &config(), date(2026, 2, 25));
        assert!((result.perceived_confidence - 2.4).abs() < 1e-9);
    }

    #[test]
    fn fifteen_days_decays_twice_and_resets_streak() {
        let t = TopicConfidence {
            streak: 5,
            last_practiced_date: Some(date(2026, 2, 10)),
            ..topic(3.0)
        };
        let result = apply_inactivity_decay(&t, &config(), date(2026, 2, 25));
        assert!((result.perceived_confidence - 2.8).abs() < 1e-9);
        assert_eq!(result.streak, 0);
    }

    #[test]
    fn maintenance_rate_halves_decay() {
        let t = TopicConfidence {
            streak: 12,
            total_sessions: 55,
            last_practiced_date: Some(date(2026, 2, 11)),
            ..topic(4.0)
        };
        let result = apply_inactivity_decay(&t, &config(), date(2026, 2, 25));
        // 14 days, 2 periods at 0.05.
        assert!((result.perceived_confidence - 3.9).abs() < 1e-9);
    }

    #[test]
    fn no_practice_date_is_a_noop() {
        let t = topic(2.5);
        let result = apply_inactivity_decay(&t, &config(), date(2026, 2, 25));
        assert_eq!(result, t);
    }

    #[test]
    fn dispatch_done_and_partial_complete() {
        let cfg = config();
        for status in [CheckInStatus::Done, CheckInStatus::Partial] {
            let result = process_checkin(&topic(2.5), status, &cfg, date(2026, 3, 1));
            assert_eq!(result.streak, 1, "{status} should count as completion");
            assert_eq!(result.total_sessions, 1);
        }
    }

    #[test]
    fn dispatch_skipped_skips() {
        let result = process_checkin(&topic(2.5), CheckInStatus::Skipped, &config(), date(2026, 3, 1));
        assert_eq!(result.skip_count, 1);
    }

    #[test]
    fn dispatch_inactive_and_pending_are_noops() {
        let cfg = config();
        let t = topic(2.5);
        for status in [CheckInStatus::Inactive, CheckInStatus::Pending] {
            let result = process_checkin(&t, status, &cfg, date(2026, 3, 1));
            assert_eq!(result, t, "{status} should not change state");
        }
    }

    #[test]
    fn one_shot_milestone_awarded_once_across_repeat_checkins() {
        let cfg = config();
        let t = TopicConfidence {
            streak: 4,
            total_sessions: 4,
            ..topic(2.0)
        };
        let first = apply_completion(&t, &cfg, date(2026, 3, 1));
        assert!((first.perceived_confidence - 2.3).abs() < 1e-9);

        // Re-apply at the same counts; the key is already recorded.
        let replay = TopicConfidence {
            streak: 4,
            total_sessions: 4,
            ..first.clone()
        };
        let second = apply_completion(&replay, &cfg, date(2026, 3, 2));
        assert!(
            (second.perceived_confidence - first.perceived_confidence).abs() < 1e-9,
            "one-shot milestone must not pay twice"
        );
    }
}
