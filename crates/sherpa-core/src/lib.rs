//! sherpa-core: deterministic weekly study-plan engine.
//!
//! The engine turns an externally drafted weekly schedule into a
//! guaranteed-safe plan. It computes the deterministic planning context
//! (study phase, per-category minute budgets, subject priorities), hands
//! that context to an external content generator behind the
//! [`generator::Generator`] trait, and gates whatever comes back through
//! a fixed seven-rule validator with a targeted auto-repair pass and a
//! bounded, feedback-driven retry loop.
//!
//! Entry points:
//! - [`catalog::Catalog::load`] -- load and validate the static tables.
//! - [`planner::generate_plan`] -- run one generation cycle to a valid
//!   [`model::WeeklyPlan`] or a terminal [`planner::PlanGenerationError`].
//! - [`engine::process_checkin`] / [`engine::apply_inactivity_decay`] --
//!   advance per-subject mastery state between runs.

pub mod catalog;
pub mod engine;
pub mod generator;
pub mod model;
pub mod planner;
pub mod storage;
