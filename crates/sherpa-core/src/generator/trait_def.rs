//! The `Generator` trait -- the adapter interface for plan-drafting
//! content services.
//!
//! Each concrete generator (a hosted LLM, a local model, a scripted test
//! double) implements this trait. The trait is intentionally object-safe
//! so it can be stored as `Box<dyn Generator>`.

use anyhow::Result;
use async_trait::async_trait;

use super::request::GenerationRequest;

/// Adapter interface for the external plan content generator.
///
/// Implementors turn a [`GenerationRequest`] into free-form text that is
/// expected to contain one JSON object in the [`crate::model::WeeklyPlan`]
/// shape. The engine owns extraction and validation; a generator only has
/// to produce text, and any failure it returns is treated as retryable by
/// the planner.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Human-readable name for this generator (e.g. "bedrock-nova").
    fn name(&self) -> &str;

    /// Produce a draft plan for the request.
    ///
    /// The call may block on network I/O; it is the engine's only
    /// suspension point.
    async fn draft(&self, request: &GenerationRequest) -> Result<String>;
}

// Compile-time assertion: Generator must be object-safe.
const _: () = {
    fn _assert_object_safe(_: &dyn Generator) {}
};
