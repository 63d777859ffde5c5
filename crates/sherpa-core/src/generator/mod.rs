//! External content-generator capability: request shape, adapter trait,
//! and output extraction.

pub mod extract;
pub mod request;
pub mod trait_def;

pub use extract::{ExtractError, extract_weekly_plan};
pub use request::{GenerationRequest, ProfileSummary};
pub use trait_def::Generator;
