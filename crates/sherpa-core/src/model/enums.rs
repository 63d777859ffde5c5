//! Closed domain enums shared across the engine.
//!
//! Serde representations use the SCREAMING_SNAKE_CASE wire values the
//! content generator is instructed to emit, so generated JSON deserializes
//! directly into these types.

use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// Study phase, derived from exam dates and prelims status.
///
/// `MainsSprint90` and `Interview` are the two final high-intensity phases;
/// they raise the daily fatigue ceiling (see [`crate::engine::fatigue`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    Foundation,
    Consolidation,
    #[serde(rename = "PRELIMS_SPRINT_75")]
    PrelimsSprint75,
    #[serde(rename = "MAINS_SPRINT_90")]
    MainsSprint90,
    Interview,
}

impl Phase {
    /// Whether this is one of the two final high-intensity phases.
    pub fn is_final_sprint(self) -> bool {
        matches!(self, Self::MainsSprint90 | Self::Interview)
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Foundation => "FOUNDATION",
            Self::Consolidation => "CONSOLIDATION",
            Self::PrelimsSprint75 => "PRELIMS_SPRINT_75",
            Self::MainsSprint90 => "MAINS_SPRINT_90",
            Self::Interview => "INTERVIEW",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// BlockCategory
// ---------------------------------------------------------------------------

/// Grouping of block types used by budget allocation and the subject
/// diversity rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockCategory {
    CoreLearning,
    CoreRetention,
    CorePattern,
    Performance,
    Corrective,
    Retention,
    Input,
    Processing,
    Meta,
}

impl fmt::Display for BlockCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::CoreLearning => "CORE_LEARNING",
            Self::CoreRetention => "CORE_RETENTION",
            Self::CorePattern => "CORE_PATTERN",
            Self::Performance => "PERFORMANCE",
            Self::Corrective => "CORRECTIVE",
            Self::Retention => "RETENTION",
            Self::Input => "INPUT",
            Self::Processing => "PROCESSING",
            Self::Meta => "META",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// BlockType
// ---------------------------------------------------------------------------

/// Kind of scheduled activity block. The catalog carries exactly one
/// [`crate::catalog::BlockDefinition`] per variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BlockType {
    DeepStudy,
    StudyLight,
    StudyTechnical,
    Revision,
    QuickRecall,
    PyqAnalysis,
    TimedMcq,
    TimedAnswerWriting,
    CsatPractice,
    EssayBrainstorm,
    EssayFullSim,
    FullMock,
    InterviewSim,
    ErrorAnalysis,
    WeakAreaDrill,
    ConsolidationDay,
    NewsReading,
    CaIntegration,
    NoteRefinement,
    WeeklyReview,
}

impl BlockType {
    /// All block types, in catalog order. Used by the catalog loader to
    /// check exhaustive coverage.
    pub const ALL: [BlockType; 20] = [
        Self::DeepStudy,
        Self::StudyLight,
        Self::StudyTechnical,
        Self::Revision,
        Self::QuickRecall,
        Self::PyqAnalysis,
        Self::TimedMcq,
        Self::TimedAnswerWriting,
        Self::CsatPractice,
        Self::EssayBrainstorm,
        Self::EssayFullSim,
        Self::FullMock,
        Self::InterviewSim,
        Self::ErrorAnalysis,
        Self::WeakAreaDrill,
        Self::ConsolidationDay,
        Self::NewsReading,
        Self::CaIntegration,
        Self::NoteRefinement,
        Self::WeeklyReview,
    ];
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::DeepStudy => "DEEP_STUDY",
            Self::StudyLight => "STUDY_LIGHT",
            Self::StudyTechnical => "STUDY_TECHNICAL",
            Self::Revision => "REVISION",
            Self::QuickRecall => "QUICK_RECALL",
            Self::PyqAnalysis => "PYQ_ANALYSIS",
            Self::TimedMcq => "TIMED_MCQ",
            Self::TimedAnswerWriting => "TIMED_ANSWER_WRITING",
            Self::CsatPractice => "CSAT_PRACTICE",
            Self::EssayBrainstorm => "ESSAY_BRAINSTORM",
            Self::EssayFullSim => "ESSAY_FULL_SIM",
            Self::FullMock => "FULL_MOCK",
            Self::InterviewSim => "INTERVIEW_SIM",
            Self::ErrorAnalysis => "ERROR_ANALYSIS",
            Self::WeakAreaDrill => "WEAK_AREA_DRILL",
            Self::ConsolidationDay => "CONSOLIDATION_DAY",
            Self::NewsReading => "NEWS_READING",
            Self::CaIntegration => "CA_INTEGRATION",
            Self::NoteRefinement => "NOTE_REFINEMENT",
            Self::WeeklyReview => "WEEKLY_REVIEW",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// Subject
// ---------------------------------------------------------------------------

/// Exam subject a card or confidence record is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Subject {
    History,
    Economy,
    Polity,
    Environment,
    Geography,
    SciTech,
    Ethics,
    Essay,
    Optional,
    Csat,
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::History => "HISTORY",
            Self::Economy => "ECONOMY",
            Self::Polity => "POLITY",
            Self::Environment => "ENVIRONMENT",
            Self::Geography => "GEOGRAPHY",
            Self::SciTech => "SCI_TECH",
            Self::Ethics => "ETHICS",
            Self::Essay => "ESSAY",
            Self::Optional => "OPTIONAL",
            Self::Csat => "CSAT",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// CheckInStatus
// ---------------------------------------------------------------------------

/// Lifecycle status of a card, reported back by the user at check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckInStatus {
    Pending,
    Done,
    Partial,
    Skipped,
    Inactive,
}

impl fmt::Display for CheckInStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "PENDING",
            Self::Done => "DONE",
            Self::Partial => "PARTIAL",
            Self::Skipped => "SKIPPED",
            Self::Inactive => "INACTIVE",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// MainsPaper
// ---------------------------------------------------------------------------

/// Mains paper a subject feeds into, for subjects with no prelims weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MainsPaper {
    Gs1,
    Gs2,
    Gs3,
    Gs4,
    Essay,
    Optional,
}

impl fmt::Display for MainsPaper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Gs1 => "GS1",
            Self::Gs2 => "GS2",
            Self::Gs3 => "GS3",
            Self::Gs4 => "GS4",
            Self::Essay => "ESSAY",
            Self::Optional => "OPTIONAL",
        };
        f.write_str(s)
    }
}

// ---------------------------------------------------------------------------
// HeavyLevel
// ---------------------------------------------------------------------------

/// Catalog annotation for block exertion class.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HeavyLevel {
    #[default]
    None,
    Heavy,
    Ultra,
}

impl fmt::Display for HeavyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::None => "NONE",
            Self::Heavy => "HEAVY",
            Self::Ultra => "ULTRA",
        };
        f.write_str(s)
    }
}
