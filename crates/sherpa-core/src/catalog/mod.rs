//! Static catalogs: block definitions, phase blueprints, subject weights,
//! and confidence tuning.
//!
//! The tables are defined in TOML files embedded at compile time and loaded
//! once at startup via [`Catalog::load`], which checks every structural
//! invariant the rest of the engine assumes (exhaustive block coverage,
//! allocations summing to 100, ordered duration bounds). After a successful
//! load the catalog is read-only and lookups are total.

use std::collections::{HashMap, HashSet};

use serde::Deserialize;
use thiserror::Error;

use crate::model::{BlockCategory, BlockType, HeavyLevel, MainsPaper, Phase, Subject};

static BLOCKS_TOML: &str = include_str!("blocks.toml");
static PHASES_TOML: &str = include_str!("phases.toml");
static SUBJECTS_TOML: &str = include_str!("subjects.toml");
static CONFIDENCE_TOML: &str = include_str!("confidence.toml");

// ---------------------------------------------------------------------------
// Catalog entry types
// ---------------------------------------------------------------------------

/// Static definition of one block type.
#[derive(Debug, Clone, Deserialize)]
pub struct BlockDefinition {
    pub block_type: BlockType,
    pub category: BlockCategory,
    /// Fixed exertion cost, 1..=4.
    pub fatigue: i32,
    #[serde(default)]
    pub heavy: HeavyLevel,
    /// Minimum scheduled minutes.
    pub min_duration: u32,
    /// Maximum scheduled minutes.
    pub max_duration: u32,
    /// Weekly scheduling cap advertised to the generator.
    pub max_per_week: u32,
    #[serde(default)]
    pub notes: String,
}

/// One category's share of a phase's daily budget.
#[derive(Debug, Clone, Deserialize)]
pub struct CategoryAllocation {
    pub category: BlockCategory,
    pub percentage: f64,
}

/// Per-phase target allocation across categories.
#[derive(Debug, Clone, Deserialize)]
pub struct PhaseBlueprint {
    pub phase: Phase,
    pub allocations: Vec<CategoryAllocation>,
    #[serde(default)]
    pub blend_enabled: bool,
    #[serde(default = "default_blend_window")]
    pub blend_window_days: u32,
}

fn default_blend_window() -> u32 {
    15
}

/// Static per-subject importance for the qualifying stage.
#[derive(Debug, Clone, Deserialize)]
pub struct SubjectWeight {
    pub subject: Subject,
    /// Absent for subjects not scored at the qualifying stage.
    #[serde(default)]
    pub prelims_weight: Option<f64>,
    #[serde(default)]
    pub mains_paper: Option<MainsPaper>,
}

/// Streak milestone: fires once ever when the streak reaches the threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct StreakMilestone {
    pub streak: u32,
    pub bonus: f64,
}

/// Session milestone. One-shot entries fire once at the threshold;
/// recurring entries fire every 5th session from the threshold onward.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionMilestone {
    pub total_sessions: u32,
    pub bonus: f64,
    #[serde(default = "default_one_shot")]
    pub one_shot: bool,
}

fn default_one_shot() -> bool {
    true
}

/// Skip penalty: fires only when the skip count crosses the threshold.
#[derive(Debug, Clone, Deserialize)]
pub struct SkipPenalty {
    pub skip_count: u32,
    pub penalty: f64,
}

/// Tunable table for the confidence engine. Loaded once, read-only.
#[derive(Debug, Clone, Deserialize)]
pub struct ConfidenceConfig {
    #[serde(default)]
    pub streak_milestones: Vec<StreakMilestone>,
    #[serde(default)]
    pub session_milestones: Vec<SessionMilestone>,
    #[serde(default)]
    pub skip_penalties: Vec<SkipPenalty>,
    #[serde(default = "default_decay")]
    pub decay_per_7_days: f64,
    #[serde(default = "default_maintenance_decay")]
    pub maintenance_decay_per_7_days: f64,
    #[serde(default = "default_maintenance_min_sessions")]
    pub maintenance_min_sessions: u32,
    #[serde(default = "default_maintenance_min_streak")]
    pub maintenance_min_streak: u32,
    #[serde(default = "default_streak_reset_days")]
    pub streak_reset_days: i64,
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f64,
    #[serde(default = "default_max_confidence")]
    pub max_confidence: f64,
}

fn default_decay() -> f64 {
    0.1
}

fn default_maintenance_decay() -> f64 {
    0.05
}

fn default_maintenance_min_sessions() -> u32 {
    50
}

fn default_maintenance_min_streak() -> u32 {
    10
}

fn default_streak_reset_days() -> i64 {
    14
}

fn default_min_confidence() -> f64 {
    1.0
}

fn default_max_confidence() -> f64 {
    5.0
}

impl ConfidenceConfig {
    /// Clamp a confidence value into the configured bounds.
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min_confidence, self.max_confidence)
    }
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

/// Errors from loading and validating the embedded catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to parse embedded {file}: {source}")]
    Parse {
        file: &'static str,
        #[source]
        source: toml::de::Error,
    },

    #[error("block catalog has no definition for {0}")]
    MissingBlock(BlockType),

    #[error("block catalog has more than one definition for {0}")]
    DuplicateBlock(BlockType),

    #[error("block {block_type} has fatigue {fatigue}, expected 1..=4")]
    FatigueOutOfRange { block_type: BlockType, fatigue: i32 },

    #[error("block {block_type} has min_duration {min} > max_duration {max}")]
    DurationBoundsInverted {
        block_type: BlockType,
        min: u32,
        max: u32,
    },

    #[error("no blueprint defined for phase {0}")]
    MissingBlueprint(Phase),

    #[error("more than one blueprint defined for phase {0}")]
    DuplicateBlueprint(Phase),

    #[error("phase {phase} allocations sum to {sum}, expected 100")]
    AllocationSum { phase: Phase, sum: f64 },

    #[error("subject weight table has more than one entry for {0}")]
    DuplicateSubject(Subject),
}

#[derive(Debug, Deserialize)]
struct BlockFile {
    blocks: Vec<BlockDefinition>,
}

#[derive(Debug, Deserialize)]
struct PhaseFile {
    phases: Vec<PhaseBlueprint>,
}

#[derive(Debug, Deserialize)]
struct SubjectFile {
    subjects: Vec<SubjectWeight>,
}

/// Immutable, process-wide catalog handle.
///
/// Load once at startup and pass by reference into the engine; lookups by
/// block type or phase are total after a successful load.
#[derive(Debug, Clone)]
pub struct Catalog {
    blocks: Vec<BlockDefinition>,
    block_index: HashMap<BlockType, usize>,
    blueprints: HashMap<Phase, PhaseBlueprint>,
    subject_weights: Vec<SubjectWeight>,
    confidence: ConfidenceConfig,
}

impl Catalog {
    /// Load and validate the embedded catalog tables.
    pub fn load() -> Result<Self, CatalogError> {
        let block_file: BlockFile = toml::from_str(BLOCKS_TOML).map_err(|source| {
            CatalogError::Parse {
                file: "blocks.toml",
                source,
            }
        })?;
        let phase_file: PhaseFile = toml::from_str(PHASES_TOML).map_err(|source| {
            CatalogError::Parse {
                file: "phases.toml",
                source,
            }
        })?;
        let subject_file: SubjectFile = toml::from_str(SUBJECTS_TOML).map_err(|source| {
            CatalogError::Parse {
                file: "subjects.toml",
                source,
            }
        })?;
        let confidence: ConfidenceConfig = toml::from_str(CONFIDENCE_TOML).map_err(|source| {
            CatalogError::Parse {
                file: "confidence.toml",
                source,
            }
        })?;

        // Block index: exactly one definition per block type.
        let mut block_index = HashMap::new();
        for (i, def) in block_file.blocks.iter().enumerate() {
            if block_index.insert(def.block_type, i).is_some() {
                return Err(CatalogError::DuplicateBlock(def.block_type));
            }
            if !(1..=4).contains(&def.fatigue) {
                return Err(CatalogError::FatigueOutOfRange {
                    block_type: def.block_type,
                    fatigue: def.fatigue,
                });
            }
            if def.min_duration > def.max_duration {
                return Err(CatalogError::DurationBoundsInverted {
                    block_type: def.block_type,
                    min: def.min_duration,
                    max: def.max_duration,
                });
            }
        }
        for bt in BlockType::ALL {
            if !block_index.contains_key(&bt) {
                return Err(CatalogError::MissingBlock(bt));
            }
        }

        // Blueprints: one per phase, allocations summing to 100.
        let mut blueprints = HashMap::new();
        for bp in phase_file.phases {
            let sum: f64 = bp.allocations.iter().map(|a| a.percentage).sum();
            if (sum - 100.0).abs() > 1e-6 {
                return Err(CatalogError::AllocationSum {
                    phase: bp.phase,
                    sum,
                });
            }
            let phase = bp.phase;
            if blueprints.insert(phase, bp).is_some() {
                return Err(CatalogError::DuplicateBlueprint(phase));
            }
        }
        for phase in [
            Phase::Foundation,
            Phase::Consolidation,
            Phase::PrelimsSprint75,
            Phase::MainsSprint90,
            Phase::Interview,
        ] {
            if !blueprints.contains_key(&phase) {
                return Err(CatalogError::MissingBlueprint(phase));
            }
        }

        // Subject weights: at most one entry per subject.
        let mut seen = HashSet::new();
        for w in &subject_file.subjects {
            if !seen.insert(w.subject) {
                return Err(CatalogError::DuplicateSubject(w.subject));
            }
        }

        Ok(Self {
            blocks: block_file.blocks,
            block_index,
            blueprints,
            subject_weights: subject_file.subjects,
            confidence,
        })
    }

    /// Definition for a block type. Total: coverage is checked at load.
    pub fn block(&self, block_type: BlockType) -> &BlockDefinition {
        &self.blocks[self.block_index[&block_type]]
    }

    /// All block definitions in catalog order.
    pub fn blocks(&self) -> &[BlockDefinition] {
        &self.blocks
    }

    /// Blueprint for a phase. Total: every phase is checked at load.
    pub fn blueprint(&self, phase: Phase) -> &PhaseBlueprint {
        &self.blueprints[&phase]
    }

    /// All phase blueprints, keyed by phase.
    pub fn blueprints(&self) -> &HashMap<Phase, PhaseBlueprint> {
        &self.blueprints
    }

    /// Static subject weight table.
    pub fn subject_weights(&self) -> &[SubjectWeight] {
        &self.subject_weights
    }

    /// Confidence engine tuning.
    pub fn confidence(&self) -> &ConfidenceConfig {
        &self.confidence
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_loads() {
        let catalog = Catalog::load().expect("embedded catalog should validate");
        assert_eq!(catalog.blocks().len(), 20);
        assert_eq!(catalog.blueprints().len(), 5);
        assert_eq!(catalog.subject_weights().len(), 10);
    }

    #[test]
    fn every_block_type_has_a_definition() {
        let catalog = Catalog::load().unwrap();
        for bt in BlockType::ALL {
            let def = catalog.block(bt);
            assert_eq!(def.block_type, bt);
            assert!((1..=4).contains(&def.fatigue));
            assert!(def.min_duration <= def.max_duration);
            assert!(def.min_duration >= 15, "{bt} min_duration below 15");
            assert!(def.max_per_week >= 1);
        }
    }

    #[test]
    fn fatigue_matches_heavy_annotation() {
        let catalog = Catalog::load().unwrap();
        for def in catalog.blocks() {
            match def.heavy {
                HeavyLevel::None => assert!(
                    def.fatigue <= 2,
                    "{} marked NONE but has fatigue {}",
                    def.block_type,
                    def.fatigue
                ),
                HeavyLevel::Heavy => assert_eq!(def.fatigue, 3, "{}", def.block_type),
                HeavyLevel::Ultra => assert_eq!(def.fatigue, 4, "{}", def.block_type),
            }
        }
    }

    #[test]
    fn allocations_sum_to_100_per_phase() {
        let catalog = Catalog::load().unwrap();
        for (phase, bp) in catalog.blueprints() {
            let sum: f64 = bp.allocations.iter().map(|a| a.percentage).sum();
            assert!((sum - 100.0).abs() < 1e-6, "{phase} sums to {sum}");
        }
    }

    #[test]
    fn foundation_is_learning_heavy_and_unblended() {
        let catalog = Catalog::load().unwrap();
        let bp = catalog.blueprint(Phase::Foundation);
        assert!(!bp.blend_enabled);
        let cl = bp
            .allocations
            .iter()
            .find(|a| a.category == BlockCategory::CoreLearning)
            .expect("foundation allocates core learning");
        assert_eq!(cl.percentage, 50.0);
    }

    #[test]
    fn prelims_subjects_have_weights_and_mains_subjects_have_papers() {
        let catalog = Catalog::load().unwrap();
        for w in catalog.subject_weights() {
            assert!(
                w.prelims_weight.is_some() || w.mains_paper.is_some(),
                "{} carries neither a prelims weight nor a mains paper",
                w.subject
            );
            if let Some(weight) = w.prelims_weight {
                assert!(weight > 0.0 && weight <= 1.0);
            }
        }
    }

    #[test]
    fn confidence_tables_are_populated() {
        let catalog = Catalog::load().unwrap();
        let cfg = catalog.confidence();
        assert!(!cfg.streak_milestones.is_empty());
        assert!(!cfg.session_milestones.is_empty());
        assert!(!cfg.skip_penalties.is_empty());
        assert!(cfg.min_confidence < cfg.max_confidence);
        assert!(
            cfg.session_milestones.iter().any(|m| !m.one_shot),
            "expected a recurring session milestone"
        );
    }

    #[test]
    fn clamp_respects_bounds() {
        let catalog = Catalog::load().unwrap();
        let cfg = catalog.confidence();
        assert_eq!(cfg.clamp(0.2), 1.0);
        assert_eq!(cfg.clamp(5.4), 5.0);
        assert_eq!(cfg.clamp(3.3), 3.3);
    }
}
