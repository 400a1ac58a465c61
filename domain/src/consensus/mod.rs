//! Family preference consensus
//!
//! The pieces of a consensus run, leaf first:
//!
//! ```text
//! families ──► weights ──► conflicts + severity ──► weighted aggregation
//!                               │                         │
//!                               ▼                         ▼
//!                       compromise / votes ──► score ──► dashboard
//! ```
//!
//! Every function here is pure; the orchestration (logging, notifications)
//! lives in the application layer.

pub mod aggregate;
pub mod compromise;
pub mod conflict;
pub mod result;
pub mod score;
pub mod settings;
pub mod severity;

pub use aggregate::calculate_weighted_preferences;
pub use compromise::suggest_compromise;
pub use conflict::{PreferenceConflict, detect_preference_conflicts, find_agreement_areas};
pub use result::{
    CompromiseSuggestion, ConflictsBySeverity, ConsensusDashboard, ConsensusResult,
    collect_compromise_suggestions, plan_next_steps,
};
pub use score::{ConsensusLevel, calculate_consensus_score};
pub use settings::ConsensusSettings;
pub use severity::{ConflictSeverity, calculate_conflict_severity};
