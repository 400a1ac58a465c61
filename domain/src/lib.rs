//! Domain layer for pathfinder
//!
//! This crate contains the core business logic, entities, and value objects
//! of multi-family trip planning. It has no dependencies on infrastructure
//! or presentation concerns, and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Family Consensus
//!
//! Several families plan one trip together. Each family is a weighted
//! voting unit:
//!
//! - **Weights**: participant count, budget share and an organizer bonus
//! - **Conflicts**: categories where family preferences disagree, with a
//!   four-tier severity (low / medium / high / critical)
//! - **Aggregation**: one representative value per category
//! - **Voting**: medium-or-worse conflicts become voting items
//!
//! ## Live Editing
//!
//! One editing session per trip, with per-element locks and an approval
//! queue for high-impact changes.

pub mod config;
pub mod consensus;
pub mod core;
pub mod editing;
pub mod family;
pub mod voting;

// Re-export commonly used types
pub use config::OutputFormat;
pub use consensus::{
    CompromiseSuggestion, ConflictSeverity, ConflictsBySeverity, ConsensusDashboard,
    ConsensusLevel, ConsensusResult, ConsensusSettings, PreferenceConflict,
    calculate_conflict_severity, calculate_consensus_score, calculate_weighted_preferences,
    detect_preference_conflicts, find_agreement_areas, suggest_compromise,
};
pub use core::error::DomainError;
pub use editing::{
    ChangeImpact, ChangeStatus, ChangeType, EditingSession, FeedbackItem, FeedbackStatus,
    FeedbackType, ImpactLevel, LiveChange, LiveChangeResult, analyze_change_impact,
};
pub use family::{
    FamilyInput, FamilyMember, FamilyWeight, PreferenceValue, Preferences, TripPlan,
    calculate_family_weights,
};
pub use voting::{
    VoteTally, VotingItem, VotingStatus, generate_voting_items, process_family_vote,
};
