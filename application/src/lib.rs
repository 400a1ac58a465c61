//! Application layer for pathfinder
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    consensus_notifier::{ConsensusNotifier, NoNotifier},
    event_logger::{NoEventLogger, TripEvent, TripEventKind, TripEventLogger},
    trip_repository::{TripRepository, TripRepositoryError},
};
pub use use_cases::build_consensus::{BuildConsensusUseCase, ConsensusError, FamilyConsensusEngine};
pub use use_cases::cast_vote::{BallotRecord, VoteError, VotingBoard};
pub use use_cases::collect_feedback::FeedbackService;
pub use use_cases::live_editing::LiveEditingService;
