//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod build_consensus;
pub mod cast_vote;
pub mod collect_feedback;
pub mod live_editing;
