//! Consensus notification port
//!
//! Automation hooks for consensus milestones: a notification layer can
//! schedule meetings or kick off itinerary generation when they fire.

use pathfinder_domain::{LiveChange, VotingItem};

/// Callback for consensus milestones
///
/// Implementations live in the presentation or infrastructure layer.
pub trait ConsensusNotifier: Send + Sync {
    /// Called after every consensus calculation
    fn on_consensus_calculated(&self, _trip_id: Option<&str>, _score: f64) {}

    /// Called when the score reaches the configured consensus threshold
    fn on_consensus_reached(&self, trip_id: Option<&str>, score: f64);

    /// Called after a vote is recorded
    fn on_vote_recorded(&self, _trip_id: &str, _item: &VotingItem) {}

    /// Called when a voting item moves into a decided state
    fn on_vote_decided(&self, trip_id: &str, item: &VotingItem);

    /// Called when a live change is queued for approval
    fn on_change_pending(&self, _session_id: &str, _change: &LiveChange) {}
}

/// No-op notifier for when nobody is listening
pub struct NoNotifier;

impl ConsensusNotifier for NoNotifier {
    fn on_consensus_reached(&self, _trip_id: Option<&str>, _score: f64) {}
    fn on_vote_decided(&self, _trip_id: &str, _item: &VotingItem) {}
}
