//! Port for the trip event transcript.
//!
//! Consensus runs, votes, live edits and feedback each leave one
//! [`TripEvent`] behind, tagged with the trip it belongs to. Adapters write
//! the transcript somewhere durable (see the JSONL logger in
//! infrastructure); `tracing` stays the channel for diagnostics.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// What happened on a trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripEventKind {
    ConsensusCalculated,
    VoteRecorded,
    LiveChangeSubmitted,
    LiveChangeReviewed,
    FeedbackSubmitted,
}

impl TripEventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripEventKind::ConsensusCalculated => "consensus_calculated",
            TripEventKind::VoteRecorded => "vote_recorded",
            TripEventKind::LiveChangeSubmitted => "live_change_submitted",
            TripEventKind::LiveChangeReviewed => "live_change_reviewed",
            TripEventKind::FeedbackSubmitted => "feedback_submitted",
        }
    }
}

impl fmt::Display for TripEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One entry of a trip's event transcript.
///
/// `trip_id` is `None` only for consensus runs over ad-hoc family lists
/// that were never saved as a trip. The timestamp is added by the logger.
#[derive(Debug, Clone, PartialEq)]
pub struct TripEvent {
    pub kind: TripEventKind,
    pub trip_id: Option<String>,
    /// Event-specific fields
    pub details: Value,
}

impl TripEvent {
    pub fn new(kind: TripEventKind, trip_id: Option<&str>, details: Value) -> Self {
        Self {
            kind,
            trip_id: trip_id.map(str::to_string),
            details,
        }
    }

    pub fn for_trip(kind: TripEventKind, trip_id: &str, details: Value) -> Self {
        Self::new(kind, Some(trip_id), details)
    }
}

/// Sink for trip events.
///
/// `log` is synchronous and infallible: a broken transcript must never
/// interrupt planning.
pub trait TripEventLogger: Send + Sync {
    fn log(&self, event: TripEvent);
}

/// Discards every event
pub struct NoEventLogger;

impl TripEventLogger for NoEventLogger {
    fn log(&self, _event: TripEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_names_match_serialization() {
        for kind in [
            TripEventKind::ConsensusCalculated,
            TripEventKind::VoteRecorded,
            TripEventKind::LiveChangeSubmitted,
            TripEventKind::LiveChangeReviewed,
            TripEventKind::FeedbackSubmitted,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind));
        }
    }

    #[test]
    fn test_for_trip_sets_trip_id() {
        let event = TripEvent::for_trip(
            TripEventKind::VoteRecorded,
            "trip-1",
            serde_json::json!({"choice": "low"}),
        );
        assert_eq!(event.trip_id.as_deref(), Some("trip-1"));
        assert_eq!(event.kind.as_str(), "vote_recorded");
    }
}
