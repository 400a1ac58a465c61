//! Voting item types
//!
//! A voting item asks every family to pick one option for an unresolved
//! conflict. Votes are keyed by family, so re-voting overwrites.

use crate::consensus::compromise::{count_canonical, most_common};
use crate::consensus::severity::ConflictSeverity;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Lifecycle of a voting item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VotingStatus {
    /// Waiting for more votes
    #[default]
    Pending,
    /// An option reached the approval threshold
    Approved,
    /// Explicitly turned down by the organizers
    Rejected,
    /// Everyone voted but no option reached the threshold
    NeedsDiscussion,
}

impl VotingStatus {
    /// Whether the item reached a decision (approved or sent to discussion)
    pub fn is_decided(&self) -> bool {
        matches!(self, VotingStatus::Approved | VotingStatus::NeedsDiscussion)
    }
}

impl std::fmt::Display for VotingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VotingStatus::Pending => write!(f, "Pending"),
            VotingStatus::Approved => write!(f, "Approved"),
            VotingStatus::Rejected => write!(f, "Rejected"),
            VotingStatus::NeedsDiscussion => write!(f, "Needs discussion"),
        }
    }
}

/// A structured vote request for one conflicting category
///
/// # Example
///
/// ```
/// use pathfinder_domain::voting::{VotingItem, VotingStatus};
///
/// let mut item = VotingItem::new("vote_0_cuisine", "cuisine", "Which cuisine?", vec!["thai".into(), "pizza".into()], 0.6);
/// item.record_vote("fam-a", "thai");
/// item.record_vote("fam-a", "pizza");
/// assert_eq!(item.current_votes.len(), 1);
/// assert_eq!(item.status, VotingStatus::Pending);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VotingItem {
    pub id: String,
    pub category: String,
    pub question: String,
    pub options: Vec<String>,
    /// family_id -> chosen option
    pub current_votes: IndexMap<String, String>,
    /// Share of votes the leading option needs for approval
    pub threshold: f64,
    pub status: VotingStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<ConflictSeverity>,
    pub created_at: DateTime<Utc>,
}

impl VotingItem {
    pub fn new(
        id: impl Into<String>,
        category: impl Into<String>,
        question: impl Into<String>,
        options: Vec<String>,
        threshold: f64,
    ) -> Self {
        Self {
            id: id.into(),
            category: category.into(),
            question: question.into(),
            options,
            current_votes: IndexMap::new(),
            threshold,
            status: VotingStatus::Pending,
            severity: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_severity(mut self, severity: ConflictSeverity) -> Self {
        self.severity = Some(severity);
        self
    }

    /// Record (or replace) a family's vote without re-evaluating status
    pub fn record_vote(&mut self, family_id: impl Into<String>, choice: impl Into<String>) {
        self.current_votes.insert(family_id.into(), choice.into());
    }

    /// Whether `choice` is one of the offered options
    pub fn has_option(&self, choice: &str) -> bool {
        self.options.iter().any(|o| o == choice)
    }

    /// Count the current votes
    pub fn tally(&self) -> VoteTally {
        VoteTally::from_votes(self.current_votes.values().cloned())
    }

    /// Re-evaluate the status from the current votes.
    ///
    /// A decided item can fall back to pending or discussion when a later
    /// vote changes the majority.
    pub fn evaluate(&mut self, expected_families: usize) -> VotingStatus {
        let tally = self.tally();
        self.status = if tally.total_votes > 0 && tally.support_ratio() >= self.threshold {
            VotingStatus::Approved
        } else if tally.total_votes >= expected_families {
            VotingStatus::NeedsDiscussion
        } else {
            VotingStatus::Pending
        };
        self.status
    }

    /// Generate a visual vote summary (e.g., "[●●○]" where ● backs the leader)
    pub fn vote_summary(&self) -> String {
        let leader = self.tally().leading_option;
        let mut summary = String::from("[");
        for choice in self.current_votes.values() {
            summary.push(if Some(choice) == leader.as_ref() { '●' } else { '○' });
        }
        summary.push(']');
        summary
    }
}

/// Aggregated vote counts for a voting item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoteTally {
    /// Most chosen option (first cast wins ties)
    pub leading_option: Option<String>,
    pub leading_count: usize,
    pub total_votes: usize,
    /// Every option that received votes, in first-cast order
    pub counts: IndexMap<String, usize>,
}

impl VoteTally {
    pub fn from_votes(votes: impl IntoIterator<Item = String>) -> Self {
        let counts = count_canonical(votes);
        let total_votes = counts.values().sum();
        let (leading_option, leading_count) = match most_common(&counts) {
            Some((option, count)) => (Some(option), count),
            None => (None, 0),
        };
        Self {
            leading_option,
            leading_count,
            total_votes,
            counts,
        }
    }

    /// Share of votes behind the leading option (0.0 to 1.0)
    pub fn support_ratio(&self) -> f64 {
        if self.total_votes == 0 {
            0.0
        } else {
            self.leading_count as f64 / self.total_votes as f64
        }
    }

    pub fn is_unanimous(&self) -> bool {
        self.total_votes > 0 && self.leading_count == self.total_votes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(threshold: f64) -> VotingItem {
        VotingItem::new(
            "vote_0_cuisine",
            "cuisine",
            "Which cuisine?",
            vec!["thai".to_string(), "pizza".to_string()],
            threshold,
        )
    }

    #[test]
    fn test_tally_counts() {
        let tally = VoteTally::from_votes(
            ["thai", "pizza", "thai"].iter().map(|s| s.to_string()),
        );
        assert_eq!(tally.leading_option.as_deref(), Some("thai"));
        assert_eq!(tally.leading_count, 2);
        assert_eq!(tally.total_votes, 3);
        assert!(!tally.is_unanimous());
    }

    #[test]
    fn test_tally_tie_goes_to_first_cast() {
        let tally = VoteTally::from_votes(["pizza", "thai"].iter().map(|s| s.to_string()));
        assert_eq!(tally.leading_option.as_deref(), Some("pizza"));
        assert_eq!(tally.support_ratio(), 0.5);
    }

    #[test]
    fn test_empty_tally() {
        let tally = VoteTally::from_votes(Vec::new());
        assert!(tally.leading_option.is_none());
        assert_eq!(tally.support_ratio(), 0.0);
    }

    #[test]
    fn test_evaluate_approves_at_threshold() {
        let mut item = item(0.6);
        item.record_vote("a", "thai");
        assert_eq!(item.evaluate(3), VotingStatus::Approved);
    }

    #[test]
    fn test_evaluate_needs_discussion_when_everyone_voted() {
        let mut item = item(0.8);
        item.record_vote("a", "thai");
        item.record_vote("b", "pizza");
        item.record_vote("c", "thai");
        assert_eq!(item.evaluate(3), VotingStatus::NeedsDiscussion);
    }

    #[test]
    fn test_evaluate_pending_until_quorum() {
        let mut item = item(0.6);
        item.record_vote("a", "thai");
        item.record_vote("b", "pizza");
        assert_eq!(item.evaluate(3), VotingStatus::Pending);
    }

    #[test]
    fn test_vote_summary() {
        let mut item = item(0.6);
        item.record_vote("a", "thai");
        item.record_vote("b", "thai");
        item.record_vote("c", "pizza");
        assert_eq!(item.vote_summary(), "[●●○]");
    }

    #[test]
    fn test_status_serialization() {
        let json = serde_json::to_string(&VotingStatus::NeedsDiscussion).unwrap();
        assert_eq!(json, "\"needs_discussion\"");
    }
}
