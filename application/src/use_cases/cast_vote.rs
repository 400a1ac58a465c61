//! Cast vote use case
//!
//! Holds the open voting items of every trip and applies family ballots.
//! Each trip has its own lock, so ballots for different trips never wait
//! on each other.

use crate::ports::consensus_notifier::{ConsensusNotifier, NoNotifier};
use crate::ports::event_logger::{NoEventLogger, TripEvent, TripEventKind, TripEventLogger};
use pathfinder_domain::consensus::settings::DEFAULT_EXPECTED_FAMILIES;
use pathfinder_domain::{DomainError, VotingItem, process_family_vote};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while voting
#[derive(Error, Debug, Clone, PartialEq)]
pub enum VoteError {
    #[error("No open voting items for trip: {0}")]
    TripNotFound(String),

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// One family's choice on one voting item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BallotRecord {
    pub item: String,
    pub family: String,
    pub choice: String,
}

impl BallotRecord {
    pub fn new(
        item: impl Into<String>,
        family: impl Into<String>,
        choice: impl Into<String>,
    ) -> Self {
        Self {
            item: item.into(),
            family: family.into(),
            choice: choice.into(),
        }
    }
}

struct TripBallot {
    items: Vec<VotingItem>,
    expected_families: usize,
}

/// Voting state shared across requests
pub struct VotingBoard {
    trips: Mutex<HashMap<String, Arc<Mutex<TripBallot>>>>,
    notifier: Arc<dyn ConsensusNotifier>,
    event_logger: Arc<dyn TripEventLogger>,
}

impl Default for VotingBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl VotingBoard {
    pub fn new() -> Self {
        Self {
            trips: Mutex::new(HashMap::new()),
            notifier: Arc::new(NoNotifier),
            event_logger: Arc::new(NoEventLogger),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn ConsensusNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_event_logger(mut self, event_logger: Arc<dyn TripEventLogger>) -> Self {
        self.event_logger = event_logger;
        self
    }

    /// Open (or replace) the voting items of a trip.
    ///
    /// `expected_families` falls back to three when unknown.
    pub fn open_items(
        &self,
        trip_id: &str,
        items: Vec<VotingItem>,
        expected_families: Option<usize>,
    ) {
        let expected_families = expected_families.unwrap_or(DEFAULT_EXPECTED_FAMILIES);
        info!(
            "Opening {} voting items for trip {} ({} families expected)",
            items.len(),
            trip_id,
            expected_families
        );
        let ballot = TripBallot {
            items,
            expected_families,
        };
        lock(&self.trips).insert(trip_id.to_string(), Arc::new(Mutex::new(ballot)));
    }

    /// Record a family's vote and return the updated item
    pub fn cast_vote(
        &self,
        trip_id: &str,
        voting_item_id: &str,
        family_id: &str,
        choice: &str,
    ) -> Result<VotingItem, VoteError> {
        let trip = lock(&self.trips)
            .get(trip_id)
            .cloned()
            .ok_or_else(|| VoteError::TripNotFound(trip_id.to_string()))?;
        let mut trip = lock(&trip);

        let previous = trip.items.iter().find(|i| i.id == voting_item_id);
        if let Some(item) = previous
            && !item.has_option(choice)
        {
            warn!(
                "Family {} voted '{}' on {}, which is not one of its options",
                family_id, choice, voting_item_id
            );
        }
        let previous = previous.map(|i| i.status);

        let expected = trip.expected_families;
        let item = process_family_vote(
            voting_item_id,
            family_id,
            choice,
            &mut trip.items,
            Some(expected),
        )?;
        drop(trip);

        debug!(
            "Vote on {} by {}: {} ({})",
            item.id,
            family_id,
            item.vote_summary(),
            item.status
        );

        self.event_logger.log(TripEvent::for_trip(
            TripEventKind::VoteRecorded,
            trip_id,
            serde_json::json!({
                "voting_item_id": item.id,
                "family_id": family_id,
                "choice": choice,
                "status": item.status,
            }),
        ));
        self.notifier.on_vote_recorded(trip_id, &item);

        if item.status.is_decided() && previous != Some(item.status) {
            info!("Voting item {} is now {}", item.id, item.status);
            self.notifier.on_vote_decided(trip_id, &item);
        }

        Ok(item)
    }

    /// Apply several ballots in order, stopping at the first failure
    pub fn cast_all(
        &self,
        trip_id: &str,
        ballots: &[BallotRecord],
    ) -> Result<Vec<VotingItem>, VoteError> {
        ballots
            .iter()
            .map(|ballot| self.cast_vote(trip_id, &ballot.item, &ballot.family, &ballot.choice))
            .collect()
    }

    /// Snapshot of a trip's voting items
    pub fn items(&self, trip_id: &str) -> Option<Vec<VotingItem>> {
        let trip = lock(&self.trips).get(trip_id).cloned()?;
        let items = lock(&trip).items.clone();
        Some(items)
    }
}

/// Lock a mutex, recovering the data if another holder panicked
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
