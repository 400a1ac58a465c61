//! Build consensus use case
//!
//! Runs the full family consensus pipeline and assembles the dashboard.

use crate::ports::consensus_notifier::{ConsensusNotifier, NoNotifier};
use crate::ports::event_logger::{NoEventLogger, TripEvent, TripEventKind, TripEventLogger};
use crate::ports::trip_repository::{TripRepository, TripRepositoryError};
use pathfinder_domain::consensus::{collect_compromise_suggestions, plan_next_steps};
use pathfinder_domain::family::calculate_family_weights_with_bonus;
use pathfinder_domain::voting::generate_voting_items_with;
use pathfinder_domain::{
    ConsensusDashboard, ConsensusResult, ConsensusSettings, DomainError, FamilyInput, FamilyWeight,
    TripPlan,
    calculate_consensus_score, calculate_weighted_preferences, detect_preference_conflicts,
    find_agreement_areas,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while building consensus
#[derive(Error, Debug)]
pub enum ConsensusError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Trip repository error: {0}")]
    Repository(#[from] TripRepositoryError),
}

/// Stateless consensus service.
///
/// Every call computes a fresh result from the supplied families; the only
/// side effects are notifications and event log entries.
pub struct FamilyConsensusEngine {
    settings: ConsensusSettings,
    notifier: Arc<dyn ConsensusNotifier>,
    event_logger: Arc<dyn TripEventLogger>,
}

impl Default for FamilyConsensusEngine {
    fn default() -> Self {
        Self::new(ConsensusSettings::default())
    }
}

impl FamilyConsensusEngine {
    pub fn new(settings: ConsensusSettings) -> Self {
        Self {
            settings,
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

    pub fn settings(&self) -> &ConsensusSettings {
        &self.settings
    }

    /// Influence weight of every family
    pub fn calculate_family_weights(
        &self,
        families: &[FamilyInput],
        total_budget: f64,
    ) -> Vec<FamilyWeight> {
        calculate_family_weights_with_bonus(families, total_budget, self.settings.admin_bonus)
    }

    /// Run the consensus pipeline
    pub fn calculate_consensus(
        &self,
        families: &[FamilyInput],
        total_budget: f64,
    ) -> Result<ConsensusResult, ConsensusError> {
        let (_, result) = self.run(families, total_budget)?;
        self.report(None, &result);
        Ok(result)
    }

    /// Run the pipeline and package everything for a dashboard
    pub fn get_consensus_dashboard_data(
        &self,
        families: &[FamilyInput],
        total_budget: f64,
    ) -> Result<ConsensusDashboard, ConsensusError> {
        let (weights, result) = self.run(families, total_budget)?;
        self.report(None, &result);
        Ok(ConsensusDashboard::assemble(
            result,
            weights,
            find_agreement_areas(families),
        ))
    }

    /// Dashboard for a stored trip, tagged with its id
    pub fn dashboard_for_trip(&self, trip: &TripPlan) -> Result<ConsensusDashboard, ConsensusError> {
        let (weights, result) = self.run(&trip.families, trip.total_budget)?;
        self.report(Some(&trip.trip_id), &result);
        Ok(
            ConsensusDashboard::assemble(result, weights, find_agreement_areas(&trip.families))
                .with_trip_id(&trip.trip_id),
        )
    }

    fn run(
        &self,
        families: &[FamilyInput],
        total_budget: f64,
    ) -> Result<(Vec<FamilyWeight>, ConsensusResult), ConsensusError> {
        if families.is_empty() {
            return Err(DomainError::NoFamilies.into());
        }

        info!("Building consensus for {} families", families.len());

        let weights = self.calculate_family_weights(families, total_budget);
        for weight in &weights {
            debug!(
                "Family {} weight {:.3} ({} participants, {:.2} budget share)",
                weight.family_id,
                weight.total_weight(),
                weight.participant_count,
                weight.budget_contribution
            );
        }

        let conflicts = detect_preference_conflicts(families);
        debug!("Detected {} conflicts", conflicts.len());

        let agreed_preferences = calculate_weighted_preferences(families, &weights);
        let consensus_score = calculate_consensus_score(&conflicts, families.len());
        let voting_items = generate_voting_items_with(&conflicts, &self.settings);
        let compromise_suggestions = collect_compromise_suggestions(&conflicts);
        let next_steps = plan_next_steps(consensus_score, &conflicts, &voting_items, &self.settings);

        info!(
            "Consensus score {:.2} with {} conflicts and {} voting items",
            consensus_score,
            conflicts.len(),
            voting_items.len()
        );

        Ok((
            weights,
            ConsensusResult {
                consensus_score,
                agreed_preferences,
                conflicts,
                voting_items,
                compromise_suggestions,
                next_steps,
            },
        ))
    }

    fn report(&self, trip_id: Option<&str>, result: &ConsensusResult) {
        self.event_logger.log(TripEvent::new(
            TripEventKind::ConsensusCalculated,
            trip_id,
            serde_json::json!({
                "consensus_score": result.consensus_score,
                "conflicts": result.conflicts.iter().map(|c| &c.category).collect::<Vec<_>>(),
                "voting_items": result.voting_items.len(),
            }),
        ));

        self.notifier
            .on_consensus_calculated(trip_id, result.consensus_score);
        if result.is_consensus_reached(&self.settings) {
            info!("Consensus reached ({:.2})", result.consensus_score);
            self.notifier
                .on_consensus_reached(trip_id, result.consensus_score);
        }
    }
}

/// Use case: load a trip from storage and build its dashboard
pub struct BuildConsensusUseCase<R: TripRepository + 'static> {
    repository: Arc<R>,
    engine: FamilyConsensusEngine,
}

impl<R: TripRepository + 'static> BuildConsensusUseCase<R> {
    pub fn new(repository: Arc<R>, engine: FamilyConsensusEngine) -> Self {
        Self { repository, engine }
    }

    pub fn engine(&self) -> &FamilyConsensusEngine {
        &self.engine
    }

    /// Load `trip_ref` and compute its dashboard
    pub async fn execute(&self, trip_ref: &str) -> Result<ConsensusDashboard, ConsensusError> {
        let trip = self.repository.load_trip(trip_ref).await?;
        self.engine.dashboard_for_trip(&trip)
    }
}
