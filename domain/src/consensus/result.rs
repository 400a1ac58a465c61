//! Consensus result value objects
//!
//! - [`CompromiseSuggestion`] - structured remediation for one conflict
//! - [`ConsensusResult`] - outcome of one consensus run
//! - [`ConsensusDashboard`] - presentation-ready summary built from a result

use super::conflict::PreferenceConflict;
use super::score::ConsensusLevel;
use super::settings::ConsensusSettings;
use super::severity::ConflictSeverity;
use crate::family::{FamilyWeight, PreferenceValue};
use crate::voting::VotingItem;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Score below which a face-to-face planning meeting is recommended
const MEETING_SCORE: f64 = 0.5;

/// Suggested resolution for one conflicting category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompromiseSuggestion {
    pub category: String,
    pub suggestion: String,
    pub conflicting_values: Vec<String>,
    pub families_involved: Vec<String>,
    pub severity: ConflictSeverity,
}

impl CompromiseSuggestion {
    /// Build from a conflict; `None` when the conflict carries no suggestion
    pub fn from_conflict(conflict: &PreferenceConflict) -> Option<Self> {
        conflict.suggested_compromise.as_ref().map(|suggestion| Self {
            category: conflict.category.clone(),
            suggestion: suggestion.clone(),
            conflicting_values: conflict.conflicting_values.clone(),
            families_involved: conflict.families_involved.clone(),
            severity: conflict.severity,
        })
    }
}

/// Outcome of a consensus run over a set of families
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusResult {
    /// 0.0 (total disagreement) to 1.0 (full agreement)
    pub consensus_score: f64,
    pub agreed_preferences: IndexMap<String, PreferenceValue>,
    pub conflicts: Vec<PreferenceConflict>,
    pub voting_items: Vec<VotingItem>,
    pub compromise_suggestions: IndexMap<String, CompromiseSuggestion>,
    pub next_steps: Vec<String>,
}

impl ConsensusResult {
    pub fn level(&self) -> ConsensusLevel {
        ConsensusLevel::from_score(self.consensus_score)
    }

    pub fn is_consensus_reached(&self, settings: &ConsensusSettings) -> bool {
        self.consensus_score >= settings.consensus_reached_score
    }

    pub fn critical_conflicts(&self) -> impl Iterator<Item = &PreferenceConflict> {
        self.conflicts.iter().filter(|c| c.is_critical())
    }
}

/// Collect structured compromise suggestions keyed by category
pub fn collect_compromise_suggestions(
    conflicts: &[PreferenceConflict],
) -> IndexMap<String, CompromiseSuggestion> {
    conflicts
        .iter()
        .filter_map(CompromiseSuggestion::from_conflict)
        .map(|suggestion| (suggestion.category.clone(), suggestion))
        .collect()
}

/// Recommend what the group should do next
pub fn plan_next_steps(
    score: f64,
    conflicts: &[PreferenceConflict],
    voting_items: &[VotingItem],
    settings: &ConsensusSettings,
) -> Vec<String> {
    let mut steps = Vec::new();

    if score >= settings.consensus_reached_score {
        steps.push("Consensus reached: ready to generate the itinerary".to_string());
    }

    let critical: Vec<&str> = conflicts
        .iter()
        .filter(|c| c.is_critical())
        .map(|c| c.category.as_str())
        .collect();
    if !critical.is_empty() {
        steps.push(format!(
            "Resolve {} critical conflict(s) first: {}",
            critical.len(),
            critical.join(", ")
        ));
    }

    if !voting_items.is_empty() {
        steps.push(format!(
            "Families need to vote on {} item(s)",
            voting_items.len()
        ));
    }

    if score < MEETING_SCORE {
        steps.push("Schedule a family planning meeting to discuss major differences".to_string());
    }

    if steps.is_empty() && !conflicts.is_empty() {
        steps.push("Review the suggested compromises for minor differences".to_string());
    }

    steps
}

/// Conflicts bucketed by severity for summary views
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConflictsBySeverity {
    pub critical: Vec<PreferenceConflict>,
    pub high: Vec<PreferenceConflict>,
    pub medium: Vec<PreferenceConflict>,
    pub low: Vec<PreferenceConflict>,
}

impl ConflictsBySeverity {
    pub fn from_conflicts(conflicts: &[PreferenceConflict]) -> Self {
        let mut buckets = Self::default();
        for conflict in conflicts {
            let bucket = match conflict.severity {
                ConflictSeverity::Critical => &mut buckets.critical,
                ConflictSeverity::High => &mut buckets.high,
                ConflictSeverity::Medium => &mut buckets.medium,
                ConflictSeverity::Low => &mut buckets.low,
            };
            bucket.push(conflict.clone());
        }
        buckets
    }

    pub fn total(&self) -> usize {
        self.critical.len() + self.high.len() + self.medium.len() + self.low.len()
    }
}

/// Everything a planning dashboard needs in one serialisable object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusDashboard {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trip_id: Option<String>,
    pub family_count: usize,
    pub consensus_score: f64,
    pub consensus_level: ConsensusLevel,
    pub family_weights: Vec<FamilyWeight>,
    pub agreed_preferences: IndexMap<String, PreferenceValue>,
    /// Categories where every contributing family already agrees
    pub agreement_areas: Vec<String>,
    pub conflicts_by_severity: ConflictsBySeverity,
    pub conflicts: Vec<PreferenceConflict>,
    pub voting_items: Vec<VotingItem>,
    pub compromise_suggestions: IndexMap<String, CompromiseSuggestion>,
    pub next_steps: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl ConsensusDashboard {
    pub fn assemble(
        result: ConsensusResult,
        family_weights: Vec<FamilyWeight>,
        agreement_areas: Vec<String>,
    ) -> Self {
        Self {
            trip_id: None,
            family_count: family_weights.len(),
            consensus_score: result.consensus_score,
            consensus_level: result.level(),
            conflicts_by_severity: ConflictsBySeverity::from_conflicts(&result.conflicts),
            family_weights,
            agreed_preferences: result.agreed_preferences,
            agreement_areas,
            conflicts: result.conflicts,
            voting_items: result.voting_items,
            compromise_suggestions: result.compromise_suggestions,
            next_steps: result.next_steps,
            generated_at: Utc::now(),
        }
    }

    pub fn with_trip_id(mut self, trip_id: impl Into<String>) -> Self {
        self.trip_id = Some(trip_id.into());
        self
    }
}
