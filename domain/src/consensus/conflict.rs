//! Preference conflict detection

use super::compromise::suggest_compromise;
use super::severity::{ConflictSeverity, calculate_conflict_severity};
use crate::family::{FamilyInput, PreferenceValue};
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

/// Preferences regrouped by category: `category -> (family_id -> value)`,
/// both levels in first-seen order.
pub type CategoryContributions<'a> = IndexMap<&'a str, IndexMap<&'a str, &'a PreferenceValue>>;

/// A category on which families disagree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceConflict {
    pub category: String,
    /// Distinct canonical values in first-seen order
    pub conflicting_values: Vec<String>,
    /// Every family that supplied this category
    pub families_involved: Vec<String>,
    pub severity: ConflictSeverity,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggested_compromise: Option<String>,
    /// Reserved for a generated explanation; never filled by the engine
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_explanation: Option<String>,
}

impl PreferenceConflict {
    pub fn is_critical(&self) -> bool {
        self.severity == ConflictSeverity::Critical
    }
}

/// Group every family's preferences by category.
///
/// A repeated family id overwrites its earlier contribution in place.
pub fn group_by_category(families: &[FamilyInput]) -> CategoryContributions<'_> {
    let mut grouped: CategoryContributions<'_> = IndexMap::new();
    for family in families {
        for (category, value) in &family.preferences {
            grouped
                .entry(category.as_str())
                .or_default()
                .insert(family.id.as_str(), value);
        }
    }
    grouped
}

/// Detect categories where the supplied values disagree.
///
/// Values are compared by canonical text form, so two lists with the same
/// items in a different order count as a conflict. Categories supplied by
/// fewer than two families are skipped.
pub fn detect_preference_conflicts(families: &[FamilyInput]) -> Vec<PreferenceConflict> {
    let mut conflicts = Vec::new();

    for (category, contributions) in group_by_category(families) {
        if contributions.len() < 2 {
            continue;
        }

        let rendered: Vec<String> = contributions.values().map(|v| v.canonical()).collect();
        let distinct: IndexSet<&String> = rendered.iter().collect();
        if distinct.len() <= 1 {
            continue;
        }

        let raw_values: Vec<&PreferenceValue> = contributions.values().copied().collect();

        conflicts.push(PreferenceConflict {
            category: category.to_string(),
            conflicting_values: distinct.into_iter().cloned().collect(),
            families_involved: contributions.keys().map(|id| id.to_string()).collect(),
            severity: calculate_conflict_severity(category, &rendered),
            suggested_compromise: Some(suggest_compromise(category, &raw_values)),
            ai_explanation: None,
        });
    }

    conflicts
}

/// Categories on which every contributing family gives the same value
pub fn find_agreement_areas(families: &[FamilyInput]) -> Vec<String> {
    group_by_category(families)
        .into_iter()
        .filter(|(_, contributions)| {
            let mut rendered = contributions.values().map(|v| v.canonical());
            match rendered.next() {
                Some(first) => rendered.all(|other| other == first),
                None => false,
            }
        })
        .map(|(category, _)| category.to_string())
        .collect()
}
