//! Turning conflicts into voting items

use super::item::VotingItem;
use crate::consensus::conflict::PreferenceConflict;
use crate::consensus::settings::ConsensusSettings;
use crate::consensus::severity::ConflictSeverity;

/// Build voting items using the default thresholds
pub fn generate_voting_items(conflicts: &[PreferenceConflict]) -> Vec<VotingItem> {
    generate_voting_items_with(conflicts, &ConsensusSettings::default())
}

/// Build one voting item per medium-or-worse conflict.
///
/// Low-severity conflicts resolve silently. Ids are `vote_{index}_{category}`
/// where `index` is the conflict's position in `conflicts`, so they are only
/// unique within one call.
pub fn generate_voting_items_with(
    conflicts: &[PreferenceConflict],
    settings: &ConsensusSettings,
) -> Vec<VotingItem> {
    conflicts
        .iter()
        .enumerate()
        .filter(|(_, conflict)| conflict.severity.requires_vote())
        .map(|(index, conflict)| {
            let mut options = conflict.conflicting_values.clone();
            if let Some(compromise) = &conflict.suggested_compromise {
                options.push(compromise.clone());
            }

            let threshold = if conflict.severity == ConflictSeverity::Critical {
                settings.critical_threshold
            } else {
                settings.standard_threshold
            };

            VotingItem::new(
                format!("vote_{}_{}", index, conflict.category),
                conflict.category.clone(),
                voting_question(&conflict.category),
                options,
                threshold,
            )
            .with_severity(conflict.severity)
        })
        .collect()
}

fn voting_question(category: &str) -> String {
    format!(
        "Which {} should the group go with?",
        category.replace('_', " ")
    )
}
