//! Processing family votes

use super::item::VotingItem;
use crate::core::error::DomainError;
use crate::consensus::settings::DEFAULT_EXPECTED_FAMILIES;

/// Record a family's vote on one item and re-evaluate its status.
///
/// Fails with [`DomainError::VoteNotFound`] when no item has
/// `voting_item_id`. A family voting twice replaces its earlier choice.
/// `expected_families` defaults to three when not known.
pub fn process_family_vote(
    voting_item_id: &str,
    family_id: &str,
    vote_choice: &str,
    voting_items: &mut [VotingItem],
    expected_families: Option<usize>,
) -> Result<VotingItem, DomainError> {
    let item = voting_items
        .iter_mut()
        .find(|item| item.id == voting_item_id)
        .ok_or_else(|| DomainError::VoteNotFound(voting_item_id.to_string()))?;

    item.record_vote(family_id, vote_choice);
    item.evaluate(expected_families.unwrap_or(DEFAULT_EXPECTED_FAMILIES));

    Ok(item.clone())
}
