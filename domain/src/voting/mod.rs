//! Family voting on unresolved conflicts.
//!
//! - [`builder`] turns medium-or-worse conflicts into [`VotingItem`]s
//! - [`ballot::process_family_vote`] records votes and re-evaluates status

pub mod ballot;
pub mod builder;
pub mod item;

pub use ballot::process_family_vote;
pub use builder::{generate_voting_items, generate_voting_items_with};
pub use item::{VoteTally, VotingItem, VotingStatus};
