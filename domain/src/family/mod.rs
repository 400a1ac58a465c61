//! Family subdomain: who is travelling and what they want.
//!
//! - [`entities::FamilyInput`] / [`entities::TripPlan`] - consensus inputs
//! - [`preference::PreferenceValue`] - typed preference values
//! - [`weight::FamilyWeight`] - per-family influence weight

pub mod entities;
pub mod preference;
pub mod weight;

pub use entities::{FamilyInput, FamilyMember, Preferences, TripPlan};
pub use preference::PreferenceValue;
pub use weight::{FamilyWeight, calculate_family_weights, calculate_family_weights_with_bonus};
