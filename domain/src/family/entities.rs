//! Family and trip input entities
//!
//! These are the transient inputs of a consensus run. Missing collections
//! and numbers default to empty/zero so partially-filled family records
//! never fail to load.

use super::preference::PreferenceValue;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping of preference category to value.
///
/// Insertion order is significant: it decides category order in results
/// and "first seen" tie-breaks during aggregation.
pub type Preferences = IndexMap<String, PreferenceValue>;

/// A single participant inside a family
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyMember {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    pub dietary_restrictions: Vec<String>,
    pub accessibility_needs: Vec<String>,
}

impl FamilyMember {
    pub fn new(age: u32) -> Self {
        Self {
            age: Some(age),
            ..Self::default()
        }
    }

    pub fn named(name: impl Into<String>, age: u32) -> Self {
        Self {
            name: Some(name.into()),
            age: Some(age),
            ..Self::default()
        }
    }

    pub fn with_dietary_restriction(mut self, restriction: impl Into<String>) -> Self {
        self.dietary_restrictions.push(restriction.into());
        self
    }

    pub fn with_accessibility_need(mut self, need: impl Into<String>) -> Self {
        self.accessibility_needs.push(need.into());
        self
    }
}

/// One family taking part in a group trip
///
/// # Example
///
/// ```
/// use pathfinder_domain::{FamilyInput, FamilyMember};
///
/// let family = FamilyInput::new("fam-a", "The Andersons")
///     .with_member(FamilyMember::new(41))
///     .with_member(FamilyMember::new(9))
///     .with_preference("budget_level", "low")
///     .with_budget(2500.0)
///     .as_trip_admin();
///
/// assert_eq!(family.participant_count(), 2);
/// assert!(family.is_trip_admin);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FamilyInput {
    pub id: String,
    pub name: String,
    pub members: Vec<FamilyMember>,
    pub preferences: Preferences,
    pub budget_allocation: f64,
    pub is_trip_admin: bool,
}

impl FamilyInput {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_member(mut self, member: FamilyMember) -> Self {
        self.members.push(member);
        self
    }

    /// Add `count` anonymous members
    pub fn with_members(mut self, count: usize) -> Self {
        self.members
            .extend(std::iter::repeat_with(FamilyMember::default).take(count));
        self
    }

    pub fn with_preference(
        mut self,
        category: impl Into<String>,
        value: impl Into<PreferenceValue>,
    ) -> Self {
        self.preferences.insert(category.into(), value.into());
        self
    }

    pub fn with_budget(mut self, budget_allocation: f64) -> Self {
        self.budget_allocation = budget_allocation;
        self
    }

    pub fn as_trip_admin(mut self) -> Self {
        self.is_trip_admin = true;
        self
    }

    /// Number of participants this family brings
    pub fn participant_count(&self) -> usize {
        self.members.len()
    }

    /// Look up a single preference
    pub fn preference(&self, category: &str) -> Option<&PreferenceValue> {
        self.preferences.get(category)
    }
}

/// A trip as loaded from storage: the families plus the shared budget
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TripPlan {
    pub trip_id: String,
    pub name: String,
    pub total_budget: f64,
    pub families: Vec<FamilyInput>,
}

impl TripPlan {
    pub fn new(trip_id: impl Into<String>, total_budget: f64) -> Self {
        Self {
            trip_id: trip_id.into(),
            total_budget,
            ..Self::default()
        }
    }

    pub fn with_family(mut self, family: FamilyInput) -> Self {
        self.families.push(family);
        self
    }

    /// Total number of people across all families
    pub fn participant_count(&self) -> usize {
        self.families.iter().map(FamilyInput::participant_count).sum()
    }
}
