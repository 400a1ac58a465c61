//! Family influence weights
//!
//! Each family's voice in aggregation is scaled by a weight derived from
//! its size, its share of the budget and whether it administers the trip:
//!
//! ```text
//! total_weight = 0.4 + 0.3 * (participants / 10) + 0.3 * budget_share + admin_bonus
//! ```
//!
//! The participant term is not clamped, so families larger than ten people
//! can exceed the nominal weight range.

use super::entities::FamilyInput;
use crate::consensus::settings::DEFAULT_ADMIN_BONUS;
use serde::{Deserialize, Serialize};

const BASE_WEIGHT: f64 = 0.4;
const PARTICIPANT_FACTOR: f64 = 0.3;
const BUDGET_FACTOR: f64 = 0.3;
const PARTICIPANT_SCALE: f64 = 10.0;

/// Influence weight of a single family
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FamilyWeight {
    pub family_id: String,
    pub family_name: String,
    pub participant_count: usize,
    /// Share of the total trip budget (0.0 to 1.0)
    pub budget_contribution: f64,
    pub admin_bonus: f64,
}

impl FamilyWeight {
    /// Combined weight used during aggregation
    pub fn total_weight(&self) -> f64 {
        BASE_WEIGHT
            + PARTICIPANT_FACTOR * (self.participant_count as f64 / PARTICIPANT_SCALE)
            + BUDGET_FACTOR * self.budget_contribution
            + self.admin_bonus
    }
}

/// Calculate weights using the default admin bonus
pub fn calculate_family_weights(families: &[FamilyInput], total_budget: f64) -> Vec<FamilyWeight> {
    calculate_family_weights_with_bonus(families, total_budget, DEFAULT_ADMIN_BONUS)
}

/// Calculate weights for every family.
///
/// When `total_budget` is not positive each family gets an equal budget
/// share of `1 / families.len()`.
pub fn calculate_family_weights_with_bonus(
    families: &[FamilyInput],
    total_budget: f64,
    admin_bonus: f64,
) -> Vec<FamilyWeight> {
    let equal_share = if families.is_empty() {
        0.0
    } else {
        1.0 / families.len() as f64
    };

    families
        .iter()
        .map(|family| FamilyWeight {
            family_id: family.id.clone(),
            family_name: family.name.clone(),
            participant_count: family.participant_count(),
            budget_contribution: if total_budget > 0.0 {
                family.budget_allocation / total_budget
            } else {
                equal_share
            },
            admin_bonus: if family.is_trip_admin { admin_bonus } else { 0.0 },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_weight_formula() {
        let families = vec![
            FamilyInput::new("a", "A").with_members(4).with_budget(3000.0).as_trip_admin(),
            FamilyInput::new("b", "B").with_members(2).with_budget(1000.0),
        ];
        let weights = calculate_family_weights(&families, 4000.0);

        assert_eq!(weights.len(), 2);
        assert_eq!(weights[0].participant_count, 4);
        assert!(approx(weights[0].budget_contribution, 0.75));
        assert!(approx(weights[0].admin_bonus, 0.1));
        // 0.4 + 0.3*0.4 + 0.3*0.75 + 0.1
        assert!(approx(weights[0].total_weight(), 0.845));

        assert!(approx(weights[1].budget_contribution, 0.25));
        assert_eq!(weights[1].admin_bonus, 0.0);
        // 0.4 + 0.3*0.2 + 0.3*0.25
        assert!(approx(weights[1].total_weight(), 0.535));
    }

    #[test]
    fn test_zero_budget_splits_equally() {
        let families = vec![
            FamilyInput::new("a", "A").with_budget(500.0),
            FamilyInput::new("b", "B"),
            FamilyInput::new("c", "C").with_budget(10.0),
        ];
        let weights = calculate_family_weights(&families, 0.0);
        for weight in &weights {
            assert!(approx(weight.budget_contribution, 1.0 / 3.0));
        }
    }

    #[test]
    fn test_large_family_is_not_clamped() {
        let families = vec![FamilyInput::new("big", "Big").with_members(20)];
        let weights = calculate_family_weights(&families, 0.0);
        // 0.4 + 0.3*2.0 + 0.3*1.0
        assert!(approx(weights[0].total_weight(), 1.3));
    }

    #[test]
    fn test_weights_are_deterministic() {
        let families = vec![
            FamilyInput::new("a", "A").with_members(3).with_budget(1200.0),
            FamilyInput::new("b", "B").with_members(5).with_budget(800.0).as_trip_admin(),
        ];
        assert_eq!(
            calculate_family_weights(&families, 2000.0),
            calculate_family_weights(&families, 2000.0)
        );
    }

    #[test]
    fn test_custom_admin_bonus() {
        let families = vec![FamilyInput::new("a", "A").as_trip_admin()];
        let weights = calculate_family_weights_with_bonus(&families, 0.0, 0.25);
        assert!(approx(weights[0].admin_bonus, 0.25));
    }
}
