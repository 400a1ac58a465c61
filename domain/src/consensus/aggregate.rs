//! Weighted preference aggregation
//!
//! Collapses each category's per-family values into one representative
//! value. The shape of the values picks the strategy:
//!
//! | Values       | Strategy                                              |
//! |--------------|-------------------------------------------------------|
//! | all numeric  | weighted average (plain mean if weights sum to zero)  |
//! | all lists    | weighted frequency vote, top five items               |
//! | anything else| value with the highest accumulated weight             |

use super::conflict::group_by_category;
use crate::family::{FamilyInput, FamilyWeight, PreferenceValue};
use indexmap::IndexMap;
use std::collections::HashMap;

/// Weight used for a family that has no computed weight
pub const DEFAULT_FAMILY_WEIGHT: f64 = 1.0;
/// Maximum number of items kept for a list-valued category
pub const MAX_LIST_ITEMS: usize = 5;
/// A family's list is repeated `round(weight * LIST_REPLICATION)` times
const LIST_REPLICATION: f64 = 10.0;

/// Aggregate every category across all families
pub fn calculate_weighted_preferences(
    families: &[FamilyInput],
    weights: &[FamilyWeight],
) -> IndexMap<String, PreferenceValue> {
    let weight_by_family: HashMap<&str, f64> = weights
        .iter()
        .map(|w| (w.family_id.as_str(), w.total_weight()))
        .collect();

    group_by_category(families)
        .into_iter()
        .filter_map(|(category, contributions)| {
            let pairs: Vec<(&PreferenceValue, f64)> = contributions
                .into_iter()
                .map(|(family_id, value)| {
                    let weight = weight_by_family
                        .get(family_id)
                        .copied()
                        .unwrap_or(DEFAULT_FAMILY_WEIGHT);
                    (value, weight)
                })
                .collect();
            aggregate_values(&pairs).map(|value| (category.to_string(), value))
        })
        .collect()
}

/// Aggregate `(value, weight)` pairs for a single category
pub fn aggregate_values(pairs: &[(&PreferenceValue, f64)]) -> Option<PreferenceValue> {
    if pairs.is_empty() {
        return None;
    }

    if pairs.iter().all(|(value, _)| value.is_numeric()) {
        aggregate_numeric(pairs)
    } else if pairs.iter().all(|(value, _)| value.is_list()) {
        Some(aggregate_lists(pairs))
    } else {
        aggregate_categorical(pairs)
    }
}

fn aggregate_numeric(pairs: &[(&PreferenceValue, f64)]) -> Option<PreferenceValue> {
    let numbers: Vec<(f64, f64)> = pairs
        .iter()
        .filter_map(|(value, weight)| value.as_f64().map(|n| (n, *weight)))
        .collect();

    let total_weight: f64 = numbers.iter().map(|(_, w)| w).sum();
    let average = if total_weight > 0.0 {
        numbers.iter().map(|(n, w)| n * w).sum::<f64>() / total_weight
    } else {
        numbers.iter().map(|(n, _)| n).sum::<f64>() / numbers.len() as f64
    };

    PreferenceValue::number(average).or_else(|| pairs.first().map(|(v, _)| (*v).clone()))
}

fn aggregate_lists(pairs: &[(&PreferenceValue, f64)]) -> PreferenceValue {
    // canonical form -> (first item seen, weighted count)
    let mut pool: IndexMap<String, (&PreferenceValue, usize)> = IndexMap::new();

    for &(value, weight) in pairs {
        let repetitions = ((weight * LIST_REPLICATION).round_ties_even() as usize).max(1);
        for item in value.as_list().unwrap_or_default() {
            // weights are unbounded; the float cast saturates, so the sum must too
            let count = &mut pool.entry(item.canonical()).or_insert((item, 0)).1;
            *count = count.saturating_add(repetitions);
        }
    }

    let mut ranked: Vec<(&PreferenceValue, usize)> = pool.into_values().collect();
    // stable: equal counts keep first-seen order
    ranked.sort_by(|a, b| b.1.cmp(&a.1));

    PreferenceValue::List(
        ranked
            .into_iter()
            .take(MAX_LIST_ITEMS)
            .map(|(item, _)| item.clone())
            .collect(),
    )
}

fn aggregate_categorical(pairs: &[(&PreferenceValue, f64)]) -> Option<PreferenceValue> {
    let mut accumulated: IndexMap<String, (&PreferenceValue, f64)> = IndexMap::new();
    for &(value, weight) in pairs {
        accumulated.entry(value.canonical()).or_insert((value, 0.0)).1 += weight;
    }

    let mut best: Option<(&PreferenceValue, f64)> = None;
    for (value, weight) in accumulated.into_values() {
        if best.is_none_or(|(_, best_weight)| weight > best_weight) {
            best = Some((value, weight));
        }
    }
    best.map(|(value, _)| value.clone())
}
