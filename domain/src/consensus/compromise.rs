//! Compromise suggestions for conflicting categories

use crate::family::PreferenceValue;
use indexmap::IndexMap;

/// Budget levels from most to least conservative
const BUDGET_PRIORITY: [&str; 3] = ["low", "medium", "high"];
/// Activity levels from most to least relaxed
const ACTIVITY_PRIORITY: [&str; 3] = ["relaxed", "moderate", "active"];

/// Suggest a human-readable resolution for a conflicting category.
///
/// - `budget_level`: the most conservative level wins
/// - `activity_level`: the most relaxed level wins
/// - `activities`: activities shared by more than one family
/// - anything else: the most frequent value, first seen on ties
pub fn suggest_compromise(category: &str, values: &[&PreferenceValue]) -> String {
    if values.is_empty() {
        return "No compromise needed".to_string();
    }

    match category {
        "budget_level" => format!(
            "Use conservative budget: {}",
            lowest_ranked(values, &BUDGET_PRIORITY)
        ),
        "activity_level" => format!(
            "Use relaxed pace: {}",
            lowest_ranked(values, &ACTIVITY_PRIORITY)
        ),
        "activities" => suggest_shared_activities(values),
        _ => {
            let counts = count_canonical(values.iter().map(|v| v.canonical()));
            let (winner, _) = most_common(&counts).unwrap_or_default();
            format!("Go with majority preference: {}", winner)
        }
    }
}

/// Pick the value with the lowest rank in `priority`.
///
/// Unknown values rank in the middle of the scale.
fn lowest_ranked(values: &[&PreferenceValue], priority: &[&str]) -> String {
    let middle = priority.len() / 2;
    values
        .iter()
        .map(|v| v.canonical())
        .min_by_key(|v| {
            priority
                .iter()
                .position(|p| *p == v.as_str())
                .unwrap_or(middle)
        })
        .unwrap_or_default()
}

fn suggest_shared_activities(values: &[&PreferenceValue]) -> String {
    let items = values.iter().flat_map(|value| match value.as_list() {
        Some(list) => list.iter().map(|item| item.canonical()).collect::<Vec<_>>(),
        None => vec![value.canonical()],
    });
    let counts = count_canonical(items);

    let shared: Vec<&str> = counts
        .iter()
        .filter(|(_, count)| **count > 1)
        .map(|(item, _)| item.as_str())
        .collect();

    if shared.is_empty() {
        let all: Vec<&str> = counts.keys().map(String::as_str).collect();
        format!("Include one favorite from each family: {}", all.join(", "))
    } else {
        format!("Focus on shared activities: {}", shared.join(", "))
    }
}

/// Count occurrences, keeping first-seen order
pub(crate) fn count_canonical(items: impl IntoIterator<Item = String>) -> IndexMap<String, usize> {
    let mut counts = IndexMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Highest count, earliest entry on ties
pub(crate) fn most_common(counts: &IndexMap<String, usize>) -> Option<(String, usize)> {
    let mut best: Option<(&String, usize)> = None;
    for (item, &count) in counts {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((item, count));
        }
    }
    best.map(|(item, count)| (item.clone(), count))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suggest(category: &str, values: &[PreferenceValue]) -> String {
        let refs: Vec<&PreferenceValue> = values.iter().collect();
        suggest_compromise(category, &refs)
    }

    #[test]
    fn test_budget_level_picks_conservative() {
        let values = vec!["high".into(), "low".into(), "medium".into()];
        assert_eq!(suggest("budget_level", &values), "Use conservative budget: low");

        let values = vec!["high".into(), "medium".into()];
        assert_eq!(suggest("budget_level", &values), "Use conservative budget: medium");
    }

    #[test]
    fn test_activity_level_picks_relaxed() {
        let values = vec!["active".into(), "moderate".into()];
        assert_eq!(suggest("activity_level", &values), "Use relaxed pace: moderate");
    }

    #[test]
    fn test_activities_reports_shared_items() {
        let values = vec![
            PreferenceValue::list(["hiking", "museum"]),
            PreferenceValue::list(["hiking", "beach"]),
            PreferenceValue::list(["zoo"]),
        ];
        assert_eq!(suggest("activities", &values), "Focus on shared activities: hiking");
    }

    #[test]
    fn test_activities_without_overlap() {
        let values = vec![PreferenceValue::list(["zoo"]), "beach".into()];
        assert_eq!(
            suggest("activities", &values),
            "Include one favorite from each family: zoo, beach"
        );
    }

    #[test]
    fn test_default_majority_first_seen_on_ties() {
        let values = vec!["thai".into(), "pizza".into(), "pizza".into()];
        assert_eq!(suggest("cuisine", &values), "Go with majority preference: pizza");

        let values = vec!["thai".into(), "pizza".into()];
        assert_eq!(suggest("cuisine", &values), "Go with majority preference: thai");
    }

    #[test]
    fn test_empty_values() {
        assert_eq!(suggest("cuisine", &[]), "No compromise needed");
    }
}
