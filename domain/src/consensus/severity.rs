//! Conflict severity classification

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Categories touching health or safety: any disagreement is critical
pub const CRITICAL_CATEGORIES: [&str; 3] = [
    "accessibility_needs",
    "dietary_restrictions",
    "medical_requirements",
];

/// Categories that shape the whole trip: any disagreement is high
pub const HIGH_CATEGORIES: [&str; 3] = ["budget_level", "accommodation_type", "transportation_mode"];

/// How serious a preference disagreement is
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConflictSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl ConflictSeverity {
    /// Amount a conflict of this severity subtracts from the consensus
    /// score when every family is involved
    pub fn score_impact(&self) -> f64 {
        match self {
            ConflictSeverity::Low => 0.05,
            ConflictSeverity::Medium => 0.15,
            ConflictSeverity::High => 0.25,
            ConflictSeverity::Critical => 0.40,
        }
    }

    /// Whether families must vote to settle a conflict of this severity
    pub fn requires_vote(&self) -> bool {
        *self >= ConflictSeverity::Medium
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConflictSeverity::Low => "low",
            ConflictSeverity::Medium => "medium",
            ConflictSeverity::High => "high",
            ConflictSeverity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for ConflictSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a conflict in `category` over the (stringified) `values`
/// supplied by each family.
///
/// The fixed category tables win; otherwise the ratio of distinct values
/// to total values decides (`> 0.8` high, `> 0.5` medium, else low).
pub fn calculate_conflict_severity(category: &str, values: &[String]) -> ConflictSeverity {
    if CRITICAL_CATEGORIES.contains(&category) {
        return ConflictSeverity::Critical;
    }
    if HIGH_CATEGORIES.contains(&category) {
        return ConflictSeverity::High;
    }
    if values.is_empty() {
        return ConflictSeverity::Low;
    }

    let unique = values.iter().collect::<HashSet<_>>().len();
    let disagreement_ratio = unique as f64 / values.len() as f64;

    if disagreement_ratio > 0.8 {
        ConflictSeverity::High
    } else if disagreement_ratio > 0.5 {
        ConflictSeverity::Medium
    } else {
        ConflictSeverity::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn values(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_critical_categories_win() {
        for category in CRITICAL_CATEGORIES {
            assert_eq!(
                calculate_conflict_severity(category, &values(&["a", "a", "a", "b"])),
                ConflictSeverity::Critical
            );
        }
    }

    #[test]
    fn test_high_categories_win() {
        assert_eq!(
            calculate_conflict_severity("budget_level", &values(&["low", "low", "low", "high"])),
            ConflictSeverity::High
        );
        assert_eq!(
            calculate_conflict_severity("transportation_mode", &values(&["car", "train"])),
            ConflictSeverity::High
        );
    }

    #[test]
    fn test_ratio_tiers() {
        // 2/2 = 1.0
        assert_eq!(
            calculate_conflict_severity("cuisine", &values(&["thai", "pizza"])),
            ConflictSeverity::High
        );
        // 2/3 ≈ 0.67
        assert_eq!(
            calculate_conflict_severity("cuisine", &values(&["thai", "pizza", "thai"])),
            ConflictSeverity::Medium
        );
        // 2/4 = 0.5 is not above 0.5
        assert_eq!(
            calculate_conflict_severity("cuisine", &values(&["thai", "pizza", "thai", "thai"])),
            ConflictSeverity::Low
        );
        // 4/5 = 0.8 is not above 0.8
        assert_eq!(
            calculate_conflict_severity("cuisine", &values(&["a", "b", "c", "d", "a"])),
            ConflictSeverity::Medium
        );
    }

    #[test]
    fn test_severity_ordering_and_votes() {
        assert!(ConflictSeverity::Critical > ConflictSeverity::High);
        assert!(ConflictSeverity::Medium > ConflictSeverity::Low);
        assert!(!ConflictSeverity::Low.requires_vote());
        assert!(ConflictSeverity::Medium.requires_vote());
        assert!(ConflictSeverity::Critical.requires_vote());
    }

    #[test]
    fn test_serialize_lowercase() {
        let json = serde_json::to_string(&ConflictSeverity::Critical).unwrap();
        assert_eq!(json, "\"critical\"");
    }
}
