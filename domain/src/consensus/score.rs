//! Consensus scoring

use super::conflict::PreferenceConflict;
use serde::{Deserialize, Serialize};

/// Combine conflicts into a single 0.0–1.0 agreement score.
///
/// Each conflict subtracts its severity impact scaled by the share of
/// families involved. A single family always agrees with itself.
pub fn calculate_consensus_score(conflicts: &[PreferenceConflict], family_count: usize) -> f64 {
    if family_count <= 1 {
        return 1.0;
    }

    let penalty: f64 = conflicts
        .iter()
        .map(|conflict| {
            let involved_share = conflict.families_involved.len() as f64 / family_count as f64;
            conflict.severity.score_impact() * involved_share
        })
        .sum();

    (1.0 - penalty).max(0.0)
}

/// Coarse label for a consensus score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsensusLevel {
    High,
    Moderate,
    Low,
}

impl ConsensusLevel {
    pub fn from_score(score: f64) -> Self {
        if score >= 0.8 {
            ConsensusLevel::High
        } else if score >= 0.5 {
            ConsensusLevel::Moderate
        } else {
            ConsensusLevel::Low
        }
    }
}

impl std::fmt::Display for ConsensusLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConsensusLevel::High => write!(f, "high"),
            ConsensusLevel::Moderate => write!(f, "moderate"),
            ConsensusLevel::Low => write!(f, "low"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consensus::severity::ConflictSeverity;

    fn conflict(severity: ConflictSeverity, families: &[&str]) -> PreferenceConflict {
        PreferenceConflict {
            category: "cuisine".to_string(),
            conflicting_values: vec!["a".to_string(), "b".to_string()],
            families_involved: families.iter().map(|f| f.to_string()).collect(),
            severity,
            suggested_compromise: None,
            ai_explanation: None,
        }
    }

    #[test]
    fn test_single_family_is_full_consensus() {
        let conflicts = vec![conflict(ConflictSeverity::Critical, &["a", "b"])];
        assert_eq!(calculate_consensus_score(&conflicts, 1), 1.0);
        assert_eq!(calculate_consensus_score(&conflicts, 0), 1.0);
    }

    #[test]
    fn test_no_conflicts_is_full_consensus() {
        for count in [2, 3, 10] {
            assert_eq!(calculate_consensus_score(&[], count), 1.0);
        }
    }

    #[test]
    fn test_penalty_scales_with_involvement() {
        let conflicts = vec![conflict(ConflictSeverity::High, &["a", "b"])];
        let score = calculate_consensus_score(&conflicts, 4);
        // 1.0 - 0.25 * (2/4)
        assert!((score - 0.875).abs() < 1e-9);
    }

    #[test]
    fn test_score_clamps_at_zero() {
        let conflicts: Vec<_> = (0..5)
            .map(|_| conflict(ConflictSeverity::Critical, &["a", "b"]))
            .collect();
        assert_eq!(calculate_consensus_score(&conflicts, 2), 0.0);
    }

    #[test]
    fn test_critical_conflicts_never_raise_score() {
        let mut conflicts = Vec::new();
        let mut previous = calculate_consensus_score(&conflicts, 3);
        for _ in 0..6 {
            conflicts.push(conflict(ConflictSeverity::Critical, &["a", "c"]));
            let score = calculate_consensus_score(&conflicts, 3);
            assert!(score <= previous);
            previous = score;
        }
    }

    #[test]
    fn test_consensus_level() {
        assert_eq!(ConsensusLevel::from_score(1.0), ConsensusLevel::High);
        assert_eq!(ConsensusLevel::from_score(0.8), ConsensusLevel::High);
        assert_eq!(ConsensusLevel::from_score(0.6), ConsensusLevel::Moderate);
        assert_eq!(ConsensusLevel::from_score(0.2), ConsensusLevel::Low);
    }
}
