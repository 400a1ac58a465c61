//! Tunable knobs of the consensus engine.
//!
//! Configuration files may override the defaults per deployment.

use crate::config::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Bonus added to the weight of the family that administers the trip
pub const DEFAULT_ADMIN_BONUS: f64 = 0.1;
/// Approval threshold for ordinary voting items
pub const DEFAULT_STANDARD_THRESHOLD: f64 = 0.6;
/// Approval threshold for items derived from critical conflicts
pub const DEFAULT_CRITICAL_THRESHOLD: f64 = 0.8;
/// Families expected to vote when the caller does not say otherwise
pub const DEFAULT_EXPECTED_FAMILIES: usize = 3;
/// Score at which the group is considered to have reached consensus
pub const DEFAULT_CONSENSUS_REACHED_SCORE: f64 = 0.8;

/// Consensus engine settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsensusSettings {
    pub admin_bonus: f64,
    pub standard_threshold: f64,
    pub critical_threshold: f64,
    pub expected_families: usize,
    pub consensus_reached_score: f64,
}

impl Default for ConsensusSettings {
    fn default() -> Self {
        Self {
            admin_bonus: DEFAULT_ADMIN_BONUS,
            standard_threshold: DEFAULT_STANDARD_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
            expected_families: DEFAULT_EXPECTED_FAMILIES,
            consensus_reached_score: DEFAULT_CONSENSUS_REACHED_SCORE,
        }
    }
}

impl ConsensusSettings {
    pub fn with_admin_bonus(mut self, bonus: f64) -> Self {
        self.admin_bonus = bonus;
        self
    }

    pub fn with_thresholds(mut self, standard: f64, critical: f64) -> Self {
        self.standard_threshold = standard;
        self.critical_threshold = critical;
        self
    }

    pub fn with_expected_families(mut self, expected: usize) -> Self {
        self.expected_families = expected;
        self
    }

    pub fn with_consensus_reached_score(mut self, score: f64) -> Self {
        self.consensus_reached_score = score;
        self
    }

    /// Check the settings for values the engine cannot work with
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        for (field, value) in [
            ("voting.standard_threshold", self.standard_threshold),
            ("voting.critical_threshold", self.critical_threshold),
            ("consensus.consensus_reached_score", self.consensus_reached_score),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                issues.push(ConfigIssue::error(
                    ConfigIssueCode::OutOfRange {
                        field: field.to_string(),
                    },
                    format!("{}: {} is outside (0, 1]", field, value),
                ));
            }
        }

        if self.admin_bonus < 0.0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NegativeBonus,
                format!("consensus.admin_bonus: {} must not be negative", self.admin_bonus),
            ));
        }

        if self.expected_families == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::NoExpectedFamilies,
                "voting.expected_families must be at least 1",
            ));
        }

        if self.critical_threshold < self.standard_threshold {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::CriticalBelowStandard,
                format!(
                    "voting.critical_threshold ({}) is below voting.standard_threshold ({})",
                    self.critical_threshold, self.standard_threshold
                ),
            ));
        }

        issues
    }
}
