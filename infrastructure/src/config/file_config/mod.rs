//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod consensus;
mod logging;
mod output;
mod voting;

pub use consensus::FileConsensusConfig;
pub use logging::FileLoggingConfig;
pub use output::{FileOutputConfig, FileOutputFormat};
pub use voting::FileVotingConfig;

use pathfinder_domain::ConsensusSettings;
use pathfinder_domain::config::validation::ConfigIssue;
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Family weighting and consensus threshold
    pub consensus: FileConsensusConfig,
    /// Voting thresholds
    pub voting: FileVotingConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Log destinations
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Engine settings described by this file
    pub fn to_settings(&self) -> ConsensusSettings {
        ConsensusSettings::default()
            .with_admin_bonus(self.consensus.admin_bonus)
            .with_consensus_reached_score(self.consensus.consensus_reached_score)
            .with_thresholds(
                self.voting.standard_threshold,
                self.voting.critical_threshold,
            )
            .with_expected_families(self.voting.expected_families)
    }

    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        self.to_settings().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_domain::OutputFormat;
    use pathfinder_domain::config::validation::{ConfigIssueCode, Severity};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[consensus]
admin_bonus = 0.2
consensus_reached_score = 0.9

[voting]
standard_threshold = 0.5
critical_threshold = 1.0
expected_families = 4

[output]
format = "full"
color = false

[logging]
event_log = "/tmp/pathfinder/events.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.output.format, Some(OutputFormat::Full));
        assert!(!config.output.color);
        assert_eq!(
            config.logging.event_log.as_deref(),
            Some("/tmp/pathfinder/events.jsonl")
        );

        let settings = config.to_settings();
        assert_eq!(settings.admin_bonus, 0.2);
        assert_eq!(settings.consensus_reached_score, 0.9);
        assert_eq!(settings.standard_threshold, 0.5);
        assert_eq!(settings.critical_threshold, 1.0);
        assert_eq!(settings.expected_families, 4);
    }

    #[test]
    fn test_default_config() {
        let config = FileConfig::default();
        assert_eq!(config.to_settings(), ConsensusSettings::default());
        assert!(config.output.format.is_none());
        assert!(config.output.color);
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let toml_str = r#"
[consensus]
admin_bonus = -0.5

[voting]
standard_threshold = 1.5
expected_families = 0
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        let issues = config.validate();

        assert!(issues.iter().any(|i| matches!(
            &i.code,
            ConfigIssueCode::OutOfRange { field } if field == "voting.standard_threshold"
        )));
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::NegativeBonus));
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::NoExpectedFamilies));
        assert!(issues.iter().any(|i| i.code == ConfigIssueCode::CriticalBelowStandard
            && i.severity == Severity::Warning));
    }
}
