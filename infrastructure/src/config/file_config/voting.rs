//! Voting configuration from TOML (`[voting]` section)
//!
//! ```toml
//! [voting]
//! standard_threshold = 0.6    # share of votes needed to approve an item
//! critical_threshold = 0.8    # same, for health and safety categories
//! expected_families = 3       # votes after which an undecided item needs discussion
//! ```

use pathfinder_domain::consensus::settings::{
    DEFAULT_CRITICAL_THRESHOLD, DEFAULT_EXPECTED_FAMILIES, DEFAULT_STANDARD_THRESHOLD,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileVotingConfig {
    pub standard_threshold: f64,
    pub critical_threshold: f64,
    pub expected_families: usize,
}

impl Default for FileVotingConfig {
    fn default() -> Self {
        Self {
            standard_threshold: DEFAULT_STANDARD_THRESHOLD,
            critical_threshold: DEFAULT_CRITICAL_THRESHOLD,
            expected_families: DEFAULT_EXPECTED_FAMILIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voting_config_deserialize() {
        let toml_str = r#"
[voting]
standard_threshold = 0.5
expected_families = 4
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.voting.standard_threshold, 0.5);
        assert_eq!(config.voting.critical_threshold, 0.8);
        assert_eq!(config.voting.expected_families, 4);
    }
}
