//! Consensus configuration from TOML (`[consensus]` section)
//!
//! ```toml
//! [consensus]
//! admin_bonus = 0.1               # extra weight for the trip organizer
//! consensus_reached_score = 0.8   # score at which the group is "agreed"
//! ```

use pathfinder_domain::consensus::settings::{
    DEFAULT_ADMIN_BONUS, DEFAULT_CONSENSUS_REACHED_SCORE,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConsensusConfig {
    /// Weight bonus for the trip admin family
    pub admin_bonus: f64,
    /// Score at or above which consensus counts as reached
    pub consensus_reached_score: f64,
}

impl Default for FileConsensusConfig {
    fn default() -> Self {
        Self {
            admin_bonus: DEFAULT_ADMIN_BONUS,
            consensus_reached_score: DEFAULT_CONSENSUS_REACHED_SCORE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consensus_config_default() {
        let config = FileConsensusConfig::default();
        assert_eq!(config.admin_bonus, 0.1);
        assert_eq!(config.consensus_reached_score, 0.8);
    }

    #[test]
    fn test_consensus_config_deserialize() {
        let toml_str = r#"
[consensus]
admin_bonus = 0.0
"#;
        let config: super::super::FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.consensus.admin_bonus, 0.0);
        // unset keys keep their defaults
        assert_eq!(config.consensus.consensus_reached_score, 0.8);
    }
}
