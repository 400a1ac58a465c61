//! Configuration file loading for pathfinder
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `PATHFINDER_*` environment variables (`PATHFINDER_VOTING__EXPECTED_FAMILIES=4`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./pathfinder.toml` or `./.pathfinder.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/pathfinder/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    FileConfig, FileConsensusConfig, FileLoggingConfig, FileOutputConfig, FileOutputFormat,
    FileVotingConfig,
};
pub use loader::ConfigLoader;
