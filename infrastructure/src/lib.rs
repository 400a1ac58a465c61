//! Infrastructure layer for pathfinder
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod logging;
pub mod trip;

// Re-export commonly used types
pub use config::{
    ConfigLoader, FileConfig, FileConsensusConfig, FileLoggingConfig, FileOutputConfig,
    FileOutputFormat, FileVotingConfig,
};
pub use logging::JsonlEventLogger;
pub use trip::{JsonTripRepository, load_ballots};
