//! Logging configuration from TOML (`[logging]` section)
//!
//! ```toml
//! [logging]
//! event_log = "~/.local/share/pathfinder/events.jsonl"   # JSONL trip events
//! log_dir = "~/.local/share/pathfinder/logs"             # daily rolling tracing log
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Where to append the machine-readable event transcript
    pub event_log: Option<String>,
    /// Directory for rolling diagnostic log files
    pub log_dir: Option<String>,
}

impl FileLoggingConfig {
    pub fn event_log_path(&self) -> Option<PathBuf> {
        self.event_log.as_deref().map(expand_home)
    }

    pub fn log_dir_path(&self) -> Option<PathBuf> {
        self.log_dir.as_deref().map(expand_home)
    }
}

/// Expand a leading `~/` to the user's home directory
fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix("~/") {
        Some(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| PathBuf::from(path)),
        None => PathBuf::from(path),
    }
}
