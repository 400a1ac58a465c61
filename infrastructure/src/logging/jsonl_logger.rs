//! JSONL file writer for trip events.
//!
//! Each [`TripEvent`] is serialized as a single JSON line with `type`,
//! `trip_id` (when known) and `timestamp` fields next to the event details,
//! appended to the file via a buffered writer.
//! Runs append to the same transcript instead of truncating it.

use pathfinder_application::ports::event_logger::{TripEvent, TripEventLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// JSONL event logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlEventLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlEventLogger {
    /// Open (or create) the log at the given path.
    ///
    /// Creates parent directories if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create event log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!("Could not open event log file {}: {}", path.display(), e);
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn record(event: TripEvent) -> Value {
    let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

    let mut map = match event.details {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    map.insert("type".to_string(), Value::from(event.kind.as_str()));
    if let Some(trip_id) = event.trip_id {
        map.insert("trip_id".to_string(), Value::String(trip_id));
    }
    map.insert("timestamp".to_string(), Value::String(timestamp));
    Value::Object(map)
}

impl TripEventLogger for JsonlEventLogger {
    fn log(&self, event: TripEvent) {
        let Ok(line) = serde_json::to_string(&record(event)) else {
            return;
        };

        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
                warn!("Failed to write event log {}: {}", self.path.display(), e);
            }
        }
    }
}

impl Drop for JsonlEventLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_application::ports::event_logger::TripEventKind;

    fn read_lines(path: &Path) -> Vec<Value> {
        std::fs::read_to_string(path)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_writes_one_object_per_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let logger = JsonlEventLogger::new(&path).unwrap();

        logger.log(TripEvent::for_trip(
            TripEventKind::ConsensusCalculated,
            "trip-1",
            serde_json::json!({"consensus_score": 0.75}),
        ));
        logger.log(TripEvent::new(
            TripEventKind::VoteRecorded,
            None,
            serde_json::json!({"voting_item_id": "vote_0_budget_level", "choice": "low"}),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines.len(), 2);
        for line in &lines {
            assert!(line.get("type").is_some());
            assert!(line["timestamp"].as_str().unwrap().ends_with('Z'));
        }
        assert_eq!(lines[0]["type"], "consensus_calculated");
        assert_eq!(lines[0]["trip_id"], "trip-1");
        assert_eq!(lines[0]["consensus_score"], 0.75);
        assert_eq!(lines[1]["type"], "vote_recorded");
        assert!(lines[1].get("trip_id").is_none());
        assert_eq!(lines[1]["choice"], "low");
    }

    #[test]
    fn test_non_object_payload_is_wrapped() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let logger = JsonlEventLogger::new(&path).unwrap();

        logger.log(TripEvent::for_trip(
            TripEventKind::FeedbackSubmitted,
            "trip-2",
            serde_json::json!("just a string"),
        ));
        drop(logger);

        let lines = read_lines(&path);
        assert_eq!(lines[0]["type"], "feedback_submitted");
        assert_eq!(lines[0]["trip_id"], "trip-2");
        assert_eq!(lines[0]["data"], "just a string");
    }

    #[test]
    fn test_reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("events.jsonl");

        for _ in 0..2 {
            let logger = JsonlEventLogger::new(&path).unwrap();
            assert_eq!(logger.path(), path.as_path());
            logger.log(TripEvent::for_trip(
                TripEventKind::FeedbackSubmitted,
                "trip-1",
                serde_json::json!({}),
            ));
        }

        assert_eq!(read_lines(&path).len(), 2);
    }
}
