//! Logging infrastructure: structured trip event logging.
//!
//! Provides [`JsonlEventLogger`], a JSONL file writer that implements
//! the [`TripEventLogger`](pathfinder_application::TripEventLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlEventLogger;
