//! Presentation layer for pathfinder
//!
//! This crate contains the CLI definition, output formatters
//! and console notifications.

pub mod cli;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, FeedbackKind, OutputFormat};
pub use output::console::ConsoleFormatter;
pub use output::formatter::OutputFormatter;
pub use progress::notifier::ConsoleNotifier;
