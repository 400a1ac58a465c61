//! Console notifications for consensus milestones

use colored::Colorize;
use pathfinder_application::ports::consensus_notifier::ConsensusNotifier;
use pathfinder_domain::{LiveChange, VotingItem};

/// Prints consensus milestones to stderr
///
/// Output goes to stderr so that JSON written to stdout stays parseable.
pub struct ConsoleNotifier {
    quiet: bool,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self { quiet: false }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    fn emit(&self, message: String) {
        if !self.quiet {
            eprintln!("{}", message);
        }
    }
}

impl Default for ConsoleNotifier {
    fn default() -> Self {
        Self::new()
    }
}

impl ConsensusNotifier for ConsoleNotifier {
    fn on_consensus_reached(&self, trip_id: Option<&str>, score: f64) {
        let trip = trip_id.map(|id| format!(" for {}", id)).unwrap_or_default();
        self.emit(format!(
            "{} Consensus reached{} ({:.2})",
            "v".green().bold(),
            trip,
            score
        ));
    }

    fn on_vote_decided(&self, trip_id: &str, item: &VotingItem) {
        let leader = item.tally().leading_option.unwrap_or_default();
        self.emit(format!(
            "{} {} on {}: {} ({})",
            "*".cyan().bold(),
            item.id,
            trip_id,
            item.status,
            leader
        ));
    }

    fn on_change_pending(&self, session_id: &str, change: &LiveChange) {
        self.emit(format!(
            "{} {} to {} awaits approval in {}",
            "!".yellow().bold(),
            change.change_type,
            change.element_id,
            session_id
        ));
    }
}
