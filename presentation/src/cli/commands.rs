//! CLI command definitions

use clap::{Parser, Subcommand, ValueEnum};
use pathfinder_domain::FeedbackType;
use std::path::PathBuf;

/// Output format for consensus dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Full dashboard: weights, conflicts, votes and suggestions
    Full,
    /// Score, conflicts and next steps only
    Summary,
    /// JSON output
    Json,
}

impl From<OutputFormat> for pathfinder_domain::OutputFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Full => Self::Full,
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

/// Kind of feedback, as accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FeedbackKind {
    Suggestion,
    Concern,
    Approval,
    ChangeRequest,
}

impl From<FeedbackKind> for FeedbackType {
    fn from(kind: FeedbackKind) -> Self {
        match kind {
            FeedbackKind::Suggestion => Self::Suggestion,
            FeedbackKind::Concern => Self::Concern,
            FeedbackKind::Approval => Self::Approval,
            FeedbackKind::ChangeRequest => Self::ChangeRequest,
        }
    }
}

/// CLI arguments for pathfinder
#[derive(Parser, Debug)]
#[command(name = "pathfinder")]
#[command(author, version, about = "Multi-family trip planning - weighted preference consensus")]
#[command(long_about = r#"
Pathfinder reconciles the preferences of several families planning one trip.

Each family is a weighted voting unit (participants, budget share, organizer
bonus). Pathfinder detects where preferences conflict, rates how serious each
conflict is, suggests compromises and turns serious conflicts into votes.

Configuration files are loaded from (in priority order):
1. --config <path>          Explicit config file
2. ./pathfinder.toml        Project-level config
3. ~/.config/pathfinder/config.toml   Global config

Example:
  pathfinder consensus trip.json
  pathfinder consensus trip.json -o json
  pathfinder vote trip.json --ballots ballots.json
  pathfinder feedback lake-2025 alice "The museum price is too expensive"
"#)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Verbosity level (-v = info, -vv = debug, -vvv = trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress notifications
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Disable loading of configuration files
    #[arg(long, global = true)]
    pub no_config: bool,

    /// Show configuration file locations and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Build the consensus dashboard for a trip file
    Consensus {
        /// Trip JSON file
        trip: PathBuf,

        /// Output format (defaults to the configured one, then summary)
        #[arg(short, long, value_enum)]
        output: Option<OutputFormat>,
    },

    /// Apply family ballots to the voting items of a trip
    Vote {
        /// Trip JSON file
        trip: PathBuf,

        /// JSON array of {"item", "family", "choice"} ballots
        #[arg(long, value_name = "PATH")]
        ballots: PathBuf,
    },

    /// Estimate the impact of a piece of feedback
    Feedback {
        trip_id: String,
        user_id: String,
        /// Feedback text
        text: String,

        #[arg(short = 't', long = "type", value_enum, default_value = "suggestion")]
        kind: FeedbackKind,

        /// Itinerary element the feedback is about
        #[arg(long, value_name = "ELEMENT")]
        target: Option<String>,
    },
}
