//! CLI entrypoint for pathfinder
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Result, anyhow, bail};
use clap::{CommandFactory, Parser};
use pathfinder_application::{
    BuildConsensusUseCase, FamilyConsensusEngine, FeedbackService, NoEventLogger, TripEventLogger,
    TripRepository, VotingBoard,
};
use pathfinder_domain::config::Severity;
use pathfinder_infrastructure::{ConfigLoader, FileConfig, JsonTripRepository, JsonlEventLogger, load_ballots};
use pathfinder_presentation::{Cli, Command, ConsoleFormatter, ConsoleNotifier, OutputFormatter};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_ref());
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };

    // Keep the guard alive so buffered log lines are flushed on exit
    let _log_guard = init_tracing(cli.verbose, config.logging.log_dir_path().as_deref());

    info!("Starting pathfinder");
    check_config(&config)?;

    if !config.output.color {
        colored::control::set_override(false);
    }

    // === Dependency Injection ===
    let settings = config.to_settings();
    let notifier = Arc::new(ConsoleNotifier::new().quiet(cli.quiet));
    let event_logger: Arc<dyn TripEventLogger> = match config.logging.event_log_path() {
        Some(path) => match JsonlEventLogger::new(&path) {
            Some(logger) => {
                info!("Recording trip events to {}", path.display());
                Arc::new(logger)
            }
            None => Arc::new(NoEventLogger),
        },
        None => Arc::new(NoEventLogger),
    };

    let engine = FamilyConsensusEngine::new(settings)
        .with_notifier(notifier.clone())
        .with_event_logger(event_logger.clone());
    let repository = Arc::new(JsonTripRepository::new());

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        bail!("No command given");
    };

    match command {
        Command::Consensus { trip, output } => {
            let use_case = BuildConsensusUseCase::new(repository, engine);
            let dashboard = use_case.execute(&path_ref(&trip)).await?;

            let format = output
                .map(Into::into)
                .or(config.output.format)
                .unwrap_or_default();
            println!("{}", ConsoleFormatter.render(&dashboard, format));
        }

        Command::Vote { trip, ballots } => {
            let trip = repository.load_trip(&path_ref(&trip)).await?;
            let dashboard = engine.dashboard_for_trip(&trip)?;

            let board = VotingBoard::new()
                .with_notifier(notifier)
                .with_event_logger(event_logger);
            // Every family in the trip is expected to vote
            let expected = (!trip.families.is_empty()).then_some(trip.families.len());
            board.open_items(
                &trip.trip_id,
                dashboard.voting_items,
                expected.or(Some(settings.expected_families)),
            );

            let ballots = load_ballots(&ballots).await?;
            board.cast_all(&trip.trip_id, &ballots)?;
            info!("Applied {} ballots", ballots.len());

            let items = board.items(&trip.trip_id).unwrap_or_default();
            if items.is_empty() {
                println!("No voting items: nothing needs a vote for {}", trip.trip_id);
            } else {
                println!("{}", ConsoleFormatter::format_voting_items(&items));
            }
        }

        Command::Feedback {
            trip_id,
            user_id,
            text,
            kind,
            target,
        } => {
            let service = FeedbackService::new().with_event_logger(event_logger);
            let item =
                service.submit_feedback(&trip_id, &user_id, kind.into(), &text, target.as_deref());
            println!("{}", ConsoleFormatter::format_feedback(&item));
        }
    }

    Ok(())
}

/// Initialize logging based on verbosity level, plus an optional daily
/// rolling log file
fn init_tracing(verbose: u8, log_dir: Option<&Path>) -> Option<WorkerGuard> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "pathfinder.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(EnvFilter::new(level));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr)
                .with_filter(EnvFilter::new(level)),
        )
        .with(file_layer)
        .init();

    guard
}

/// Report configuration issues; errors stop the run
fn check_config(config: &FileConfig) -> Result<()> {
    let issues = config.validate();
    for issue in &issues {
        match issue.severity {
            Severity::Warning => warn!("{}", issue.message),
            Severity::Error => eprintln!("config error: {}", issue.message),
        }
    }
    if issues.iter().any(|i| i.severity == Severity::Error) {
        bail!("Invalid configuration");
    }
    Ok(())
}

fn path_ref(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
