//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure adapters must implement.

pub mod consensus_notifier;
pub mod event_logger;
pub mod trip_repository;
