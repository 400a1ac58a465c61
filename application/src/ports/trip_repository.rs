//! Trip repository port
//!
//! The consensus engine itself never touches storage; this port is the
//! boundary where trip data is loaded and saved.

use async_trait::async_trait;
use pathfinder_domain::TripPlan;
use thiserror::Error;

/// Errors from trip storage
#[derive(Error, Debug)]
pub enum TripRepositoryError {
    #[error("Trip not found: {0}")]
    NotFound(String),

    #[error("Malformed trip data in {location}: {message}")]
    Malformed { location: String, message: String },

    #[error("Storage error: {0}")]
    Storage(String),
}

/// Loads and stores trip plans
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Load a trip by reference (id or location, depending on the adapter)
    async fn load_trip(&self, trip_ref: &str) -> Result<TripPlan, TripRepositoryError>;

    /// Persist a trip under the given reference
    async fn save_trip(&self, trip_ref: &str, trip: &TripPlan) -> Result<(), TripRepositoryError>;
}
