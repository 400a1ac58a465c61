//! Trip storage adapters

mod json_repository;

pub use json_repository::{JsonTripRepository, load_ballots};
