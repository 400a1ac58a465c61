//! JSON file trip repository
//!
//! A trip file holds one [`TripPlan`]:
//!
//! ```json
//! {
//!   "trip_id": "lake-2025",
//!   "name": "Lake weekend",
//!   "total_budget": 6000,
//!   "families": [
//!     {"id": "fam-a", "name": "Andersons", "members": [{"age": 41}],
//!      "preferences": {"budget_level": "low"}, "budget_allocation": 2500}
//!   ]
//! }
//! ```

use async_trait::async_trait;
use pathfinder_application::ports::trip_repository::{TripRepository, TripRepositoryError};
use pathfinder_application::BallotRecord;
use pathfinder_domain::TripPlan;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Reads and writes trips as pretty-printed JSON files.
///
/// Without a root directory, a trip reference is a file path. With one,
/// it is a trip id stored as `<root>/<id>.json`.
#[derive(Debug, Clone, Default)]
pub struct JsonTripRepository {
    root: Option<PathBuf>,
}

impl JsonTripRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    /// File backing a trip reference
    pub fn path_for(&self, trip_ref: &str) -> PathBuf {
        match &self.root {
            Some(root) => root.join(format!("{}.json", trip_ref)),
            None => PathBuf::from(trip_ref),
        }
    }
}

#[async_trait]
impl TripRepository for JsonTripRepository {
    async fn load_trip(&self, trip_ref: &str) -> Result<TripPlan, TripRepositoryError> {
        let path = self.path_for(trip_ref);
        debug!("Loading trip from {}", path.display());

        let content = read(&path, trip_ref).await?;
        let mut trip: TripPlan = serde_json::from_str(&content).map_err(|e| malformed(&path, e))?;

        if trip.trip_id.is_empty() {
            trip.trip_id = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| trip_ref.to_string());
        }

        info!(
            "Loaded trip {} with {} families",
            trip.trip_id,
            trip.families.len()
        );
        Ok(trip)
    }

    async fn save_trip(&self, trip_ref: &str, trip: &TripPlan) -> Result<(), TripRepositoryError> {
        let path = self.path_for(trip_ref);

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| TripRepositoryError::Storage(format!("{}: {}", parent.display(), e)))?;
        }

        let json = serde_json::to_string_pretty(trip)
            .map_err(|e| TripRepositoryError::Storage(e.to_string()))?;
        tokio::fs::write(&path, json)
            .await
            .map_err(|e| TripRepositoryError::Storage(format!("{}: {}", path.display(), e)))?;

        debug!("Saved trip {} to {}", trip.trip_id, path.display());
        Ok(())
    }
}

/// Read a ballots file: a JSON array of `{item, family, choice}` objects
pub async fn load_ballots(path: &Path) -> Result<Vec<BallotRecord>, TripRepositoryError> {
    let content = read(path, &path.display().to_string()).await?;
    let ballots: Vec<BallotRecord> =
        serde_json::from_str(&content).map_err(|e| malformed(path, e))?;
    debug!("Read {} ballots from {}", ballots.len(), path.display());
    Ok(ballots)
}

async fn read(path: &Path, trip_ref: &str) -> Result<String, TripRepositoryError> {
    tokio::fs::read_to_string(path).await.map_err(|e| match e.kind() {
        ErrorKind::NotFound => TripRepositoryError::NotFound(trip_ref.to_string()),
        _ => TripRepositoryError::Storage(format!("{}: {}", path.display(), e)),
    })
}

fn malformed(path: &Path, error: serde_json::Error) -> TripRepositoryError {
    TripRepositoryError::Malformed {
        location: path.display().to_string(),
        message: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathfinder_domain::{FamilyInput, PreferenceValue};

    const TRIP_JSON: &str = r#"{
        "trip_id": "lake-2025",
        "name": "Lake weekend",
        "total_budget": 6000,
        "families": [
            {"id": "fam-a", "name": "Andersons", "members": [{"age": 41}, {"age": 9}],
             "preferences": {"budget_level": "low", "activities": ["hiking", "museum"]},
             "budget_allocation": 2500, "is_trip_admin": true},
            {"id": "fam-b", "name": "Brooks",
             "preferences": {"budget_level": "high"}}
        ]
    }"#;

    #[tokio::test]
    async fn test_load_trip_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lake.json");
        std::fs::write(&path, TRIP_JSON).unwrap();

        let repo = JsonTripRepository::new();
        let trip = repo.load_trip(path.to_str().unwrap()).await.unwrap();

        assert_eq!(trip.trip_id, "lake-2025");
        assert_eq!(trip.total_budget, 6000.0);
        assert_eq!(trip.families.len(), 2);
        let first = &trip.families[0];
        assert!(first.is_trip_admin);
        assert_eq!(first.participant_count(), 2);
        assert_eq!(
            first.preference("activities"),
            Some(&PreferenceValue::list(["hiking", "museum"]))
        );
        // missing fields default
        assert!(trip.families[1].members.is_empty());
        assert_eq!(trip.families[1].budget_allocation, 0.0);
    }

    #[tokio::test]
    async fn test_missing_trip_id_uses_file_stem() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("beach-week.json");
        std::fs::write(&path, r#"{"families": []}"#).unwrap();

        let trip = JsonTripRepository::new()
            .load_trip(path.to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(trip.trip_id, "beach-week");
    }

    #[tokio::test]
    async fn test_missing_and_malformed_files() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonTripRepository::with_root(dir.path());

        let missing = repo.load_trip("nowhere").await;
        assert!(matches!(missing, Err(TripRepositoryError::NotFound(id)) if id == "nowhere"));

        std::fs::write(dir.path().join("broken.json"), "{ not json").unwrap();
        let broken = repo.load_trip("broken").await;
        assert!(matches!(broken, Err(TripRepositoryError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_save_then_load_by_id() {
        let dir = tempfile::tempdir().unwrap();
        let repo = JsonTripRepository::with_root(dir.path().join("trips"));
        let trip = TripPlan::new("ski-2026", 9000.0).with_family(
            FamilyInput::new("fam-a", "Andersons")
                .with_members(4)
                .with_preference("pace", "relaxed"),
        );

        repo.save_trip("ski-2026", &trip).await.unwrap();
        assert!(repo.path_for("ski-2026").exists());

        let loaded = repo.load_trip("ski-2026").await.unwrap();
        assert_eq!(loaded, trip);
    }

    #[tokio::test]
    async fn test_load_ballots() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ballots.json");
        std::fs::write(
            &path,
            r#"[
                {"item": "vote_0_budget_level", "family": "fam-a", "choice": "low"},
                {"item": "vote_0_budget_level", "family": "fam-b", "choice": "Use conservative budget: low"}
            ]"#,
        )
        .unwrap();

        let ballots = load_ballots(&path).await.unwrap();
        assert_eq!(ballots.len(), 2);
        assert_eq!(ballots[1], BallotRecord::new("vote_0_budget_level", "fam-b", "Use conservative budget: low"));
    }
}
