//! Collect feedback use case

use crate::ports::event_logger::{NoEventLogger, TripEvent, TripEventKind, TripEventLogger};
use pathfinder_domain::{DomainError, FeedbackItem, FeedbackStatus, FeedbackType};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::info;

/// In-memory feedback inbox for all trips
pub struct FeedbackService {
    items: Mutex<Vec<FeedbackItem>>,
    next_id: AtomicU64,
    event_logger: Arc<dyn TripEventLogger>,
}

impl Default for FeedbackService {
    fn default() -> Self {
        Self::new()
    }
}

impl FeedbackService {
    pub fn new() -> Self {
        Self {
            items: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(1),
            event_logger: Arc::new(NoEventLogger),
        }
    }

    pub fn with_event_logger(mut self, event_logger: Arc<dyn TripEventLogger>) -> Self {
        self.event_logger = event_logger;
        self
    }

    /// Record feedback and estimate its impact
    pub fn submit_feedback(
        &self,
        trip_id: &str,
        user_id: &str,
        feedback_type: FeedbackType,
        content: &str,
        target_element: Option<&str>,
    ) -> FeedbackItem {
        let id = format!("feedback_{}", self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut item = FeedbackItem::new(id, trip_id, user_id, feedback_type, content);
        if let Some(target) = target_element {
            item = item.with_target(target);
        }

        info!(
            "Feedback {} on trip {}: {} impact",
            item.id, trip_id, item.impact.level
        );
        self.event_logger.log(TripEvent::for_trip(
            TripEventKind::FeedbackSubmitted,
            trip_id,
            serde_json::json!({
                "feedback_id": item.id,
                "user_id": user_id,
                "feedback_type": feedback_type,
                "impact": item.impact,
            }),
        ));

        lock(&self.items).push(item.clone());
        item
    }

    /// All feedback left on a trip, oldest first
    pub fn feedback_for_trip(&self, trip_id: &str) -> Vec<FeedbackItem> {
        lock(&self.items)
            .iter()
            .filter(|item| item.trip_id == trip_id)
            .cloned()
            .collect()
    }

    pub fn acknowledge_feedback(&self, feedback_id: &str) -> Result<FeedbackItem, DomainError> {
        self.set_status(feedback_id, FeedbackStatus::Acknowledged)
    }

    pub fn resolve_feedback(&self, feedback_id: &str) -> Result<FeedbackItem, DomainError> {
        self.set_status(feedback_id, FeedbackStatus::Resolved)
    }

    fn set_status(
        &self,
        feedback_id: &str,
        status: FeedbackStatus,
    ) -> Result<FeedbackItem, DomainError> {
        let mut items = lock(&self.items);
        let item = items
            .iter_mut()
            .find(|item| item.id == feedback_id)
            .ok_or_else(|| DomainError::FeedbackNotFound(feedback_id.to_string()))?;
        item.status = status;
        Ok(item.clone())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
