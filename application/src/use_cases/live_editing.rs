//! Live editing use case
//!
//! Coordinates collaborative editing sessions (one per trip). Each session
//! sits behind its own mutex. Joining and leaving hold the session map lock
//! while they touch the session, so a join never lands in a session that
//! is being closed. Lock order is always map, then session.

use crate::ports::consensus_notifier::{ConsensusNotifier, NoNotifier};
use crate::ports::event_logger::{NoEventLogger, TripEvent, TripEventKind, TripEventLogger};
use pathfinder_domain::{ChangeType, DomainError, EditingSession, LiveChange, LiveChangeResult};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

type SharedSession = Arc<Mutex<EditingSession>>;

/// Live editing service shared across requests
pub struct LiveEditingService {
    sessions: Mutex<HashMap<String, SharedSession>>,
    notifier: Arc<dyn ConsensusNotifier>,
    event_logger: Arc<dyn TripEventLogger>,
}

impl Default for LiveEditingService {
    fn default() -> Self {
        Self::new()
    }
}

impl LiveEditingService {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            notifier: Arc::new(NoNotifier),
            event_logger: Arc::new(NoEventLogger),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn ConsensusNotifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_event_logger(mut self, event_logger: Arc<dyn TripEventLogger>) -> Self {
        self.event_logger = event_logger;
        self
    }

    /// Create or join the editing session of a trip, returning its id
    pub fn start_editing_session(&self, trip_id: &str, user_id: &str) -> String {
        let session_id = EditingSession::session_id_for(trip_id);
        let mut sessions = lock(&self.sessions);
        let session = sessions.entry(session_id.clone()).or_insert_with(|| {
            info!("Starting editing session {}", session_id);
            Arc::new(Mutex::new(EditingSession::new(trip_id)))
        });

        lock(session).join(user_id);
        drop(sessions);

        debug!("{} joined {}", user_id, session_id);
        session_id
    }

    /// Remove an editor and release their locks.
    ///
    /// The session is dropped once its last editor leaves. Returns `false`
    /// for an unknown session.
    pub fn leave_editing_session(&self, session_id: &str, user_id: &str) -> bool {
        let mut sessions = lock(&self.sessions);
        let Some(session) = sessions.get(session_id).cloned() else {
            return false;
        };

        let mut guard = lock(&session);
        let released = guard.leave(user_id);
        debug!("{} left {} ({} locks released)", user_id, session_id, released);

        if guard.is_empty() {
            drop(guard);
            sessions.remove(session_id);
            info!("Closed editing session {}", session_id);
        }
        true
    }

    /// Lock an element for `user_id`; `false` when another editor holds it
    pub fn lock_element(&self, session_id: &str, user_id: &str, element_id: &str) -> bool {
        self.with_session(session_id, |session| session.lock(user_id, element_id))
            .unwrap_or(false)
    }

    /// Release a lock; only its owner can do so
    pub fn unlock_element(&self, session_id: &str, user_id: &str, element_id: &str) -> bool {
        self.with_session(session_id, |session| session.unlock(user_id, element_id))
            .unwrap_or(false)
    }

    /// Current owner of an element's lock
    pub fn lock_holder(&self, session_id: &str, element_id: &str) -> Option<String> {
        self.with_session(session_id, |session| {
            session.lock_holder(element_id).map(str::to_string)
        })
        .flatten()
    }

    /// Submit a change, applying it at once or queueing it for approval
    pub fn submit_live_change(
        &self,
        session_id: &str,
        user_id: &str,
        element_id: &str,
        change_type: ChangeType,
        old_value: Option<Value>,
        new_value: Option<Value>,
    ) -> LiveChangeResult {
        let Some(session) = self.session(session_id) else {
            return LiveChangeResult::refused(format!("Editing session {} not found", session_id));
        };

        let (result, pending, trip_id) = {
            let mut session = lock(&session);
            let result =
                session.submit_change(user_id, element_id, change_type, old_value, new_value);
            let pending = if result.requires_approval {
                session.pending_changes.last().cloned()
            } else {
                None
            };
            (result, pending, session.trip_id.clone())
        };

        if !result.success {
            debug!("Change to {} refused: {}", element_id, result.message);
            return result;
        }

        self.event_logger.log(TripEvent::for_trip(
            TripEventKind::LiveChangeSubmitted,
            &trip_id,
            serde_json::json!({
                "session_id": session_id,
                "user_id": user_id,
                "element_id": element_id,
                "change_id": result.change_id,
                "change_type": change_type,
                "impact": result.impact,
                "status": result.status,
            }),
        ));

        if let Some(change) = pending {
            info!("{} queued for approval in {}", change.id, session_id);
            self.notifier.on_change_pending(session_id, &change);
        }

        result
    }

    /// Apply a change that was queued for approval
    pub fn approve_change(
        &self,
        session_id: &str,
        change_id: &str,
        approver_id: &str,
    ) -> Result<LiveChange, DomainError> {
        let (trip_id, change) = self
            .with_session(session_id, |session| {
                let change = session.approve_change(change_id, approver_id)?;
                Ok::<_, DomainError>((session.trip_id.clone(), change))
            })
            .ok_or_else(|| DomainError::SessionNotFound(session_id.to_string()))??;

        info!("{} approved by {}", change.id, approver_id);
        self.log_review(&trip_id, session_id, &change);
        Ok(change)
    }

    /// Discard a change that was queued for approval
    pub fn reject_change(
        &self,
        session_id: &str,
        change_id: &str,
        reviewer_id: &str,
    ) -> Result<LiveChange, DomainError> {
        let (trip_id, change) = self
            .with_session(session_id, |session| {
                let change = session.reject_change(change_id, reviewer_id)?;
                Ok::<_, DomainError>((session.trip_id.clone(), change))
            })
            .ok_or_else(|| DomainError::SessionNotFound(session_id.to_string()))??;

        info!("{} rejected by {}", change.id, reviewer_id);
        self.log_review(&trip_id, session_id, &change);
        Ok(change)
    }

    /// Copy of a session's current state
    pub fn session_snapshot(&self, session_id: &str) -> Option<EditingSession> {
        self.with_session(session_id, |session| session.clone())
    }

    fn session(&self, session_id: &str) -> Option<SharedSession> {
        lock(&self.sessions).get(session_id).cloned()
    }

    fn with_session<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut EditingSession) -> T,
    ) -> Option<T> {
        let session = self.session(session_id)?;
        let mut guard = lock(&session);
        Some(f(&mut guard))
    }

    fn log_review(&self, trip_id: &str, session_id: &str, change: &LiveChange) {
        self.event_logger.log(TripEvent::for_trip(
            TripEventKind::LiveChangeReviewed,
            trip_id,
            serde_json::json!({
                "session_id": session_id,
                "change_id": change.id,
                "status": change.status,
                "reviewed_by": change.reviewed_by,
            }),
        ));
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
