//! Live editing session entity
//!
//! One session per trip. A session tracks who is editing, which elements
//! they hold locks on, and the changes submitted so far. Locks are
//! optimistic: the first editor to ask gets the element until they
//! release it or leave.

use super::change::{ChangeStatus, ChangeType, LiveChange, LiveChangeResult};
use crate::core::error::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

/// Collaborative editing state for one trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditingSession {
    pub session_id: String,
    pub trip_id: String,
    pub active_editors: BTreeSet<String>,
    /// element_id -> owning editor
    pub locked_elements: BTreeMap<String, String>,
    pub pending_changes: Vec<LiveChange>,
    pub applied_changes: Vec<LiveChange>,
    pub rejected_changes: Vec<LiveChange>,
    pub created_at: DateTime<Utc>,
    pub last_activity: DateTime<Utc>,
    next_change: u64,
}

impl EditingSession {
    pub fn new(trip_id: impl Into<String>) -> Self {
        let trip_id = trip_id.into();
        let now = Utc::now();
        Self {
            session_id: Self::session_id_for(&trip_id),
            trip_id,
            active_editors: BTreeSet::new(),
            locked_elements: BTreeMap::new(),
            pending_changes: Vec::new(),
            applied_changes: Vec::new(),
            rejected_changes: Vec::new(),
            created_at: now,
            last_activity: now,
            next_change: 1,
        }
    }

    /// Sessions are keyed by trip, so the id is derived from it
    pub fn session_id_for(trip_id: &str) -> String {
        format!("edit_{}", trip_id)
    }

    pub fn join(&mut self, user_id: impl Into<String>) {
        self.active_editors.insert(user_id.into());
        self.touch();
    }

    /// Remove an editor and release every lock they hold.
    ///
    /// Returns the number of locks released.
    pub fn leave(&mut self, user_id: &str) -> usize {
        self.active_editors.remove(user_id);
        let before = self.locked_elements.len();
        self.locked_elements.retain(|_, owner| owner != user_id);
        self.touch();
        before - self.locked_elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active_editors.is_empty()
    }

    /// Grant the lock if the element is free or already held by `user_id`
    pub fn lock(&mut self, user_id: &str, element_id: &str) -> bool {
        match self.locked_elements.get(element_id) {
            Some(owner) if owner != user_id => false,
            _ => {
                self.locked_elements
                    .insert(element_id.to_string(), user_id.to_string());
                self.touch();
                true
            }
        }
    }

    /// Release a lock; only the owner can do so
    pub fn unlock(&mut self, user_id: &str, element_id: &str) -> bool {
        if self.lock_holder(element_id) == Some(user_id) {
            self.locked_elements.remove(element_id);
            self.touch();
            true
        } else {
            false
        }
    }

    pub fn lock_holder(&self, element_id: &str) -> Option<&str> {
        self.locked_elements.get(element_id).map(String::as_str)
    }

    /// Submit a change to an element.
    ///
    /// Refused when another editor holds the element's lock. Low and medium
    /// impact changes apply immediately; high and critical wait for
    /// [`EditingSession::approve_change`].
    pub fn submit_change(
        &mut self,
        user_id: &str,
        element_id: &str,
        change_type: ChangeType,
        old_value: Option<Value>,
        new_value: Option<Value>,
    ) -> LiveChangeResult {
        if let Some(owner) = self.lock_holder(element_id)
            && owner != user_id
        {
            return LiveChangeResult::refused(format!(
                "Element {} is locked by {}",
                element_id, owner
            ));
        }

        let impact = change_type.impact();
        let status = if impact.requires_approval() {
            ChangeStatus::PendingApproval
        } else {
            ChangeStatus::Applied
        };

        let change = LiveChange {
            id: self.allocate_change_id(),
            user_id: user_id.to_string(),
            element_id: element_id.to_string(),
            change_type,
            old_value,
            new_value,
            impact,
            status,
            reviewed_by: None,
            submitted_at: Utc::now(),
        };

        let result = LiveChangeResult::accepted(&change);
        match status {
            ChangeStatus::PendingApproval => self.pending_changes.push(change),
            _ => self.applied_changes.push(change),
        }
        self.touch();
        result
    }

    /// Apply a queued change
    pub fn approve_change(
        &mut self,
        change_id: &str,
        approver_id: &str,
    ) -> Result<LiveChange, DomainError> {
        let mut change = self.take_pending(change_id)?;
        change.status = ChangeStatus::Applied;
        change.reviewed_by = Some(approver_id.to_string());
        self.applied_changes.push(change.clone());
        self.touch();
        Ok(change)
    }

    /// Discard a queued change
    pub fn reject_change(
        &mut self,
        change_id: &str,
        reviewer_id: &str,
    ) -> Result<LiveChange, DomainError> {
        let mut change = self.take_pending(change_id)?;
        change.status = ChangeStatus::Rejected;
        change.reviewed_by = Some(reviewer_id.to_string());
        self.rejected_changes.push(change.clone());
        self.touch();
        Ok(change)
    }

    fn take_pending(&mut self, change_id: &str) -> Result<LiveChange, DomainError> {
        let index = self
            .pending_changes
            .iter()
            .position(|c| c.id == change_id)
            .ok_or_else(|| DomainError::ChangeNotFound(change_id.to_string()))?;
        Ok(self.pending_changes.remove(index))
    }

    fn allocate_change_id(&mut self) -> String {
        let id = format!("change_{}", self.next_change);
        self.next_change += 1;
        id
    }

    fn touch(&mut self) {
        self.last_activity = Utc::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::change::ImpactLevel;
    use serde_json::json;

    fn session() -> EditingSession {
        let mut session = EditingSession::new("trip-1");
        session.join("alice");
        session.join("bob");
        session
    }

    #[test]
    fn test_session_id_derived_from_trip() {
        assert_eq!(session().session_id, "edit_trip-1");
    }

    #[test]
    fn test_lock_is_exclusive() {
        let mut session = session();
        assert!(session.lock("alice", "day1"));
        assert!(session.lock("alice", "day1"));
        assert!(!session.lock("bob", "day1"));
        assert_eq!(session.lock_holder("day1"), Some("alice"));
    }

    #[test]
    fn test_only_owner_unlocks() {
        let mut session = session();
        session.lock("alice", "day1");
        assert!(!session.unlock("bob", "day1"));
        assert!(session.unlock("alice", "day1"));
        assert!(session.lock("bob", "day1"));
    }

    #[test]
    fn test_leave_releases_locks() {
        let mut session = session();
        session.lock("alice", "day1");
        session.lock("alice", "day2");
        session.lock("bob", "day3");
        assert_eq!(session.leave("alice"), 2);
        assert!(!session.active_editors.contains("alice"));
        assert_eq!(session.locked_elements.len(), 1);
    }

    #[test]
    fn test_change_refused_when_locked_by_other() {
        let mut session = session();
        session.lock("alice", "day1");
        let result = session.submit_change("bob", "day1", ChangeType::Modify, None, None);
        assert!(!result.success);
        assert!(result.message.contains("locked by alice"));
        assert!(session.applied_changes.is_empty());
    }

    #[test]
    fn test_low_and_medium_apply_immediately() {
        let mut session = session();
        let modify = session.submit_change(
            "alice",
            "day1",
            ChangeType::Modify,
            Some(json!("museum")),
            Some(json!("beach")),
        );
        let add = session.submit_change("bob", "day2", ChangeType::Add, None, Some(json!("zoo")));

        assert!(modify.success && add.success);
        assert_eq!(modify.impact, Some(ImpactLevel::Low));
        assert_eq!(add.impact, Some(ImpactLevel::Medium));
        assert_eq!(session.applied_changes.len(), 2);
        assert!(session.pending_changes.is_empty());
    }

    #[test]
    fn test_delete_waits_for_approval() {
        let mut session = session();
        let result = session.submit_change("alice", "day1", ChangeType::Delete, None, None);

        assert!(result.success);
        assert!(result.requires_approval);
        assert_eq!(result.status, Some(ChangeStatus::PendingApproval));

        let change_id = result.change_id.unwrap();
        let approved = session.approve_change(&change_id, "bob").unwrap();
        assert_eq!(approved.status, ChangeStatus::Applied);
        assert_eq!(approved.reviewed_by.as_deref(), Some("bob"));
        assert!(session.pending_changes.is_empty());
        assert_eq!(session.applied_changes.len(), 1);
    }

    #[test]
    fn test_reject_and_unknown_change() {
        let mut session = session();
        let result = session.submit_change("alice", "day1", ChangeType::Delete, None, None);
        let change_id = result.change_id.unwrap();

        session.reject_change(&change_id, "bob").unwrap();
        assert_eq!(session.rejected_changes.len(), 1);
        assert_eq!(
            session.approve_change(&change_id, "bob"),
            Err(DomainError::ChangeNotFound(change_id))
        );
    }

    #[test]
    fn test_change_ids_are_sequential() {
        let mut session = session();
        let first = session.submit_change("alice", "a", ChangeType::Modify, None, None);
        let second = session.submit_change("alice", "b", ChangeType::Modify, None, None);
        assert_eq!(first.change_id.as_deref(), Some("change_1"));
        assert_eq!(second.change_id.as_deref(), Some("change_2"));
    }
}
