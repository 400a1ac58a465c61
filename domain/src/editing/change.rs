//! Live change types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Kind of edit made to an itinerary element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeType {
    Add,
    Modify,
    Delete,
}

impl ChangeType {
    /// Fixed impact table: deletions are high, additions medium, edits low
    pub fn impact(&self) -> ImpactLevel {
        match self {
            ChangeType::Delete => ImpactLevel::High,
            ChangeType::Add => ImpactLevel::Medium,
            ChangeType::Modify => ImpactLevel::Low,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeType::Add => "add",
            ChangeType::Modify => "modify",
            ChangeType::Delete => "delete",
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ChangeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "add" => Ok(ChangeType::Add),
            "modify" | "update" => Ok(ChangeType::Modify),
            "delete" | "remove" => Ok(ChangeType::Delete),
            _ => Err(format!(
                "Unknown change type: {}. Valid: add, modify, delete",
                s
            )),
        }
    }
}

/// How much a change or feedback item affects the trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
}

impl ImpactLevel {
    /// High and critical changes wait for explicit approval
    pub fn requires_approval(&self) -> bool {
        *self >= ImpactLevel::High
    }
}

impl std::fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ImpactLevel::Low => write!(f, "low"),
            ImpactLevel::Medium => write!(f, "medium"),
            ImpactLevel::High => write!(f, "high"),
            ImpactLevel::Critical => write!(f, "critical"),
        }
    }
}

/// Where a submitted change ended up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeStatus {
    Applied,
    PendingApproval,
    Rejected,
}

/// A single edit submitted during a live editing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveChange {
    pub id: String,
    pub user_id: String,
    pub element_id: String,
    pub change_type: ChangeType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
    pub impact: ImpactLevel,
    pub status: ChangeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
    pub submitted_at: DateTime<Utc>,
}

/// Outcome of submitting a live change.
///
/// Lock conflicts are reported here with `success == false` rather than
/// as errors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiveChangeResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub impact: Option<ImpactLevel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ChangeStatus>,
    pub requires_approval: bool,
    pub message: String,
}

impl LiveChangeResult {
    pub fn accepted(change: &LiveChange) -> Self {
        let requires_approval = change.status == ChangeStatus::PendingApproval;
        Self {
            success: true,
            change_id: Some(change.id.clone()),
            impact: Some(change.impact),
            status: Some(change.status),
            requires_approval,
            message: if requires_approval {
                format!("Change {} queued for approval", change.id)
            } else {
                format!("Change {} applied", change.id)
            },
        }
    }

    pub fn refused(message: impl Into<String>) -> Self {
        Self {
            success: false,
            change_id: None,
            impact: None,
            status: None,
            requires_approval: false,
            message: message.into(),
        }
    }
}
