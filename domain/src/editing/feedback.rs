//! Trip feedback items and keyword-based impact estimation
//!
//! The impact estimate is a keyword heuristic, not language understanding.
//! Keyword lists and fixed deltas are part of the observable behavior.

use super::change::ImpactLevel;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const COST_KEYWORDS: [&str; 6] = ["cost", "price", "budget", "expensive", "cheap", "money"];
const SCHEDULE_KEYWORDS: [&str; 6] = ["time", "schedule", "earlier", "later", "delay", "reschedule"];
const MAJOR_KEYWORDS: [&str; 3] = ["cancel", "replace", "major"];
const CRITICAL_KEYWORDS: [&str; 3] = ["safety", "emergency", "critical"];

const COST_DELTA: f64 = 50.0;
const SCHEDULE_DELTA_MINUTES: u32 = 30;
const MAJOR_COST_DELTA: f64 = 200.0;
const MAJOR_DELTA_MINUTES: u32 = 120;
const CRITICAL_COST_DELTA: f64 = 500.0;
const CRITICAL_DELTA_MINUTES: u32 = 240;

/// What kind of feedback a participant left
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackType {
    #[default]
    Suggestion,
    Concern,
    Approval,
    ChangeRequest,
}

impl std::str::FromStr for FeedbackType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "suggestion" => Ok(FeedbackType::Suggestion),
            "concern" => Ok(FeedbackType::Concern),
            "approval" => Ok(FeedbackType::Approval),
            "change_request" => Ok(FeedbackType::ChangeRequest),
            _ => Err(format!(
                "Unknown feedback type: {}. Valid: suggestion, concern, approval, change_request",
                s
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum FeedbackStatus {
    #[default]
    Open,
    Acknowledged,
    Resolved,
}

/// Estimated effect of a requested change on the trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ChangeImpact {
    pub level: ImpactLevel,
    pub estimated_cost_delta: f64,
    pub estimated_time_delta_minutes: u32,
    pub affected_areas: Vec<String>,
}

/// Estimate the impact of a free-text change request.
///
/// Keyword groups are checked in order (cost, schedule, major, critical);
/// a later match overrides the level and deltas set by an earlier one.
///
/// ```
/// use pathfinder_domain::editing::{analyze_change_impact, ImpactLevel};
///
/// let impact = analyze_change_impact("Hotel price is too expensive");
/// assert_eq!(impact.level, ImpactLevel::Medium);
/// assert_eq!(impact.estimated_cost_delta, 50.0);
/// ```
pub fn analyze_change_impact(text: &str) -> ChangeImpact {
    let text = text.to_lowercase();
    let mentions = |keywords: &[&str]| keywords.iter().any(|k| text.contains(k));

    let mut impact = ChangeImpact::default();

    if mentions(&COST_KEYWORDS) {
        impact.level = ImpactLevel::Medium;
        impact.estimated_cost_delta = COST_DELTA;
        impact.affected_areas.push("budget".to_string());
    }

    if mentions(&SCHEDULE_KEYWORDS) {
        impact.level = ImpactLevel::Medium;
        impact.estimated_time_delta_minutes = SCHEDULE_DELTA_MINUTES;
        impact.affected_areas.push("schedule".to_string());
    }

    if mentions(&MAJOR_KEYWORDS) {
        impact.level = ImpactLevel::High;
        impact.estimated_cost_delta = MAJOR_COST_DELTA;
        impact.estimated_time_delta_minutes = MAJOR_DELTA_MINUTES;
        impact.affected_areas.push("itinerary".to_string());
    }

    if mentions(&CRITICAL_KEYWORDS) {
        impact.level = ImpactLevel::Critical;
        impact.estimated_cost_delta = CRITICAL_COST_DELTA;
        impact.estimated_time_delta_minutes = CRITICAL_DELTA_MINUTES;
        impact.affected_areas.push("safety".to_string());
    }

    impact
}

/// Feedback left by a participant on a trip
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedbackItem {
    pub id: String,
    pub trip_id: String,
    pub user_id: String,
    pub feedback_type: FeedbackType,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_element: Option<String>,
    pub impact: ChangeImpact,
    pub status: FeedbackStatus,
    pub created_at: DateTime<Utc>,
}

impl FeedbackItem {
    /// Create a feedback item, estimating its impact from the content
    pub fn new(
        id: impl Into<String>,
        trip_id: impl Into<String>,
        user_id: impl Into<String>,
        feedback_type: FeedbackType,
        content: impl Into<String>,
    ) -> Self {
        let content = content.into();
        Self {
            id: id.into(),
            trip_id: trip_id.into(),
            user_id: user_id.into(),
            feedback_type,
            impact: analyze_change_impact(&content),
            content,
            target_element: None,
            status: FeedbackStatus::Open,
            created_at: Utc::now(),
        }
    }

    pub fn with_target(mut self, element_id: impl Into<String>) -> Self {
        self.target_element = Some(element_id.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_keywords_is_low() {
        let impact = analyze_change_impact("Looks lovely, thanks!");
        assert_eq!(impact, ChangeImpact::default());
        assert_eq!(impact.level, ImpactLevel::Low);
    }

    #[test]
    fn test_schedule_keywords() {
        let impact = analyze_change_impact("Can we start EARLIER on day two?");
        assert_eq!(impact.level, ImpactLevel::Medium);
        assert_eq!(impact.estimated_cost_delta, 0.0);
        assert_eq!(impact.estimated_time_delta_minutes, 30);
        assert_eq!(impact.affected_areas, vec!["schedule"]);
    }

    #[test]
    fn test_cost_and_schedule_combine() {
        let impact = analyze_change_impact("Cheaper tickets at a later time");
        assert_eq!(impact.level, ImpactLevel::Medium);
        assert_eq!(impact.estimated_cost_delta, 50.0);
        assert_eq!(impact.estimated_time_delta_minutes, 30);
    }

    #[test]
    fn test_major_overrides_cost() {
        let impact = analyze_change_impact("Cancel the boat tour, it costs too much");
        assert_eq!(impact.level, ImpactLevel::High);
        assert_eq!(impact.estimated_cost_delta, 200.0);
        assert_eq!(impact.estimated_time_delta_minutes, 120);
    }

    #[test]
    fn test_critical_overrides_everything() {
        let impact = analyze_change_impact("Major safety concern: replace the hike");
        assert_eq!(impact.level, ImpactLevel::Critical);
        assert_eq!(impact.estimated_cost_delta, 500.0);
        assert_eq!(impact.estimated_time_delta_minutes, 240);
    }

    #[test]
    fn test_feedback_item_carries_impact() {
        let item = FeedbackItem::new("fb_1", "trip-1", "alice", FeedbackType::Concern, "Emergency exit access?")
            .with_target("hotel");
        assert_eq!(item.impact.level, ImpactLevel::Critical);
        assert_eq!(item.status, FeedbackStatus::Open);
        assert_eq!(item.target_element.as_deref(), Some("hotel"));
    }

    #[test]
    fn test_parse_feedback_type() {
        assert_eq!(
            "change-request".parse::<FeedbackType>().ok(),
            Some(FeedbackType::ChangeRequest)
        );
        assert!("rant".parse::<FeedbackType>().is_err());
    }
}
