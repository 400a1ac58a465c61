//! Live editing and feedback.
//!
//! - [`session::EditingSession`] - per-trip editors, element locks and changes
//! - [`change`] - change types and their fixed impact table
//! - [`feedback`] - feedback items with keyword impact estimation

pub mod change;
pub mod feedback;
pub mod session;

pub use change::{ChangeStatus, ChangeType, ImpactLevel, LiveChange, LiveChangeResult};
pub use feedback::{
    ChangeImpact, FeedbackItem, FeedbackStatus, FeedbackType, analyze_change_impact,
};
pub use session::EditingSession;
