//! backend/src/domain/models/activity.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

pub const MIN_POINTS: u32 = 1;
pub const MAX_POINTS: u32 = 100;
pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_DESCRIPTION_LENGTH: usize = 256;

/// Approval state of an activity.
///
/// ```text
/// Pending --complete--> PendingApproval --approve--> Completed
///                             |
///                             +--------reject-------> Pending
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityStatus {
    Pending,
    PendingApproval,
    Completed,
}

/// Action that moves an activity through its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleAction {
    Complete,
    Approve,
    Reject,
}

impl LifecycleAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            LifecycleAction::Complete => "complete",
            LifecycleAction::Approve => "approve",
            LifecycleAction::Reject => "reject",
        }
    }
}

impl fmt::Display for LifecycleAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ActivityStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityStatus::Pending => "pending",
            ActivityStatus::PendingApproval => "pending_approval",
            ActivityStatus::Completed => "completed",
        }
    }

    pub fn from_string(value: &str) -> Result<Self, String> {
        match value {
            "pending" => Ok(ActivityStatus::Pending),
            "pending_approval" => Ok(ActivityStatus::PendingApproval),
            "completed" => Ok(ActivityStatus::Completed),
            other => Err(format!("Unknown activity status: {}", other)),
        }
    }

    /// Status after `action`, or `None` when the action is not allowed here
    pub fn apply(self, action: LifecycleAction) -> Option<ActivityStatus> {
        match (self, action) {
            (ActivityStatus::Pending, LifecycleAction::Complete) => Some(ActivityStatus::PendingApproval),
            (ActivityStatus::PendingApproval, LifecycleAction::Approve) => Some(ActivityStatus::Completed),
            (ActivityStatus::PendingApproval, LifecycleAction::Reject) => Some(ActivityStatus::Pending),
            _ => None,
        }
    }
}

impl fmt::Display for ActivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Domain model for a household activity assigned to one child.
/// `points` is fixed at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct Activity {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub points: u32,
    pub status: ActivityStatus,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Activity {
    /// Generate a unique ID for an activity
    pub fn generate_id() -> String {
        format!("activity::{}", Uuid::new_v4())
    }

    pub fn is_completed(&self) -> bool {
        self.status == ActivityStatus::Completed
    }

    pub fn belongs_to(&self, user_id: &str) -> bool {
        self.user_id == user_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_transitions() {
        assert_eq!(
            ActivityStatus::Pending.apply(LifecycleAction::Complete),
            Some(ActivityStatus::PendingApproval)
        );
        assert_eq!(
            ActivityStatus::PendingApproval.apply(LifecycleAction::Approve),
            Some(ActivityStatus::Completed)
        );
        assert_eq!(
            ActivityStatus::PendingApproval.apply(LifecycleAction::Reject),
            Some(ActivityStatus::Pending)
        );
    }

    #[test]
    fn test_forbidden_transitions() {
        assert_eq!(ActivityStatus::Pending.apply(LifecycleAction::Approve), None);
        assert_eq!(ActivityStatus::Pending.apply(LifecycleAction::Reject), None);
        assert_eq!(ActivityStatus::PendingApproval.apply(LifecycleAction::Complete), None);
        for action in [LifecycleAction::Complete, LifecycleAction::Approve, LifecycleAction::Reject] {
            assert_eq!(ActivityStatus::Completed.apply(action), None);
        }
    }

    #[test]
    fn test_status_strings() {
        assert_eq!(ActivityStatus::PendingApproval.to_string(), "pending_approval");
        assert_eq!(
            ActivityStatus::from_string("completed"),
            Ok(ActivityStatus::Completed)
        );
        assert!(ActivityStatus::from_string("done").is_err());
    }
}
