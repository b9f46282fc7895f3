//! Domain-level command and result types.
//! Services take and return these; the REST layer maps the public DTOs in the
//! `shared` crate to and from them.

pub mod users {
    use crate::domain::models::user::{Mascot, User, UserRole};

    /// Input for registering a child or parent.
    #[derive(Debug, Clone)]
    pub struct RegisterUserCommand {
        pub name: String,
        pub role: UserRole,
        pub mascot: Option<Mascot>,
    }

    #[derive(Debug, Clone)]
    pub struct RegisterUserResult {
        pub user: User,
        pub success_message: String,
    }
}

pub mod activities {
    use chrono::NaiveDate;

    use crate::domain::models::achievement::AchievementId;
    use crate::domain::models::activity::Activity;
    use crate::domain::models::user::User;

    /// Input for assigning a new activity to a child.
    ///
    /// `points` is signed so that out-of-range input reaches validation
    /// instead of failing at deserialization.
    #[derive(Debug, Clone)]
    pub struct CreateActivityCommand {
        pub user_id: String,
        pub name: String,
        pub description: Option<String>,
        pub points: i64,
        /// Defaults to today
        pub date: Option<NaiveDate>,
    }

    #[derive(Debug, Clone)]
    pub struct ApproveActivityCommand {
        pub activity_id: String,
        pub approve: bool,
    }

    /// Query for listing activities.
    #[derive(Debug, Clone, Default)]
    pub struct ActivityListQuery {
        pub user_id: Option<String>,
        /// Only activities dated today; requires `user_id`
        pub today_only: bool,
    }

    /// What a lifecycle mutation did, for logging and the caller.
    #[derive(Debug, Clone, PartialEq)]
    pub enum LifecycleEvent {
        ActivityCreated {
            activity_id: String,
            user_id: String,
        },
        ActivitySubmitted {
            activity_id: String,
            message: String,
        },
        ActivityApproved {
            activity_id: String,
            user_id: String,
            xp_awarded: u32,
            new_xp: u32,
            new_level: u32,
            unlocked: Vec<AchievementId>,
        },
        ActivityRejected {
            activity_id: String,
        },
    }

    #[derive(Debug, Clone)]
    pub struct CreateActivityResult {
        pub activity: Activity,
        pub event: LifecycleEvent,
    }

    #[derive(Debug, Clone)]
    pub struct CompleteActivityResult {
        pub activity: Activity,
        /// Motivational acknowledgment for the child
        pub message: String,
        pub event: LifecycleEvent,
    }

    #[derive(Debug, Clone)]
    pub struct ApproveActivityResult {
        pub activity: Activity,
        /// Owner after the decision; unchanged on rejection
        pub user: User,
        pub xp_awarded: u32,
        pub unlocked: Vec<AchievementId>,
        pub event: LifecycleEvent,
    }
}
