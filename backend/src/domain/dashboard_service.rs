//! Read-only projections for the child dashboard and the parent overview.
//! Derived values are recomputed from the stores on every call.

use std::sync::Arc;
use tracing::debug;

use super::activity_service::ActivityService;
use super::clock::Clock;
use super::errors::{EngineError, EngineResult};
use super::models::achievement::{Achievement, ACHIEVEMENT_CATALOG};
use super::models::activity::{Activity, ActivityStatus};
use super::models::user::User;
use super::progression::{self, LevelProgress};
use crate::storage::Stores;

#[derive(Debug, Clone, PartialEq)]
pub struct ProgressSummary {
    pub xp: u32,
    pub level: LevelProgress,
    pub streak: u32,
    pub completed_count: u32,
    pub achievements_unlocked: usize,
}

#[derive(Debug, Clone, Copy)]
pub struct AchievementProgress {
    pub achievement: &'static Achievement,
    pub unlocked: bool,
}

#[derive(Debug, Clone)]
pub struct ChildDashboard {
    pub user: User,
    pub progress: ProgressSummary,
    pub todays_activities: Vec<Activity>,
    pub completed_today: usize,
    /// Full catalog, in catalog order
    pub achievements: Vec<AchievementProgress>,
}

#[derive(Debug, Clone)]
pub struct ChildSummary {
    pub user: User,
    pub progress: ProgressSummary,
}

#[derive(Debug, Clone)]
pub struct PendingApprovalEntry {
    pub activity: Activity,
    pub child_name: String,
}

#[derive(Debug, Clone)]
pub struct ParentOverview {
    pub children: Vec<ChildSummary>,
    pub pending_approvals: Vec<PendingApprovalEntry>,
}

#[derive(Clone)]
pub struct DashboardService {
    stores: Stores,
    clock: Arc<dyn Clock>,
}

impl DashboardService {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>) -> Self {
        Self { stores, clock }
    }

    pub async fn child_dashboard(&self, user_id: &str) -> EngineResult<ChildDashboard> {
        let users = self.stores.users.load_users().await?;
        let user = users
            .into_iter()
            .find(|user| user.id == user_id)
            .ok_or_else(|| EngineError::user_not_found(user_id))?;
        if !user.is_child() {
            return Err(EngineError::validation("Dashboards are only available for children"));
        }

        let activities = self.stores.activities.load_activities().await?;
        let today = self.clock.today();
        let progress = Self::summarize(&user, &activities, today);

        let todays_activities = ActivityService::dated(activities, &user.id, today);
        let completed_today = todays_activities
            .iter()
            .filter(|activity| activity.status == ActivityStatus::Completed)
            .count();

        let achievements = ACHIEVEMENT_CATALOG
            .iter()
            .map(|achievement| AchievementProgress {
                achievement,
                unlocked: user.achievements.contains(&achievement.id),
            })
            .collect();

        debug!(
            "Dashboard for {}: level {}, streak {}, {}/{} today",
            user.name,
            progress.level.level,
            progress.streak,
            completed_today,
            todays_activities.len()
        );

        Ok(ChildDashboard {
            user,
            progress,
            todays_activities,
            completed_today,
            achievements,
        })
    }

    pub async fn parent_overview(&self) -> EngineResult<ParentOverview> {
        let users = self.stores.users.load_users().await?;
        let activities = self.stores.activities.load_activities().await?;
        let today = self.clock.today();

        let children: Vec<ChildSummary> = users
            .iter()
            .filter(|user| user.is_child())
            .map(|user| ChildSummary {
                user: user.clone(),
                progress: Self::summarize(user, &activities, today),
            })
            .collect();

        let mut pending_approvals: Vec<PendingApprovalEntry> = activities
            .iter()
            .filter(|activity| activity.status == ActivityStatus::PendingApproval)
            .map(|activity| PendingApprovalEntry {
                child_name: users
                    .iter()
                    .find(|user| user.id == activity.user_id)
                    .map(|user| user.name.clone())
                    .unwrap_or_else(|| activity.user_id.clone()),
                activity: activity.clone(),
            })
            .collect();
        pending_approvals.sort_by_key(|entry| entry.activity.date);

        Ok(ParentOverview {
            children,
            pending_approvals,
        })
    }

    fn summarize(user: &User, activities: &[Activity], today: chrono::NaiveDate) -> ProgressSummary {
        let facts = progression::progress_facts(user, activities, today);
        ProgressSummary {
            xp: user.xp,
            level: progression::level_progress(user.xp),
            streak: facts.streak,
            completed_count: facts.completed_count,
            achievements_unlocked: user.achievements.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::commands::activities::{ApproveActivityCommand, CreateActivityCommand};
    use crate::domain::commands::users::RegisterUserCommand;
    use crate::domain::models::achievement::AchievementId;
    use crate::domain::models::user::UserRole;
    use crate::domain::notifier::FixedNotifier;
    use crate::domain::user_service::{register_child, UserService};
    use crate::storage::csv::test_utils::TestEnvironment;
    use chrono::NaiveDate;

    struct Harness {
        _env: TestEnvironment,
        users: UserService,
        activities: ActivityService,
        dashboards: DashboardService,
    }

    fn harness() -> Harness {
        let env = TestEnvironment::new().unwrap();
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()));
        let stores = env.stores();
        Harness {
            users: UserService::new(stores.clone(), clock.clone()),
            activities: ActivityService::new(
                stores.clone(),
                clock.clone(),
                Arc::new(FixedNotifier::new("Yay")),
            ),
            dashboards: DashboardService::new(stores, clock),
            _env: env,
        }
    }

    async fn assign(h: &Harness, user_id: &str, name: &str, points: i64) -> String {
        h.activities
            .create_activity(CreateActivityCommand {
                user_id: user_id.to_string(),
                name: name.to_string(),
                description: None,
                points,
                date: None,
            })
            .await
            .unwrap()
            .activity
            .id
    }

    async fn finish(h: &Harness, activity_id: &str) {
        h.activities.complete_activity(activity_id).await.unwrap();
        h.activities
            .approve_activity(ApproveActivityCommand {
                activity_id: activity_id.to_string(),
                approve: true,
            })
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_child_dashboard_reports_progress_and_board() {
        let h = harness();
        let ana = register_child(&h.users, "Ana", None).await;
        let done = assign(&h, &ana.id, "Clean room", 60).await;
        assign(&h, &ana.id, "Homework", 20).await;
        finish(&h, &done).await;

        let dashboard = h.dashboards.child_dashboard(&ana.id).await.unwrap();

        assert_eq!(dashboard.progress.xp, 60);
        assert_eq!(
            dashboard.progress.level,
            LevelProgress { level: 1, xp_into_level: 60, xp_for_next_level: 40 }
        );
        assert_eq!(dashboard.progress.streak, 1);
        assert_eq!(dashboard.progress.completed_count, 1);
        assert_eq!(dashboard.progress.achievements_unlocked, 1);
        assert_eq!(dashboard.todays_activities.len(), 2);
        assert_eq!(dashboard.completed_today, 1);

        assert_eq!(dashboard.achievements.len(), ACHIEVEMENT_CATALOG.len());
        let unlocked: Vec<AchievementId> = dashboard
            .achievements
            .iter()
            .filter(|entry| entry.unlocked)
            .map(|entry| entry.achievement.id)
            .collect();
        assert_eq!(unlocked, vec![AchievementId::FirstStep]);
    }

    #[tokio::test]
    async fn test_child_dashboard_rejects_parents_and_unknown_ids() {
        let h = harness();
        let mom = h
            .users
            .register_user(RegisterUserCommand {
                name: "Mom".to_string(),
                role: UserRole::Parent,
                mascot: None,
            })
            .await
            .unwrap()
            .user;

        assert!(matches!(
            h.dashboards.child_dashboard(&mom.id).await,
            Err(EngineError::Validation(_))
        ));
        assert!(matches!(
            h.dashboards.child_dashboard("user::ghost").await,
            Err(EngineError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_parent_overview_lists_children_and_queue() {
        let h = harness();
        let ana = register_child(&h.users, "Ana", None).await;
        let leo = register_child(&h.users, "Leo", None).await;
        let done = assign(&h, &ana.id, "Dishes", 100).await;
        finish(&h, &done).await;
        let waiting = assign(&h, &leo.id, "Trash", 10).await;
        h.activities.complete_activity(&waiting).await.unwrap();
        assign(&h, &leo.id, "Laundry", 10).await;

        let overview = h.dashboards.parent_overview().await.unwrap();

        assert_eq!(overview.children.len(), 2);
        assert_eq!(overview.children[0].user.name, "Ana");
        assert_eq!(overview.children[0].progress.level.level, 2);
        assert_eq!(overview.children[1].progress.completed_count, 0);

        assert_eq!(overview.pending_approvals.len(), 1);
        assert_eq!(overview.pending_approvals[0].activity.id, waiting);
        assert_eq!(overview.pending_approvals[0].child_name, "Leo");
    }
}
