use crate::domain::dashboard_service::{
    ChildDashboard, ChildSummary as DomainChildSummary, ParentOverview, ProgressSummary,
};
use crate::io::rest::mappers::achievement_mapper::AchievementMapper;
use crate::io::rest::mappers::activity_mapper::ActivityMapper;
use crate::io::rest::mappers::user_mapper::UserMapper;
use shared::{
    AchievementStatus, ChildDashboardResponse, ChildSummary, ParentOverviewResponse, PendingApproval,
    TodayProgress, UserProgress,
};

pub struct DashboardMapper;

impl DashboardMapper {
    pub fn to_progress_dto(progress: &ProgressSummary) -> UserProgress {
        UserProgress {
            xp: progress.xp,
            level: progress.level.level,
            xp_into_level: progress.level.xp_into_level,
            xp_for_next_level: progress.level.xp_for_next_level,
            streak: progress.streak,
            completed_count: progress.completed_count,
            achievements_unlocked: progress.achievements_unlocked as u32,
        }
    }

    pub fn to_child_dashboard_dto(dashboard: ChildDashboard) -> ChildDashboardResponse {
        let today = TodayProgress {
            completed: dashboard.completed_today as u32,
            total: dashboard.todays_activities.len() as u32,
            activities: dashboard
                .todays_activities
                .into_iter()
                .map(ActivityMapper::to_dto)
                .collect(),
        };

        ChildDashboardResponse {
            mascot: dashboard.user.mascot.map(UserMapper::to_mascot_info),
            progress: Self::to_progress_dto(&dashboard.progress),
            user: UserMapper::to_dto(dashboard.user),
            today,
            achievements: dashboard
                .achievements
                .into_iter()
                .map(|entry| AchievementStatus {
                    achievement: AchievementMapper::to_dto(entry.achievement),
                    unlocked: entry.unlocked,
                })
                .collect(),
        }
    }

    pub fn to_parent_overview_dto(overview: ParentOverview) -> ParentOverviewResponse {
        ParentOverviewResponse {
            children: overview
                .children
                .into_iter()
                .map(|DomainChildSummary { user, progress }| ChildSummary {
                    progress: Self::to_progress_dto(&progress),
                    user: UserMapper::to_dto(user),
                })
                .collect(),
            pending_approvals: overview
                .pending_approvals
                .into_iter()
                .map(|entry| PendingApproval {
                    activity: ActivityMapper::to_dto(entry.activity),
                    child_name: entry.child_name,
                })
                .collect(),
        }
    }
}
