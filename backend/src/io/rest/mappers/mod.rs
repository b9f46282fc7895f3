pub mod achievement_mapper;
pub mod activity_mapper;
pub mod dashboard_mapper;
pub mod user_mapper;

pub use achievement_mapper::AchievementMapper;
pub use activity_mapper::ActivityMapper;
pub use dashboard_mapper::DashboardMapper;
pub use user_mapper::UserMapper;
