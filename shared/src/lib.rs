use serde::{Deserialize, Serialize};

/// Role of a user in the family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Child,
    Parent,
}

/// Mascot a child picks at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mascot {
    Star,
    Dragon,
    Heart,
}

/// Represents a registered user (child or parent)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub xp: u32,
    /// Derived from xp, never stored
    pub level: u32,
    pub mascot: Option<Mascot>,
    /// Unlocked achievement ids
    pub achievements: Vec<String>,
    pub created_at: String, // RFC 3339 timestamp
}

/// Request for registering a new user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub name: String,
    pub role: UserRole,
    /// Only meaningful for children; defaults to `star`
    pub mascot: Option<Mascot>,
}

/// Response after registering a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub user: User,
    pub success_message: String,
}

/// Response containing a list of users
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

/// Request for name-based login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub name: String,
}

/// Response after a successful login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: User,
}

/// Approval state of an activity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityStatus {
    Pending,
    PendingApproval,
    Completed,
}

/// Represents a household activity assigned to a child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    /// XP awarded on approval (1-100)
    pub points: u32,
    pub status: ActivityStatus,
    pub date: String, // ISO 8601 date format (YYYY-MM-DD)
    pub created_at: String, // RFC 3339 timestamp
}

/// Request for creating a new activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateActivityRequest {
    /// Child the activity is assigned to
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Signed so that out-of-range values reach validation
    pub points: i64,
    /// Optional date override (YYYY-MM-DD) - uses today if not provided
    pub date: Option<String>,
}

/// Response after creating an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateActivityResponse {
    pub activity: Activity,
    pub success_message: String,
}

/// Response containing a single activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityResponse {
    pub activity: Activity,
}

/// Response containing a list of activities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityListResponse {
    pub activities: Vec<Activity>,
}

/// Response after a child marks an activity as done
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteActivityResponse {
    pub activity: Activity,
    /// Motivational acknowledgment to show the child
    pub message: String,
}

/// Request for approving or rejecting a submitted activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproveActivityRequest {
    pub approve: bool,
}

/// Response after a parent reviews an activity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproveActivityResponse {
    pub activity: Activity,
    /// Owner after the review (xp and achievements updated on approval)
    pub user: User,
    pub xp_awarded: u32,
    pub unlocked_achievements: Vec<Achievement>,
    pub success_message: String,
}

/// Catalog entry for an achievement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: String,
    pub name: String,
    pub description: String,
    pub requirement: u32,
    pub icon: String,
}

/// Response containing the achievement catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementListResponse {
    pub achievements: Vec<Achievement>,
}

/// Achievement together with whether a given user has unlocked it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementStatus {
    pub achievement: Achievement,
    pub unlocked: bool,
}

/// Display information for a mascot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MascotInfo {
    pub id: Mascot,
    pub name: String,
    pub emoji: String,
}

/// Response containing the mascot catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MascotListResponse {
    pub mascots: Vec<MascotInfo>,
}

/// Derived progression values for a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProgress {
    pub xp: u32,
    pub level: u32,
    pub xp_into_level: u32,
    pub xp_for_next_level: u32,
    pub streak: u32,
    pub completed_count: u32,
    pub achievements_unlocked: u32,
}

/// Today's activities and how many of them are approved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TodayProgress {
    pub completed: u32,
    pub total: u32,
    pub activities: Vec<Activity>,
}

/// Everything the child dashboard renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildDashboardResponse {
    pub user: User,
    pub mascot: Option<MascotInfo>,
    pub progress: UserProgress,
    pub today: TodayProgress,
    pub achievements: Vec<AchievementStatus>,
}

/// Per-child summary on the parent overview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildSummary {
    pub user: User,
    pub progress: UserProgress,
}

/// Activity waiting for a parent, with the owning child's name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingApproval {
    pub activity: Activity,
    pub child_name: String,
}

/// Everything the parent overview renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParentOverviewResponse {
    pub children: Vec<ChildSummary>,
    pub pending_approvals: Vec<PendingApproval>,
}

/// Visual theme selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Blue,
    Green,
    Pink,
    Purple,
}

/// Response containing the selected theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: Theme,
}

/// Request for changing the theme
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateThemeRequest {
    /// Theme id; unknown ids are rejected by validation
    pub theme: String,
}

/// Machine-readable error category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    NotFound,
    InvalidTransition,
    Internal,
}

/// Error body returned by every endpoint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: ErrorCode,
    pub message: String,
}
