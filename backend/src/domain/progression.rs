//! Progression engine for the SuperKids tracker.
//!
//! Pure functions over a user and the activity history: level from XP,
//! consecutive-day streaks, and achievement unlock detection. Nothing here
//! reads a store or the clock; callers pass `today` in.
//!
//! ## Rules
//!
//! - `level = floor(xp / 100) + 1`, no upper bound
//! - A streak counts consecutive days ending *today* with at least one
//!   completed activity; a missed today means a streak of 0
//! - Several completions on one day count as one day
//! - Only `Completed` activities count; `PendingApproval` does not
//! - An achievement already unlocked is never reported again

use chrono::NaiveDate;
use std::collections::BTreeSet;

use super::models::achievement::{AchievementId, ProgressFacts, ACHIEVEMENT_CATALOG};
use super::models::activity::Activity;
use super::models::user::User;

pub const XP_PER_LEVEL: u32 = 100;

/// Position of a user inside their current level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelProgress {
    pub level: u32,
    pub xp_into_level: u32,
    pub xp_for_next_level: u32,
}

pub fn level(xp: u32) -> u32 {
    xp / XP_PER_LEVEL + 1
}

pub fn level_progress(xp: u32) -> LevelProgress {
    let xp_into_level = xp % XP_PER_LEVEL;
    LevelProgress {
        level: level(xp),
        xp_into_level,
        xp_for_next_level: XP_PER_LEVEL - xp_into_level,
    }
}

/// Number of approved activities owned by `user_id`
pub fn completed_count(user_id: &str, activities: &[Activity]) -> u32 {
    activities
        .iter()
        .filter(|activity| activity.belongs_to(user_id) && activity.is_completed())
        .count() as u32
}

/// Consecutive days, walking back from `today`, with a completed activity
pub fn streak(user_id: &str, activities: &[Activity], today: NaiveDate) -> u32 {
    let completed_days: BTreeSet<NaiveDate> = activities
        .iter()
        .filter(|activity| activity.belongs_to(user_id) && activity.is_completed())
        .map(|activity| activity.date)
        .collect();

    let mut streak = 0;
    let mut cursor = today;
    while completed_days.contains(&cursor) {
        streak += 1;
        match cursor.pred_opt() {
            Some(previous) => cursor = previous,
            None => break,
        }
    }
    streak
}

pub fn progress_facts(user: &User, activities: &[Activity], today: NaiveDate) -> ProgressFacts {
    ProgressFacts {
        completed_count: completed_count(&user.id, activities),
        streak: streak(&user.id, activities, today),
        level: level(user.xp),
    }
}

/// Achievements whose rule now holds and that `user` does not have yet,
/// in catalog order
pub fn check_unlocks(user: &User, activities: &[Activity], today: NaiveDate) -> Vec<AchievementId> {
    let facts = progress_facts(user, activities, today);
    ACHIEVEMENT_CATALOG
        .iter()
        .filter(|achievement| !user.achievements.contains(&achievement.id))
        .filter(|achievement| achievement.rule.is_met(&facts))
        .map(|achievement| achievement.id)
        .collect()
}
