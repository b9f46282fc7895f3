//! backend/src/domain/models/achievement.rs
//!
//! The achievement catalog is a static table of `(id, rule)` rows. Adding an
//! achievement means adding a row; the progression engine never matches on ids.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum AchievementId {
    FirstStep,
    OnFire,
    SuperStar,
    Unstoppable,
    Legend,
}

impl AchievementId {
    pub fn as_str(&self) -> &'static str {
        match self {
            AchievementId::FirstStep => "first_step",
            AchievementId::OnFire => "on_fire",
            AchievementId::SuperStar => "super_star",
            AchievementId::Unstoppable => "unstoppable",
            AchievementId::Legend => "legend",
        }
    }

    pub fn from_string(value: &str) -> Result<Self, String> {
        ACHIEVEMENT_CATALOG
            .iter()
            .map(|achievement| achievement.id)
            .find(|id| id.as_str() == value)
            .ok_or_else(|| format!("Unknown achievement: {}", value))
    }
}

impl fmt::Display for AchievementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Derived fact an unlock rule is evaluated against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressMetric {
    CompletedCount,
    Streak,
    Level,
}

/// Facts derived from a user and their activity history
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProgressFacts {
    pub completed_count: u32,
    pub streak: u32,
    pub level: u32,
}

impl ProgressFacts {
    pub fn value_of(&self, metric: ProgressMetric) -> u32 {
        match metric {
            ProgressMetric::CompletedCount => self.completed_count,
            ProgressMetric::Streak => self.streak,
            ProgressMetric::Level => self.level,
        }
    }
}

/// Threshold predicate: `facts[metric] >= threshold`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockRule {
    pub metric: ProgressMetric,
    pub threshold: u32,
}

impl UnlockRule {
    pub fn is_met(&self, facts: &ProgressFacts) -> bool {
        facts.value_of(self.metric) >= self.threshold
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: &'static str,
    pub description: &'static str,
    pub icon: &'static str,
    pub rule: UnlockRule,
}

impl Achievement {
    pub fn requirement(&self) -> u32 {
        self.rule.threshold
    }
}

pub static ACHIEVEMENT_CATALOG: [Achievement; 5] = [
    Achievement {
        id: AchievementId::FirstStep,
        name: "First Step",
        description: "Complete your first activity",
        icon: "🎯",
        rule: UnlockRule { metric: ProgressMetric::CompletedCount, threshold: 1 },
    },
    Achievement {
        id: AchievementId::OnFire,
        name: "On Fire",
        description: "Keep a 3 day streak",
        icon: "🔥",
        rule: UnlockRule { metric: ProgressMetric::Streak, threshold: 3 },
    },
    Achievement {
        id: AchievementId::SuperStar,
        name: "Super Star",
        description: "Reach level 5",
        icon: "⭐",
        rule: UnlockRule { metric: ProgressMetric::Level, threshold: 5 },
    },
    Achievement {
        id: AchievementId::Unstoppable,
        name: "Unstoppable",
        description: "Complete 10 activities",
        icon: "🚀",
        rule: UnlockRule { metric: ProgressMetric::CompletedCount, threshold: 10 },
    },
    Achievement {
        id: AchievementId::Legend,
        name: "Legend",
        description: "Keep a 7 day streak",
        icon: "👑",
        rule: UnlockRule { metric: ProgressMetric::Streak, threshold: 7 },
    },
];

/// Look up a catalog entry by id
pub fn find_achievement(id: AchievementId) -> Option<&'static Achievement> {
    ACHIEVEMENT_CATALOG.iter().find(|achievement| achievement.id == id)
}
