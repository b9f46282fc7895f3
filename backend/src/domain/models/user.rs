//! backend/src/domain/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

use super::achievement::AchievementId;
use crate::domain::progression;

/// Longest accepted user name, after trimming
pub const MAX_NAME_LENGTH: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    Child,
    Parent,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Child => "child",
            UserRole::Parent => "parent",
        }
    }

    pub fn from_string(value: &str) -> Result<Self, String> {
        match value {
            "child" => Ok(UserRole::Child),
            "parent" => Ok(UserRole::Parent),
            other => Err(format!("Unknown user role: {}", other)),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mascot {
    #[default]
    Star,
    Dragon,
    Heart,
}

impl Mascot {
    pub const ALL: [Mascot; 3] = [Mascot::Star, Mascot::Dragon, Mascot::Heart];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mascot::Star => "star",
            Mascot::Dragon => "dragon",
            Mascot::Heart => "heart",
        }
    }

    pub fn from_string(value: &str) -> Result<Self, String> {
        match value {
            "star" => Ok(Mascot::Star),
            "dragon" => Ok(Mascot::Dragon),
            "heart" => Ok(Mascot::Heart),
            other => Err(format!("Unknown mascot: {}", other)),
        }
    }

    /// Display name shown next to the mascot
    pub fn display_name(&self) -> &'static str {
        match self {
            Mascot::Star => "Stella",
            Mascot::Dragon => "Drako",
            Mascot::Heart => "Rosie",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mascot::Star => "⭐",
            Mascot::Dragon => "🐉",
            Mascot::Heart => "💖",
        }
    }
}

/// Domain model representing a family member.
///
/// Level is never stored; it is always derived from `xp`.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    pub name: String,
    pub role: UserRole,
    pub xp: u32,
    /// Only children carry a mascot
    pub mascot: Option<Mascot>,
    pub achievements: BTreeSet<AchievementId>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Generate a unique ID for a user
    pub fn generate_id() -> String {
        format!("user::{}", Uuid::new_v4())
    }

    pub fn is_child(&self) -> bool {
        self.role == UserRole::Child
    }

    pub fn level(&self) -> u32 {
        progression::level(self.xp)
    }

    /// Key used for login lookup and the uniqueness check
    pub fn normalize_name(name: &str) -> String {
        name.trim().to_lowercase()
    }

    pub fn has_name(&self, name: &str) -> bool {
        Self::normalize_name(&self.name) == Self::normalize_name(name)
    }
}
