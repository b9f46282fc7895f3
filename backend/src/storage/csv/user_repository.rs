//! # YAML User Repository
//!
//! Stores every user, children and parents alike, in `users.yaml`:
//!
//! ```yaml
//! users:
//!   - id: "user::2f1c..."
//!     name: "Ana"
//!     role: "child"
//!     xp: 120
//!     mascot: "dragon"
//!     achievements: ["first_step"]
//!     created_at: "2025-03-10T08:00:00+00:00"
//! ```

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::sync::Arc;
use tracing::{debug, info};

use super::connection::CsvConnection;
use crate::domain::models::achievement::AchievementId;
use crate::domain::models::user::{Mascot, User, UserRole};
use crate::storage::traits::UserStorage;

/// On-disk shape of a user, with string dates and enum ids
#[derive(Debug, Clone, Serialize, Deserialize)]
struct UserRecord {
    id: String,
    name: String,
    role: String,
    #[serde(default)]
    xp: u32,
    #[serde(default)]
    mascot: Option<String>,
    #[serde(default)]
    achievements: Vec<String>,
    created_at: String,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct UsersFile {
    #[serde(default)]
    users: Vec<UserRecord>,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            role: user.role.as_str().to_string(),
            xp: user.xp,
            mascot: user.mascot.map(|mascot| mascot.as_str().to_string()),
            achievements: user
                .achievements
                .iter()
                .map(|achievement| achievement.as_str().to_string())
                .collect(),
            created_at: user.created_at.to_rfc3339(),
        }
    }
}

impl TryFrom<UserRecord> for User {
    type Error = anyhow::Error;

    fn try_from(record: UserRecord) -> Result<Self> {
        let role = UserRole::from_string(&record.role)
            .map_err(|e| anyhow!("{} (user {})", e, record.id))?;

        let mascot = match record.mascot.as_deref() {
            Some(value) => Some(
                Mascot::from_string(value).map_err(|e| anyhow!("{} (user {})", e, record.id))?,
            ),
            None => None,
        };

        let achievements = record
            .achievements
            .iter()
            .map(|value| {
                AchievementId::from_string(value).map_err(|e| anyhow!("{} (user {})", e, record.id))
            })
            .collect::<Result<BTreeSet<_>>>()?;

        let created_at = DateTime::parse_from_rfc3339(&record.created_at)
            .with_context(|| format!("Invalid created_at for user {}", record.id))?
            .with_timezone(&Utc);

        Ok(User {
            id: record.id,
            name: record.name,
            role,
            xp: record.xp,
            mascot,
            achievements,
            created_at,
        })
    }
}

#[derive(Clone)]
pub struct UserRepository {
    connection: Arc<CsvConnection>,
}

impl UserRepository {
    pub fn new(connection: Arc<CsvConnection>) -> Self {
        Self { connection }
    }
}

#[async_trait]
impl UserStorage for UserRepository {
    async fn load_users(&self) -> Result<Vec<User>> {
        let path = self.connection.users_file_path();
        if !path.exists() {
            debug!("No users file at {}, starting empty", path.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let file: UsersFile = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        let users = file
            .users
            .into_iter()
            .map(User::try_from)
            .collect::<Result<Vec<_>>>()?;

        debug!("Loaded {} users", users.len());
        Ok(users)
    }

    async fn save_users(&self, users: &[User]) -> Result<()> {
        let file = UsersFile {
            users: users.iter().map(UserRecord::from).collect(),
        };
        let yaml = serde_yaml::to_string(&file)?;

        self.connection
            .write_atomically(&self.connection.users_file_path(), yaml.as_bytes())?;

        info!("Saved {} users", users.len());
        Ok(())
    }
}
