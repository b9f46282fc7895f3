//! # Storage Traits
//!
//! Storage abstraction used by the domain layer. Every store is read and
//! written as a whole collection: services load everything, apply exactly one
//! mutation, and write the full collection back. There are no patch writes.

use anyhow::Result;
use async_trait::async_trait;

use crate::domain::models::activity::Activity;
use crate::domain::models::user::User;

/// Persistence for the user collection
#[async_trait]
pub trait UserStorage: Send + Sync {
    /// Load every user in registration order
    async fn load_users(&self) -> Result<Vec<User>>;

    /// Replace the stored collection with `users`
    async fn save_users(&self, users: &[User]) -> Result<()>;
}

/// Persistence for the activity collection
#[async_trait]
pub trait ActivityStorage: Send + Sync {
    /// Load every activity in creation order
    async fn load_activities(&self) -> Result<Vec<Activity>>;

    /// Replace the stored collection with `activities`
    async fn save_activities(&self, activities: &[Activity]) -> Result<()>;
}

/// Persistence for presentation settings that live next to the engine data
#[async_trait]
pub trait SettingsStorage: Send + Sync {
    /// Stored theme id, if one was ever selected
    async fn load_theme(&self) -> Result<Option<String>>;

    async fn save_theme(&self, theme: &str) -> Result<()>;
}
