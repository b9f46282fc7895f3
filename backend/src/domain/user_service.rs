use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::{info, warn};

use super::clock::Clock;
use super::commands::users::{RegisterUserCommand, RegisterUserResult};
use super::errors::{EngineError, EngineResult};
use super::models::user::{User, UserRole, MAX_NAME_LENGTH};
#[cfg(test)]
use super::models::user::Mascot;
use crate::storage::Stores;

/// Registration and name-based login of family members
#[derive(Clone)]
pub struct UserService {
    stores: Stores,
    clock: Arc<dyn Clock>,
}

impl UserService {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>) -> Self {
        Self { stores, clock }
    }

    pub async fn register_user(&self, command: RegisterUserCommand) -> EngineResult<RegisterUserResult> {
        info!("Registering {}: name={}", command.role, command.name);

        let name = command.name.trim().to_string();
        Self::validate_name(&name)?;

        let mascot = match (command.role, command.mascot) {
            (UserRole::Child, mascot) => Some(mascot.unwrap_or_default()),
            (UserRole::Parent, None) => None,
            (UserRole::Parent, Some(_)) => {
                return Err(EngineError::validation("Parents cannot choose a mascot"));
            }
        };

        let _guard = self.stores.write_lock.lock().await;
        let mut users = self.stores.users.load_users().await?;

        if users.iter().any(|user| user.has_name(&name)) {
            warn!("Rejected duplicate user name: {}", name);
            return Err(EngineError::validation(format!("The name '{}' is already taken", name)));
        }

        let user = User {
            id: User::generate_id(),
            name,
            role: command.role,
            xp: 0,
            mascot,
            achievements: BTreeSet::new(),
            created_at: self.clock.now(),
        };
        users.push(user.clone());
        self.stores.users.save_users(&users).await?;

        info!("Registered {} {} with ID {}", user.role, user.name, user.id);
        let success_message = format!("Welcome, {}!", user.name);
        Ok(RegisterUserResult { user, success_message })
    }

    /// Case-insensitive lookup by name
    pub async fn login(&self, name: &str) -> EngineResult<User> {
        let users = self.stores.users.load_users().await?;
        match users.into_iter().find(|user| user.has_name(name)) {
            Some(user) => {
                info!("Login: {} ({})", user.name, user.id);
                Ok(user)
            }
            None => {
                warn!("Login failed, no user named '{}'", name.trim());
                Err(EngineError::NotFound { entity: "User", id: name.trim().to_string() })
            }
        }
    }

    pub async fn get_user(&self, user_id: &str) -> EngineResult<User> {
        self.stores
            .users
            .load_users()
            .await?
            .into_iter()
            .find(|user| user.id == user_id)
            .ok_or_else(|| EngineError::user_not_found(user_id))
    }

    pub async fn list_users(&self) -> EngineResult<Vec<User>> {
        Ok(self.stores.users.load_users().await?)
    }

    pub async fn list_children(&self) -> EngineResult<Vec<User>> {
        let users = self.stores.users.load_users().await?;
        Ok(users.into_iter().filter(User::is_child).collect())
    }

    fn validate_name(name: &str) -> EngineResult<()> {
        if name.is_empty() {
            return Err(EngineError::validation("Name cannot be empty"));
        }
        if name.chars().count() > MAX_NAME_LENGTH {
            return Err(EngineError::validation(format!(
                "Name cannot be longer than {} characters",
                MAX_NAME_LENGTH
            )));
        }
        Ok(())
    }
}

/// Register a child in tests that only need one to exist
#[cfg(test)]
pub(crate) async fn register_child(service: &UserService, name: &str, mascot: Option<Mascot>) -> User {
    service
        .register_user(RegisterUserCommand {
            name: name.to_string(),
            role: UserRole::Child,
            mascot,
        })
        .await
        .expect("Failed to register child")
        .user
}
