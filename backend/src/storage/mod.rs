//! Storage layer.
//!
//! [`Stores`] bundles the three stores with the write lock every mutating
//! service shares. Holding the lock across a load-modify-save cycle keeps
//! concurrent requests from losing each other's writes.

pub mod csv;
pub mod traits;

use std::sync::Arc;
use tokio::sync::Mutex;

pub use traits::{ActivityStorage, SettingsStorage, UserStorage};

use self::csv::{ActivityRepository, CsvConnection, GlobalConfigRepository, UserRepository};

#[derive(Clone)]
pub struct Stores {
    pub users: Arc<dyn UserStorage>,
    pub activities: Arc<dyn ActivityStorage>,
    pub settings: Arc<dyn SettingsStorage>,
    pub write_lock: Arc<Mutex<()>>,
}

impl Stores {
    pub fn new(
        users: Arc<dyn UserStorage>,
        activities: Arc<dyn ActivityStorage>,
        settings: Arc<dyn SettingsStorage>,
    ) -> Self {
        Self {
            users,
            activities,
            settings,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Stores backed by the flat files under `connection`
    pub fn csv(connection: Arc<CsvConnection>) -> Self {
        Self::new(
            Arc::new(UserRepository::new(connection.clone())),
            Arc::new(ActivityRepository::new(connection.clone())),
            Arc::new(GlobalConfigRepository::new(connection)),
        )
    }
}
