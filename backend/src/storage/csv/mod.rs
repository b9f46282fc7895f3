//! Flat-file storage: YAML for users and settings, CSV for activities.

pub mod activity_repository;
pub mod connection;
pub mod global_config_repository;
pub mod user_repository;

#[cfg(test)]
pub mod test_utils;

pub use activity_repository::ActivityRepository;
pub use connection::CsvConnection;
pub use global_config_repository::{GlobalConfig, GlobalConfigRepository};
pub use user_repository::UserRepository;
