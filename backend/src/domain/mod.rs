//! Domain layer: models, the pure progression engine, and the services that
//! own every read and write of the stores.

pub mod activity_service;
pub mod clock;
pub mod commands;
pub mod dashboard_service;
pub mod errors;
pub mod models;
pub mod notifier;
pub mod progression;
pub mod theme_service;
pub mod user_service;

pub use activity_service::ActivityService;
pub use dashboard_service::DashboardService;
pub use errors::{EngineError, EngineResult};
pub use theme_service::ThemeService;
pub use user_service::UserService;
