//! Error type shared by every domain service.
//!
//! Validation and state-machine failures are reported before any store is
//! written, so an `Err` from a service always means nothing changed.

use thiserror::Error;

use super::models::activity::{ActivityStatus, LifecycleAction};

#[derive(Debug, Error)]
pub enum EngineError {
    /// Bad input shape: empty name, out-of-range points, unknown target user
    #[error("{0}")]
    Validation(String),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("Cannot {action} activity {activity_id} while it is {status}")]
    InvalidTransition {
        activity_id: String,
        action: LifecycleAction,
        status: ActivityStatus,
    },

    #[error("Storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl EngineError {
    pub fn validation(message: impl Into<String>) -> Self {
        EngineError::Validation(message.into())
    }

    pub fn user_not_found(id: impl Into<String>) -> Self {
        EngineError::NotFound { entity: "User", id: id.into() }
    }

    pub fn activity_not_found(id: impl Into<String>) -> Self {
        EngineError::NotFound { entity: "Activity", id: id.into() }
    }
}

pub type EngineResult<T> = std::result::Result<T, EngineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = EngineError::activity_not_found("activity::42");
        assert_eq!(err.to_string(), "Activity not found: activity::42");

        let err = EngineError::InvalidTransition {
            activity_id: "activity::1".to_string(),
            action: LifecycleAction::Complete,
            status: ActivityStatus::Completed,
        };
        assert_eq!(
            err.to_string(),
            "Cannot complete activity activity::1 while it is completed"
        );
    }

    #[test]
    fn test_storage_errors_convert_from_anyhow() {
        fn failing() -> EngineResult<()> {
            let write: anyhow::Result<()> = Err(anyhow::anyhow!("disk full"));
            write?;
            Ok(())
        }
        assert!(matches!(failing(), Err(EngineError::Storage(_))));
    }
}
