use chrono::NaiveDate;

use crate::domain::commands::activities::{
    ApproveActivityResult, CompleteActivityResult, CreateActivityCommand, CreateActivityResult,
};
use crate::domain::errors::{EngineError, EngineResult};
use crate::domain::models::activity::{Activity as DomainActivity, ActivityStatus as DomainStatus};
use crate::io::rest::mappers::achievement_mapper::AchievementMapper;
use crate::io::rest::mappers::user_mapper::UserMapper;
use shared::{
    Activity as SharedActivity, ActivityListResponse, ActivityStatus as SharedStatus,
    ApproveActivityResponse, CompleteActivityResponse, CreateActivityRequest, CreateActivityResponse,
};

/// Mapper between shared activity DTOs and domain activities.
pub struct ActivityMapper;

impl ActivityMapper {
    /// `date` must be `YYYY-MM-DD` when present
    pub fn to_create_command(request: CreateActivityRequest) -> EngineResult<CreateActivityCommand> {
        let date = match request.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
            Some(date) => Some(NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                EngineError::validation(format!("Invalid date '{}', expected YYYY-MM-DD", date))
            })?),
            None => None,
        };

        Ok(CreateActivityCommand {
            user_id: request.user_id,
            name: request.name,
            description: request.description,
            points: request.points,
            date,
        })
    }

    pub fn to_dto(domain: DomainActivity) -> SharedActivity {
        SharedActivity {
            id: domain.id,
            user_id: domain.user_id,
            name: domain.name,
            description: domain.description,
            points: domain.points,
            status: Self::status_to_dto(domain.status),
            date: domain.date.format("%Y-%m-%d").to_string(),
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_activity_list_dto(activities: Vec<DomainActivity>) -> ActivityListResponse {
        ActivityListResponse {
            activities: activities.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_create_response(result: CreateActivityResult) -> CreateActivityResponse {
        let success_message = format!("Activity '{}' created", result.activity.name);
        CreateActivityResponse {
            activity: Self::to_dto(result.activity),
            success_message,
        }
    }

    pub fn to_complete_response(result: CompleteActivityResult) -> CompleteActivityResponse {
        CompleteActivityResponse {
            activity: Self::to_dto(result.activity),
            message: result.message,
        }
    }

    pub fn to_approve_response(result: ApproveActivityResult) -> ApproveActivityResponse {
        let success_message = if result.activity.status == DomainStatus::Completed {
            format!("Approved! {} earned {} XP", result.user.name, result.xp_awarded)
        } else {
            format!("'{}' was sent back to {}", result.activity.name, result.user.name)
        };

        ApproveActivityResponse {
            unlocked_achievements: result
                .unlocked
                .into_iter()
                .filter_map(AchievementMapper::find_dto)
                .collect(),
            activity: Self::to_dto(result.activity),
            user: UserMapper::to_dto(result.user),
            xp_awarded: result.xp_awarded,
            success_message,
        }
    }

    pub fn status_to_dto(status: DomainStatus) -> SharedStatus {
        match status {
            DomainStatus::Pending => SharedStatus::Pending,
            DomainStatus::PendingApproval => SharedStatus::PendingApproval,
            DomainStatus::Completed => SharedStatus::Completed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(date: Option<&str>) -> CreateActivityRequest {
        CreateActivityRequest {
            user_id: "user::ana".to_string(),
            name: "Dishes".to_string(),
            description: None,
            points: 10,
            date: date.map(str::to_string),
        }
    }

    #[test]
    fn test_create_command_parses_date() {
        let command = ActivityMapper::to_create_command(request(Some("2025-03-12"))).unwrap();
        assert_eq!(command.date, NaiveDate::from_ymd_opt(2025, 3, 12));

        let command = ActivityMapper::to_create_command(request(Some(""))).unwrap();
        assert_eq!(command.date, None);
    }

    #[test]
    fn test_create_command_rejects_bad_date() {
        assert!(matches!(
            ActivityMapper::to_create_command(request(Some("12/03/2025"))),
            Err(EngineError::Validation(_))
        ));
    }
}
