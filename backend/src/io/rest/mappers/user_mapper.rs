use crate::domain::commands::users::{RegisterUserCommand, RegisterUserResult};
use crate::domain::models::user::{Mascot as DomainMascot, User as DomainUser, UserRole as DomainUserRole};
use shared::{
    Mascot as SharedMascot, MascotInfo, RegisterUserRequest, User as SharedUser, UserListResponse,
    UserResponse, UserRole as SharedUserRole,
};

/// Mapper between shared user DTOs and domain users.
pub struct UserMapper;

impl UserMapper {
    pub fn to_register_command(request: RegisterUserRequest) -> RegisterUserCommand {
        RegisterUserCommand {
            name: request.name,
            role: Self::role_to_domain(request.role),
            mascot: request.mascot.map(Self::mascot_to_domain),
        }
    }

    pub fn to_dto(domain: DomainUser) -> SharedUser {
        SharedUser {
            level: domain.level(),
            id: domain.id,
            name: domain.name,
            role: Self::role_to_dto(domain.role),
            xp: domain.xp,
            mascot: domain.mascot.map(Self::mascot_to_dto),
            achievements: domain
                .achievements
                .iter()
                .map(|achievement| achievement.as_str().to_string())
                .collect(),
            created_at: domain.created_at.to_rfc3339(),
        }
    }

    pub fn to_user_response(result: RegisterUserResult) -> UserResponse {
        UserResponse {
            user: Self::to_dto(result.user),
            success_message: result.success_message,
        }
    }

    pub fn to_user_list_dto(users: Vec<DomainUser>) -> UserListResponse {
        UserListResponse {
            users: users.into_iter().map(Self::to_dto).collect(),
        }
    }

    pub fn to_mascot_info(mascot: DomainMascot) -> MascotInfo {
        MascotInfo {
            id: Self::mascot_to_dto(mascot),
            name: mascot.display_name().to_string(),
            emoji: mascot.emoji().to_string(),
        }
    }

    fn role_to_domain(role: SharedUserRole) -> DomainUserRole {
        match role {
            SharedUserRole::Child => DomainUserRole::Child,
            SharedUserRole::Parent => DomainUserRole::Parent,
        }
    }

    fn role_to_dto(role: DomainUserRole) -> SharedUserRole {
        match role {
            DomainUserRole::Child => SharedUserRole::Child,
            DomainUserRole::Parent => SharedUserRole::Parent,
        }
    }

    fn mascot_to_domain(mascot: SharedMascot) -> DomainMascot {
        match mascot {
            SharedMascot::Star => DomainMascot::Star,
            SharedMascot::Dragon => DomainMascot::Dragon,
            SharedMascot::Heart => DomainMascot::Heart,
        }
    }

    fn mascot_to_dto(mascot: DomainMascot) -> SharedMascot {
        match mascot {
            DomainMascot::Star => SharedMascot::Star,
            DomainMascot::Dragon => SharedMascot::Dragon,
            DomainMascot::Heart => SharedMascot::Heart,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::achievement::AchievementId;
    use chrono::Utc;
    use std::collections::BTreeSet;

    #[test]
    fn test_to_dto_derives_level_and_lists_achievement_ids() {
        let user = DomainUser {
            id: "user::ana".to_string(),
            name: "Ana".to_string(),
            role: DomainUserRole::Child,
            xp: 250,
            mascot: Some(DomainMascot::Dragon),
            achievements: BTreeSet::from([AchievementId::OnFire, AchievementId::FirstStep]),
            created_at: Utc::now(),
        };

        let dto = UserMapper::to_dto(user);

        assert_eq!(dto.level, 3);
        assert_eq!(dto.role, SharedUserRole::Child);
        assert_eq!(dto.mascot, Some(SharedMascot::Dragon));
        assert_eq!(dto.achievements, vec!["first_step", "on_fire"]);
    }

    #[test]
    fn test_mascot_info() {
        let info = UserMapper::to_mascot_info(DomainMascot::Heart);
        assert_eq!(info.id, SharedMascot::Heart);
        assert_eq!(info.name, "Rosie");
    }
}
