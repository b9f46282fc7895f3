use crate::domain::models::achievement::{find_achievement, Achievement as DomainAchievement, AchievementId, ACHIEVEMENT_CATALOG};
use shared::{Achievement as SharedAchievement, AchievementListResponse};

pub struct AchievementMapper;

impl AchievementMapper {
    pub fn to_dto(domain: &DomainAchievement) -> SharedAchievement {
        SharedAchievement {
            id: domain.id.as_str().to_string(),
            name: domain.name.to_string(),
            description: domain.description.to_string(),
            requirement: domain.requirement(),
            icon: domain.icon.to_string(),
        }
    }

    pub fn find_dto(id: AchievementId) -> Option<SharedAchievement> {
        find_achievement(id).map(Self::to_dto)
    }

    pub fn to_catalog_dto() -> AchievementListResponse {
        AchievementListResponse {
            achievements: ACHIEVEMENT_CATALOG.iter().map(Self::to_dto).collect(),
        }
    }
}
