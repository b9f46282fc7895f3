//! Static catalogs: achievements and mascots.

use axum::{response::Json, routing::get, Router};
use tracing::debug;

use super::mappers::{AchievementMapper, UserMapper};
use crate::domain::models::user::Mascot;
use crate::AppState;
use shared::{AchievementListResponse, MascotListResponse};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/achievements", get(list_achievements))
        .route("/mascots", get(list_mascots))
}

pub async fn list_achievements() -> Json<AchievementListResponse> {
    debug!("GET /api/achievements");
    Json(AchievementMapper::to_catalog_dto())
}

pub async fn list_mascots() -> Json<MascotListResponse> {
    debug!("GET /api/mascots");
    Json(MascotListResponse {
        mascots: Mascot::ALL.into_iter().map(UserMapper::to_mascot_info).collect(),
    })
}
