use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use super::error_response;
use super::mappers::DashboardMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users/:id/dashboard", get(child_dashboard))
        .route("/parent/overview", get(parent_overview))
}

pub async fn child_dashboard(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/users/{}/dashboard", user_id);

    match state.dashboard_service.child_dashboard(&user_id).await {
        Ok(dashboard) => (StatusCode::OK, Json(DashboardMapper::to_child_dashboard_dto(dashboard))).into_response(),
        Err(e) => error_response("Failed to build dashboard", e),
    }
}

pub async fn parent_overview(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/parent/overview");

    match state.dashboard_service.parent_overview().await {
        Ok(overview) => (StatusCode::OK, Json(DashboardMapper::to_parent_overview_dto(overview))).into_response(),
        Err(e) => error_response("Failed to build parent overview", e),
    }
}
