//! # REST API for Activities
//!
//! Creation, the complete/approve lifecycle, and activity queries.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use tracing::info;

use super::{error_response, ApiJson, ApiQuery};
use super::mappers::ActivityMapper;
use crate::domain::commands::activities::{ActivityListQuery, ApproveActivityCommand};
use crate::AppState;
use shared::{ActivityResponse, ApproveActivityRequest, CreateActivityRequest};

/// Query string for `GET /api/activities`
#[derive(Debug, Default, Deserialize)]
pub struct ActivityListParams {
    pub user_id: Option<String>,
    #[serde(default)]
    pub today: bool,
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/activities", get(list_activities).post(create_activity))
        .route("/activities/pending-approval", get(pending_approvals))
        .route("/activities/:id", get(get_activity))
        .route("/activities/:id/complete", post(complete_activity))
        .route("/activities/:id/approve", post(approve_activity))
}

/// Parent assigns a new activity to a child
pub async fn create_activity(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<CreateActivityRequest>,
) -> impl IntoResponse {
    info!("POST /api/activities - request: {:?}", request);

    let command = match ActivityMapper::to_create_command(request) {
        Ok(command) => command,
        Err(e) => return error_response("Invalid activity request", e),
    };

    match state.activity_service.create_activity(command).await {
        Ok(result) => (StatusCode::CREATED, Json(ActivityMapper::to_create_response(result))).into_response(),
        Err(e) => error_response("Failed to create activity", e),
    }
}

pub async fn list_activities(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ActivityListParams>,
) -> impl IntoResponse {
    info!("GET /api/activities - params: {:?}", params);

    let query = ActivityListQuery {
        user_id: params.user_id,
        today_only: params.today,
    };
    match state.activity_service.list_activities(query).await {
        Ok(activities) => (StatusCode::OK, Json(ActivityMapper::to_activity_list_dto(activities))).into_response(),
        Err(e) => error_response("Failed to list activities", e),
    }
}

/// Approval queue, oldest first
pub async fn pending_approvals(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/activities/pending-approval");

    match state.activity_service.pending_approvals().await {
        Ok(activities) => (StatusCode::OK, Json(ActivityMapper::to_activity_list_dto(activities))).into_response(),
        Err(e) => error_response("Failed to list pending approvals", e),
    }
}

pub async fn get_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> impl IntoResponse {
    info!("GET /api/activities/{}", activity_id);

    match state.activity_service.get_activity(&activity_id).await {
        Ok(activity) => {
            let response = ActivityResponse {
                activity: ActivityMapper::to_dto(activity),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("Failed to get activity", e),
    }
}

/// Child marks an activity as done
pub async fn complete_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
) -> impl IntoResponse {
    info!("POST /api/activities/{}/complete", activity_id);

    match state.activity_service.complete_activity(&activity_id).await {
        Ok(result) => (StatusCode::OK, Json(ActivityMapper::to_complete_response(result))).into_response(),
        Err(e) => error_response("Failed to complete activity", e),
    }
}

/// Parent approves or rejects a submitted activity
pub async fn approve_activity(
    State(state): State<AppState>,
    Path(activity_id): Path<String>,
    ApiJson(request): ApiJson<ApproveActivityRequest>,
) -> impl IntoResponse {
    info!("POST /api/activities/{}/approve - approve: {}", activity_id, request.approve);

    let command = ApproveActivityCommand {
        activity_id,
        approve: request.approve,
    };
    match state.activity_service.approve_activity(command).await {
        Ok(result) => (StatusCode::OK, Json(ActivityMapper::to_approve_response(result))).into_response(),
        Err(e) => error_response("Failed to decide on activity", e),
    }
}
