//! # REST API for Users
//!
//! Registration, listing, and name-based login.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use tracing::info;

use super::{error_response, ApiJson};
use super::mappers::UserMapper;
use crate::AppState;
use shared::{LoginRequest, LoginResponse, RegisterUserRequest};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users).post(register_user))
        .route("/users/:id", get(get_user))
        .route("/login", post(login))
}

/// Register a child or parent
pub async fn register_user(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<RegisterUserRequest>,
) -> impl IntoResponse {
    info!("POST /api/users - request: {:?}", request);

    let command = UserMapper::to_register_command(request);
    match state.user_service.register_user(command).await {
        Ok(result) => (StatusCode::CREATED, Json(UserMapper::to_user_response(result))).into_response(),
        Err(e) => error_response("Failed to register user", e),
    }
}

pub async fn list_users(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/users");

    match state.user_service.list_users().await {
        Ok(users) => (StatusCode::OK, Json(UserMapper::to_user_list_dto(users))).into_response(),
        Err(e) => error_response("Failed to list users", e),
    }
}

pub async fn get_user(State(state): State<AppState>, Path(user_id): Path<String>) -> impl IntoResponse {
    info!("GET /api/users/{}", user_id);

    match state.user_service.get_user(&user_id).await {
        Ok(user) => (StatusCode::OK, Json(UserMapper::to_dto(user))).into_response(),
        Err(e) => error_response("Failed to get user", e),
    }
}

/// Log in by name; there is no password
pub async fn login(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<LoginRequest>,
) -> impl IntoResponse {
    info!("POST /api/login - name: {}", request.name);

    match state.user_service.login(&request.name).await {
        Ok(user) => {
            let response = LoginResponse {
                user: UserMapper::to_dto(user),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => error_response("Login failed", e),
    }
}
