//! # REST API Interface Layer
//!
//! JSON endpoints under `/api`. Handlers map DTOs to domain commands, call
//! one service operation, and translate the outcome. Every failure is
//! returned as an [`ErrorResponse`] with a status code per error kind:
//!
//! | EngineError         | Status | code                 |
//! |---------------------|--------|----------------------|
//! | Validation          | 400    | `validation`         |
//! | NotFound            | 404    | `not_found`          |
//! | InvalidTransition   | 409    | `invalid_transition` |
//! | Storage             | 500    | `internal`           |
//!
//! Request bodies and query strings that fail to deserialize are reported
//! as `validation` errors through [`ApiJson`] and [`ApiQuery`].

pub mod activity_apis;
pub mod catalog_apis;
pub mod dashboard_apis;
pub mod mappers;
pub mod settings_apis;
pub mod user_apis;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use tracing::{error, warn};

use crate::domain::errors::EngineError;
use shared::{ErrorCode, ErrorResponse};

pub fn error_status(error: &EngineError) -> (StatusCode, ErrorCode) {
    match error {
        EngineError::Validation(_) => (StatusCode::BAD_REQUEST, ErrorCode::Validation),
        EngineError::NotFound { .. } => (StatusCode::NOT_FOUND, ErrorCode::NotFound),
        EngineError::InvalidTransition { .. } => (StatusCode::CONFLICT, ErrorCode::InvalidTransition),
        EngineError::Storage(_) => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::Internal),
    }
}

/// Translate a domain error into its JSON error response
pub fn error_response(context: &str, error: EngineError) -> Response {
    let (status, code) = error_status(&error);
    let message = if status.is_server_error() {
        error!("{}: {}", context, error);
        "Something went wrong while saving your data".to_string()
    } else {
        warn!("{}: {}", context, error);
        error.to_string()
    };

    (status, Json(ErrorResponse { code, message })).into_response()
}

/// JSON body extractor whose rejections use the `ErrorResponse` format
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(BadRequest))]
pub struct ApiJson<T>(pub T);

/// Query string extractor whose rejections use the `ErrorResponse` format
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(BadRequest))]
pub struct ApiQuery<T>(pub T);

/// A request that could not be decoded
pub struct BadRequest(EngineError);

impl From<JsonRejection> for BadRequest {
    fn from(rejection: JsonRejection) -> Self {
        BadRequest(EngineError::validation(rejection.body_text()))
    }
}

impl From<QueryRejection> for BadRequest {
    fn from(rejection: QueryRejection) -> Self {
        BadRequest(EngineError::validation(rejection.body_text()))
    }
}

impl IntoResponse for BadRequest {
    fn into_response(self) -> Response {
        error_response("Rejected request", self.0)
    }
}
