use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use tracing::info;

use super::{error_response, ApiJson};
use crate::domain::models::settings::Theme as DomainTheme;
use crate::AppState;
use shared::{Theme as SharedTheme, ThemeResponse, UpdateThemeRequest};

pub fn router() -> Router<AppState> {
    Router::new().route("/settings/theme", get(get_theme).put(update_theme))
}

fn theme_to_dto(theme: DomainTheme) -> ThemeResponse {
    let theme = match theme {
        DomainTheme::Blue => SharedTheme::Blue,
        DomainTheme::Green => SharedTheme::Green,
        DomainTheme::Pink => SharedTheme::Pink,
        DomainTheme::Purple => SharedTheme::Purple,
    };
    ThemeResponse { theme }
}

pub async fn get_theme(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/settings/theme");

    match state.theme_service.get_theme().await {
        Ok(theme) => (StatusCode::OK, Json(theme_to_dto(theme))).into_response(),
        Err(e) => error_response("Failed to load theme", e),
    }
}

pub async fn update_theme(
    State(state): State<AppState>,
    ApiJson(request): ApiJson<UpdateThemeRequest>,
) -> impl IntoResponse {
    info!("PUT /api/settings/theme - theme: {}", request.theme);

    match state.theme_service.set_theme(&request.theme).await {
        Ok(theme) => (StatusCode::OK, Json(theme_to_dto(theme))).into_response(),
        Err(e) => error_response("Failed to update theme", e),
    }
}
