//! # SuperKids Backend
//!
//! Progression and approval engine for the SuperKids chore tracker, exposed
//! as a JSON REST API.
//!
//! ```text
//! Presentation (any HTTP client)
//!     ↓
//! IO Layer (axum handlers, DTO mappers)
//!     ↓
//! Domain Layer (lifecycle controller, progression engine, dashboards)
//!     ↓
//! Storage Layer (YAML and CSV flat files)
//! ```

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use anyhow::Result;
use axum::{
    http::{HeaderValue, Method},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

use crate::config::AppConfig;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::notifier::{MotivationalNotifier, Notifier};
use crate::domain::{ActivityService, DashboardService, ThemeService, UserService};
use crate::io::rest;
use crate::storage::csv::CsvConnection;
use crate::storage::Stores;

/// Every service, shared by all handlers
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub activity_service: ActivityService,
    pub dashboard_service: DashboardService,
    pub theme_service: ThemeService,
}

impl AppState {
    pub fn new(stores: Stores, clock: Arc<dyn Clock>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            user_service: UserService::new(stores.clone(), clock.clone()),
            activity_service: ActivityService::new(stores.clone(), clock.clone(), notifier),
            dashboard_service: DashboardService::new(stores.clone(), clock),
            theme_service: ThemeService::new(stores),
        }
    }
}

/// Open the data directory and wire up the production services
pub fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Using data directory {}", config.data_directory.display());
    let connection = Arc::new(CsvConnection::new(&config.data_directory)?);

    info!("Setting up domain services");
    Ok(AppState::new(
        Stores::csv(connection),
        Arc::new(SystemClock),
        Arc::new(MotivationalNotifier),
    ))
}

/// Build the `/api` router with CORS for `allowed_origin`
pub fn create_router(app_state: AppState, allowed_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers(Any);

    let api_routes = Router::new()
        .merge(rest::user_apis::router())
        .merge(rest::activity_apis::router())
        .merge(rest::dashboard_apis::router())
        .merge(rest::catalog_apis::router())
        .merge(rest::settings_apis::router());

    Router::new()
        .nest("/api", api_routes)
        .layer(cors)
        .with_state(app_state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::notifier::FixedNotifier;
    use crate::storage::csv::test_utils::TestEnvironment;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use serde::de::DeserializeOwned;
    use serde_json::{json, Value};
    use shared::{
        ActivityListResponse, ApproveActivityResponse, ChildDashboardResponse, CompleteActivityResponse,
        CreateActivityResponse, ErrorCode, ErrorResponse, ParentOverviewResponse, UserResponse,
    };
    use tower::ServiceExt;

    struct TestApp {
        _env: TestEnvironment,
        router: Router,
    }

    fn test_app() -> TestApp {
        let env = TestEnvironment::new().unwrap();
        let clock = Arc::new(FixedClock::new(NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()));
        let state = AppState::new(env.stores(), clock, Arc::new(FixedNotifier::new("Way to go!")));
        let router = create_router(state, HeaderValue::from_static("http://localhost:8080"));
        TestApp { _env: env, router }
    }

    impl TestApp {
        async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
            let builder = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(body) => builder
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.router.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            (status, bytes.to_vec())
        }

        async fn json<T: DeserializeOwned>(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, T) {
            let (status, bytes) = self.send(method, uri, body).await;
            (status, serde_json::from_slice(&bytes).unwrap())
        }

        async fn register_child(&self, name: &str) -> String {
            let (status, response): (_, UserResponse) = self
                .json("POST", "/api/users", Some(json!({ "name": name, "role": "child" })))
                .await;
            assert_eq!(status, StatusCode::CREATED);
            response.user.id
        }

        async fn create_activity(&self, user_id: &str, points: i64) -> (StatusCode, Vec<u8>) {
            self.send(
                "POST",
                "/api/activities",
                Some(json!({ "user_id": user_id, "name": "Clean room", "points": points })),
            )
            .await
        }
    }

    #[tokio::test]
    async fn test_full_approval_flow_over_http() {
        let app = test_app();
        let ana = app.register_child("Ana").await;

        let (status, bytes) = app.create_activity(&ana, 50).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: CreateActivityResponse = serde_json::from_slice(&bytes).unwrap();
        let id = created.activity.id;

        let (status, completed): (_, CompleteActivityResponse) = app
            .json("POST", &format!("/api/activities/{}/complete", id), None)
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(completed.message, "Way to go!");

        let (_, queue): (_, ActivityListResponse) = app.json("GET", "/api/activities/pending-approval", None).await;
        assert_eq!(queue.activities.len(), 1);

        let (status, approved): (_, ApproveActivityResponse) = app
            .json(
                "POST",
                &format!("/api/activities/{}/approve", id),
                Some(json!({ "approve": true })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(approved.user.xp, 50);
        assert_eq!(approved.user.level, 1);
        assert_eq!(approved.xp_awarded, 50);
        assert_eq!(approved.unlocked_achievements[0].id, "first_step");

        let (status, dashboard): (_, ChildDashboardResponse) =
            app.json("GET", &format!("/api/users/{}/dashboard", ana), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(dashboard.progress.streak, 1);
        assert_eq!(dashboard.today.completed, 1);
        assert_eq!(dashboard.mascot.map(|m| m.name), Some("Stella".to_string()));

        let (_, overview): (_, ParentOverviewResponse) = app.json("GET", "/api/parent/overview", None).await;
        assert_eq!(overview.children.len(), 1);
        assert!(overview.pending_approvals.is_empty());
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let app = test_app();
        let ana = app.register_child("Ana").await;

        let (status, bytes) = app.create_activity(&ana, 101).await;
        let error: ErrorResponse = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error.code, ErrorCode::Validation);
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let app = test_app();

        let (status, error): (_, ErrorResponse) = app.json("GET", "/api/activities/activity::nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error.code, ErrorCode::NotFound);

        let (status, error): (_, ErrorResponse) =
            app.json("POST", "/api/login", Some(json!({ "name": "Nobody" }))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(error.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_invalid_transition_maps_to_409() {
        let app = test_app();
        let ana = app.register_child("Ana").await;
        let (_, bytes) = app.create_activity(&ana, 10).await;
        let id = serde_json::from_slice::<CreateActivityResponse>(&bytes).unwrap().activity.id;

        let (status, error): (_, ErrorResponse) = app
            .json(
                "POST",
                &format!("/api/activities/{}/approve", id),
                Some(json!({ "approve": true })),
            )
            .await;

        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(error.code, ErrorCode::InvalidTransition);
    }

    #[tokio::test]
    async fn test_undecodable_bodies_map_to_400() {
        let app = test_app();
        let ana = app.register_child("Ana").await;

        let (status, error): (_, ErrorResponse) = app
            .json(
                "POST",
                "/api/activities",
                Some(json!({ "user_id": ana, "name": "Clean room", "points": "ten" })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error.code, ErrorCode::Validation);

        let (status, error): (_, ErrorResponse) = app
            .json("POST", "/api/users", Some(json!({ "name": "Robo", "role": "robot" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error.code, ErrorCode::Validation);

        let (status, error): (_, ErrorResponse) = app
            .json("GET", &format!("/api/activities?user_id={}&today=maybe", ana), None)
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error.code, ErrorCode::Validation);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_theme_updates_over_http() {
        let app = test_app();

        for _ in 0..10 {
            let handles: Vec<_> = ["blue", "green", "pink", "purple", "blue", "green"]
                .into_iter()
                .map(|theme| {
                    let router = app.router.clone();
                    tokio::spawn(async move {
                        let request = Request::builder()
                            .method("PUT")
                            .uri("/api/settings/theme")
                            .header("content-type", "application/json")
                            .body(Body::from(json!({ "theme": theme }).to_string()))
                            .unwrap();
                        router.oneshot(request).await.unwrap().status()
                    })
                })
                .collect();

            for handle in handles {
                assert_eq!(handle.await.unwrap(), StatusCode::OK);
            }
        }
    }

    #[tokio::test]
    async fn test_theme_and_catalog_endpoints() {
        let app = test_app();

        let (status, theme): (_, Value) = app.json("GET", "/api/settings/theme", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(theme, json!({ "theme": "blue" }));

        let (status, theme): (_, Value) = app
            .json("PUT", "/api/settings/theme", Some(json!({ "theme": "pink" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(theme, json!({ "theme": "pink" }));

        let (status, _): (_, ErrorResponse) = app
            .json("PUT", "/api/settings/theme", Some(json!({ "theme": "orange" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, achievements): (_, Value) = app.json("GET", "/api/achievements", None).await;
        assert_eq!(achievements["achievements"].as_array().unwrap().len(), 5);

        let (_, mascots): (_, Value) = app.json("GET", "/api/mascots", None).await;
        assert_eq!(mascots["mascots"][1]["name"], "Drako");
    }

    #[tokio::test]
    async fn test_todays_activities_query() {
        let app = test_app();
        let ana = app.register_child("Ana").await;
        app.create_activity(&ana, 10).await;
        app.send(
            "POST",
            "/api/activities",
            Some(json!({ "user_id": ana, "name": "Later", "points": 5, "date": "2025-03-20" })),
        )
        .await;

        let (_, all): (_, ActivityListResponse) =
            app.json("GET", &format!("/api/activities?user_id={}", ana), None).await;
        let (_, today): (_, ActivityListResponse) = app
            .json("GET", &format!("/api/activities?user_id={}&today=true", ana), None)
            .await;

        assert_eq!(all.activities.len(), 2);
        assert_eq!(today.activities.len(), 1);
        assert_eq!(today.activities[0].date, "2025-03-10");
    }
}
