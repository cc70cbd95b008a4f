pub mod config;
pub mod notice;
pub mod pages;
pub mod routes;
pub mod session;
pub mod state;

use std::time::Duration;

use axum::Router;
use axum::http::StatusCode;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

pub use config::ServerConfig;
pub use notice::{ApiError, Level, Notice, Reply};
pub use session::{Session, SessionRegistry};
pub use state::AppState;

/// Builds the router with pages, API routes and middleware.
pub fn build_app(state: AppState, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(pages::optimizer))
        .route("/helper", get(pages::helper))
        .route("/assets/style.css", get(pages::style))
        .route("/health", get(routes::health))
        .route("/api/session", get(routes::session))
        .route("/api/models", get(routes::models))
        .route("/api/model", post(routes::select_model))
        .route("/api/credential", post(routes::set_credential))
        .route("/api/content", post(routes::set_content))
        .route("/api/criteria", get(routes::criteria))
        .route("/api/analyze/{criterion}", post(routes::analyze))
        .route("/api/guide", get(routes::guide))
        .route("/api/checklists", get(routes::checklists))
        .route("/api/assess", post(routes::assess))
        .route("/api/usage", get(routes::usage))
        .with_state(state)
        .layer(TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, request_timeout))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
}
