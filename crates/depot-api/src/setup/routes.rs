//! Route configuration and setup.

use crate::auth::middleware::{auth_middleware, AuthState};
use crate::constants;
use crate::handlers;
use crate::state::AppState;
use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::HeaderValue,
    response::IntoResponse,
    routing::{delete, get, post},
    Json, Router,
};
use depot_core::Config;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

const MAX_JSON_BODY_BYTES: usize = 64 * 1024;

/// Build the application router: public health/docs routes plus the
/// authenticated file routes under the API prefix.
pub fn build_router(config: &Config, state: Arc<AppState>) -> Result<Router> {
    let cors = setup_cors(config)?;
    let auth_state = Arc::new(AuthState {
        master_api_key: config.master_api_key.clone(),
    });

    let file_routes = Router::new()
        .route(
            "/files/upload-url",
            post(handlers::upload_url::issue_upload_url),
        )
        .route("/files", post(handlers::file_create::create_file))
        .route(
            "/files/{id}/download-url",
            get(handlers::download_url::issue_download_url),
        )
        .route("/files/{id}", delete(handlers::file_delete::delete_file))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    let router = Router::new()
        .route("/health", get(health_check))
        .route("/api-docs/openapi.json", get(crate::api_doc::openapi_spec))
        .nest(constants::API_PREFIX, file_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(DefaultBodyLimit::max(MAX_JSON_BODY_BYTES))
        .with_state(state);

    Ok(router)
}

fn setup_cors(config: &Config) -> Result<CorsLayer> {
    let cors = if config.cors_origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins = config
            .cors_origins
            .iter()
            .map(|o| o.parse::<HeaderValue>())
            .collect::<Result<Vec<_>, _>>()
            .context("Invalid CORS origin")?;
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    };
    Ok(cors)
}

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok", "service": "depot-api" }))
}
