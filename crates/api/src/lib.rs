//! HTTP API layer with Axum routes.
//!
//! This crate provides:
//! - REST API routes for splits
//! - Request extractors
//! - Response envelope and error mapping

pub mod extractors;
pub mod response;
pub mod routes;

use axum::Router;
use splitter_core::SplitService;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    /// Split engine and store.
    pub splits: SplitService,
}

impl AppState {
    /// Creates state around an existing split service.
    #[must_use]
    pub fn new(splits: SplitService) -> Self {
        Self { splits }
    }

    /// Creates state backed by a fresh in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(SplitService::in_memory())
    }
}

/// Creates the main application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
