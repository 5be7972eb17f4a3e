//! API routes module
//!
//! Wires the domain routers to their repositories and services.
//! Note: These are nested under /api by axum_helpers::create_router

pub mod auth;
pub mod tasks;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/auth", auth::router(state))
        .nest("/tasks", tasks::router(state))
}
