//! Tasks API routes
//!
//! Wires the tasks domain to HTTP routes. The domain router applies the
//! bearer-token middleware to every route and the admin gate to delete.

use axum::Router;
use domain_tasks::{MongoTaskRepository, TaskService, handlers};

use crate::state::AppState;

/// Create the tasks router
pub fn router(state: &AppState) -> Router {
    let repository = MongoTaskRepository::new(state.db.clone());

    let service = TaskService::new(repository);

    handlers::router(service, state.tokens.clone())
}
