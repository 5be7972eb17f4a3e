//! Auth API routes
//!
//! Wires the users domain to HTTP routes.

use axum::Router;
use domain_users::{MongoUserRepository, UserService, handlers};

use crate::state::AppState;

/// Create the auth router
pub fn router(state: &AppState) -> Router {
    let repository = MongoUserRepository::new(state.db.clone());

    let service = UserService::new(repository, state.hasher.clone(), state.tokens.clone());

    handlers::router(service)
}

/// Create the unique username index at startup
pub async fn init_indexes(db: &mongodb::Database) -> eyre::Result<()> {
    MongoUserRepository::new(db.clone())
        .ensure_indexes()
        .await
        .map_err(|e| eyre::eyre!("Failed to create user indexes: {}", e))?;
    Ok(())
}
