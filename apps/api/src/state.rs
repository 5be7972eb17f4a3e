//! Application state management.
//!
//! The shared state handed to the route builders: configuration, the
//! MongoDB handles, and the auth capabilities as trait objects. The store
//! client is constructed once in `main` and injected here; nothing in the
//! process reaches for a global connection.

use std::sync::Arc;

use axum_helpers::{PasswordHasher, TokenService};
use mongodb::{Client, Database};

/// Shared application state.
///
/// Cloning is cheap: the Mongo client shares its connection pool and the
/// auth capabilities are behind `Arc`s.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    /// MongoDB client (cloneable, shares underlying connection pool)
    pub mongo_client: Client,
    /// MongoDB database instance
    pub db: Database,
    /// Token issuance/validation capability
    pub tokens: Arc<dyn TokenService>,
    /// Password hashing capability
    pub hasher: Arc<dyn PasswordHasher>,
}
