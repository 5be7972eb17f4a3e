use std::sync::Arc;

use axum_helpers::server::{create_app, health_router};
use axum_helpers::{Argon2PasswordHasher, JwtTokenService, PasswordHasher, TokenService};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output
    install_color_eyre();

    // Load configuration from environment variables; a missing signing
    // secret or store URL aborts startup here
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.environment);

    info!("Connecting to MongoDB at {}", config.mongodb.url());

    // Connect to MongoDB with retry
    let mongo_client =
        database::mongodb::connect_from_config_with_retry(&config.mongodb, None).await?;

    let db = mongo_client.database(config.mongodb.database());

    info!(
        "Successfully connected to MongoDB database: {}",
        config.mongodb.database()
    );

    // The unique username index backs the repository's conflict reporting
    api::auth::init_indexes(&db).await?;

    // Auth capabilities, shared by the middleware and the user service
    let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(&config.jwt));
    let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());

    let state = AppState {
        config,
        mongo_client,
        db,
        tokens,
        hasher,
    };

    // Build router with API routes
    let api_routes = api::routes(&state);

    // Create a router with OpenAPI docs
    let router = axum_helpers::create_router::<openapi::ApiDoc>(api_routes);

    // Merge health endpoint
    let app = router.merge(health_router(state.config.app));

    info!("Starting Taskboard API");

    create_app(app, &state.config.server).await?;

    info!("Taskboard API shutdown complete");
    Ok(())
}
