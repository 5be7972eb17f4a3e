//! # Axum Helpers
//!
//! A collection of utilities, middleware, and helpers for building Axum web
//! applications.
//!
//! ## Modules
//!
//! - **[`auth`]**: JWT issuance/validation, password hashing, bearer-token
//!   middleware with role gates
//! - **[`server`]**: Server setup, health endpoint, graceful shutdown
//! - **[`errors`]**: Structured error responses with error codes
//! - **[`extractors`]**: Custom extractors (UUID path, validated JSON)

// Domain modules
pub mod auth;
pub mod errors;
pub mod extractors;
pub mod server;

// Re-export auth types
pub use auth::{
    Argon2PasswordHasher, Claims, CurrentUser, JwtConfig, JwtTokenService, PasswordHashError,
    PasswordHasher, Role, TokenError, TokenService, TOKEN_TTL, require_admin, require_auth,
};

// Re-export server types
pub use server::{HealthResponse, create_app, create_router, health_router, shutdown_signal};

// Re-export error types
pub use errors::{AppError, ErrorCode, ErrorResponse};

// Re-export extractors
pub use extractors::{UuidPath, ValidatedJson};
