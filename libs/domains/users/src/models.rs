use axum_helpers::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// User entity as stored.
///
/// Carries the argon2 PHC hash, never a plaintext password. Outward
/// responses use [`UserResponse`] instead, so the hash stays inside the
/// repository/service layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier (stored as _id in MongoDB)
    #[serde(rename = "_id", alias = "id")]
    pub id: Uuid,
    /// Globally unique username
    pub username: String,
    /// Argon2 PHC string
    pub password_hash: String,
    /// Role claim carried into issued tokens
    pub role: Role,
}

impl User {
    /// Build a stored user from already-hashed credentials, generating its id.
    pub fn new(username: String, password_hash: String, role: Role) -> Self {
        Self {
            id: Uuid::now_v7(),
            username,
            password_hash,
            role,
        }
    }
}

/// DTO for registration
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 50))]
    pub username: String,
    /// Plaintext password, transient on the wire only
    #[validate(length(min = 8))]
    pub password: String,
    /// Defaults to the regular user role when omitted
    #[serde(default)]
    pub role: Role,
}

/// DTO for login
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1))]
    pub username: String,
    #[validate(length(min = 1))]
    pub password: String,
}

/// DTO for user responses; no password field exists here
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            role: user.role,
        }
    }
}

/// Successful login payload: the user plus a signed bearer token
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: UserResponse,
    pub token: String,
}
