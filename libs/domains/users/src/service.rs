//! User Service - Business logic layer

use std::sync::Arc;

use axum_helpers::{PasswordHasher, TokenService};
use tracing::instrument;
use validator::Validate;

use crate::error::{UserError, UserResult};
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, User, UserResponse};
use crate::repository::UserRepository;

/// User service providing registration and login.
///
/// Holds the hashing and token capabilities as trait objects so the
/// composition root can swap implementations without touching this layer.
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: Arc<dyn TokenService>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(
        repository: R,
        hasher: Arc<dyn PasswordHasher>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            hasher,
            tokens,
        }
    }

    /// Register a new user.
    ///
    /// Validates the payload, hashes the password, and stores the user. The
    /// response carries no password material.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn register(&self, input: RegisterRequest) -> UserResult<UserResponse> {
        input
            .validate()
            .map_err(|e| UserError::Validation(e.to_string()))?;

        let password_hash = self
            .hasher
            .hash(&input.password)
            .map_err(|e| UserError::PasswordHash(e.to_string()))?;

        let user = User::new(input.username, password_hash, input.role);
        let created = self.repository.create(user).await?;

        Ok(created.into())
    }

    /// Log a user in, issuing a bearer token on success.
    ///
    /// Unknown username and wrong password both collapse into the same
    /// `InvalidCredentials`, so callers cannot probe for account existence.
    #[instrument(skip(self, input), fields(username = %input.username))]
    pub async fn login(&self, input: LoginRequest) -> UserResult<LoginResponse> {
        let user = self
            .repository
            .get_by_username(&input.username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        self.hasher
            .verify(&user.password_hash, &input.password)
            .map_err(|_| UserError::InvalidCredentials)?;

        let token = self
            .tokens
            .issue(&user.id.to_string(), &user.username, user.role)
            .map_err(|e| {
                tracing::error!("Failed to issue token: {}", e);
                UserError::Token(e.to_string())
            })?;

        Ok(LoginResponse {
            user: user.into(),
            token,
        })
    }
}

impl<R: UserRepository> Clone for UserService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
            hasher: Arc::clone(&self.hasher),
            tokens: Arc::clone(&self.tokens),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryUserRepository, MockUserRepository};
    use axum_helpers::{Argon2PasswordHasher, JwtConfig, JwtTokenService, Role};

    fn hasher() -> Arc<dyn PasswordHasher> {
        Arc::new(Argon2PasswordHasher::new())
    }

    fn tokens() -> Arc<dyn TokenService> {
        Arc::new(JwtTokenService::new(&JwtConfig::new(
            "test-secret-key-with-at-least-32-chars",
        )))
    }

    fn service<R: UserRepository>(repository: R) -> UserService<R> {
        UserService::new(repository, hasher(), tokens())
    }

    fn register_input(username: &str, password: &str, role: Role) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            password: password.to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_register_hashes_password_before_storage() {
        let mut repo = MockUserRepository::new();
        repo.expect_create().returning(|user| {
            assert!(user.password_hash.starts_with("$argon2"));
            assert_ne!(user.password_hash, "correct horse");
            Ok(user)
        });

        let result = service(repo)
            .register(register_input("alice", "correct horse", Role::User))
            .await
            .unwrap();

        assert_eq!(result.username, "alice");
        assert_eq!(result.role, Role::User);
    }

    #[tokio::test]
    async fn test_register_with_short_password_never_reaches_repository() {
        // No expectations set: any repository call would panic
        let result = service(MockUserRepository::new())
            .register(register_input("alice", "passwor", Role::User))
            .await;

        assert!(matches!(result, Err(UserError::Validation(_))));
    }

    #[tokio::test]
    async fn test_register_conflict_propagates_unchanged() {
        let mut repo = MockUserRepository::new();
        repo.expect_create()
            .returning(|user| Err(UserError::UsernameTaken(user.username)));

        let result = service(repo)
            .register(register_input("alice", "password", Role::User))
            .await;

        assert!(matches!(result, Err(UserError::UsernameTaken(name)) if name == "alice"));
    }

    #[tokio::test]
    async fn test_login_round_trip_issues_valid_token() {
        let service = service(InMemoryUserRepository::new());
        service
            .register(register_input("alice", "password", Role::Admin))
            .await
            .unwrap();

        let response = service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "password".to_string(),
            })
            .await
            .unwrap();

        let claims = tokens().validate(&response.token).unwrap();
        assert_eq!(claims.sub, response.user.id.to_string());
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Admin);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_username_fail_identically() {
        let service = service(InMemoryUserRepository::new());
        service
            .register(register_input("alice", "password", Role::User))
            .await
            .unwrap();

        let wrong_password = service
            .login(LoginRequest {
                username: "alice".to_string(),
                password: "password1".to_string(),
            })
            .await;
        let unknown_username = service
            .login(LoginRequest {
                username: "bob".to_string(),
                password: "password".to_string(),
            })
            .await;

        assert!(matches!(wrong_password, Err(UserError::InvalidCredentials)));
        assert!(matches!(unknown_username, Err(UserError::InvalidCredentials)));
    }
}
