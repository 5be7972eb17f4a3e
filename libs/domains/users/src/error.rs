use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("username '{0}' is already taken")]
    UsernameTaken(String),

    /// Single kind for every credential failure. Unknown username and wrong
    /// password are indistinguishable from the outside.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Token signing error: {0}")]
    Token(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Request timeout: {0}")]
    Timeout(String),
}

pub type UserResult<T> = Result<T, UserError>;

/// Convert UserError to AppError for standardized error responses
impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::UsernameTaken(username) => {
                AppError::Conflict(format!("username '{}' is already taken", username))
            }
            UserError::InvalidCredentials => {
                AppError::Unauthorized("invalid username or password".to_string())
            }
            UserError::Validation(msg) => AppError::BadRequest(msg),
            UserError::PasswordHash(msg) => {
                AppError::InternalServerError(format!("Password hashing error: {}", msg))
            }
            UserError::Token(msg) => {
                AppError::InternalServerError(format!("Token signing error: {}", msg))
            }
            UserError::Database(msg) => {
                AppError::InternalServerError(format!("Database error: {}", msg))
            }
            UserError::Timeout(msg) => AppError::ServiceUnavailable(format!("Timeout: {}", msg)),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<mongodb::error::Error> for UserError {
    fn from(err: mongodb::error::Error) -> Self {
        UserError::Database(err.to_string())
    }
}
