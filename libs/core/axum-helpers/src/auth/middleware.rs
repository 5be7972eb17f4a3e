use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use super::role::Role;
use super::token::TokenService;
use crate::errors::AppError;

/// Authenticated identity injected into request extensions by
/// [`require_auth`]. Request-scoped; nothing global is touched.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: Uuid,
    pub username: String,
    pub role: Role,
}

/// Bearer-token authentication middleware.
///
/// Rejects with 401 when the `Authorization` header is missing, is not of
/// the form `Bearer <token>`, or the token fails validation. On success the
/// resolved [`CurrentUser`] is inserted into request extensions and the
/// request continues to the next handler.
///
/// # Example
///
/// ```ignore
/// use axum::{middleware, routing::get, Router};
/// use axum_helpers::auth::require_auth;
///
/// let protected = Router::new()
///     .route("/tasks", get(list_tasks))
///     .route_layer(middleware::from_fn_with_state(tokens.clone(), require_auth));
/// ```
pub async fn require_auth(
    State(tokens): State<Arc<dyn TokenService>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let header_value = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("authorization header required".to_string()))?;

    let parts: Vec<&str> = header_value.split(' ').collect();
    if parts.len() != 2 || !parts[0].eq_ignore_ascii_case("bearer") {
        return Err(AppError::Unauthorized(
            "invalid authorization header format".to_string(),
        ));
    }

    let claims = tokens.validate(parts[1]).map_err(|e| {
        tracing::debug!("token validation failed: {}", e);
        AppError::Unauthorized(e.to_string())
    })?;

    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("invalid token claims".to_string()))?;

    request.extensions_mut().insert(CurrentUser {
        id,
        username: claims.username,
        role: claims.role,
    });

    Ok(next.run(request).await)
}

/// Role gate, composed after [`require_auth`] on specific routes.
///
/// Responds 403 when the authenticated role does not match, and 401 when no
/// [`CurrentUser`] is present (the auth middleware did not run).
pub async fn require_role(role: Role, request: Request, next: Next) -> Result<Response, AppError> {
    match request.extensions().get::<CurrentUser>() {
        None => Err(AppError::Unauthorized(
            "authentication required".to_string(),
        )),
        Some(user) if user.role != role => {
            tracing::debug!(user_id = %user.id, have = %user.role, want = %role, "role mismatch");
            Err(AppError::Forbidden(format!("{} role required", role)))
        }
        Some(_) => Ok(next.run(request).await),
    }
}

/// Restrict a route to admin users.
pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    require_role(Role::Admin, request, next).await
}
