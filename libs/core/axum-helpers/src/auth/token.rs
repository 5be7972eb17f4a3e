use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::config::JwtConfig;
use super::role::Role;

/// Token time-to-live: fixed 24 hours, no refresh mechanism.
pub const TOKEN_TTL: i64 = 86_400;

/// JWT claims structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username at issuance time
    pub username: String,
    /// Role claim, deserialized into the closed [`Role`] enum
    pub role: Role,
    /// Expiration time (unix seconds)
    pub exp: i64,
    /// Issued at (unix seconds)
    pub iat: i64,
}

/// Errors from token issuance and validation
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("invalid token: {0}")]
    Invalid(#[source] jsonwebtoken::errors::Error),
}

/// Capability interface for issuing and validating identity tokens.
///
/// Implementations must be pure and stateless so the service can be shared
/// freely between concurrent request handlers.
pub trait TokenService: Send + Sync {
    /// Encode and sign claims for the given identity.
    fn issue(&self, user_id: &str, username: &str, role: Role) -> Result<String, TokenError>;

    /// Verify a token and return its claims.
    ///
    /// Succeeds only for a genuinely valid token: HMAC family signature,
    /// unexpired, structurally well-formed claims.
    fn validate(&self, token: &str) -> Result<Claims, TokenError>;
}

/// HS256-signed JWT implementation of [`TokenService`].
#[derive(Clone)]
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtTokenService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
        }
    }

    fn create_token(
        &self,
        user_id: &str,
        username: &str,
        role: Role,
        ttl_seconds: i64,
    ) -> Result<String, TokenError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            username: username.to_string(),
            role,
            exp: (now + Duration::seconds(ttl_seconds)).timestamp(),
            iat: now.timestamp(),
        };

        let header = Header {
            alg: Algorithm::HS256,
            ..Default::default()
        };

        encode(&header, &claims, &self.encoding_key).map_err(TokenError::Signing)
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: &str, username: &str, role: Role) -> Result<String, TokenError> {
        self.create_token(user_id, username, role, TOKEN_TTL)
    }

    fn validate(&self, token: &str) -> Result<Claims, TokenError> {
        // Pinning the algorithm rejects tokens signed with anything outside
        // the expected HMAC family (algorithm-confusion defence). Expiry is
        // checked by the library against the `exp` claim.
        let validation = Validation::new(Algorithm::HS256);

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(TokenError::Invalid)?;

        Ok(token_data.claims)
    }
}
