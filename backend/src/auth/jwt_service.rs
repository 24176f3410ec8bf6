use crate::repository::SessionRepository;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// JWT-related errors
#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token validation failed: {0}")]
    TokenValidation(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Session not found")]
    SessionNotFound,

    #[error("Session lookup failed: {0}")]
    SessionLookup(#[from] sqlx::Error),
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        match err.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::TokenExpired,
            _ => JwtError::TokenValidation(err.to_string()),
        }
    }
}

/// JWT Claims structure. Tokens issued by the sign-in flow only carry
/// `userId` and `iat`; `exp` and `jti` are honoured when present.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub iat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jti: Option<String>,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret_key: String,
    pub algorithm: Algorithm,
}

impl JwtConfig {
    pub fn new(secret_key: impl Into<String>) -> Self {
        Self {
            secret_key: secret_key.into(),
            algorithm: Algorithm::HS256,
        }
    }
}

/// Verifies bearer tokens and the sessions backing them.
#[derive(Clone)]
pub struct JwtService {
    config: JwtConfig,
    sessions: Arc<dyn SessionRepository>,
}

impl JwtService {
    pub fn new(config: JwtConfig, sessions: Arc<dyn SessionRepository>) -> Self {
        Self { config, sessions }
    }

    /// Validate token signature and expiry, then require a live session.
    pub async fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = self.decode_token(token)?;

        if !self.sessions.session_exists(token).await? {
            return Err(JwtError::SessionNotFound);
        }

        debug!(user_id = claims.user_id, "Token validated");

        Ok(claims)
    }

    fn decode_token(&self, token: &str) -> Result<Claims, JwtError> {
        let mut validation = Validation::new(self.config.algorithm);
        // `exp` is optional; it is still checked when the token carries one.
        validation.required_spec_claims.clear();

        let decoding_key = DecodingKey::from_secret(self.config.secret_key.as_bytes());
        let token_data = decode::<Claims>(token, &decoding_key, &validation)?;

        Ok(token_data.claims)
    }
}

/// Token issuing lives in the sign-in flow; tests sign their own.
#[cfg(test)]
impl JwtService {
    pub fn sign(&self, claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
        let encoding_key =
            jsonwebtoken::EncodingKey::from_secret(self.config.secret_key.as_bytes());
        jsonwebtoken::encode(
            &jsonwebtoken::Header::new(self.config.algorithm),
            claims,
            &encoding_key,
        )
    }

    /// Signs a fresh `{userId, iat, jti}` token. The caller stores the session.
    pub fn generate_token(&self, user_id: i32) -> Result<String, jsonwebtoken::errors::Error> {
        self.sign(&Claims {
            user_id,
            iat: chrono::Utc::now().timestamp(),
            exp: None,
            jti: Some(uuid::Uuid::new_v4().to_string()),
        })
    }
}
