//! Token verifiers.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde_json::{Map, Value};

use tabrelay_config::{AuthConfig, AuthMode, ConfigError};
use tabrelay_protocols::{AuthError, UserId};

#[cfg(test)]
#[path = "verifier_tests.rs"]
mod tests;

/// Resolves a bearer token to the user it was issued for.
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<UserId, AuthError>;
}

/// Verifies HS256 JWTs issued by the assistant's login endpoint.
///
/// The user identity is read from the configured claim, falling back to `sub`.
pub struct JwtVerifier {
    key: DecodingKey,
    validation: Validation,
    user_claim: String,
}

impl JwtVerifier {
    pub fn hs256(secret: &[u8], user_claim: impl Into<String>) -> Self {
        Self {
            key: DecodingKey::from_secret(secret),
            validation: Validation::new(Algorithm::HS256),
            user_claim: user_claim.into(),
        }
    }
}

#[async_trait]
impl TokenVerifier for JwtVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        let data = decode::<Map<String, Value>>(token, &self.key, &self.validation)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        data.claims
            .get(&self.user_claim)
            .or_else(|| data.claims.get("sub"))
            .and_then(Value::as_str)
            .filter(|user| !user.is_empty())
            .map(UserId::from)
            .ok_or_else(|| AuthError::MissingClaim(self.user_claim.clone()))
    }
}

/// Fixed token -> user table.
#[derive(Default)]
pub struct StaticTokenVerifier {
    tokens: HashMap<String, UserId>,
}

impl StaticTokenVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(mut self, token: impl Into<String>, user: impl Into<UserId>) -> Self {
        self.tokens.insert(token.into(), user.into());
        self
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

impl From<&HashMap<String, String>> for StaticTokenVerifier {
    fn from(table: &HashMap<String, String>) -> Self {
        Self {
            tokens: table
                .iter()
                .map(|(token, user)| (token.clone(), UserId::from(user.as_str())))
                .collect(),
        }
    }
}

#[async_trait]
impl TokenVerifier for StaticTokenVerifier {
    async fn verify(&self, token: &str) -> Result<UserId, AuthError> {
        self.tokens.get(token).cloned().ok_or(AuthError::UnknownToken)
    }
}

/// Build the verifier selected by `[auth]`.
pub fn verifier_from_config(config: &AuthConfig) -> Result<Arc<dyn TokenVerifier>, ConfigError> {
    match config.mode {
        AuthMode::Jwt => {
            let secret = config
                .jwt_secret
                .as_deref()
                .filter(|s| !s.is_empty())
                .ok_or_else(|| ConfigError::Invalid("auth.jwt_secret is not set".to_string()))?;
            Ok(Arc::new(JwtVerifier::hs256(secret.as_bytes(), &config.user_claim)))
        }
        AuthMode::Static => {
            if config.static_tokens.is_empty() {
                return Err(ConfigError::Invalid("auth.static_tokens is empty".to_string()));
            }
            Ok(Arc::new(StaticTokenVerifier::from(&config.static_tokens)))
        }
    }
}
