//! Configuration validation.

use crate::schema::{AuthMode, Config};

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// HS256 secrets shorter than the hash output weaken the signature.
const MIN_JWT_SECRET_LEN: usize = 32;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_auth(config, &mut result);
        Self::validate_relay(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port must be non-zero"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        } else if config.server.host == "0.0.0.0" {
            result.add_warning(ValidationWarning::new(
                "server.host",
                "Listening on all interfaces",
            ));
        }
    }

    fn validate_auth(config: &Config, result: &mut ValidationResult) {
        let auth = &config.auth;
        match auth.mode {
            AuthMode::Jwt => match auth.jwt_secret.as_deref() {
                None | Some("") => {
                    result.add_error(ValidationError::new(
                        "auth.jwt_secret",
                        "JWT secret is required when auth.mode = \"jwt\"",
                    ));
                }
                Some(secret) if secret.len() < MIN_JWT_SECRET_LEN => {
                    result.add_warning(ValidationWarning::new(
                        "auth.jwt_secret",
                        format!("JWT secret is shorter than {} bytes", MIN_JWT_SECRET_LEN),
                    ));
                }
                Some(_) => {}
            },
            AuthMode::Static => {
                if auth.static_tokens.is_empty() {
                    result.add_error(ValidationError::new(
                        "auth.static_tokens",
                        "At least one token is required when auth.mode = \"static\"",
                    ));
                }
                if auth.static_tokens.values().any(|user| user.is_empty()) {
                    result.add_error(ValidationError::new(
                        "auth.static_tokens",
                        "Token user cannot be empty",
                    ));
                }
                result.add_warning(ValidationWarning::new(
                    "auth.mode",
                    "Static tokens are intended for development only",
                ));
            }
        }

        if auth.user_claim.is_empty() {
            result.add_error(ValidationError::new("auth.user_claim", "Claim name cannot be empty"));
        }
    }

    fn validate_relay(config: &Config, result: &mut ValidationResult) {
        if config.relay.outbound_queue_capacity == 0 {
            result.add_error(ValidationError::new(
                "relay.outbound_queue_capacity",
                "Queue capacity must be at least 1",
            ));
        }

        if config.relay.max_message_bytes == 0 {
            result.add_warning(ValidationWarning::new(
                "relay.max_message_bytes",
                "Inbound message size is unlimited",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        if config.logging.level.trim().is_empty() {
            result.add_error(ValidationError::new("logging.level", "Log level cannot be empty"));
        }
    }
}
