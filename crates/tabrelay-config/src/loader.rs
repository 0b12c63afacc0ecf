//! Configuration loader.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::schema::Config;

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a file, or fall back to defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        match Self::load(path) {
            Err(ConfigError::NotFound(_)) => Ok(Config::default()),
            other => other,
        }
    }

    /// Load configuration from a string.
    ///
    /// `${VAR}` references are expanded inside string values only, so
    /// comments never need their variables set.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let mut value: toml::Value = toml::from_str(content)?;
        Self::expand_value(&mut value)?;
        let mut config: Config = value.try_into()?;
        config.logging.directory =
            PathBuf::from(Self::expand_path(&config.logging.directory.to_string_lossy()));
        Ok(config)
    }

    fn expand_value(value: &mut toml::Value) -> Result<(), ConfigError> {
        match value {
            toml::Value::String(s) if s.contains("${") => {
                *s = Self::expand_env_vars(s)?;
            }
            toml::Value::Array(items) => {
                for item in items.iter_mut() {
                    Self::expand_value(item)?;
                }
            }
            toml::Value::Table(table) => {
                for (_, item) in table.iter_mut() {
                    Self::expand_value(item)?;
                }
            }
            _ => {}
        }
        Ok(())
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();
        let re = regex::Regex::new(r"\$\{([^}]+)\}")
            .map_err(|e| ConfigError::InvalidFormat(e.to_string()))?;

        for cap in re.captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.tabrelay`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::AuthMode;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_basic_config() {
        let content = r#"
            [server]
            host = "0.0.0.0"
            port = 3000
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_full_config() {
        let content = r#"
            [server]
            host = "localhost"
            port = 9000

            [auth]
            mode = "static"
            [auth.static_tokens]
            "dev-token" = "alice"

            [relay]
            send_timeout_ms = 2000
            outbound_queue_capacity = 16
            max_message_bytes = 0

            [logging]
            level = "debug"
            file = false
            directory = "/var/log/tabrelay"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.host, "localhost");
        assert_eq!(config.auth.mode, AuthMode::Static);
        assert_eq!(config.auth.static_tokens["dev-token"], "alice");
        assert_eq!(config.relay.send_timeout_ms, 2000);
        assert_eq!(config.relay.outbound_queue_capacity, 16);
        assert_eq!(config.relay.max_message_bytes, 0);
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.file);
        assert_eq!(config.logging.directory, PathBuf::from("/var/log/tabrelay"));
    }

    #[test]
    fn test_load_expands_log_directory() {
        let content = r#"
            [logging]
            directory = "~/relay-logs"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert!(!config.logging.directory.to_string_lossy().starts_with('~'));
        assert!(config.logging.directory.ends_with("relay-logs"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]").unwrap();
        writeln!(file, "port = 5000").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/config.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_nonexistent_file() {
        let config =
            ConfigLoader::load_or_default(Path::new("/nonexistent/path/config.toml")).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_load_or_default_propagates_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid = [unclosed").unwrap();

        let result = ConfigLoader::load_or_default(file.path());
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let content = "invalid = [unclosed";
        let result = ConfigLoader::load_str(content);
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("TABRELAY_TEST_SECRET_VAR", "s3cret");
        }
        let content = r#"
            [auth]
            jwt_secret = "${TABRELAY_TEST_SECRET_VAR}"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.auth.jwt_secret.as_deref(), Some("s3cret"));
        unsafe {
            std::env::remove_var("TABRELAY_TEST_SECRET_VAR");
        }
    }

    #[test]
    fn test_commented_env_var_is_ignored() {
        let content = r#"
            # jwt_secret = "${NONEXISTENT_TABRELAY_VAR_67890}"
            [server]
            port = 9000
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.port, 9000);
    }

    #[test]
    fn test_unset_env_var_in_value_fails() {
        let content = r#"
            [auth]
            jwt_secret = "${NONEXISTENT_TABRELAY_VAR_67890}"
        "#;
        let result = ConfigLoader::load_str(content);
        assert!(matches!(
            result,
            Err(ConfigError::EnvVarNotSet(name)) if name == "NONEXISTENT_TABRELAY_VAR_67890"
        ));
    }

    #[test]
    fn test_env_var_in_nested_table() {
        // SAFETY: This test runs in isolation and sets a unique test-only env var
        unsafe {
            std::env::set_var("TABRELAY_TEST_TOKEN_USER", "alice");
        }
        let content = r#"
            [auth.static_tokens]
            dev = "${TABRELAY_TEST_TOKEN_USER}"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.auth.static_tokens.get("dev").map(String::as_str), Some("alice"));
        unsafe {
            std::env::remove_var("TABRELAY_TEST_TOKEN_USER");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${NONEXISTENT_TABRELAY_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(_))));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_no_tilde() {
        let path = "/usr/local/bin";
        assert_eq!(ConfigLoader::expand_path(path), path);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/test");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/test"));
    }
}
