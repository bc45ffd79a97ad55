use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Deployment environment, "local" or "prod". Selects the log format.
    pub env: String,
    pub database: DatabaseConfig,
    pub server: ServerConfig,
    pub token: TokenConfig,
    pub password: PasswordConfig,
    /// Applications seeded by the migrator.
    #[serde(default)]
    pub applications: Vec<ApplicationConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub grpc_port: u16,
    pub http_port: u16,
    pub request_timeout_ms: u64,
}

impl ServerConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct TokenConfig {
    pub ttl_seconds: i64,
}

impl TokenConfig {
    /// Token lifetime, which must be positive and representable.
    pub fn ttl(&self) -> Result<chrono::Duration, ConfigError> {
        if self.ttl_seconds <= 0 {
            return Err(ConfigError::Message(format!(
                "token.ttl_seconds must be positive, got {}",
                self.ttl_seconds
            )));
        }

        chrono::Duration::try_seconds(self.ttl_seconds).ok_or_else(|| {
            ConfigError::Message(format!(
                "token.ttl_seconds is out of range: {}",
                self.ttl_seconds
            ))
        })
    }
}

/// Argon2id cost parameters used for new password hashes.
#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

#[derive(Deserialize, Clone)]
pub struct ApplicationConfig {
    pub id: i32,
    pub name: String,
    pub secret: String,
}

impl std::fmt::Debug for ApplicationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationConfig")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("secret", &"***")
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (DATABASE__URL, TOKEN__TTL_SECONDS, etc.)
    /// 2. File named by CONFIG_PATH, if set
    /// 3. Environment-specific config file (config/{RUN_MODE}.toml)
    /// 4. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let mut builder = ConfigBuilder::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false));

        if let Ok(path) = env::var("CONFIG_PATH") {
            builder = builder.add_source(File::with_name(&path).required(true));
        }

        let configuration = builder
            // Example: DATABASE__URL=postgres://... overrides database.url
            .add_source(Environment::default().separator("__"))
            .build()?;

        let config: Config = configuration.try_deserialize()?;
        config.token.ttl()?;

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.env == "prod"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_ttl_accepts_positive_seconds() {
        let token = TokenConfig { ttl_seconds: 3600 };

        assert_eq!(token.ttl().unwrap(), chrono::Duration::hours(1));
    }

    #[test]
    fn test_token_ttl_rejects_zero_negative_and_huge_values() {
        for ttl_seconds in [0, -60, i64::MAX] {
            let token = TokenConfig { ttl_seconds };
            assert!(token.ttl().is_err(), "accepted ttl_seconds = {}", ttl_seconds);
        }
    }
}
