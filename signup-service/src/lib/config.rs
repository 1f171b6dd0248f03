use std::env;
use std::time::Duration;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    #[serde(default)]
    pub password: PasswordConfig,
    #[serde(default)]
    pub signup: SignUpConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub http_port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PasswordConfig {
    /// Argon2 time cost used for new hashes.
    pub work_factor: u32,
    /// Upper bound on a single hashing operation.
    pub hash_timeout_ms: u64,
}

impl PasswordConfig {
    pub fn hash_timeout(&self) -> Duration {
        Duration::from_millis(self.hash_timeout_ms)
    }
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            work_factor: auth::password::DEFAULT_WORK_FACTOR,
            hash_timeout_ms: 10_000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct SignUpConfig {
    /// Also enforce the username length and email format rules server-side.
    pub strict_validation: bool,
}

/// Prefix for environment overrides, e.g. `APP__PASSWORD__WORK_FACTOR=10`.
pub const ENV_PREFIX: &str = "APP";

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (APP__SERVER__HTTP_PORT, APP__PASSWORD__WORK_FACTOR, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(Self::environment())
    }

    fn environment() -> Environment {
        // APP__SECTION__KEY maps to section.key
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with(environment: Environment) -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on environment variables
            .add_source(environment)
            .build()?;

        let config: Config = configuration.try_deserialize()?;

        Ok(config)
    }
}
