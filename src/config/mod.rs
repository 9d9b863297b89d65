use std::env;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_timeout_secs: u64,
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// `API_SECRET` and `DATABASE_URL` are required and their absence is a
    /// startup failure; everything else has per-environment defaults that
    /// individual env vars may override.
    pub fn from_env() -> Result<Self, ConfigError> {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let jwt_secret = env::var("API_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() {
            return Err(ConfigError::MissingVar("API_SECRET"));
        }

        let url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;

        let defaults = Self::defaults_for(environment);

        Ok(Self {
            environment,
            server: ServerConfig { port: 8080 },
            database: DatabaseConfig {
                url,
                max_connections: defaults.max_connections,
                connect_timeout_secs: defaults.connect_timeout_secs,
            },
            security: SecurityConfig {
                jwt_secret,
                token_ttl_minutes: defaults.token_ttl_minutes,
            },
        }
        .with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = env::var("PAW_API_PORT").or_else(|_| env::var("PORT")) {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECT_TIMEOUT") {
            self.database.connect_timeout_secs =
                v.parse().unwrap_or(self.database.connect_timeout_secs);
        }
        if let Ok(v) = env::var("TOKEN_TTL_MINUTES") {
            self.security.token_ttl_minutes =
                v.parse().unwrap_or(self.security.token_ttl_minutes);
        }
        self
    }

    fn defaults_for(environment: Environment) -> EnvironmentDefaults {
        match environment {
            Environment::Development => EnvironmentDefaults {
                max_connections: 10,
                connect_timeout_secs: 30,
                token_ttl_minutes: 120,
            },
            Environment::Staging => EnvironmentDefaults {
                max_connections: 20,
                connect_timeout_secs: 10,
                token_ttl_minutes: 120,
            },
            Environment::Production => EnvironmentDefaults {
                max_connections: 50,
                connect_timeout_secs: 5,
                token_ttl_minutes: 60,
            },
        }
    }
}

struct EnvironmentDefaults {
    max_connections: u32,
    connect_timeout_secs: u64,
    token_ttl_minutes: i64,
}
