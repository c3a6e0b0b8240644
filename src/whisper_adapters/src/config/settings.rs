use std::path::PathBuf;
use std::time::Duration;

use axum::http::HeaderValue;
use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::{
    DEFAULT_CONFIG_DIR, DEFAULT_ENVIRONMENT, DEFAULT_JWT_COOKIE_NAME,
    DEFAULT_VERIFICATION_CODE_TTL_SECONDS, ENV_PREFIX, env,
};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub banned_tokens: BannedTokenSettings,
    pub postgres: Option<PostgresSettings>,
    pub redis: Option<RedisSettings>,
    pub email_client: EmailClientSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationSettings {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt: JwtSettings,
    #[serde(default)]
    pub allowed_origins: AllowedOrigins,
    /// Reject sign-in for accounts that never confirmed their code.
    #[serde(default)]
    pub require_verified_login: bool,
    #[serde(default = "default_verification_code_ttl")]
    pub verification_code_ttl_seconds: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    pub secret: Secret<String>,
    /// Seconds.
    pub time_to_live: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Postgres,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSettings {
    #[serde(default)]
    pub backend: StoreBackend,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannedTokenBackend {
    #[default]
    Memory,
    Redis,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BannedTokenSettings {
    #[serde(default)]
    pub backend: BannedTokenBackend,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PostgresSettings {
    pub url: Secret<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    pub host_name: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailBackend {
    #[default]
    Mock,
    Postmark,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EmailClientSettings {
    #[serde(default)]
    pub backend: EmailBackend,
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_in_millis: u64,
}

impl EmailClientSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_in_millis)
    }
}

/// Origins permitted to make credentialed cross-origin requests.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct AllowedOrigins(Vec<String>);

impl AllowedOrigins {
    pub fn new(origins: Vec<String>) -> Self {
        Self(origins)
    }

    pub fn contains(&self, origin: &HeaderValue) -> bool {
        self.0
            .iter()
            .any(|allowed| allowed.as_bytes() == origin.as_bytes())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn default_cookie_name() -> String {
    DEFAULT_JWT_COOKIE_NAME.to_owned()
}

fn default_verification_code_ttl() -> i64 {
    DEFAULT_VERIFICATION_CODE_TTL_SECONDS
}

impl Settings {
    /// Layer `base.json`, the environment file and `WHISPER__*` variables.
    ///
    /// The environment is picked by `APP_ENVIRONMENT` and defaults to `local`.
    /// Secrets may also be supplied through their conventional variables
    /// (`JWT_SECRET`, `DATABASE_URL`, ...), which win over every file.
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let config_dir = std::env::var(env::CONFIG_DIR_ENV_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIG_DIR));
        let environment = std::env::var(env::APP_ENVIRONMENT_ENV_VAR)
            .unwrap_or_else(|_| DEFAULT_ENVIRONMENT.to_owned());

        Self::load_from(config_dir, &environment)
    }

    pub fn load_from(config_dir: PathBuf, environment: &str) -> Result<Self, ConfigError> {
        let allowed_origins = std::env::var(env::ALLOWED_ORIGINS_ENV_VAR)
            .ok()
            .map(|origins| {
                origins
                    .split(',')
                    .map(|origin| origin.trim().to_owned())
                    .filter(|origin| !origin.is_empty())
                    .collect::<Vec<_>>()
            });

        Config::builder()
            .add_source(File::from(config_dir.join("base.json")).required(true))
            .add_source(File::from(config_dir.join(format!("{environment}.json"))).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__"),
            )
            .set_override_option("auth.jwt.secret", std::env::var(env::JWT_SECRET_ENV_VAR).ok())?
            .set_override_option("auth.allowed_origins", allowed_origins)?
            .set_override_option("postgres.url", std::env::var(env::DATABASE_URL_ENV_VAR).ok())?
            .set_override_option(
                "redis.host_name",
                std::env::var(env::REDIS_HOST_NAME_ENV_VAR).ok(),
            )?
            .set_override_option(
                "email_client.auth_token",
                std::env::var(env::POSTMARK_AUTH_TOKEN_ENV_VAR).ok(),
            )?
            .build()?
            .try_deserialize()
    }
}
