use std::net::SocketAddr;
use std::time::Duration;

use axum::http::HeaderValue;
use thiserror::Error;

pub const CLIENT_ID_VAR: &str = "GITHUB_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "GITHUB_CLIENT_SECRET";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
const DEFAULT_ALLOWED_ORIGIN: &str = "https://www.youryearincode.com";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),
    #[error("BIND_ADDR is not a valid socket address: {0}")]
    InvalidBindAddr(String),
    #[error("GITHUB_TOKEN_URL is not a valid URL: {0}")]
    InvalidTokenUrl(String),
    #[error("ALLOWED_ORIGIN is not a valid header value: {0}")]
    InvalidOrigin(String),
    #[error("UPSTREAM_TIMEOUT_SECS must be a positive integer, got {0:?}")]
    InvalidTimeout(String),
}

#[derive(Clone)]
pub struct AppConfig {
    pub client_id: String,
    pub client_secret: String,
    pub bind_addr: SocketAddr,
    pub token_url: reqwest::Url,
    pub allowed_origin: HeaderValue,
    pub upstream_timeout: Duration,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("bind_addr", &self.bind_addr)
            .field("token_url", &self.token_url.as_str())
            .field("allowed_origin", &self.allowed_origin)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl AppConfig {
    /// Reads the configuration from the process environment, after loading a
    /// `.env` file from the working directory if one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        use dotenvy::dotenv;
        use std::env;

        dotenv().ok();

        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        // Empty optional values fall back to their defaults.
        let optional = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let client_secret = required(CLIENT_SECRET_VAR)?;
        let client_id = required(CLIENT_ID_VAR)?;

        let bind_addr = optional("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr: SocketAddr = bind_addr
            .parse()
            .map_err(|_| ConfigError::InvalidBindAddr(bind_addr))?;

        let token_url = optional("GITHUB_TOKEN_URL").unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string());
        let token_url = reqwest::Url::parse(&token_url)
            .map_err(|e| ConfigError::InvalidTokenUrl(format!("{token_url}: {e}")))?;

        let allowed_origin =
            optional("ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());
        let allowed_origin = HeaderValue::from_str(&allowed_origin)
            .map_err(|_| ConfigError::InvalidOrigin(allowed_origin))?;

        let upstream_timeout = match optional("UPSTREAM_TIMEOUT_SECS") {
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => return Err(ConfigError::InvalidTimeout(raw)),
            },
        };

        Ok(Self {
            client_id,
            client_secret,
            bind_addr,
            token_url,
            allowed_origin,
            upstream_timeout,
        })
    }
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub http_client: reqwest::Client,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let http_client = reqwest::Client::builder()
            .timeout(config.upstream_timeout)
            .build()?;

        Ok(Self {
            config,
            http_client,
        })
    }
}
