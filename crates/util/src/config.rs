use std::{env, fmt, net::SocketAddr};

use url::Url;

use super::{server_bind_address, DEFAULT_COMPANY_SLUG, DEFAULT_HIRELOOM_BASE_URL};

/// Application runtime environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    fn from_str(value: &str) -> Result<Self, ConfigError> {
        match value {
            "development" | "dev" => Ok(Self::Development),
            "production" | "prod" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            other => Err(ConfigError::InvalidEnvironment(other.to_string())),
        }
    }

    /// Returns `true` when the current environment should behave as development.
    pub fn is_development(self) -> bool {
        matches!(self, Self::Development)
    }

    /// Returns the canonical name used for logging/metrics labels.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Development => "development",
            Self::Production => "production",
            Self::Test => "test",
        }
    }
}

/// Upstream recruiting API settings.
#[derive(Debug, Clone)]
pub struct HireloomConfig {
    pub base_url: Url,
    pub company_slug: String,
}

/// Runtime configuration resolved from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub environment: Environment,
    pub hireloom: HireloomConfig,
}

impl AppConfig {
    /// Constructs the configuration by reading and validating environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        let env_value = env::var("APP_ENV").unwrap_or_else(|_| "development".to_string());
        let environment = Environment::from_str(&env_value)?;
        let bind_addr = server_bind_address().map_err(ConfigError::BindAddress)?;

        let base_value = env::var("HIRELOOM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_HIRELOOM_BASE_URL.to_string());
        let base_url = parse_base_url(&base_value)?;
        let company_slug =
            env::var("COMPANY_SLUG").unwrap_or_else(|_| DEFAULT_COMPANY_SLUG.to_string());

        Ok(Self {
            bind_addr,
            environment,
            hireloom: HireloomConfig {
                base_url,
                company_slug,
            },
        })
    }
}

/// Parses the upstream base URL, normalizing it to end with `/`.
///
/// `Url::join` drops the last path segment of a base that lacks a trailing
/// slash, so the slash is appended here rather than at every call site.
fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let normalized = if value.ends_with('/') {
        value.to_string()
    } else {
        format!("{value}/")
    };
    normalized.parse().map_err(ConfigError::InvalidBaseUrl)
}

/// Errors that can occur during configuration loading.
#[derive(Debug)]
pub enum ConfigError {
    InvalidEnvironment(String),
    BindAddress(std::net::AddrParseError),
    InvalidBaseUrl(url::ParseError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEnvironment(value) => write!(
                f,
                "APP_ENV must be one of 'development', 'production', or 'test' (got {value})"
            ),
            Self::BindAddress(err) => write!(f, "invalid APP_BIND_ADDR value: {err}"),
            Self::InvalidBaseUrl(err) => write!(f, "invalid HIRELOOM_BASE_URL value: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {}
