/*
 * Responsibility
 * - load settings from the environment (PORT, DATABASE_URL, JWT secret, login pair, ...)
 * - validate them once at startup (missing or invalid values abort the process)
 * - the resulting Config is immutable and handed to every component that needs it
 */
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use url::Url;

pub const MIN_JWT_SECRET_LENGTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnv {
    Development,
    Production,
}

impl AppEnv {
    fn parse(value: Option<String>) -> Self {
        match value
            .unwrap_or_else(|| "development".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "production" | "prod" => Self::Production,
            _ => Self::Development,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    Missing(&'static str),
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Missing(key) => write!(f, "missing configuration: {}", key),
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Response shapes that differed between historical versions of the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResponseShapes {
    /// Include `description` in list items.
    pub list_item_description: bool,
    /// DELETE answers `200` with a message body instead of an empty `204`.
    pub delete_returns_body: bool,
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub app_env: AppEnv,
    pub public_base_url: Url,
    pub database_url: Option<String>,
    pub cors_allowed_origins: Vec<String>,

    pub sqids_min_length: usize,
    pub sqids_alphabet: String,

    pub jwt_secret: String,
    pub access_token_ttl_seconds: u64,
    pub auth_username: String,
    pub auth_password: String,

    pub response_shapes: ResponseShapes,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print secrets
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("app_env", &self.app_env)
            .field("public_base_url", &self.public_base_url.as_str())
            .field("database", &self.database_url.is_some())
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("access_token_ttl_seconds", &self.access_token_ttl_seconds)
            .field("response_shapes", &self.response_shapes)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_source<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let port: u16 = match get("PORT") {
            Some(s) => s.trim().parse().map_err(|_| ConfigError::Invalid("PORT"))?,
            None => 3000,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("PORT"))?;

        let app_env = AppEnv::parse(get("APP_ENV"));

        let public_base_url = get("PUBLIC_BASE_URL")
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| format!("http://localhost:{}", port));
        let public_base_url = Url::parse(public_base_url.trim())
            .ok()
            .filter(|u| !u.cannot_be_a_base())
            .ok_or(ConfigError::Invalid("PUBLIC_BASE_URL"))?;

        let database_url = get("DATABASE_URL").filter(|s| !s.trim().is_empty());

        let cors_allowed_origins = get("CORS_ALLOWED_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>();

        let sqids_min_length = get("SQIDS_MIN_LENGTH")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(10);

        let sqids_alphabet = get("SQIDS_ALPHABET").unwrap_or_else(|| {
            "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789".to_string()
        });

        let jwt_secret = get("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.len() < MIN_JWT_SECRET_LENGTH {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let access_token_ttl_seconds = get("ACCESS_TOKEN_TTL_SECONDS")
            .and_then(|v| v.parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(3600); // 1 hour

        let auth_username = get("AUTH_USERNAME")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("AUTH_USERNAME"))?;
        if auth_username.contains(':') {
            return Err(ConfigError::Invalid("AUTH_USERNAME"));
        }
        let auth_password = get("AUTH_PASSWORD")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::Missing("AUTH_PASSWORD"))?;

        let response_shapes = ResponseShapes {
            list_item_description: flag(get("LIST_ITEM_DESCRIPTION")),
            delete_returns_body: flag(get("DELETE_RETURNS_BODY")),
        };

        Ok(Self {
            addr,
            app_env,
            public_base_url,
            database_url,
            cors_allowed_origins,
            sqids_min_length,
            sqids_alphabet,
            jwt_secret,
            access_token_ttl_seconds,
            auth_username,
            auth_password,
            response_shapes,
        })
    }
}

fn flag(value: Option<String>) -> bool {
    matches!(
        value.as_deref().map(str::trim).map(str::to_ascii_lowercase).as_deref(),
        Some("1" | "true" | "yes" | "on")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn source(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    fn defaults_are_applied() {
        let config = Config::from_source(source(&[
            ("JWT_SECRET", SECRET),
            ("AUTH_USERNAME", "admin"),
            ("AUTH_PASSWORD", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.addr.port(), 3000);
        assert_eq!(config.public_base_url.as_str(), "http://localhost:3000/");
        assert_eq!(config.access_token_ttl_seconds, 3600);
        assert!(config.database_url.is_none());
        assert_eq!(config.response_shapes, ResponseShapes::default());
        assert!(!config.app_env.is_production());
    }

    #[test]
    fn short_secret_is_rejected() {
        let err = Config::from_source(source(&[
            ("JWT_SECRET", "short"),
            ("AUTH_USERNAME", "admin"),
            ("AUTH_PASSWORD", "secret"),
        ]))
        .unwrap_err();

        assert_eq!(err, ConfigError::Invalid("JWT_SECRET"));
    }

    #[test]
    fn login_pair_is_required() {
        let err = Config::from_source(source(&[("JWT_SECRET", SECRET)])).unwrap_err();
        assert_eq!(err, ConfigError::Missing("AUTH_USERNAME"));
    }

    #[test]
    fn shape_flags_are_parsed() {
        let config = Config::from_source(source(&[
            ("JWT_SECRET", SECRET),
            ("AUTH_USERNAME", "admin"),
            ("AUTH_PASSWORD", "secret"),
            ("LIST_ITEM_DESCRIPTION", "true"),
            ("DELETE_RETURNS_BODY", "1"),
            ("PORT", "8080"),
            ("APP_ENV", "prod"),
        ]))
        .unwrap();

        assert!(config.response_shapes.list_item_description);
        assert!(config.response_shapes.delete_returns_body);
        assert_eq!(config.addr.port(), 8080);
        assert!(config.app_env.is_production());
    }

    #[test]
    fn invalid_port_is_rejected() {
        let err = Config::from_source(source(&[
            ("JWT_SECRET", SECRET),
            ("AUTH_USERNAME", "admin"),
            ("AUTH_PASSWORD", "secret"),
            ("PORT", "http"),
        ]))
        .unwrap_err();

        assert_eq!(err, ConfigError::Invalid("PORT"));
    }
}
