//! Process configuration, loaded once at startup from the environment.

use std::fmt;

/// Fallback signing secret for local development only.
const DEV_FALLBACK_SECRET: &str = "default_secret_key_change_me";

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_SESSION_TTL_HOURS: i64 = 24;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn parse(value: &str) -> Environment {
        match value.trim().to_ascii_lowercase().as_str() {
            "production" | "prod" => Environment::Production,
            _ => Environment::Development,
        }
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: String,
    pub database_url: String,
    /// Symmetric key used to sign and verify session tokens.
    pub session_secret: String,
    pub session_ttl: chrono::Duration,
    pub environment: Environment,
}

#[derive(Debug)]
pub enum ConfigError {
    MissingDatabaseUrl,
    MissingSessionSecret,
    InvalidSessionTtl(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::MissingDatabaseUrl => write!(f, "DATABASE_URL must be set"),
            ConfigError::MissingSessionSecret => {
                write!(f, "JWT_SECRET must be set when APP_ENV=production")
            }
            ConfigError::InvalidSessionTtl(raw) => {
                write!(f, "SESSION_TTL_HOURS is not a positive integer: {raw}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl Config {
    pub fn from_env() -> Result<Config, ConfigError> {
        let environment = Environment::parse(
            &std::env::var("APP_ENV").unwrap_or_else(|_| "development".into()),
        );

        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::MissingDatabaseUrl)?;

        let session_secret = resolve_secret(std::env::var("JWT_SECRET").ok(), environment)?;

        let session_ttl = match std::env::var("SESSION_TTL_HOURS") {
            Ok(raw) => {
                let hours: i64 = raw
                    .parse()
                    .ok()
                    .filter(|h| *h > 0)
                    .ok_or(ConfigError::InvalidSessionTtl(raw))?;
                chrono::Duration::hours(hours)
            }
            Err(_) => chrono::Duration::hours(DEFAULT_SESSION_TTL_HOURS),
        };

        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

        Ok(Config {
            bind_addr,
            database_url,
            session_secret,
            session_ttl,
            environment,
        })
    }
}

fn resolve_secret(
    raw: Option<String>,
    environment: Environment,
) -> Result<String, ConfigError> {
    match raw {
        Some(secret) if !secret.is_empty() => Ok(secret),
        _ if environment.is_production() => Err(ConfigError::MissingSessionSecret),
        _ => {
            tracing::warn!(
                "JWT_SECRET is not set; using the built-in development secret (insecure)"
            );
            Ok(DEV_FALLBACK_SECRET.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_production_aliases() {
        assert_eq!(Environment::parse("production"), Environment::Production);
        assert_eq!(Environment::parse("PROD"), Environment::Production);
        assert_eq!(Environment::parse("development"), Environment::Development);
        assert_eq!(Environment::parse(""), Environment::Development);
    }

    #[test]
    fn missing_secret_is_fatal_in_production() {
        let result = resolve_secret(None, Environment::Production);
        assert!(matches!(result, Err(ConfigError::MissingSessionSecret)));

        let result = resolve_secret(Some(String::new()), Environment::Production);
        assert!(matches!(result, Err(ConfigError::MissingSessionSecret)));
    }

    #[test]
    fn missing_secret_falls_back_in_development() {
        let secret = resolve_secret(None, Environment::Development).unwrap();
        assert_eq!(secret, DEV_FALLBACK_SECRET);
    }

    #[test]
    fn explicit_secret_wins_everywhere() {
        let secret = resolve_secret(Some("s3cret".into()), Environment::Production).unwrap();
        assert_eq!(secret, "s3cret");
    }
}
