use std::{env, path::PathBuf};

use thiserror::Error;

/// Development-only signing secret used when `JWT_SECRET` is absent in local mode.
pub const LOCAL_JWT_SECRET: &str = "ebms-local-development-secret-not-for-production";

/// Minimum accepted length of a production signing secret.
pub const MIN_SECRET_LEN: usize = 32;

/// Longest accepted credential lifetime, one year.
pub const MAX_TOKEN_TTL_SECS: i64 = 365 * 24 * 60 * 60;

const DEFAULT_TOKEN_TTL_SECS: i64 = 24 * 60 * 60;
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_FRONTEND_URL: &str = "http://localhost:3000";

/// AppConfig
///
/// Holds the gateway's entire configuration. It is immutable once loaded and
/// reaches handlers through the application state via `FromRef`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    // Runtime environment marker. Controls log format and demo account seeding.
    pub env: Env,
    // HS256 secret used to sign and verify credentials.
    pub jwt_secret: String,
    // Lifetime of a freshly issued credential, in seconds.
    pub token_ttl_secs: i64,
    // TCP port the HTTP server binds on 0.0.0.0.
    pub port: u16,
    // Single origin allowed by CORS (the dashboard frontend).
    pub frontend_url: String,
    // Optional JSON route file replacing the built-in endpoint catalog.
    pub routes_file: Option<PathBuf>,
}

/// Env
///
/// Runtime context. `Local` enables development conveniences (fallback secret,
/// demo accounts, pretty logs); `Production` requires every secret explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Env {
    Local,
    Production,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{0} must be set in production")]
    Missing(&'static str),

    #[error("{name} is invalid: {reason}")]
    Invalid { name: &'static str, reason: String },
}

impl Default for AppConfig {
    /// Safe values for tests; reads nothing from the environment.
    fn default() -> Self {
        Self {
            env: Env::Local,
            jwt_secret: LOCAL_JWT_SECRET.to_string(),
            token_ttl_secs: DEFAULT_TOKEN_TTL_SECS,
            port: DEFAULT_PORT,
            frontend_url: DEFAULT_FRONTEND_URL.to_string(),
            routes_file: None,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// Reads the configuration from environment variables. Fails fast when a
    /// production secret is missing or too short, or when a numeric variable
    /// does not parse.
    pub fn load() -> Result<Self, ConfigError> {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let jwt_secret = match (env, env::var("JWT_SECRET")) {
            (Env::Production, Err(_)) => return Err(ConfigError::Missing("JWT_SECRET")),
            (Env::Production, Ok(secret)) if secret.len() < MIN_SECRET_LEN => {
                return Err(ConfigError::Invalid {
                    name: "JWT_SECRET",
                    reason: format!("must be at least {MIN_SECRET_LEN} characters long"),
                });
            }
            (_, Ok(secret)) => secret,
            // Reported by `uses_fallback_secret` once logging is up.
            (Env::Local, Err(_)) => LOCAL_JWT_SECRET.to_string(),
        };

        let token_ttl_secs = parse_var("JWT_EXPIRES_IN", DEFAULT_TOKEN_TTL_SECS)?;
        if !(1..=MAX_TOKEN_TTL_SECS).contains(&token_ttl_secs) {
            return Err(ConfigError::Invalid {
                name: "JWT_EXPIRES_IN",
                reason: format!("must be between 1 and {MAX_TOKEN_TTL_SECS} seconds"),
            });
        }

        Ok(Self {
            env,
            jwt_secret,
            token_ttl_secs,
            port: parse_var("PORT", DEFAULT_PORT)?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| DEFAULT_FRONTEND_URL.to_string()),
            routes_file: env::var("EBMS_ROUTES_FILE").ok().map(PathBuf::from),
        })
    }

    /// True when tokens are signed with the built-in development secret.
    pub fn uses_fallback_secret(&self) -> bool {
        self.jwt_secret == LOCAL_JWT_SECRET
    }
}

fn parse_var<T>(name: &'static str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(name) {
        Ok(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
