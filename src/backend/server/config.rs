/**
 * Server Configuration
 *
 * This module loads the server configuration from environment variables
 * (optionally seeded from a `.env` file) and opens the PostgreSQL pool.
 *
 * # Environment Variables
 *
 * | Variable              | Default                   | Purpose                          |
 * |-----------------------|---------------------------|----------------------------------|
 * | `SERVER_PORT`         | `3000`                    | Listening port                   |
 * | `APP_URL`             | `http://localhost:3000`   | Base URL used in email links     |
 * | `DATABASE_URL`        | unset                     | PostgreSQL connection string     |
 * | `JWT_SECRET`          | dev fallback (debug only) | HMAC key for session tokens      |
 * | `SESSION_TTL_HOURS`   | `168`                     | Session cookie and token lifetime|
 * | `COOKIE_SECURE`       | `false`                   | Adds `Secure` to the cookie      |
 * | `SMTP_HOST`           | unset                     | SMTP relay; unset logs emails    |
 * | `SMTP_USERNAME`       | unset                     | SMTP credentials                 |
 * | `SMTP_PASSWORD`       | unset                     | SMTP credentials                 |
 * | `MAIL_FROM`           | `Matchday <no-reply@matchday.local>` | Sender address        |
 * | `GEOLOCATION_URL`     | unset                     | IP geolocation API base URL      |
 * | `GEOLOCATION_API_KEY` | unset                     | Optional API key                 |
 *
 * # Error Handling
 *
 * Malformed values are reported as `ConfigError`. A missing or unreachable
 * database does not prevent startup: the pool is `None` and database-backed
 * endpoints answer 503.
 */

use sqlx::PgPool;
use thiserror::Error;

/// Fallback secret accepted only in debug builds
const DEV_JWT_SECRET: &str = "matchday-development-secret-change-me";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

/// SMTP relay settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub username: Option<String>,
    pub password: Option<String>,
}

/// IP geolocation provider settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeolocationConfig {
    pub base_url: String,
    pub api_key: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub app_url: String,
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub session_ttl_hours: i64,
    pub cookie_secure: bool,
    pub mail_from: String,
    pub smtp: Option<SmtpConfig>,
    pub geolocation: Option<GeolocationConfig>,
}

impl Default for ServerConfig {
    /// Development defaults: no database, no SMTP, no geolocation
    fn default() -> Self {
        Self {
            port: 3000,
            app_url: "http://localhost:3000".to_string(),
            database_url: None,
            jwt_secret: DEV_JWT_SECRET.to_string(),
            session_ttl_hours: 24 * 7,
            cookie_secure: false,
            mail_from: "Matchday <no-reply@matchday.local>".to_string(),
            smtp: None,
            geolocation: None,
        }
    }
}

impl ServerConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let port = match get("SERVER_PORT") {
            Some(value) => value.parse::<u16>().map_err(|_| ConfigError::Invalid {
                name: "SERVER_PORT",
                value,
            })?,
            None => defaults.port,
        };

        let session_ttl_hours = match get("SESSION_TTL_HOURS") {
            Some(value) => match value.parse::<i64>() {
                Ok(hours) if hours > 0 => hours,
                _ => {
                    return Err(ConfigError::Invalid {
                        name: "SESSION_TTL_HOURS",
                        value,
                    })
                }
            },
            None => defaults.session_ttl_hours,
        };

        let cookie_secure = match get("COOKIE_SECURE") {
            Some(value) => parse_bool(&value).ok_or(ConfigError::Invalid {
                name: "COOKIE_SECURE",
                value,
            })?,
            None => defaults.cookie_secure,
        };

        let jwt_secret = match get("JWT_SECRET") {
            Some(secret) => secret,
            None if cfg!(debug_assertions) => {
                tracing::warn!("JWT_SECRET not set; using the development fallback secret");
                defaults.jwt_secret
            }
            None => return Err(ConfigError::MissingValue("JWT_SECRET")),
        };

        let smtp = get("SMTP_HOST").map(|host| SmtpConfig {
            host,
            username: get("SMTP_USERNAME"),
            password: get("SMTP_PASSWORD"),
        });

        let geolocation = get("GEOLOCATION_URL").map(|base_url| GeolocationConfig {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: get("GEOLOCATION_API_KEY"),
        });

        Ok(Self {
            port,
            app_url: get("APP_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.app_url),
            database_url: get("DATABASE_URL"),
            jwt_secret,
            session_ttl_hours,
            cookie_secure,
            mail_from: get("MAIL_FROM").unwrap_or(defaults.mail_from),
            smtp,
            geolocation,
        })
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Load and initialize the database connection pool
///
/// 1. Creates a PostgreSQL connection pool from `database_url`
/// 2. Runs the embedded migrations
///
/// Returns `None` when no URL is configured or the connection fails; the
/// server keeps running and database-backed endpoints answer 503.
pub async fn load_database(database_url: Option<&str>) -> Option<PgPool> {
    let Some(database_url) = database_url else {
        tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
        return None;
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}
