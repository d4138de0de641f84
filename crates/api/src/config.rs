//! Server configuration loaded from environment variables.

use std::fmt;
use std::num::NonZeroUsize;

use pmdx_db::DbConnectOptions;
use redis::{ConnectionInfo, IntoConnectionInfo};

use crate::cache::memory_cache::DEFAULT_MEMORY_ENTRIES;

/// A configuration value that is present but unusable, or missing
/// database settings.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        expected: &'static str,
        value: String,
    },

    #[error("missing environment variable '{0}' (or set DATABASE_URL)")]
    MissingDatabaseVar(&'static str),

    /// Holds the parser's message only; the URL itself carries the password.
    #[error("DATABASE_URL is not a valid PostgreSQL connection URL: {0}")]
    InvalidDatabaseUrl(String),
}

/// Output format of the `tracing` subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// `json` (any case) selects JSON lines; anything else is plain text.
    pub fn parse(raw: &str) -> Self {
        if raw.trim().eq_ignore_ascii_case("json") {
            Self::Json
        } else {
            Self::Text
        }
    }
}

/// Server configuration.
///
/// All fields have defaults suitable for local development except the
/// database location, which must be provided.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`. Empty
    /// allows any origin.
    pub cors_origins: Vec<String>,
    /// Optional HTTP request timeout in seconds. Unset (or `0`) means a
    /// slow query simply delays the response.
    pub request_timeout_secs: Option<u64>,
    pub log_format: LogFormat,
    pub database: DatabaseConfig,
    pub cache: CacheConfig,
}

/// PostgreSQL connection settings.
#[derive(Clone)]
pub struct DatabaseConfig {
    pub options: DbConnectOptions,
    pub max_connections: u32,
}

impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("host", &self.options.get_host())
            .field("database", &self.options.get_database())
            .field("max_connections", &self.max_connections)
            .finish_non_exhaustive()
    }
}

/// Response cache store settings. Without a Redis URL the in-process
/// memory cache is used.
#[derive(Clone)]
pub struct CacheConfig {
    pub redis_url: Option<String>,
    pub redis_password: Option<String>,
    /// Capacity of the in-process cache, in responses.
    pub memory_entries: NonZeroUsize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: None,
            redis_password: None,
            memory_entries: NonZeroUsize::new(DEFAULT_MEMORY_ENTRIES).unwrap_or(NonZeroUsize::MIN),
        }
    }
}

impl fmt::Debug for CacheConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheConfig")
            .field("redis_url", &self.redis_url)
            .field("redis_password", &self.redis_password.as_ref().map(|_| "***"))
            .field("memory_entries", &self.memory_entries)
            .finish()
    }
}

impl CacheConfig {
    /// Connection settings for the `redis` client, or `None` to use the
    /// memory cache.
    ///
    /// Accepts either a full `redis://` URL or a bare `host:port`. The
    /// password is only applied to the bare form and is never spliced into
    /// URL text, so it may contain any character.
    pub fn connection_info(&self) -> Result<Option<ConnectionInfo>, redis::RedisError> {
        let Some(raw) = self.redis_url.as_deref().map(str::trim) else {
            return Ok(None);
        };
        if raw.contains("://") {
            return raw.into_connection_info().map(Some);
        }

        let mut info = format!("redis://{raw}").into_connection_info()?;
        if let Some(password) = self.redis_password.as_deref().filter(|p| !p.is_empty()) {
            info.redis.password = Some(password.to_string());
        }
        Ok(Some(info))
    }
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                | Default   |
    /// |------------------------|-----------|
    /// | `HOST`                 | `0.0.0.0` |
    /// | `PORT`                 | `3000`    |
    /// | `CORS_ORIGINS`         | (any)     |
    /// | `REQUEST_TIMEOUT_SECS` | (none)    |
    /// | `LOG_FORMAT`           | `text`    |
    /// | `DATABASE_URL`         | built from `DB_USER`, `DB_PASSWORD`, `DB_URL`, `DB_NAME` |
    /// | `DB_MAX_CONNECTIONS`   | `20`      |
    /// | `REDIS_URL`            | (memory cache) |
    /// | `REDIS_PASSWORD`       | (none)    |
    /// | `CACHE_MEMORY_ENTRIES` | `10000`   |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Load configuration through `lookup`, which returns the value of a
    /// variable if it is set.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or("PORT", lookup("PORT"), 3000_u16, "a valid port number")?;

        let cors_origins = lookup("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = lookup("REQUEST_TIMEOUT_SECS")
            .filter(|s| !s.trim().is_empty())
            .map(|raw| parse_or("REQUEST_TIMEOUT_SECS", Some(raw), 0_u64, "a number of seconds"))
            .transpose()?
            .filter(|secs| *secs > 0);

        let log_format = lookup("LOG_FORMAT")
            .map(|raw| LogFormat::parse(&raw))
            .unwrap_or_default();

        let database = DatabaseConfig {
            options: database_options(&lookup)?,
            max_connections: parse_or(
                "DB_MAX_CONNECTIONS",
                lookup("DB_MAX_CONNECTIONS"),
                20_u32,
                "a positive integer",
            )?,
        };

        let memory_entries = parse_or(
            "CACHE_MEMORY_ENTRIES",
            lookup("CACHE_MEMORY_ENTRIES"),
            DEFAULT_MEMORY_ENTRIES,
            "a positive integer",
        )?;
        let cache = CacheConfig {
            redis_url: lookup("REDIS_URL").filter(|s| !s.trim().is_empty()),
            redis_password: lookup("REDIS_PASSWORD"),
            memory_entries: NonZeroUsize::new(memory_entries).ok_or(ConfigError::Invalid {
                var: "CACHE_MEMORY_ENTRIES",
                expected: "a positive integer",
                value: "0".into(),
            })?,
        };

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            log_format,
            database,
            cache,
        })
    }
}

fn parse_or<T: std::str::FromStr>(
    var: &'static str,
    raw: Option<String>,
    default: T,
    expected: &'static str,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            var,
            expected,
            value,
        }),
    }
}

/// `DATABASE_URL`, or the `DB_USER`, `DB_PASSWORD`, `DB_URL` (`host` or
/// `host:port`) and `DB_NAME` parts. Parts are set field by field, so
/// credentials need no URL escaping.
fn database_options<F>(lookup: &F) -> Result<DbConnectOptions, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("DATABASE_URL").filter(|s| !s.is_empty()) {
        return url
            .parse::<DbConnectOptions>()
            .map_err(|e| ConfigError::InvalidDatabaseUrl(e.to_string()));
    }

    let require = |var: &'static str| lookup(var).ok_or(ConfigError::MissingDatabaseVar(var));
    let user = require("DB_USER")?;
    let password = require("DB_PASSWORD")?;
    let address = require("DB_URL")?;
    let name = require("DB_NAME")?;

    let (host, port) = match address.rsplit_once(':') {
        Some((host, port)) => (
            host.to_string(),
            Some(parse_or("DB_URL", Some(port.to_string()), 5432_u16, "host or host:port")?),
        ),
        None => (address, None),
    };

    let options = DbConnectOptions::new_without_pgpass()
        .host(&host)
        .username(&user)
        .password(&password)
        .database(&name);
    Ok(match port {
        Some(port) => options.port(port),
        None => options,
    })
}
