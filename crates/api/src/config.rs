use dinner_poll_core::error::CoreError;
use dinner_poll_core::reset::{ResetPolicy, ResetSettings};
use dinner_poll_core::roster::{default_roster, Candidate};
use dinner_poll_core::types::Timestamp;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Maximum pool connections (default: `10`).
    pub db_max_connections: u32,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `DB_MAX_CONNECTIONS`   | `10`                       |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let db_max_connections: u32 = std::env::var("DB_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".into())
            .parse()
            .expect("DB_MAX_CONNECTIONS must be a valid u32");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            db_max_connections,
        }
    }
}

/// Settings of the running poll.
#[derive(Debug, Clone)]
pub struct PollConfig {
    /// Reset policy applied when the vote store initializes.
    pub reset: ResetSettings,
    /// Votes are rejected after this instant, when set.
    pub closes_at: Option<Timestamp>,
    /// Restaurants shown to participants.
    pub roster: Vec<Candidate>,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            reset: ResetSettings::never(),
            closes_at: None,
            roster: default_roster(),
        }
    }
}

impl PollConfig {
    /// Load poll settings from the process environment.
    ///
    /// | Env Var             | Default                               |
    /// |---------------------|---------------------------------------|
    /// | `VOTE_RESET_POLICY` | `never`                               |
    /// | `APP_ENV`           | `development` (`VERCEL_ENV` fallback) |
    /// | `DEPLOY_ID`         | `VERCEL_DEPLOYMENT_ID` fallback       |
    /// | `POLL_CLOSES_AT`    | unset (RFC 3339)                      |
    pub fn from_env() -> Result<Self, CoreError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, CoreError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let policy = match var("VOTE_RESET_POLICY") {
            Some(raw) => raw.parse::<ResetPolicy>()?,
            None => ResetPolicy::Never,
        };

        let production = var("APP_ENV")
            .or_else(|| var("VERCEL_ENV"))
            .is_some_and(|env| env.trim().eq_ignore_ascii_case("production"));

        let deploy_id = var("DEPLOY_ID").or_else(|| var("VERCEL_DEPLOYMENT_ID"));

        let reset = ResetSettings {
            policy,
            production,
            deploy_id,
        };
        reset.validate()?;

        let closes_at = var("POLL_CLOSES_AT")
            .map(|raw| {
                chrono::DateTime::parse_from_rfc3339(raw.trim())
                    .map(|dt| dt.with_timezone(&chrono::Utc))
                    .map_err(|e| {
                        CoreError::Config(format!("POLL_CLOSES_AT must be RFC 3339: {e}"))
                    })
            })
            .transpose()?;

        Ok(Self {
            reset,
            closes_at,
            roster: default_roster(),
        })
    }
}
