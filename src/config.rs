//! Startup configuration read from the environment.
//!
//! The board is useless without a reachable task store, so a missing
//! database URL is fatal: the binary refuses to start instead of running
//! with a dead data layer.

use crate::board::services::MAX_REFRESH_INTERVAL;
use std::time::Duration;
use thiserror::Error;

/// Connection string of the hosted task database.
pub const DATABASE_URL_VAR: &str = "DATABASE_URL";
/// Fallback refresh interval in seconds.
pub const REFRESH_SECS_VAR: &str = "TASKBOARD_REFRESH_SECS";
/// Maximum number of pooled database connections.
pub const POOL_SIZE_VAR: &str = "TASKBOARD_POOL_SIZE";

const DEFAULT_REFRESH_SECS: u64 = 60;
const DEFAULT_POOL_SIZE: u32 = 4;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A required variable is unset or blank.
    #[error("required environment variable {0} is not set")]
    Missing(&'static str),

    /// A variable is set to something unusable.
    #[error("invalid value '{value}' for {name}: expected a positive integer within range")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// Offending value.
        value: String,
    },
}

/// Runtime configuration of the board service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardConfig {
    database_url: String,
    refresh_interval: Duration,
    pool_size: u32,
}

impl BoardConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] when `DATABASE_URL` is absent and
    /// [`ConfigError::Invalid`] for malformed optional values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Loads configuration through `lookup`, which returns the value of a
    /// variable or `None` when it is unset.
    ///
    /// # Errors
    ///
    /// See [`BoardConfig::from_env`].
    pub fn from_lookup<L>(lookup: L) -> Result<Self, ConfigError>
    where
        L: Fn(&str) -> Option<String>,
    {
        let database_url = lookup(DATABASE_URL_VAR)
            .map(|value| value.trim().to_owned())
            .filter(|value| !value.is_empty())
            .ok_or(ConfigError::Missing(DATABASE_URL_VAR))?;
        let refresh_secs = bounded(&lookup, REFRESH_SECS_VAR, MAX_REFRESH_INTERVAL.as_secs())?
            .unwrap_or(DEFAULT_REFRESH_SECS);
        let pool_size = bounded(&lookup, POOL_SIZE_VAR, u64::from(u32::MAX))?
            .map_or(Ok(DEFAULT_POOL_SIZE), |size| {
                u32::try_from(size).map_err(|_| ConfigError::Invalid {
                    name: POOL_SIZE_VAR,
                    value: size.to_string(),
                })
            })?;

        Ok(Self {
            database_url,
            refresh_interval: Duration::from_secs(refresh_secs),
            pool_size,
        })
    }

    /// Returns the database connection string.
    #[must_use]
    pub fn database_url(&self) -> &str {
        &self.database_url
    }

    /// Returns the fallback refresh interval.
    #[must_use]
    pub const fn refresh_interval(&self) -> Duration {
        self.refresh_interval
    }

    /// Returns the connection pool size.
    #[must_use]
    pub const fn pool_size(&self) -> u32 {
        self.pool_size
    }
}

/// Reads an optional integer in `1..=max`.
fn bounded<L>(lookup: &L, name: &'static str, max: u64) -> Result<Option<u64>, ConfigError>
where
    L: Fn(&str) -> Option<String>,
{
    let Some(raw) = lookup(name) else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<u64>() {
        Ok(value) if (1..=max).contains(&value) => Ok(Some(value)),
        _ => Err(ConfigError::Invalid { name, value: raw }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| ((*key).to_owned(), (*value).to_owned()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[rstest]
    fn missing_database_url_is_fatal() {
        let result = BoardConfig::from_lookup(lookup_from(&[]));
        assert_eq!(result, Err(ConfigError::Missing(DATABASE_URL_VAR)));
    }

    #[rstest]
    fn blank_database_url_is_fatal() {
        let result = BoardConfig::from_lookup(lookup_from(&[(DATABASE_URL_VAR, "  ")]));
        assert_eq!(result, Err(ConfigError::Missing(DATABASE_URL_VAR)));
    }

    #[rstest]
    fn defaults_apply_when_optional_values_are_absent() {
        let config = BoardConfig::from_lookup(lookup_from(&[(
            DATABASE_URL_VAR,
            "postgres://board@localhost/tasks",
        )]))
        .expect("config should load");

        assert_eq!(config.database_url(), "postgres://board@localhost/tasks");
        assert_eq!(config.refresh_interval(), Duration::from_secs(60));
        assert_eq!(config.pool_size(), 4);
    }

    #[rstest]
    #[case("0")]
    #[case("-5")]
    #[case("soon")]
    #[case("86401")]
    #[case("18446744073709551615")]
    fn refresh_interval_must_be_positive_and_at_most_a_day(#[case] raw: &str) {
        let result = BoardConfig::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, "postgres://localhost/tasks"),
            (REFRESH_SECS_VAR, raw),
        ]));
        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                name: REFRESH_SECS_VAR,
                value: raw.to_owned(),
            })
        );
    }

    #[rstest]
    fn one_day_refresh_interval_is_accepted() {
        let config = BoardConfig::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, "postgres://localhost/tasks"),
            (REFRESH_SECS_VAR, "86400"),
        ]))
        .expect("config should load");

        assert_eq!(config.refresh_interval(), MAX_REFRESH_INTERVAL);
    }

    #[rstest]
    fn overrides_are_honoured() {
        let config = BoardConfig::from_lookup(lookup_from(&[
            (DATABASE_URL_VAR, "postgres://localhost/tasks"),
            (REFRESH_SECS_VAR, "15"),
            (POOL_SIZE_VAR, "8"),
        ]))
        .expect("config should load");

        assert_eq!(config.refresh_interval(), Duration::from_secs(15));
        assert_eq!(config.pool_size(), 8);
    }
}
