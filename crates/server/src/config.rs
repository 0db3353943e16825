//! Feed sizing, read from the environment with defaults.

use anyhow::{anyhow, Result};
use std::{env, fmt::Display, str::FromStr};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedConfig {
    /// Videos fetched per preferred category in recommended mode
    pub per_category_limit: usize,
    /// Videos fetched for the recent and shuffle modes
    pub recent_limit: usize,
    /// Videos fetched for an explicit category browse
    pub category_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            per_category_limit: 10,
            recent_limit: 50,
            category_limit: 50,
        }
    }
}

impl FeedConfig {
    /// Read `FEED_PER_CATEGORY_LIMIT`, `FEED_RECENT_LIMIT` and
    /// `FEED_CATEGORY_LIMIT`. Unset variables fall back to the defaults;
    /// a value that is set but invalid is an error.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` with a custom variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let defaults = Self::default();
        Ok(Self {
            per_category_limit: try_load(&lookup, "FEED_PER_CATEGORY_LIMIT", defaults.per_category_limit)?,
            recent_limit: try_load(&lookup, "FEED_RECENT_LIMIT", defaults.recent_limit)?,
            category_limit: try_load(&lookup, "FEED_CATEGORY_LIMIT", defaults.category_limit)?,
        })
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr + Display + PartialEq + Default,
    T::Err: Display,
{
    let Some(raw) = lookup(key) else {
        info!("{key} not set, using default: {default}");
        return Ok(default);
    };

    let value: T = raw.trim().parse().map_err(|e| {
        warn!("Invalid {key} value: {e}");
        anyhow!("Invalid {key} value '{raw}': {e}")
    })?;
    if value == T::default() {
        return Err(anyhow!("{key} must be greater than zero"));
    }
    Ok(value)
}
