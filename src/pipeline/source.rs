//! Data acquisition seams: a query-backed source and a keyed cache
//!
//! No concrete database driver or on-disk cache lives in this crate. Callers
//! plug their own implementations into [`acquire`].

use std::fmt;

use anyhow::{Context, Result};
use polars::prelude::DataFrame;
use serde::Deserialize;

/// Something that can produce a dataset for a query
pub trait DataSource {
    fn fetch(&self, query: &str) -> Result<DataFrame>;
}

/// Keyed dataset store consulted before hitting the source
pub trait DatasetCache {
    fn load(&self, key: &str) -> Result<Option<DataFrame>>;
    fn store(&self, key: &str, df: &DataFrame) -> Result<()>;
}

/// Cache key for a database name, e.g. `zillow` -> `zillow.csv`
pub fn cache_key(db: &str) -> String {
    format!("{}.csv", db)
}

/// Return the cached dataset for `key`, or fetch it with `query` and cache it.
pub fn acquire<S, C>(source: &S, cache: &C, key: &str, query: &str) -> Result<DataFrame>
where
    S: DataSource + ?Sized,
    C: DatasetCache + ?Sized,
{
    if let Some(df) = cache
        .load(key)
        .with_context(|| format!("Failed to read cached dataset '{}'", key))?
    {
        tracing::info!(key, rows = df.height(), "loaded dataset from cache");
        return Ok(df);
    }

    tracing::info!(key, "cache miss, fetching from source");
    let df = source
        .fetch(query)
        .with_context(|| format!("Failed to fetch dataset for '{}'", key))?;
    cache
        .store(key, &df)
        .with_context(|| format!("Failed to cache dataset '{}'", key))?;

    Ok(df)
}

/// Connection parameters handed to a [`DataSource`] implementation
#[derive(Clone, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    pub user: String,
    pub password: String,
}

impl ConnectionConfig {
    pub fn new(host: impl Into<String>, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            user: user.into(),
            password: password.into(),
        }
    }

    /// Connection URL for database `db`
    pub fn connection_url(&self, db: &str) -> String {
        format!("mysql://{}:{}@{}/{}", self.user, self.password, self.host, db)
    }
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("host", &self.host)
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}
