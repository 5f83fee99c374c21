//! Configuration loading and representation.

use std::path::PathBuf;

use anyhow::Context;

pub const DEFAULT_API_URL: &str = "http://localhost:3333";
pub const DEFAULT_STORAGE_NAMESPACE: &str = "@RocketShoes";

const ENV_API_URL: &str = "ROCKETCART_API_URL";
const ENV_STORAGE_NAMESPACE: &str = "ROCKETCART_STORAGE_NAMESPACE";
const ENV_DB_PATH: &str = "ROCKETCART_DB_PATH";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartConfig {
    /// Base URL of the inventory service.
    pub api_url: String,
    /// Prefix for storage keys; the cart lives at `{namespace}:cart`.
    pub storage_namespace: String,
    /// SQLite file holding the persisted cart.
    pub database_path: PathBuf,
}

impl CartConfig {
    /// Read configuration from the environment, falling back to defaults.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let api_url = lookup(ENV_API_URL).unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let storage_namespace = lookup(ENV_STORAGE_NAMESPACE)
            .unwrap_or_else(|| DEFAULT_STORAGE_NAMESPACE.to_string());
        let database_path = match lookup(ENV_DB_PATH) {
            Some(path) => PathBuf::from(path),
            None => default_database_path()?,
        };

        if storage_namespace.trim().is_empty() {
            anyhow::bail!("{ENV_STORAGE_NAMESPACE} must not be empty");
        }

        Ok(Self {
            api_url,
            storage_namespace,
            database_path,
        })
    }

    pub fn storage_key(&self) -> String {
        storage_key(&self.storage_namespace)
    }
}

pub fn storage_key(namespace: &str) -> String {
    format!("{namespace}:cart")
}

/// `{app_data_dir}/rocketcart/cart.db`.
pub fn default_database_path() -> anyhow::Result<PathBuf> {
    let base = dirs::data_dir()
        .or_else(|| {
            dirs::home_dir().map(|mut h| {
                h.push(".local");
                h.push("share");
                h
            })
        })
        .context("no data directory available for the cart database; set ROCKETCART_DB_PATH")?;

    let mut path = base;
    path.push("rocketcart");
    path.push("cart.db");
    Ok(path)
}
