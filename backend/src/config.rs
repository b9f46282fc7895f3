//! Runtime configuration from environment variables.
//!
//! | Variable                   | Default                  |
//! |----------------------------|--------------------------|
//! | `SUPERKIDS_DATA_DIR`       | `~/Documents/SuperKids`  |
//! | `SUPERKIDS_BIND_ADDR`      | `127.0.0.1:3000`         |
//! | `SUPERKIDS_ALLOWED_ORIGIN` | `http://localhost:8080`  |
//!
//! Log filtering is controlled separately through `RUST_LOG`.

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::storage::csv::CsvConnection;

pub const DATA_DIR_VAR: &str = "SUPERKIDS_DATA_DIR";
pub const BIND_ADDR_VAR: &str = "SUPERKIDS_BIND_ADDR";
pub const ALLOWED_ORIGIN_VAR: &str = "SUPERKIDS_ALLOWED_ORIGIN";

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8080";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_directory: PathBuf,
    pub bind_address: SocketAddr,
    pub allowed_origin: HeaderValue,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the config from any variable source; blank values count as unset
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|value| value.trim().to_string()).filter(|v| !v.is_empty());

        let data_directory = match get(DATA_DIR_VAR) {
            Some(dir) => PathBuf::from(dir),
            None => CsvConnection::default_data_directory()?,
        };

        let bind_address = get(BIND_ADDR_VAR)
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .with_context(|| format!("{} must be a socket address like 127.0.0.1:3000", BIND_ADDR_VAR))?;

        let allowed_origin = get(ALLOWED_ORIGIN_VAR)
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string())
            .parse::<HeaderValue>()
            .with_context(|| format!("{} is not a valid origin", ALLOWED_ORIGIN_VAR))?;

        Ok(Self {
            data_directory,
            bind_address,
            allowed_origin,
        })
    }
}
