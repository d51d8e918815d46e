use anyhow::{Context, Result};
use std::net::SocketAddr;

#[derive(Clone, Debug)]
pub struct CoursesConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_address: SocketAddr,
}

impl CoursesConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    // `lookup` stands in for the process environment
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let database_url = lookup("DATABASE_URL")
            .context("Failed to determine DATABASE_URL from environment variables")?;

        let max_connections = lookup("MAX_CONNECTIONS")
            .and_then(|val| val.parse::<u32>().ok())
            .unwrap_or(5);

        let bind_address = lookup("BIND_ADDRESS")
            .unwrap_or_else(|| "0.0.0.0:8000".to_string());
        let bind_address = bind_address
            .parse::<SocketAddr>()
            .with_context(|| format!("BIND_ADDRESS {} is not a socket address", bind_address))?;

        Ok(Self {
            database_url,
            max_connections,
            bind_address,
        })
    }
}
