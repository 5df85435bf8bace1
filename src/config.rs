//! Host configuration from the process environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::net::{IpAddr, SocketAddr};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid PORT `{0}`")]
    InvalidPort(String),

    #[error("invalid JUNKY_SITE_ADDR `{0}`")]
    InvalidHost(String),

    #[error("leptos configuration: {0}")]
    Leptos(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostConfig {
    pub addr: SocketAddr,
}

impl HostConfig {
    /// Read `JUNKY_SITE_ADDR` (listen host) and `PORT`.
    ///
    /// # Errors
    ///
    /// Either variable is set but unparsable.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var("JUNKY_SITE_ADDR").ok().as_deref(),
            std::env::var("PORT").ok().as_deref(),
        )
    }

    /// Resolve raw values; unset or blank values take the defaults.
    ///
    /// # Errors
    ///
    /// A non-blank value that does not parse.
    pub fn from_vars(host: Option<&str>, port: Option<&str>) -> Result<Self, ConfigError> {
        let host = host.map(str::trim).filter(|h| !h.is_empty()).unwrap_or(DEFAULT_HOST);
        let ip: IpAddr = host.parse().map_err(|_| ConfigError::InvalidHost(host.to_owned()))?;
        let port = match port.map(str::trim).filter(|p| !p.is_empty()) {
            Some(raw) => raw.parse::<u16>().map_err(|_| ConfigError::InvalidPort(raw.to_owned()))?,
            None => DEFAULT_PORT,
        };
        Ok(Self { addr: SocketAddr::new(ip, port) })
    }
}
