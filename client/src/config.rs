//! Client configuration resolved at build time.
//!
//! The WASM bundle has no process environment, so overrides are baked in with
//! `JUNKY_API_BASE_URL` / `JUNKY_REQUEST_TIMEOUT_MS` when the crate is compiled.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "https://junky-f7rm.onrender.com";
pub const DEFAULT_REQUEST_TIMEOUT_MS: u32 = 30_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// API origin without a trailing slash.
    pub api_base_url: String,
    pub request_timeout_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::resolve(None, None)
    }
}

impl ClientConfig {
    /// Config from the values captured at compile time.
    pub fn from_build_env() -> Self {
        Self::resolve(option_env!("JUNKY_API_BASE_URL"), option_env!("JUNKY_REQUEST_TIMEOUT_MS"))
    }

    /// Apply defaults to raw overrides. Blank or unparsable values fall back.
    pub fn resolve(base_url: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let api_base_url = base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .trim_end_matches('/')
            .to_owned();
        let request_timeout_ms = timeout_ms
            .and_then(|raw| raw.trim().parse::<u32>().ok())
            .filter(|ms| *ms > 0)
            .unwrap_or(DEFAULT_REQUEST_TIMEOUT_MS);
        Self { api_base_url, request_timeout_ms }
    }
}
