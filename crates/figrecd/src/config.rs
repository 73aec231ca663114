//! Daemon configuration, sourced from the environment.
//!
//! Callers run `dotenv().ok()` before this so a local `.env` file can fill the
//! environment. The pipeline itself never reads env vars - it receives the
//! resolved [`LlmConfig`] explicitly, which is what lets tests swap in a fake
//! endpoint.

use anyhow::{bail, Result};
use figrec_common::LlmConfig;
use std::env;
use std::str::FromStr;

/// Default catalog file, relative to the working directory.
pub const DEFAULT_CATALOG_PATH: &str = "modules.json";

/// Default listen port.
pub const DEFAULT_PORT: u16 = 8080;

#[derive(Debug, Clone)]
pub struct DaemonConfig {
    pub port: u16,
    pub catalog_path: String,
    pub llm: LlmConfig,
}

/// Read an env var, falling back to `default` when unset, empty, or unparsable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .filter(|v| !v.is_empty())
        .and_then(|v| v.parse::<T>().ok())
        .unwrap_or(default)
}

impl DaemonConfig {
    /// Resolve configuration from the environment. Fails when no API key is
    /// set - the daemon cannot do anything useful without one.
    pub fn from_env() -> Result<Self> {
        let mut llm = LlmConfig::default();

        llm.api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        if llm.api_key.is_empty() {
            bail!("OPENAI_API_KEY is required");
        }

        if let Some(url) = env::var("BASE_URL")
            .or_else(|_| env::var("OPENAI_URL"))
            .ok()
            .filter(|v| !v.is_empty())
        {
            llm.endpoint = url;
        }
        if let Some(model) = env::var("MODEL").ok().filter(|v| !v.is_empty()) {
            llm.model = model;
        }
        llm.timeout_secs = env_or("LLM_TIMEOUT_SECS", llm.timeout_secs);

        Ok(Self {
            port: env_or("PORT", DEFAULT_PORT),
            catalog_path: env_or("CATALOG_PATH", DEFAULT_CATALOG_PATH.to_string()),
            llm,
        })
    }
}
