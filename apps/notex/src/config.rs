use std::time::Duration;

use anyhow::{Context, Result};

use crate::compile::CompilerConfig;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_COMPILE_TIMEOUT_SECS: u64 = 60;
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Application configuration loaded from environment variables.
/// Every variable has a default, so an empty environment runs a local
/// instance that compiles through itself.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Base URL of the compilation service the export endpoint calls.
    pub compiler_url: String,
    pub compile_timeout: Duration,
    pub tectonic_bin: String,
    pub cors_origins: Vec<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let port = match lookup("PORT") {
            Some(v) => v
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };
        let compile_timeout_secs = match lookup("COMPILE_TIMEOUT_SECS") {
            Some(v) => v
                .parse::<u64>()
                .context("COMPILE_TIMEOUT_SECS must be a whole number of seconds")?,
            None => DEFAULT_COMPILE_TIMEOUT_SECS,
        };

        Ok(Config {
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            compiler_url: lookup("COMPILER_URL")
                .unwrap_or_else(|| format!("http://127.0.0.1:{port}")),
            compile_timeout: Duration::from_secs(compile_timeout_secs),
            tectonic_bin: lookup("TECTONIC_BIN").unwrap_or_else(|| "tectonic".to_string()),
            cors_origins: split_origins(
                &lookup("CORS_ORIGINS").unwrap_or_else(|| DEFAULT_CORS_ORIGINS.to_string()),
            ),
        })
    }

    pub fn compiler(&self) -> CompilerConfig {
        CompilerConfig::new(self.compiler_url.clone()).with_timeout(self.compile_timeout)
    }
}

fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
