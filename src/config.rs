//! Runtime configuration.

use std::env;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_IDENTITY_FILE: &str = "identity.json";

/// Configuration for the lifecycle client.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the backend of record.
    pub api_url: String,
    /// Path to the persisted consumer identity file.
    pub identity_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            identity_file: DEFAULT_IDENTITY_FILE.to_string(),
        }
    }
}

impl Config {
    /// Environment overrides: `RENDEZVOUS_API_URL`, `RENDEZVOUS_IDENTITY_FILE`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            api_url: env_or(defaults.api_url, "RENDEZVOUS_API_URL"),
            identity_file: env_or(defaults.identity_file, "RENDEZVOUS_IDENTITY_FILE"),
        }
    }
}

fn env_or(default: String, key: &str) -> String {
    env::var(key)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_sensible() {
        let config = Config::default();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.identity_file, DEFAULT_IDENTITY_FILE);
    }
}
