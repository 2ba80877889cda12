use std::path::PathBuf;

use thiserror::Error;

use crate::constants::{DEPLOYED_BACKEND_URL, LOCAL_BACKEND_URL};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {name}: {message}")]
    InvalidValue { name: String, message: String },
    #[error("failed to parse {name} as integer: {source}")]
    ParseInt {
        name: String,
        #[source]
        source: std::num::ParseIntError,
    },
}

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Backend
    pub backend_url: String,

    // Web Server
    pub web_host: String,
    pub web_port: u16,
    pub static_dir: PathBuf,

    // Session storage
    pub session_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// When `BACKEND_URL` is unset the backend is chosen from the host the
    /// front-end is reached on (`APP_HOST`, falling back to `WEB_HOST`).
    ///
    /// # Errors
    ///
    /// Returns an error if a numeric variable cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        let web_host = env_or_default("WEB_HOST", "127.0.0.1");
        let app_host = optional_env("APP_HOST").unwrap_or_else(|| web_host.clone());
        let backend_url = optional_env("BACKEND_URL")
            .unwrap_or_else(|| backend_for_host(&app_host).to_string());

        Ok(Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),

            web_host,
            web_port: parse_env_u16("WEB_PORT", 8080)?,
            static_dir: PathBuf::from(env_or_default("STATIC_DIR", "./static")),

            session_path: PathBuf::from(env_or_default("SESSION_PATH", "./data/session.json")),
        })
    }

    /// Validate that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.backend_url.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "BACKEND_URL".to_string(),
                message: "cannot be empty".to_string(),
            });
        }
        if url::Url::parse(&self.backend_url).is_err() {
            return Err(ConfigError::InvalidValue {
                name: "BACKEND_URL".to_string(),
                message: format!("not an absolute URL: '{}'", self.backend_url),
            });
        }
        if self.web_port == 0 {
            return Err(ConfigError::InvalidValue {
                name: "WEB_PORT".to_string(),
                message: "must be non-zero".to_string(),
            });
        }
        Ok(())
    }

    /// Configuration pointing at the given backend, for tests.
    #[must_use]
    pub fn for_testing(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
            web_host: "127.0.0.1".to_string(),
            web_port: 8080,
            static_dir: PathBuf::from("./static"),
            session_path: PathBuf::from("./data/session.json"),
        }
    }
}

/// Pick the backend for the host the front-end is served on.
#[must_use]
pub fn backend_for_host(host: &str) -> &'static str {
    match host {
        "localhost" | "127.0.0.1" => LOCAL_BACKEND_URL,
        _ => DEPLOYED_BACKEND_URL,
    }
}

fn optional_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_or_default(name: &str, default: &str) -> String {
    std::env::var(name)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| default.to_string())
}

fn parse_env_u16(name: &str, default: u16) -> Result<u16, ConfigError> {
    match std::env::var(name) {
        Ok(val) if !val.is_empty() => val.parse().map_err(|e| ConfigError::ParseInt {
            name: name.to_string(),
            source: e,
        }),
        _ => Ok(default),
    }
}
