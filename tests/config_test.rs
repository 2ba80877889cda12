//! Integration tests for environment-driven configuration.

use blogify_client::config::{Config, ConfigError};
use blogify_client::constants::{DEPLOYED_BACKEND_URL, LOCAL_BACKEND_URL};
use serial_test::serial;

const VARS: [&str; 6] = [
    "BACKEND_URL",
    "APP_HOST",
    "WEB_HOST",
    "WEB_PORT",
    "SESSION_PATH",
    "STATIC_DIR",
];

fn clear_env() {
    for var in VARS {
        std::env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_defaults_use_local_backend() {
    clear_env();
    let config = Config::from_env().expect("Failed to load config");

    assert_eq!(config.backend_url, LOCAL_BACKEND_URL);
    assert_eq!(config.web_host, "127.0.0.1");
    assert_eq!(config.web_port, 8080);
    assert_eq!(config.session_path, std::path::PathBuf::from("./data/session.json"));
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn test_public_host_uses_deployed_backend() {
    clear_env();
    std::env::set_var("APP_HOST", "blogify.example.com");
    let config = Config::from_env().expect("Failed to load config");
    clear_env();

    assert_eq!(config.backend_url, DEPLOYED_BACKEND_URL);
}

#[test]
#[serial]
fn test_backend_override_wins() {
    clear_env();
    std::env::set_var("APP_HOST", "blogify.example.com");
    std::env::set_var("BACKEND_URL", "http://10.0.0.5:9000/");
    let config = Config::from_env().expect("Failed to load config");
    clear_env();

    assert_eq!(config.backend_url, "http://10.0.0.5:9000");
}

#[test]
#[serial]
fn test_bad_port_is_rejected() {
    clear_env();
    std::env::set_var("WEB_PORT", "eighty");
    let result = Config::from_env();
    clear_env();

    assert!(matches!(result, Err(ConfigError::ParseInt { .. })));
}
