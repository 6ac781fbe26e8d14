//! Integration tests for the CLI config command
//!
//! Verifies the generated template round-trips through the real config loader.

use searchrelay::cli::generate_config_template;
use searchrelay::config::Config;
use std::fs;
use tempfile::TempDir;

fn create_temp_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp directory")
}

#[test]
fn test_generated_template_creates_valid_config_file() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("config.toml");

    fs::write(&config_path, generate_config_template()).expect("Failed to write template");

    let config = Config::from_file(&config_path).expect("template should load as a Config");
    assert_eq!(config.server.port, 8888);
    assert_eq!(config.bing.max_results, 5);
    assert_eq!(config.openai.model, "gpt-3.5-turbo");
}

#[test]
fn test_template_leaves_credentials_unset() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, generate_config_template()).unwrap();

    let config = Config::from_file(&config_path).unwrap();
    assert!(config.bing.api_key().is_none());
    assert!(config.google.api_key().is_none());
    assert!(config.google.cx().is_none());
    assert!(config.openai.api_key().is_none());
    assert!(config.server.public_base_url().is_none());
}

#[test]
fn test_edited_template_with_bad_value_fails_validation() {
    let temp_dir = create_temp_dir();
    let config_path = temp_dir.path().join("config.toml");
    let edited = generate_config_template()
        .replace("request_timeout_seconds = 30", "request_timeout_seconds = 0");
    fs::write(&config_path, edited).unwrap();

    let err = Config::from_file(&config_path).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("config.toml"), "got: {}", message);
    assert!(message.contains("request_timeout_seconds"), "got: {}", message);
}
