//! Integration tests that run the compiled `stratus` binary.
//!
//! Each test points HOME and XDG_CONFIG_HOME at a temp dir so no user
//! configuration leaks in, and talks to a wiremock server instead of the API.

use serde_json::json;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn stratus(home: &Path, envs: &[(&str, &str)], args: &[&str]) -> Output {
    let bin = env!("CARGO_BIN_EXE_stratus");
    let mut command = Command::new(bin);
    command
        .env_remove("STRATUS_API_KEY")
        .env_remove("STRATUS_API_ENDPOINT")
        .env_remove("STRATUS_OUTPUT")
        .env_remove("STRATUS_LOG")
        .env("HOME", home.join("home"))
        .env("XDG_CONFIG_HOME", home.join("config"))
        .args(args);
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().unwrap()
}

#[test]
fn test_missing_credentials_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let output = stratus(temp_dir.path(), &[], &["account"]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Missing credentials"), "stderr: {}", stderr);
}

#[test]
fn test_version_flag() {
    let temp_dir = TempDir::new().unwrap();
    let output = stratus(temp_dir.path(), &[], &["--version"]);

    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_unknown_command_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let output = stratus(temp_dir.path(), &[], &["snapshots"]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Unknown command 'snapshots'"));
    assert!(stderr.contains("Usage"));
}

#[test]
fn test_invalid_config_file_exit_code() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    std::fs::write(&config_file, "api_endpoint = \"ftp://nowhere\"\n").unwrap();

    let output = stratus(
        temp_dir.path(),
        &[],
        &["--config", config_file.to_str().unwrap(), "account"],
    );
    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid API endpoint"), "stderr: {}", stderr);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_account_against_mock_api() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .and(header("Authorization", "Bearer SECRET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "account": {
                "name": "user@example.com",
                "email": "user@example.com",
                "acls": [],
                "balance": -120.50,
                "pending_charges": 0,
                "last_payment_date": "",
                "last_payment_amount": 0
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();
    let output = stratus(
        temp_dir.path(),
        &[("STRATUS_API_KEY", "SECRET"), ("STRATUS_API_ENDPOINT", uri.as_str())],
        &["account", "--output", "json"],
    );

    assert!(
        output.status.success(),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["account"]["name"], "user@example.com");
    assert_eq!(value["account"]["balance"], -120.5);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_key_reports_remote_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({"error": "Invalid API token."})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = TempDir::new().unwrap();
    let uri = server.uri();
    let output = stratus(
        temp_dir.path(),
        &[("STRATUS_API_KEY", "WRONG"), ("STRATUS_API_ENDPOINT", uri.as_str())],
        &["account"],
    );

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("authentication rejected"), "stderr: {}", stderr);
    assert!(stderr.contains("Invalid API token."), "stderr: {}", stderr);
}
