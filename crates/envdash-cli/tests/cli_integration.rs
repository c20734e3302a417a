//! CLI Integration Tests
//!
//! These tests run the `envdash` binary and check its output and exit codes.
//! Tests that need a real device are marked with #[ignore].
//!
//! Run offline tests:
//! ```
//! cargo test --package envdash-cli --test cli_integration
//! ```
//!
//! Run device tests:
//! ```
//! ENVDASH_URL="http://192.168.1.20" cargo test --package envdash-cli --test cli_integration -- --ignored --nocapture
//! ```

use std::env;
use std::path::Path;
use std::process::{Command, Output};

/// Run envdash with its config directory redirected to `home`.
fn run_envdash_in(home: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_envdash"))
        .args(args)
        .env("HOME", home)
        .env("XDG_CONFIG_HOME", home.join(".config"))
        .env("XDG_CACHE_HOME", home.join(".cache"))
        .env_remove("ENVDASH_URL")
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to run envdash binary")
}

/// Run envdash with a throwaway config directory.
fn run_envdash(args: &[&str]) -> Output {
    let home = tempfile::tempdir().expect("tempdir");
    run_envdash_in(home.path(), args)
}

/// Get device URL from environment
fn get_device_url() -> Option<String> {
    env::var("ENVDASH_URL").ok().filter(|s| !s.is_empty())
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

// =============================================================================
// Help and Version Tests (no device required)
// =============================================================================

#[test]
fn test_help_command() {
    let output = run_envdash(&["--help"]);

    assert!(output.status.success(), "Help should succeed");

    let stdout = stdout_of(&output);
    assert!(stdout.contains("envdash"), "Help should mention envdash");
    for cmd in ["status", "env", "history", "settings", "dashboard", "config"] {
        assert!(stdout.contains(cmd), "Help should list {} command", cmd);
    }
}

#[test]
fn test_version_command() {
    let output = run_envdash(&["--version"]);

    assert!(output.status.success(), "Version should succeed");
    assert!(stdout_of(&output).contains("envdash"));
}

#[test]
fn test_subcommand_help() {
    let subcommands = [
        "status",
        "env",
        "history",
        "settings",
        "dashboard",
        "config",
        "completions",
    ];

    for cmd in subcommands {
        let output = run_envdash(&[cmd, "--help"]);

        assert!(output.status.success(), "{} --help should succeed", cmd);
        assert!(
            !stdout_of(&output).is_empty(),
            "{} --help should produce output",
            cmd
        );
    }
}

#[test]
fn test_completions_bash() {
    let output = run_envdash(&["completions", "bash"]);

    assert!(output.status.success());
    assert!(stdout_of(&output).contains("envdash"));
}

// =============================================================================
// Argument Validation
// =============================================================================

#[test]
fn test_missing_url_is_explained() {
    let output = run_envdash(&["env"]);

    assert!(!output.status.success(), "env without a URL should fail");
    let stderr = stderr_of(&output);
    assert!(stderr.contains("No device URL"), "stderr: {}", stderr);
    assert!(stderr.contains("ENVDASH_URL"));
}

#[test]
fn test_invalid_interval_rejected() {
    let output = run_envdash(&["settings", "set", "--interval", "0"]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("at least 1 second"));
}

#[test]
fn test_invalid_format_rejected() {
    let output = run_envdash(&["--url", "http://127.0.0.1:9", "status", "--format", "yaml"]);

    assert!(!output.status.success());
}

#[test]
fn test_unreachable_device_fails() {
    let output = run_envdash(&["--url", "http://127.0.0.1:9", "-T", "2", "--quiet", "env"]);

    assert!(!output.status.success());
    assert!(stderr_of(&output).contains("Failed to read current environment"));
}

// =============================================================================
// Config Commands (no device required)
// =============================================================================

#[test]
fn test_config_path() {
    let output = run_envdash(&["config", "path"]);

    assert!(output.status.success(), "Config path should succeed");

    let stdout = stdout_of(&output);
    assert!(stdout.contains("envdash"), "Should show config path");
    assert!(stdout.trim_end().ends_with("config.toml"));
}

#[test]
fn test_config_get_unset_value() {
    let output = run_envdash(&["config", "get", "url"]);

    assert!(output.status.success());
    assert_eq!(stdout_of(&output).trim(), "(not set)");
}

#[test]
fn test_config_set_then_get() {
    let home = tempfile::tempdir().unwrap();

    let set = run_envdash_in(
        home.path(),
        &["--no-color", "config", "set", "url", "http://10.0.0.5"],
    );
    assert!(set.status.success(), "stderr: {}", stderr_of(&set));
    assert!(stdout_of(&set).contains("[OK] url = http://10.0.0.5"));

    let get = run_envdash_in(home.path(), &["config", "get", "url"]);
    assert_eq!(stdout_of(&get).trim(), "http://10.0.0.5");

    let set_tab = run_envdash_in(home.path(), &["config", "set", "default-tab", "history"]);
    assert!(set_tab.status.success());

    let show = run_envdash_in(home.path(), &["config", "show"]);
    let stdout = stdout_of(&show);
    assert!(stdout.contains("url = \"http://10.0.0.5\""));
    assert!(stdout.contains("default_tab = \"history\""));

    let unset = run_envdash_in(home.path(), &["config", "unset", "url"]);
    assert!(unset.status.success());
    let get = run_envdash_in(home.path(), &["config", "get", "url"]);
    assert_eq!(stdout_of(&get).trim(), "(not set)");
}

#[test]
fn test_config_set_rejects_bad_values() {
    let home = tempfile::tempdir().unwrap();

    for (key, value) in [
        ("format", "yaml"),
        ("timeout", "0"),
        ("default-tab", "graphs"),
        ("theme", "sepia"),
    ] {
        let output = run_envdash_in(home.path(), &["config", "set", key, value]);
        assert!(
            !output.status.success(),
            "config set {} {} should fail",
            key,
            value
        );
    }
}

#[test]
fn test_config_init_twice() {
    let home = tempfile::tempdir().unwrap();

    let first = run_envdash_in(home.path(), &["--no-color", "config", "init"]);
    assert!(first.status.success());
    assert!(stdout_of(&first).contains("[OK] Created"));

    let second = run_envdash_in(home.path(), &["--no-color", "config", "init"]);
    assert!(second.status.success());
    assert!(stdout_of(&second).contains("already exists"));
}

// =============================================================================
// Device Tests (require a reachable device)
// =============================================================================

#[test]
#[ignore]
fn test_status_json_from_device() {
    let Some(url) = get_device_url() else {
        eprintln!("ENVDASH_URL not set, skipping");
        return;
    };

    let output = run_envdash(&["--url", &url, "--quiet", "status", "--json"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));

    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert!(json.is_array() || json.is_object());
}

#[test]
#[ignore]
fn test_history_csv_from_device() {
    let Some(url) = get_device_url() else {
        eprintln!("ENVDASH_URL not set, skipping");
        return;
    };

    let output = run_envdash(&["--url", &url, "--quiet", "history", "--format", "csv"]);
    assert!(output.status.success(), "stderr: {}", stderr_of(&output));
    assert!(stdout_of(&output).starts_with("time,temp,pressure,humidity,gas"));
}
