// domain-avail/tests/cli_integration.rs

//! Binary-level tests. Lookups go through `--whois-command`, pointed at a
//! missing program or a small fixture script, so no network is used.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

const MISSING_WHOIS: &str = "/nonexistent/domain-avail-test-whois";

/// Command isolated from the user's config files and DA_* variables.
fn isolated_cmd(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("domain-avail").unwrap();
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path().join("xdg"))
        .env_remove("DA_TIMEOUT")
        .env_remove("DA_CONCURRENCY")
        .env_remove("DA_VERBOSE")
        .env_remove("DA_WHOIS_COMMAND")
        .env_remove("DA_CONFIG")
        .env_remove("RUST_LOG");
    cmd
}

/// Fixture whois: names containing "taken" are registered, everything else
/// gets a registry "no match" reply.
#[cfg(unix)]
fn fixture_whois(dir: &Path) -> PathBuf {
    use std::os::unix::fs::PermissionsExt;

    let path = dir.join("fake-whois");
    let script = r#"#!/bin/sh
case "$1" in
  *taken*)
    echo "Domain Name: $1"
    echo "Registrar: Example Registrar, Inc."
    echo "Creation Date: 2004-03-02T10:00:00Z"
    ;;
  *)
    echo "No match for \"$1\"."
    ;;
esac
"#;
    fs::write(&path, script).unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
    path
}

#[test]
fn test_help_shows_flags() {
    let home = TempDir::new().unwrap();
    isolated_cmd(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--verbose"))
        .stdout(predicate::str::contains("--json"))
        .stdout(predicate::str::contains("--whois-command"));
}

#[test]
fn test_missing_domains_is_usage_error() {
    let home = TempDir::new().unwrap();
    isolated_cmd(&home)
        .assert()
        .failure()
        .stderr(predicate::str::contains("DOMAINS"));
}

#[test]
fn test_lookup_failures_are_reported_taken() {
    let home = TempDir::new().unwrap();
    isolated_cmd(&home)
        .args(["--whois-command", MISSING_WHOIS, "example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Domain Availability Checker"))
        .stdout(predicate::str::contains(
            "Summary: 1 domains provided, 3 checked, 0 available",
        ))
        .stdout(predicate::str::contains("AVAILABLE").not());
}

#[test]
fn test_lookup_failures_are_not_printed() {
    let home = TempDir::new().unwrap();
    isolated_cmd(&home)
        .args(["--whois-command", MISSING_WHOIS, "example.com"])
        .assert()
        .success()
        .stderr(predicate::str::is_empty());
}

#[test]
fn test_progress_is_not_drawn_off_terminal() {
    let home = TempDir::new().unwrap();
    isolated_cmd(&home)
        .args(["--whois-command", MISSING_WHOIS, "example.org"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Checking").not());
}

#[cfg(unix)]
#[test]
fn test_unregistered_com_lists_three_available() {
    let home = TempDir::new().unwrap();
    let whois = fixture_whois(home.path());

    let output = isolated_cmd(&home)
        .arg("--whois-command")
        .arg(&whois)
        .arg("uniquely-unregistered-test-domain-xyz123.com")
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let rows: Vec<&str> = stdout.lines().filter(|l| l.contains("AVAILABLE")).collect();
    assert_eq!(rows.len(), 3);
    assert!(rows[0].starts_with("uniquely-unregistered-test-domain-xyz123.com"));
    assert!(rows[0].contains("$10"));
    assert!(rows[1].starts_with("uniquely-unregistered-test-domain-xyz123.io"));
    assert!(rows[1].contains("$50"));
    assert!(rows[2].starts_with("uniquely-unregistered-test-domain-xyz123.ai"));
    assert!(rows[2].contains("$200"));
    assert!(stdout.contains("Summary: 1 domains provided, 3 checked, 3 available"));
}

#[cfg(unix)]
#[test]
fn test_verbose_lists_available_and_taken() {
    let home = TempDir::new().unwrap();
    let whois = fixture_whois(home.path());

    isolated_cmd(&home)
        .arg("--whois-command")
        .arg(&whois)
        .args(["-v", "free.org", "taken.net"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Summary: 2 domains provided, 2 checked, 1 available"))
        .stdout(predicate::str::contains("\nAvailable domains: free.org\n"))
        .stdout(predicate::str::contains("Taken domains: taken.net"));
}

#[cfg(unix)]
#[test]
fn test_verbose_from_config_file() {
    let home = TempDir::new().unwrap();
    let whois = fixture_whois(home.path());
    let config = home.path().join("domain-avail.toml");
    fs::write(
        &config,
        format!(
            "[defaults]\nverbose = true\nwhois_command = \"{}\"\n",
            whois.display()
        ),
    )
    .unwrap();

    isolated_cmd(&home)
        .arg("taken.org")
        .assert()
        .success()
        .stdout(predicate::str::contains("Taken domains: taken.org"));
}

#[cfg(unix)]
#[test]
fn test_json_output_includes_taken_domains() {
    let home = TempDir::new().unwrap();
    let whois = fixture_whois(home.path());

    let output = isolated_cmd(&home)
        .arg("--whois-command")
        .arg(&whois)
        .args(["--json", "free.com", "taken.org"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let verdicts: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let verdicts = verdicts.as_array().unwrap();
    assert_eq!(verdicts.len(), 4);
    assert_eq!(verdicts[0]["domain"], "free.com");
    assert_eq!(verdicts[0]["minimum_cost"], "$10");
    assert_eq!(verdicts[2]["domain"], "free.ai");
    assert_eq!(verdicts[3]["domain"], "taken.org");
    assert_eq!(verdicts[3]["is_available"], false);
    assert_eq!(verdicts[3]["creation_year"], "2004");
}

#[test]
fn test_invalid_concurrency_fails() {
    let home = TempDir::new().unwrap();
    isolated_cmd(&home)
        .args(["-c", "0", "example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Concurrency must be between 1 and 100"));
}

#[test]
fn test_invalid_timeout_fails() {
    let home = TempDir::new().unwrap();
    isolated_cmd(&home)
        .args(["--timeout", "later", "example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid timeout"));
}

#[test]
fn test_invalid_explicit_config_fails() {
    let home = TempDir::new().unwrap();
    let config = home.path().join("broken.toml");
    fs::write(&config, "[defaults\nconcurrency = ").unwrap();

    isolated_cmd(&home)
        .arg("--config")
        .arg(&config)
        .arg("example.com")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config file"));
}

#[test]
fn test_missing_explicit_config_fails() {
    let home = TempDir::new().unwrap();
    isolated_cmd(&home)
        .args(["--config", "does-not-exist.toml", "example.com"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does-not-exist.toml"));
}

#[test]
fn test_invalid_discovered_config_is_skipped() {
    let home = TempDir::new().unwrap();
    fs::write(home.path().join("domain-avail.toml"), "not = [valid").unwrap();

    isolated_cmd(&home)
        .args(["--whois-command", MISSING_WHOIS, "example.org"])
        .assert()
        .success()
        .stdout(predicate::str::contains("1 checked"));
}
