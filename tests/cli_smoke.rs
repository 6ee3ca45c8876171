//! Smoke tests to verify binary flag wiring

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_help_lists_flags() {
    let mut cmd = Command::cargo_bin("learnhub-server").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Address to bind to"))
        .stdout(predicate::str::contains("--cors-permissive"));
}

#[test]
fn test_version_prints_package_version() {
    let mut cmd = Command::cargo_bin("learnhub-server").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_rejects_malformed_bind_address() {
    let mut cmd = Command::cargo_bin("learnhub-server").unwrap();
    cmd.arg("--bind").arg("not-an-address");

    cmd.assert().failure();
}
