use assert_cmd::Command;
use predicates::str::contains;

#[test]
fn help_prints_usage() {
    let mut cmd = Command::cargo_bin("finance_hub_cli").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("Usage: finance_hub_cli <USER_ID>"));
}

#[test]
fn version_prints_build_summary() {
    let mut cmd = Command::cargo_bin("finance_hub_cli").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn rejects_malformed_user_id() {
    let mut cmd = Command::cargo_bin("finance_hub_cli").unwrap();
    cmd.arg("not-a-uuid")
        .assert()
        .code(2)
        .stderr(contains("is not a user id"));
}

#[test]
fn missing_user_id_shows_usage() {
    let mut cmd = Command::cargo_bin("finance_hub_cli").unwrap();
    cmd.assert()
        .code(2)
        .stderr(contains("missing user id"))
        .stderr(contains("Usage:"));
}
