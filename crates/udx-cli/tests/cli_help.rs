use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

#[test]
fn test_help_shows_all_commands() {
    cargo_bin_cmd!("udx")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("logout"))
        .stdout(predicate::str::contains("status"))
        .stdout(predicate::str::contains("users"))
        .stdout(predicate::str::contains("config"));
}

#[test]
fn test_users_help_shows_subcommands() {
    cargo_bin_cmd!("udx")
        .args(["users", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("list"))
        .stdout(predicate::str::contains("city"))
        .stdout(predicate::str::contains("get"))
        .stdout(predicate::str::contains("set-role"))
        .stdout(predicate::str::contains("delete"));
}

#[test]
fn test_config_help_shows_subcommands() {
    cargo_bin_cmd!("udx")
        .args(["config", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("path"))
        .stdout(predicate::str::contains("init"));
}

#[test]
fn test_version_flag() {
    cargo_bin_cmd!("udx")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("0.1"));
}
