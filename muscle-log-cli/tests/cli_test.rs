use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn test_help_command() {
    let mut cmd = Command::cargo_bin("muscle-log").unwrap();
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Muscle Log workout tracker"))
        .stdout(predicate::str::contains("login"))
        .stdout(predicate::str::contains("workout"))
        .stdout(predicate::str::contains("calendar"));
}

#[test]
fn test_version_command() {
    let mut cmd = Command::cargo_bin("muscle-log").unwrap();
    cmd.arg("--version");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("0.1.0"));
}

#[test]
fn test_completions_command() {
    let mut cmd = Command::cargo_bin("muscle-log").unwrap();
    cmd.arg("completions").arg("bash");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("_muscle__log()"))
        .stdout(predicate::str::contains("muscle-log"));
}

#[test]
fn test_protected_command_requires_login() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let mut cmd = Command::cargo_bin("muscle-log").unwrap();
    cmd.arg("--config")
        .arg(&config)
        .arg("calendar")
        .env("MUSCLE_LOG_DB_PATH", dir.path().join("queue"));

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("not logged in"));
}

#[test]
fn test_config_init_writes_file() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.toml");

    let mut cmd = Command::cargo_bin("muscle-log").unwrap();
    cmd.arg("--config").arg(&config).arg("config").arg("init");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Configuration initialized"));

    let written = std::fs::read_to_string(&config).unwrap();
    assert!(written.contains("base_url"));
    assert!(written.contains("week_start"));
}
