#![cfg(unix)]

use std::{fs, process::Command};

use tempfile::tempdir;

#[path = "support/fake_tool.rs"]
mod fake_tool;

use fake_tool::write_fake_tool;

#[test]
fn tool_failure_keeps_execute_category_with_cli_context() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    let tool = write_fake_tool(tempdir.path(), "", 3);
    let file = tempdir.path().join("migration.sql");
    fs::write(&file, "alter table `t` add column `a` int;")
        .unwrap_or_else(|error| panic!("failed to write migration.sql: {error}"));

    let output = Command::new(env!("CARGO_BIN_EXE_onlinealter"))
        .arg("osc")
        .arg("app")
        .arg("--tool")
        .arg(&tool)
        .arg("--file")
        .arg(&file)
        .args(["--password", "pw"])
        .output()
        .unwrap_or_else(|error| panic!("failed to run onlinealter: {error}"));

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[execute]"), "got: {stderr}");
    assert!(stderr.contains("while running migration batches"), "got: {stderr}");
    assert!(stderr.contains("exit status 3"), "got: {stderr}");
    assert!(stderr.contains("Error altering new table"), "got: {stderr}");
}

#[test]
fn malformed_statement_is_reported_with_statement_category() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    let file = tempdir.path().join("migration.sql");
    fs::write(&file, "alter table `t` add column `a` int;\ndrop table t;")
        .unwrap_or_else(|error| panic!("failed to write migration.sql: {error}"));

    let output = Command::new(env!("CARGO_BIN_EXE_onlinealter"))
        .arg("osc")
        .arg("app")
        .arg("--file")
        .arg(&file)
        .args(["--password", "pw"])
        .output()
        .unwrap_or_else(|error| panic!("failed to run onlinealter: {error}"));

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[statement]"), "got: {stderr}");
    assert!(stderr.contains("statement[1]"), "got: {stderr}");
}

#[test]
fn missing_password_is_a_config_error() {
    let tempdir = tempdir().unwrap_or_else(|error| panic!("failed to create tempdir: {error}"));
    let tool = write_fake_tool(tempdir.path(), "", 0);
    let file = tempdir.path().join("migration.sql");
    fs::write(&file, "alter table `t` add column `a` int;")
        .unwrap_or_else(|error| panic!("failed to write migration.sql: {error}"));

    let output = Command::new(env!("CARGO_BIN_EXE_onlinealter"))
        .arg("osc")
        .arg("app")
        .arg("--tool")
        .arg(&tool)
        .arg("--file")
        .arg(&file)
        .env_remove("ONLINEALTER_PASSWORD")
        .output()
        .unwrap_or_else(|error| panic!("failed to run onlinealter: {error}"));

    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("[config]"), "got: {stderr}");
    assert!(stderr.contains("password"), "got: {stderr}");
    assert!(!tempdir.path().join("invocations.log").exists());
}
