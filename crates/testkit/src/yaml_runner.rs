use std::collections::BTreeMap;

use onlinealter_core::{OnlineSchemaChange, OnlineSchemaChangeConfig, ProcessOutput, Statement};
use serde::Deserialize;

use crate::{FIXTURE_PASSWORD, FIXTURE_USER, ScriptedToolRunner, fixture_connection};

/// One batch scenario: the statements, what the tool prints, and what the
/// final invocation must look like.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TestCase {
    pub statements: Vec<String>,
    pub probe_output: String,
    pub probe_status: i32,
    pub execute_status: i32,
    pub execute_stderr: String,
    pub params: Vec<String>,
    pub pretend: bool,
    /// Expected `--alter` argument of the probe.
    pub probe_alter: Option<String>,
    /// Expected `--alter` argument of the real invocation.
    pub alter: Option<String>,
    /// Substring the batch error must contain.
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestResult {
    Passed,
    Failed(String),
}

pub fn load_test_cases_from_str(yaml: &str) -> Result<BTreeMap<String, TestCase>, serde_yaml::Error> {
    serde_yaml::from_str(yaml)
}

pub fn run_test(test: &TestCase) -> TestResult {
    match run_test_flow(test) {
        Ok(()) => TestResult::Passed,
        Err(message) => TestResult::Failed(message),
    }
}

fn run_test_flow(test: &TestCase) -> Result<(), String> {
    let runner = ScriptedToolRunner::new(
        process_output(test.probe_status, &test.probe_output, ""),
        process_output(test.execute_status, "", &test.execute_stderr),
    );
    let config = OnlineSchemaChangeConfig {
        params: test.params.clone(),
        pretend: test.pretend,
        ..OnlineSchemaChangeConfig::default()
    };
    let executor = OnlineSchemaChange::new(fixture_connection(), config, &runner);
    let statements: Vec<Statement> = test
        .statements
        .iter()
        .map(|sql| Statement::new(sql.as_str()))
        .collect();

    let outcome = executor.run_queries(&statements);
    match (&test.error, outcome) {
        (Some(expected), Ok(_)) => {
            return Err(format!("expected error containing `{expected}`, batch succeeded"));
        }
        (Some(expected), Err(error)) => {
            let rendered = error.to_string();
            if !rendered.contains(expected.as_str()) {
                return Err(format!(
                    "expected error containing `{expected}`, got `{rendered}`"
                ));
            }
            assert_credentials_hidden("error", &rendered)?;
            return Ok(());
        }
        (None, Err(error)) => return Err(format!("batch failed: {error}")),
        (None, Ok(_)) => {}
    }

    let commands = runner.commands();
    let probe = commands.first().ok_or("no probe invocation recorded")?;
    if !probe.is_dry_run() {
        return Err("first invocation must be a dry-run probe".to_string());
    }
    assert_alter("probe", test.probe_alter.as_deref(), probe.alter_argument())?;

    let real = commands
        .get(1)
        .ok_or("no real invocation recorded after the probe")?;
    if real.is_dry_run() != test.pretend {
        return Err(format!(
            "real invocation dry-run={} but pretend={}",
            real.is_dry_run(),
            test.pretend
        ));
    }
    assert_alter("real", test.alter.as_deref(), real.alter_argument())?;

    for command in &commands {
        if command.tokens().iter().any(|token| token.trim().is_empty()) {
            return Err(format!("blank token in `{command}`"));
        }
    }

    Ok(())
}

fn assert_alter(label: &str, expected: Option<&str>, actual: Option<&str>) -> Result<(), String> {
    let Some(expected) = expected else {
        return Ok(());
    };

    if actual == Some(expected) {
        Ok(())
    } else {
        Err(format!(
            "{label} --alter mismatch\nexpected: {expected}\nactual: {}",
            actual.unwrap_or("<missing>")
        ))
    }
}

fn assert_credentials_hidden(label: &str, text: &str) -> Result<(), String> {
    if !text.contains(FIXTURE_PASSWORD) && !text.contains(FIXTURE_USER) {
        Ok(())
    } else {
        Err(format!("{label} output leaks credentials: {text}"))
    }
}

fn process_output(status: i32, stdout: &str, stderr: &str) -> ProcessOutput {
    ProcessOutput {
        status: Some(status),
        success: status == 0,
        stdout: stdout.to_string(),
        stderr: stderr.to_string(),
    }
}
