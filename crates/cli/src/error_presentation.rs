use std::{io, path::PathBuf};

use miette::Report;

const BATCH_CONTEXT: &str = "while running migration batches";
const FILE_READ_CONTEXT: &str = "while reading statements file";
const STDIN_READ_CONTEXT: &str = "while reading statements from stdin";

pub(crate) const USAGE_EXIT_CODE: i32 = 2;
pub(crate) const RUNTIME_EXIT_CODE: i32 = 1;

pub(crate) type CliResult<T> = std::result::Result<T, CliError>;

#[derive(Debug)]
pub(crate) enum CliError {
    MissingStatementInput,
    ReadFile { path: PathBuf, source: io::Error },
    ReadStdin(io::Error),
    Core(onlinealter_core::Error),
}

impl From<onlinealter_core::Error> for CliError {
    fn from(value: onlinealter_core::Error) -> Self {
        Self::Core(value)
    }
}

impl From<onlinealter_core::StatementError> for CliError {
    fn from(value: onlinealter_core::StatementError) -> Self {
        Self::Core(value.into())
    }
}

impl CliError {
    pub(crate) fn exit_code(&self) -> i32 {
        match self {
            Self::MissingStatementInput => USAGE_EXIT_CODE,
            Self::ReadFile { .. } | Self::ReadStdin(_) | Self::Core(_) => RUNTIME_EXIT_CODE,
        }
    }
}

pub(crate) fn render_runtime_error(error: CliError) -> String {
    match error {
        CliError::MissingStatementInput => {
            format!("[usage] {}", missing_statement_input_message())
        }
        CliError::ReadFile { path, source } => {
            let context = format!("{FILE_READ_CONTEXT} `{}`", path.display());
            let report = report_with_context(source, context);
            format!("[io] {report}")
        }
        CliError::ReadStdin(source) => {
            let report = report_with_context(source, STDIN_READ_CONTEXT);
            format!("[io] {report}")
        }
        CliError::Core(source) => {
            let category = core_category(&source);
            let report = report_with_context(source, BATCH_CONTEXT);
            format!("[{category}] {report}")
        }
    }
}

fn report_with_context<E, C>(source: E, context: C) -> Report
where
    E: std::error::Error + Send + Sync + 'static,
    C: Into<String>,
{
    let context = context.into();
    let anyhow_error = anyhow::Error::new(source).context(context);
    miette::miette!("{anyhow_error:#}")
}

fn core_category(error: &onlinealter_core::Error) -> &'static str {
    match error {
        onlinealter_core::Error::Config(_) => "config",
        onlinealter_core::Error::Statement(_) => "statement",
        onlinealter_core::Error::Execute(_) => "execute",
    }
}

fn missing_statement_input_message() -> &'static str {
    "no statements to run: pass --file <PATH> or pipe SQL via stdin"
}
