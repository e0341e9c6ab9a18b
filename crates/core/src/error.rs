use std::{error::Error as StdError, io};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Statement(#[from] StatementError),
    #[error(transparent)]
    Execute(#[from] ExecutionError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing connection credential `{field}`")]
    MissingCredential { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatementError {
    #[error("statement batch is empty")]
    EmptyBatch,
    #[error("statement[{statement_index}] does not name an `alter table` target: {sql}")]
    MissingTable { statement_index: usize, sql: String },
    #[error(
        "statement[{statement_index}] targets table `{found}` but the batch targets `{expected}`"
    )]
    MixedTables {
        statement_index: usize,
        expected: String,
        found: String,
    },
}

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to spawn `{tool}` for table `{table}`: {source}")]
    Spawn {
        tool: String,
        table: String,
        #[source]
        source: io::Error,
    },
    #[error("`{tool}` failed for table `{table}` (exit status {}): {stderr}", display_status(.status))]
    ToolFailed {
        tool: String,
        table: String,
        status: Option<i32>,
        stderr: String,
    },
    #[error("statement[{statement_index}] failed: {sql}: {source}")]
    StatementFailed {
        statement_index: usize,
        sql: String,
        #[source]
        source: Box<dyn StdError + Send + Sync>,
    },
}

impl ExecutionError {
    pub fn statement_failed<E>(statement_index: usize, sql: impl Into<String>, source: E) -> Self
    where
        E: StdError + Send + Sync + 'static,
    {
        Self::StatementFailed {
            statement_index,
            sql: sql.into(),
            source: Box::new(source),
        }
    }
}

/// Failure of the dry-run probe. Never propagated; the resolver logs it and
/// falls back to an empty rename map.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("failed to spawn dry-run probe: {0}")]
    Spawn(#[from] io::Error),
    #[error("dry-run probe exited with status {}: {stderr}", display_status(.status))]
    Exited { status: Option<i32>, stderr: String },
}

fn display_status(status: &Option<i32>) -> String {
    status.map_or_else(|| "<signal>".to_string(), |code| code.to_string())
}
