//! Adapts schema-migration statements for an online schema-change tool.
//!
//! Statements on one table are folded into a single tool invocation. Before the
//! real run, a dry-run probe reveals the names the tool gives foreign keys on
//! its cloned table, and `drop foreign key` clauses are rewritten to match.

mod adapter;
mod auth;
mod batch;
mod command;
mod config;
mod error;
mod process;
mod rename;
mod sanitize;
mod schema_builder;
mod statement;
mod transform;

pub use adapter::{BatchAdapter, DatabaseAdapter};
pub use auth::build_auth_string;
pub use batch::{BatchOutcome, OnlineSchemaChange};
pub use command::{ALTER_FLAG, DRY_RUN_FLAG, EXECUTE_FLAG, ToolCommand, assemble_command};
pub use config::{ConnectionConfig, Credentials, DEFAULT_TOOL, OnlineSchemaChangeConfig};
pub use error::{ConfigError, Error, ExecutionError, ProbeError, Result, StatementError};
pub use process::{ProcessOutput, SystemToolRunner, ToolRunner};
pub use rename::{
    ConstraintRenameMap, base_constraint_name, parse_constraint_names, resolve_renames,
};
pub use sanitize::{REDACTED, mask_credentials, sanitize_command};
pub use schema_builder::SchemaBuilder;
pub use statement::{Statement, StatementBatch, group_by_table, split_statements};
pub use transform::{rewrite_drop_foreign_key, transform_queries};
