use tracing::{debug, info};

use crate::{
    BatchAdapter, ConnectionConfig, Credentials, DatabaseAdapter, ExecutionError,
    OnlineSchemaChangeConfig, Result, Statement, StatementBatch, ToolRunner, assemble_command,
    mask_credentials, resolve_renames, sanitize_command, transform_queries,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchOutcome {
    pub table: String,
    /// The `--alter` argument the tool ran with.
    pub alter: String,
    pub dry_run: bool,
}

/// Runs statement batches through the online schema-change tool.
#[derive(Debug)]
pub struct OnlineSchemaChange<R> {
    connection: ConnectionConfig,
    config: OnlineSchemaChangeConfig,
    runner: R,
}

impl<R: ToolRunner> OnlineSchemaChange<R> {
    pub fn new(connection: ConnectionConfig, config: OnlineSchemaChangeConfig, runner: R) -> Self {
        Self {
            connection,
            config,
            runner,
        }
    }

    #[must_use]
    pub fn runner(&self) -> &R {
        &self.runner
    }

    #[must_use]
    pub fn config(&self) -> &OnlineSchemaChangeConfig {
        &self.config
    }

    pub fn run_queries(&self, queries: &[Statement]) -> Result<BatchOutcome> {
        let batch = StatementBatch::new(queries.to_vec())?;
        let credentials = Credentials::from_connection(&self.connection)?;
        let table = batch.table();
        let tool = self.config.tool_name();
        let auth = credentials.auth_string(table);

        let cleaned = batch.alter_clauses();
        let renames = resolve_renames(
            &self.runner,
            &tool,
            table,
            &cleaned,
            &credentials,
            &self.config.params,
        );
        let transformed = transform_queries(&cleaned, &renames);

        let command = assemble_command(
            &tool,
            &transformed,
            &auth,
            self.config.pretend,
            &self.config.params,
        );
        info!(
            table,
            command = %sanitize_command(command.tokens(), &credentials.username, &credentials.password),
            "running online schema change"
        );

        let output = self
            .runner
            .run(&command)
            .map_err(|source| ExecutionError::Spawn {
                tool: tool.clone(),
                table: table.to_string(),
                source,
            })?;
        for line in output.stdout.lines() {
            let line = mask_credentials(line, &credentials.username, &credentials.password);
            debug!(table, "{line}");
        }

        if !output.success {
            return Err(ExecutionError::ToolFailed {
                tool,
                table: table.to_string(),
                status: output.status,
                stderr: mask_credentials(
                    output.stderr.trim_end(),
                    &credentials.username,
                    &credentials.password,
                ),
            }
            .into());
        }

        Ok(BatchOutcome {
            table: table.to_string(),
            alter: command.alter_argument().unwrap_or_default().to_string(),
            dry_run: command.is_dry_run(),
        })
    }
}

impl<R: ToolRunner> DatabaseAdapter for OnlineSchemaChange<R> {
    fn statement(&mut self, statement: &Statement) -> Result<()> {
        self.run_queries(std::slice::from_ref(statement)).map(drop)
    }

    fn as_batch(&mut self) -> Option<&mut dyn BatchAdapter> {
        Some(self)
    }
}

impl<R: ToolRunner> BatchAdapter for OnlineSchemaChange<R> {
    fn statements(&mut self, statements: &[Statement]) -> Result<()> {
        self.run_queries(statements).map(drop)
    }
}
