use tracing::debug;

use crate::{DatabaseAdapter, Error, ExecutionError, Result, Statement};

/// Hands one table's compiled statements to the adapter, batched when the
/// adapter supports it and one by one otherwise.
pub struct SchemaBuilder<'a> {
    adapter: &'a mut dyn DatabaseAdapter,
}

impl<'a> SchemaBuilder<'a> {
    #[must_use]
    pub fn new(adapter: &'a mut dyn DatabaseAdapter) -> Self {
        Self { adapter }
    }

    pub fn build(&mut self, statements: &[Statement]) -> Result<()> {
        if statements.is_empty() {
            return Ok(());
        }

        if let Some(batch) = self.adapter.as_batch() {
            debug!(statements = statements.len(), "executing statements as one batch");
            return batch.statements(statements);
        }

        for (index, statement) in statements.iter().enumerate() {
            self.adapter
                .statement(statement)
                .map_err(|error| with_statement_index(error, index))?;
        }

        Ok(())
    }
}

/// Adapters only see one statement at a time, so a failure is re-pointed at its
/// position in the slice handed to `build`.
fn with_statement_index(error: Error, index: usize) -> Error {
    match error {
        Error::Execute(ExecutionError::StatementFailed { sql, source, .. }) => {
            ExecutionError::StatementFailed {
                statement_index: index,
                sql,
                source,
            }
            .into()
        }
        other => other,
    }
}
