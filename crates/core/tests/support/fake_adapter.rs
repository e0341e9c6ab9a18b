use onlinealter_core::{
    BatchAdapter, DatabaseAdapter, ExecutionError, Result, Statement,
};

/// Records what the schema builder hands it. Batch support is opt-in.
#[derive(Debug, Default)]
pub struct FakeAdapter {
    supports_batch: bool,
    fail_on_sql: Option<String>,
    single_calls: Vec<String>,
    batch_calls: Vec<Vec<String>>,
}

#[allow(dead_code)]
impl FakeAdapter {
    pub fn batching() -> Self {
        Self {
            supports_batch: true,
            ..Self::default()
        }
    }

    pub fn set_fail_on_sql(&mut self, sql: impl Into<String>) {
        self.fail_on_sql = Some(sql.into());
    }

    pub fn single_calls(&self) -> &[String] {
        &self.single_calls
    }

    pub fn batch_calls(&self) -> &[Vec<String>] {
        &self.batch_calls
    }
}

impl DatabaseAdapter for FakeAdapter {
    fn statement(&mut self, statement: &Statement) -> Result<()> {
        if self.fail_on_sql.as_deref() == Some(statement.as_str()) {
            return Err(ExecutionError::statement_failed(
                0,
                statement.as_str(),
                std::io::Error::other("statement rejected"),
            )
            .into());
        }
        self.single_calls.push(statement.as_str().to_string());
        Ok(())
    }

    fn as_batch(&mut self) -> Option<&mut dyn BatchAdapter> {
        if self.supports_batch {
            Some(self)
        } else {
            None
        }
    }
}

impl BatchAdapter for FakeAdapter {
    fn statements(&mut self, statements: &[Statement]) -> Result<()> {
        self.batch_calls.push(
            statements
                .iter()
                .map(|statement| statement.as_str().to_string())
                .collect(),
        );
        Ok(())
    }
}
