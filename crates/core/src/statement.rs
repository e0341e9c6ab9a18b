use std::{fmt, sync::LazyLock};

use regex::Regex;

use crate::StatementError;

static ALTER_TABLE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)alter\s+table\s+`([^`]+)`").expect("alter table pattern must compile")
});

/// One DDL statement as produced by the schema compiler.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Statement(String);

impl Statement {
    pub fn new(sql: impl Into<String>) -> Self {
        Self(sql.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Table named by the leading `alter table \`X\`` framing.
    #[must_use]
    pub fn table_name(&self) -> Option<&str> {
        ALTER_TABLE_RE
            .captures(&self.0)
            .and_then(|captures| captures.get(1))
            .map(|table| table.as_str())
    }

    /// The statement with its `alter table \`X\`` framing removed, so it can be
    /// joined with other clauses into one `--alter` argument.
    #[must_use]
    pub fn alter_clause(&self) -> String {
        let stripped = ALTER_TABLE_RE.replace(&self.0, "");
        stripped.trim().trim_end_matches(';').trim_end().to_string()
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Statement {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Statement {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Ordered, non-empty statements that all alter the same table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatementBatch {
    table: String,
    statements: Vec<Statement>,
}

impl StatementBatch {
    pub fn new(statements: Vec<Statement>) -> Result<Self, StatementError> {
        let first = statements.first().ok_or(StatementError::EmptyBatch)?;
        let table = table_of(0, first)?.to_string();

        for (statement_index, statement) in statements.iter().enumerate().skip(1) {
            let found = table_of(statement_index, statement)?;
            if found != table {
                return Err(StatementError::MixedTables {
                    statement_index,
                    expected: table,
                    found: found.to_string(),
                });
            }
        }

        Ok(Self { table, statements })
    }

    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    #[must_use]
    pub fn alter_clauses(&self) -> Vec<String> {
        self.statements.iter().map(Statement::alter_clause).collect()
    }
}

/// Splits an ordered statement list into consecutive batches on the same table.
/// A later run on a table seen before starts a new batch so execution order is
/// never changed.
pub fn group_by_table(statements: Vec<Statement>) -> Result<Vec<StatementBatch>, StatementError> {
    let mut batches = Vec::new();
    let mut current: Vec<Statement> = Vec::new();
    let mut current_table: Option<String> = None;

    for (statement_index, statement) in statements.into_iter().enumerate() {
        let table = table_of(statement_index, &statement)?.to_string();
        if current_table.as_deref() != Some(table.as_str()) && !current.is_empty() {
            batches.push(StatementBatch::new(std::mem::take(&mut current))?);
        }
        current_table = Some(table);
        current.push(statement);
    }

    if !current.is_empty() {
        batches.push(StatementBatch::new(current)?);
    }

    Ok(batches)
}

/// Splits a script on `;` terminators, dropping blank pieces.
#[must_use]
pub fn split_statements(script: &str) -> Vec<Statement> {
    script
        .split(';')
        .map(str::trim)
        .filter(|sql| !sql.is_empty())
        .map(Statement::from)
        .collect()
}

fn table_of(statement_index: usize, statement: &Statement) -> Result<&str, StatementError> {
    statement
        .table_name()
        .ok_or_else(|| StatementError::MissingTable {
            statement_index,
            sql: statement.as_str().to_string(),
        })
}
