use std::fmt;

pub const DRY_RUN_FLAG: &str = "--dry-run";
pub const EXECUTE_FLAG: &str = "--execute";
pub const ALTER_FLAG: &str = "--alter";
const CLAUSE_SEPARATOR: &str = ", ";

/// Argument vector for one tool invocation. The first token is the program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    tokens: Vec<String>,
}

impl ToolCommand {
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    #[must_use]
    pub fn program(&self) -> &str {
        self.tokens.first().map_or("", String::as_str)
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        self.tokens.get(1..).unwrap_or_default()
    }

    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.tokens.get(1).is_some_and(|flag| flag == DRY_RUN_FLAG)
    }

    /// The token following `--alter`.
    #[must_use]
    pub fn alter_argument(&self) -> Option<&str> {
        self.tokens
            .iter()
            .position(|token| token == ALTER_FLAG)
            .and_then(|index| self.tokens.get(index + 1))
            .map(String::as_str)
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tokens.join(" "))
    }
}

#[must_use]
pub fn assemble_command(
    tool: &str,
    alter_clauses: &[String],
    auth: &str,
    dry_run: bool,
    extra_params: &[String],
) -> ToolCommand {
    let mode = if dry_run { DRY_RUN_FLAG } else { EXECUTE_FLAG };

    let tokens = [tool.to_string(), mode.to_string()]
        .into_iter()
        .chain(extra_params.iter().cloned())
        .chain([
            ALTER_FLAG.to_string(),
            alter_clauses.join(CLAUSE_SEPARATOR),
            auth.to_string(),
        ])
        .filter(|token| !token.trim().is_empty())
        .collect();

    ToolCommand { tokens }
}
