use std::{collections::BTreeMap, sync::LazyLock};

use regex::Regex;
use tracing::{debug, warn};

use crate::{Credentials, ProbeError, ToolRunner, assemble_command, mask_credentials};

static CONSTRAINT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)constraint `([^`]*)`").expect("constraint pattern must compile")
});

/// Maps a base constraint name to the name the tool gives it on the cloned table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConstraintRenameMap {
    renames: BTreeMap<String, String>,
}

impl ConstraintRenameMap {
    /// Keys every observed name by its underscore-trimmed base; a later name
    /// with the same base replaces an earlier one.
    pub fn from_constraint_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut renames = BTreeMap::new();
        for name in names {
            let name = name.into();
            renames.insert(base_constraint_name(&name).to_string(), name);
        }
        Self { renames }
    }

    #[must_use]
    pub fn from_probe_output(stdout: &str) -> Self {
        Self::from_constraint_names(parse_constraint_names(stdout))
    }

    /// Records a rename directly, returning the name it replaces.
    pub fn insert(
        &mut self,
        base_name: impl Into<String>,
        renamed: impl Into<String>,
    ) -> Option<String> {
        self.renames.insert(base_name.into(), renamed.into())
    }

    #[must_use]
    pub fn get(&self, base_name: &str) -> Option<&str> {
        self.renames.get(base_name).map(String::as_str)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.renames.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.renames.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.renames
            .iter()
            .map(|(base, renamed)| (base.as_str(), renamed.as_str()))
    }
}

/// Every `` constraint `<name>` `` in the output, in order, duplicates kept.
#[must_use]
pub fn parse_constraint_names(output: &str) -> Vec<String> {
    CONSTRAINT_RE
        .captures_iter(output)
        .filter_map(|captures| captures.get(1))
        .map(|name| name.as_str().to_string())
        .collect()
}

#[must_use]
pub fn base_constraint_name(name: &str) -> &str {
    name.trim_start_matches('_')
}

/// Runs a dry-run probe over the cleaned clauses and collects the constraint
/// names it reports. Probe failures degrade to an empty map.
pub fn resolve_renames<R>(
    runner: &R,
    tool: &str,
    table: &str,
    cleaned_queries: &[String],
    credentials: &Credentials,
    extra_params: &[String],
) -> ConstraintRenameMap
where
    R: ToolRunner + ?Sized,
{
    match run_dry_run(runner, tool, table, cleaned_queries, credentials, extra_params) {
        Ok(stdout) => {
            let renames = ConstraintRenameMap::from_probe_output(&stdout);
            debug!(table, renames = renames.len(), "resolved constraint renames");
            renames
        }
        Err(error) => {
            warn!(table, %error, "dry-run probe failed; continuing without constraint renames");
            ConstraintRenameMap::default()
        }
    }
}

fn run_dry_run<R>(
    runner: &R,
    tool: &str,
    table: &str,
    cleaned_queries: &[String],
    credentials: &Credentials,
    extra_params: &[String],
) -> Result<String, ProbeError>
where
    R: ToolRunner + ?Sized,
{
    let auth = credentials.auth_string(table);
    let command = assemble_command(tool, cleaned_queries, &auth, true, extra_params);
    let output = runner.run(&command)?;
    if !output.success {
        return Err(ProbeError::Exited {
            status: output.status,
            stderr: mask_credentials(
                output.stderr.trim_end(),
                &credentials.username,
                &credentials.password,
            ),
        });
    }
    Ok(output.stdout)
}
