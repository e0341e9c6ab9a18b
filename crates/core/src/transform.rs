use std::sync::LazyLock;

use regex::Regex;

use crate::{ConstraintRenameMap, base_constraint_name};

static DROP_FOREIGN_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)drop\s+foreign\s+key\s+`([^`]*)`")
        .expect("drop foreign key pattern must compile")
});

#[must_use]
pub fn transform_queries(queries: &[String], renames: &ConstraintRenameMap) -> Vec<String> {
    queries
        .iter()
        .map(|query| rewrite_drop_foreign_key(query, renames))
        .collect()
}

/// Points the first `drop foreign key` clause at the renamed constraint, if the
/// tool reported one for that key. Anything else is returned unchanged.
#[must_use]
pub fn rewrite_drop_foreign_key(query: &str, renames: &ConstraintRenameMap) -> String {
    let Some(key) = DROP_FOREIGN_KEY_RE
        .captures(query)
        .and_then(|captures| captures.get(1))
    else {
        return query.to_string();
    };

    let Some(renamed) = renames.get(base_constraint_name(key.as_str())) else {
        return query.to_string();
    };

    let mut rewritten = String::with_capacity(query.len() + renamed.len());
    rewritten.push_str(&query[..key.start()]);
    rewritten.push_str(renamed);
    rewritten.push_str(&query[key.end()..]);
    rewritten
}
