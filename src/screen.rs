//! Raw-text keyword screen, the first defense line before parsing.
//!
//! Rejects statement-altering verbs and vendor dynamic-execution, file and
//! scheduler facilities on the bare SQL text. String literal content is
//! stripped first so a value such as `'USER_DROP_A'` never triggers a false
//! positive, and matching is word-boundary based so identifiers that merely
//! contain a banned substring (`DROPSHIP`) pass.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{AppResult, forbidden_keyword_error};

const FORBIDDEN: &[&str] = &[
    "DROP",
    "TRUNCATE",
    "DELETE",
    "ALTER",
    "RENAME",
    "MERGE",
    "GRANT",
    "REVOKE",
    // Oracle dynamic SQL / file system / scheduler facilities
    r"EXECUTE\s+IMMEDIATE",
    "UTL_FILE",
    "DBMS_SQL",
    "DBMS_SCHEDULER",
];

// '([^']|'')*' : a single-quoted literal with doubled-quote escaping
static STRING_LITERAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"'([^']|'')*'").unwrap_or_else(|e| panic!("invalid literal pattern: {e}"))
});

static PATTERNS: LazyLock<Vec<(String, Regex)>> = LazyLock::new(|| {
    FORBIDDEN
        .iter()
        .map(|kw| {
            let display = kw.replace(r"\s+", " ");
            let pattern = Regex::new(&format!(r"(?i)\b{}\b", kw))
                .unwrap_or_else(|e| panic!("invalid keyword pattern '{kw}': {e}"));
            (display, pattern)
        })
        .collect()
});

/// Screen raw SQL text against the keyword block-list.
///
/// A blank input passes (it is not a threat; later stages decide what to do
/// with it). The first matching keyword rejects, named in the error.
pub fn screen(sql: &str) -> AppResult<()> {
    if sql.trim().is_empty() {
        return Ok(());
    }

    let stripped = STRING_LITERAL.replace_all(sql, "''");
    for (display, pattern) in PATTERNS.iter() {
        if pattern.is_match(&stripped) {
            return Err(forbidden_keyword_error(display));
        }
    }
    Ok(())
}
