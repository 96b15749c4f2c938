use crate::{
    query::{QueryMeta, SUBQUERY_MARKER},
    whitelist::Whitelists
};

/// Table/column whitelist check over everything the block reaches.
///
/// Tables: every name in the block's full table set must have a non-empty
/// allowed-column set. The sub-query sentinel and declared CTE names are
/// transparent pass-through names and are skipped.
///
/// Columns: a qualified column resolves through the alias map, then its
/// literal prefix; an unqualified column resolves to the sole root table when
/// exactly one exists (ambiguous multi-table cases are the prefix rule's
/// concern). Columns resolving to a sub-query or CTE are skipped.
pub(super) fn check(meta: &QueryMeta, whitelists: &Whitelists) -> Result<(), String> {
    for table in &meta.tables {
        if table == SUBQUERY_MARKER || meta.is_cte(table) {
            continue;
        }
        if !whitelists.tables.has_columns(table) {
            return Err(format!("table not whitelisted: {}", table));
        }
    }

    for column in &meta.columns {
        if column == "*" || column.ends_with(".*") {
            continue;
        }

        match column.split_once('.') {
            None => {
                if meta.root_tables.len() == 1
                    && let Some(table) = meta.root_tables.first()
                {
                    if meta.is_cte(table) {
                        continue;
                    }
                    if !whitelists.tables.is_allowed(table, column) {
                        return Err(format!("column not whitelisted: {}.{}", table, column));
                    }
                }
            }
            Some((prefix, name)) => {
                let table = meta.aliases.get(prefix).map(|t| t.as_str()).unwrap_or(prefix);
                if table == SUBQUERY_MARKER || meta.is_cte(table) {
                    continue;
                }
                if !whitelists.tables.is_allowed(table, name) {
                    return Err(format!("column not whitelisted: {}.{}", table, name));
                }
            }
        }
    }
    Ok(())
}
