use crate::{query::QueryMeta, whitelist::Whitelists};

/// Column qualification rules for the SELECT list.
///
/// With more than one root table every column must carry a prefix, and the
/// prefix must resolve to a declared alias or a root table name. Single-table
/// queries tolerate unqualified columns.
pub(super) fn check(meta: &QueryMeta, _whitelists: &Whitelists) -> Result<(), String> {
    let multi_table = meta.root_tables.len() > 1;

    for column in &meta.root_columns {
        // star sentinels are the select-star rule's concern
        if column == "*" || column.ends_with(".*") {
            continue;
        }

        match column.split_once('.') {
            None => {
                if multi_table {
                    return Err(format!(
                        "unqualified column in multi-table query is ambiguous: {}",
                        column
                    ));
                }
            }
            Some((prefix, _)) => {
                if meta.aliases.contains_key(prefix) || meta.root_tables.contains(prefix) {
                    continue;
                }
                return Err(format!(
                    "column prefix does not map to a table or alias: {}",
                    column
                ));
            }
        }
    }
    Ok(())
}
