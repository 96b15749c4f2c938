use crate::{query::QueryMeta, whitelist::Whitelists};

/// `SELECT *` and `SELECT T.*` are banned regardless of table count: full
/// column exposure defeats the column whitelist.
pub(super) fn check(meta: &QueryMeta, _whitelists: &Whitelists) -> Result<(), String> {
    for column in &meta.root_columns {
        if column == "*" || column.ends_with(".*") {
            return Err(format!("SELECT {} is not allowed", column));
        }
    }
    Ok(())
}
