use crate::{query::QueryMeta, whitelist::Whitelists};

/// Multi-table queries need at least one JOIN-ON or WHERE condition;
/// a bare comma join over two root tables is a cartesian product.
pub(super) fn check(meta: &QueryMeta, _whitelists: &Whitelists) -> Result<(), String> {
    if meta.root_tables.len() > 1 && !meta.has_condition {
        return Err(
            "multi-table query without JOIN or WHERE condition (cartesian product)".to_string()
        );
    }
    Ok(())
}
