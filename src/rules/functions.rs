use crate::{query::QueryMeta, whitelist::Whitelists};

/// Every referenced function/expression name must be whitelisted.
pub(super) fn check(meta: &QueryMeta, whitelists: &Whitelists) -> Result<(), String> {
    for function in &meta.functions {
        if !whitelists.functions.is_allowed(function) {
            return Err(format!("function not whitelisted: {}", function));
        }
    }
    Ok(())
}
