use crate::{query::QueryMeta, whitelist::Whitelists};

/// Injection-heuristic check, last in the chain.
///
/// OR itself is allowed, and so is `WHERE 1=1` padding. What rejects is an
/// OR carrying a literal-vs-literal operand (`OR '1'='1'`), a bare constant
/// comparison outside any OR, and a constant comparison inside a JOIN-ON.
pub(super) fn check(meta: &QueryMeta, _whitelists: &Whitelists) -> Result<(), String> {
    if meta.unsafe_or {
        return Err(
            "OR condition contains a constant comparison (injection pattern)".to_string()
        );
    }
    if meta.constant_comparison_in_join {
        return Err("JOIN condition contains a constant comparison".to_string());
    }
    Ok(())
}
