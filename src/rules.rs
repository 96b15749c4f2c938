//! Ordered validator chain over one metadata record.
//!
//! Each rule is a pure function `(meta, whitelists) -> Result<(), reason>`;
//! the runner folds over the ordered list and stops at the first failure.
//! The order is a designed invariant: cheap structural rejections come before
//! whitelist lookups, which come before the narrowest injection heuristic, so
//! attack payloads failing a cheap rule never reach the subtler stage.
//!
//! 1. join policy — multi-table query without any condition (cartesian
//!    product)
//! 2. select-star — `*` / `T.*` in the SELECT list
//! 3. prefix — column qualification in multi-table queries
//! 4. table/column whitelist
//! 5. function whitelist
//! 6. OR policy — constant-comparison OR and constant JOIN comparisons

mod functions;
mod join;
mod or_policy;
mod prefix;
mod select_star;
mod whitelist;

use crate::{query::QueryMeta, whitelist::Whitelists};

/// Shared signature of every chain rule.
pub type RuleFn = fn(&QueryMeta, &Whitelists) -> Result<(), String>;

/// A chain rejection: the failing rule and its human-readable reason.
#[derive(Debug, Clone)]
pub struct Violation {
    pub rule:   &'static str,
    pub reason: String
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.rule, self.reason)
    }
}

/// The chain, in its fixed execution order.
pub const CHAIN: &[(&str, RuleFn)] = &[
    ("join-policy", join::check),
    ("select-star", select_star::check),
    ("prefix", prefix::check),
    ("table-whitelist", whitelist::check),
    ("function-whitelist", functions::check),
    ("or-policy", or_policy::check),
];

/// Run every rule in order against one metadata record, stopping at the
/// first failure.
pub fn run_chain(meta: &QueryMeta, whitelists: &Whitelists) -> Result<(), Violation> {
    for &(rule, check) in CHAIN {
        check(meta, whitelists).map_err(|reason| Violation {
            rule,
            reason
        })?;
    }
    Ok(())
}
