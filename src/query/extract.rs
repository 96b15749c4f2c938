mod expr;
mod set_expr;
mod table;

pub(crate) use expr::scan_expr;
pub(crate) use set_expr::walk_set_expr;

/// Clause a scanned expression belongs to.
///
/// Only the WHERE/JOIN-ON distinction changes how a constant comparison is
/// classified, but threading the full clause keeps the scan context explicit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Clause {
    Select,
    Where,
    JoinOn,
    GroupBy,
    Having,
    OrderBy
}
