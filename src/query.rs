mod extract;
pub mod types;

use extract::{Clause, scan_expr, walk_set_expr};
use sqlparser::{
    ast::{OrderByKind, Statement},
    dialect::GenericDialect,
    parser::Parser
};
pub use types::{QueryMeta, SUBQUERY_MARKER};

use crate::error::{AppResult, parse_error};

/// Parse SQL text into one metadata record per SELECT block.
///
/// Only SELECT statements are analyzed. Any other statement type contributes
/// nothing; the caller must treat an empty result as nothing-to-validate,
/// never as approval to execute. A parse failure is fatal and returns no
/// partial metadata.
pub fn parse(sql: &str) -> AppResult<Vec<QueryMeta>> {
    let statements =
        Parser::parse_sql(&GenericDialect {}, sql).map_err(|e| parse_error(e.to_string()))?;

    let mut metas = Vec::new();
    for stmt in statements {
        if let Statement::Query(query) = stmt {
            walk_query(&query, &mut metas);
        }
    }
    Ok(metas)
}

/// Walk one query level: its body, its WITH head and its own ORDER BY.
///
/// A set-operation body appends one record per member. The WITH head and the
/// query-level ORDER BY belong to the whole query, so both attach to every
/// member this level produced: CTE bodies fold like sub-queries (tables
/// merged, risk flags propagated) and the outer ORDER BY expressions sort the
/// combined result, not any one member alone.
pub(crate) fn walk_query(query: &sqlparser::ast::Query, metas: &mut Vec<QueryMeta>) {
    let first = metas.len();
    walk_set_expr(&query.body, metas);

    if let Some(with) = &query.with {
        for cte in &with.cte_tables {
            let mut sub_metas = Vec::new();
            walk_query(&cte.query, &mut sub_metas);
            for meta in &mut metas[first..] {
                meta.add_cte_name(cte.alias.name.value.as_str());
                for sub in &sub_metas {
                    meta.fold_subquery(sub);
                }
            }
        }
    }

    if let Some(order_by) = &query.order_by
        && let OrderByKind::Expressions(exprs) = &order_by.kind
    {
        for meta in &mut metas[first..] {
            for expr in exprs {
                scan_expr(&expr.expr, Clause::OrderBy, meta);
            }
        }
    }
}
