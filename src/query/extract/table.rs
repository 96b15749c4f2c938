use sqlparser::ast::{JoinConstraint, TableFactor};

use super::{Clause, expr::scan_expr, set_expr::join_constraint};
use crate::query::{
    types::{QueryMeta, SUBQUERY_MARKER},
    walk_query
};

/// Register a FROM/JOIN data source into the block's metadata.
///
/// A named table lands in root tables, all tables and the alias map. An
/// anonymous sub-query registers the sentinel marker, recurses independently
/// and folds its risk flags into the parent.
pub(crate) fn register_table_factor(table_factor: &TableFactor, meta: &mut QueryMeta) {
    match table_factor {
        TableFactor::Table {
            name,
            alias,
            ..
        } => {
            let table = name.to_string();
            meta.add_root_table(&table);
            meta.add_table(&table);
            if let Some(alias) = alias {
                meta.add_alias(&alias.name.value, &table);
            }
        }
        TableFactor::Derived {
            subquery,
            alias,
            ..
        } => {
            meta.add_table(SUBQUERY_MARKER);
            if let Some(alias) = alias {
                meta.add_alias(&alias.name.value, SUBQUERY_MARKER);
            }
            let mut sub_metas = Vec::new();
            walk_query(subquery, &mut sub_metas);
            for sub in &sub_metas {
                meta.fold_subquery(sub);
            }
        }
        TableFactor::NestedJoin {
            table_with_joins, ..
        } => {
            register_table_factor(&table_with_joins.relation, meta);
            for join in &table_with_joins.joins {
                register_table_factor(&join.relation, meta);
                if let Some(JoinConstraint::On(on)) = join_constraint(&join.join_operator) {
                    meta.has_condition = true;
                    scan_expr(on, Clause::JoinOn, meta);
                }
            }
        }
        _ => {}
    }
}
