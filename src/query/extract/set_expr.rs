use sqlparser::ast::{Expr, GroupByExpr, JoinConstraint, JoinOperator, Select, SelectItem, SetExpr};

use super::{Clause, expr::scan_expr, table::register_table_factor};
use crate::query::{types::QueryMeta, walk_query};

/// Walk a set expression, appending one metadata record per SELECT block.
///
/// A set operation recurses into both members; a parenthesized query body
/// recurses through [`walk_query`] so its own ORDER BY attaches to the
/// members it produces.
pub(crate) fn walk_set_expr(set_expr: &SetExpr, metas: &mut Vec<QueryMeta>) {
    match set_expr {
        SetExpr::Select(select) => walk_select(select, metas),
        SetExpr::SetOperation {
            left,
            right,
            ..
        } => {
            walk_set_expr(left, metas);
            walk_set_expr(right, metas);
        }
        SetExpr::Query(query) => walk_query(query, metas),
        // VALUES and DML bodies never reach the validators; the parser only
        // analyzes SELECT
        _ => {}
    }
}

fn walk_select(select: &Select, metas: &mut Vec<QueryMeta>) {
    let mut meta = QueryMeta::default();

    for item in &select.projection {
        match item {
            SelectItem::Wildcard(_) => meta.add_root_column("*"),
            SelectItem::QualifiedWildcard(kind, _) => {
                // kind's Display already renders the trailing ".*"
                meta.add_root_column(&kind.to_string());
            }
            SelectItem::UnnamedExpr(expr)
            | SelectItem::ExprWithAlias {
                expr, ..
            } => {
                scan_expr(expr, Clause::Select, &mut meta);
                // a bare column expression is also a root column
                if matches!(expr, Expr::Identifier(_) | Expr::CompoundIdentifier(_)) {
                    meta.add_root_column(&expr.to_string());
                }
            }
        }
    }

    for table in &select.from {
        register_table_factor(&table.relation, &mut meta);
        for join in &table.joins {
            register_table_factor(&join.relation, &mut meta);
            if let Some(JoinConstraint::On(on)) = join_constraint(&join.join_operator) {
                meta.has_condition = true;
                scan_expr(on, Clause::JoinOn, &mut meta);
            }
        }
    }

    if let Some(selection) = &select.selection {
        meta.has_condition = true;
        scan_expr(selection, Clause::Where, &mut meta);
    }

    if let GroupByExpr::Expressions(exprs, _) = &select.group_by {
        for expr in exprs {
            scan_expr(expr, Clause::GroupBy, &mut meta);
        }
    }

    if let Some(having) = &select.having {
        meta.has_condition = true;
        scan_expr(having, Clause::Having, &mut meta);
    }

    metas.push(meta);
}

pub(crate) fn join_constraint(op: &JoinOperator) -> Option<&JoinConstraint> {
    match op {
        JoinOperator::Join(c)
        | JoinOperator::Inner(c)
        | JoinOperator::Left(c)
        | JoinOperator::LeftOuter(c)
        | JoinOperator::Right(c)
        | JoinOperator::RightOuter(c)
        | JoinOperator::FullOuter(c) => Some(c),
        _ => None
    }
}
