use sqlparser::ast::{BinaryOperator, Expr, Value};

use super::Clause;
use crate::query::{types::QueryMeta, walk_query};

/// Recursive expression scan shared by every clause walker.
///
/// Records bare columns and function names into `meta`, marks the OR and
/// constant-comparison risk flags, and recurses into nested sub-queries with
/// upward flag folding.
pub(crate) fn scan_expr(expr: &Expr, clause: Clause, meta: &mut QueryMeta) {
    match expr {
        Expr::Nested(inner) => scan_expr(inner, clause, meta),
        Expr::BinaryOp {
            left,
            op: BinaryOperator::Or,
            right
        } => {
            meta.dangerous_or = true;
            // OR with a literal-vs-literal operand is the always-true bypass
            // shape ("OR '1'='1'")
            if is_constant_comparison(left) || is_constant_comparison(right) {
                meta.unsafe_or = true;
            }
            scan_expr(left, clause, meta);
            scan_expr(right, clause, meta);
        }
        Expr::Exists {
            subquery, ..
        } => {
            meta.has_condition = true;
            fold_nested_query(subquery, meta);
        }
        Expr::Subquery(subquery) => {
            fold_nested_query(subquery, meta);
        }
        Expr::InSubquery {
            expr,
            subquery,
            ..
        } => {
            scan_expr(expr, clause, meta);
            fold_nested_query(subquery, meta);
        }
        // The right side of IN is a literal list; scanning it would only
        // double-count literals
        Expr::InList {
            expr, ..
        } => {
            scan_expr(expr, clause, meta);
        }
        Expr::Identifier(_) | Expr::CompoundIdentifier(_) => {
            meta.add_column(&expr.to_string());
        }
        Expr::Function(func) => {
            meta.add_function(&func.name.to_string());
            if let sqlparser::ast::FunctionArguments::List(arg_list) = &func.args {
                for arg in &arg_list.args {
                    if let sqlparser::ast::FunctionArg::Unnamed(
                        sqlparser::ast::FunctionArgExpr::Expr(e)
                    ) = arg
                    {
                        scan_expr(e, clause, meta);
                    }
                }
            }
        }
        Expr::Case {
            operand,
            conditions,
            else_result,
            ..
        } => {
            if let Some(op) = operand {
                scan_expr(op, clause, meta);
            }
            for case_when in conditions {
                scan_expr(&case_when.condition, clause, meta);
                scan_expr(&case_when.result, clause, meta);
            }
            if let Some(else_res) = else_result {
                scan_expr(else_res, clause, meta);
            }
        }
        Expr::BinaryOp {
            left,
            right,
            ..
        } => {
            if is_constant_comparison(expr) {
                match clause {
                    Clause::JoinOn => meta.constant_comparison_in_join = true,
                    Clause::Where if is_numeric_comparison(expr) => {
                        // WHERE 1=1 padding: benign, recorded but tolerated
                        meta.constant_true_in_where = true;
                    }
                    _ => meta.unsafe_or = true
                }
            }
            scan_expr(left, clause, meta);
            scan_expr(right, clause, meta);
        }
        Expr::UnaryOp {
            expr: inner, ..
        }
        | Expr::Cast {
            expr: inner, ..
        } => {
            scan_expr(inner, clause, meta);
        }
        Expr::IsNull(inner) | Expr::IsNotNull(inner) => {
            scan_expr(inner, clause, meta);
        }
        Expr::Between {
            expr,
            low,
            high,
            ..
        } => {
            scan_expr(expr, clause, meta);
            scan_expr(low, clause, meta);
            scan_expr(high, clause, meta);
        }
        _ => {}
    }
}

/// Recurse into a sub-query appearing as an expression (IN, EXISTS, scalar)
/// and fold every produced member upward.
fn fold_nested_query(query: &sqlparser::ast::Query, meta: &mut QueryMeta) {
    let mut sub_metas = Vec::new();
    walk_query(query, &mut sub_metas);
    for sub in &sub_metas {
        meta.fold_subquery(sub);
    }
}

/// Whether both operands of a comparison are literal values.
///
/// Logical AND/OR are never treated as a constant comparison themselves; only
/// the bottom-level comparison counts.
pub(crate) fn is_constant_comparison(expr: &Expr) -> bool {
    let e = unwrap_nested(expr);
    if let Expr::BinaryOp {
        left,
        op,
        right
    } = e
    {
        if matches!(op, BinaryOperator::And | BinaryOperator::Or) {
            return false;
        }
        return is_literal(unwrap_nested(left)) && is_literal(unwrap_nested(right));
    }
    false
}

/// Whether both operands are numeric literals (the `1=1` shape).
fn is_numeric_comparison(expr: &Expr) -> bool {
    if let Expr::BinaryOp {
        left,
        right,
        ..
    } = unwrap_nested(expr)
    {
        return is_number(unwrap_nested(left)) && is_number(unwrap_nested(right));
    }
    false
}

fn unwrap_nested(expr: &Expr) -> &Expr {
    match expr {
        Expr::Nested(inner) => unwrap_nested(inner),
        _ => expr
    }
}

// NULL counts as a literal: "OR 'A' = NULL" style payloads must still read as
// literal-vs-literal
fn is_literal(expr: &Expr) -> bool {
    match expr {
        Expr::Value(v) => matches!(
            v.value,
            Value::Number(..)
                | Value::SingleQuotedString(_)
                | Value::DoubleQuotedString(_)
                | Value::NationalStringLiteral(_)
                | Value::Boolean(_)
                | Value::Null
        ),
        // DATE '2024-01-01', TIMESTAMP '...', TIME '...'
        Expr::TypedString {
            ..
        } => true,
        _ => false
    }
}

fn is_number(expr: &Expr) -> bool {
    matches!(expr, Expr::Value(v) if matches!(v.value, Value::Number(..)))
}
