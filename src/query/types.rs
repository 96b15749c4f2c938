use compact_str::CompactString;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use smallvec::SmallVec;

/// Placeholder table name for an anonymous sub-query acting as a data source.
pub const SUBQUERY_MARKER: &str = "__SUBQUERY__";

/// Type alias for name sets (tables, columns, function names)
pub type NameSet = IndexSet<CompactString>;

/// Metadata for one logical SELECT block.
///
/// One instance is produced per plain SELECT and per member of a
/// UNION/INTERSECT/EXCEPT set operation. All names are canonicalized to
/// upper case on insert, so every downstream comparison is case-insensitive.
/// The struct is populated only by the parser and read-only afterwards.
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryMeta {
    /// Tables named directly in this block's own FROM/JOIN
    pub root_tables:  NameSet,
    /// Every table the block reaches, including tables inside nested
    /// sub-queries and the [`SUBQUERY_MARKER`] sentinel for anonymous sources
    pub tables:       NameSet,
    /// Columns appearing directly in the SELECT list (`*` and `T.*` included
    /// as sentinels)
    pub root_columns: NameSet,
    /// Every column referenced anywhere in the block: SELECT, WHERE, JOIN-ON,
    /// GROUP BY, HAVING, ORDER BY
    pub columns:      NameSet,
    /// Function/expression names referenced by the block
    pub functions:    NameSet,
    /// Alias -> table name (or sub-query sentinel) bindings of this scope
    pub aliases:      IndexMap<CompactString, CompactString>,
    /// CTE names declared in the enclosing WITH head; transparent pass-through
    /// names for whitelist resolution
    pub cte_names:    SmallVec<[CompactString; 4]>,

    /// An OR operator occurs somewhere in the block
    pub dangerous_or: bool,
    /// An OR with a literal-vs-literal operand, or a bare literal-vs-literal
    /// comparison outside any OR
    pub unsafe_or: bool,
    /// Any WHERE, JOIN-ON or HAVING clause is present
    pub has_condition: bool,
    /// A literal-vs-literal comparison inside a JOIN-ON clause
    pub constant_comparison_in_join: bool,
    /// The tolerated `WHERE 1=1` padding idiom (both operands numeric)
    pub constant_true_in_where: bool
}

impl QueryMeta {
    pub fn add_root_table(&mut self, name: &str) {
        self.root_tables.insert(upper(name));
    }

    pub fn add_table(&mut self, name: &str) {
        self.tables.insert(upper(name));
    }

    pub fn add_root_column(&mut self, name: &str) {
        self.root_columns.insert(upper(name));
    }

    pub fn add_column(&mut self, name: &str) {
        self.columns.insert(upper(name));
    }

    pub fn add_function(&mut self, name: &str) {
        self.functions.insert(upper(name));
    }

    pub fn add_alias(&mut self, alias: &str, table: &str) {
        self.aliases.insert(upper(alias), upper(table));
    }

    pub fn add_cte_name(&mut self, name: &str) {
        let name = upper(name);
        if !self.cte_names.contains(&name) {
            self.cte_names.push(name);
        }
    }

    /// Whether `name` (already upper-cased) is a declared CTE of this query
    pub fn is_cte(&self, name: &str) -> bool {
        self.cte_names.iter().any(|c| c == name)
    }

    /// Fold a nested sub-query's metadata into this block.
    ///
    /// Tables (and CTE names) merge upward so the whole statement's sources
    /// are visible to the whitelist check; the three risk flags propagate so
    /// risk anywhere in the statement reaches the outer decision. Columns,
    /// functions and alias bindings stay local to the sub-query's own scope.
    pub fn fold_subquery(&mut self, sub: &QueryMeta) {
        for table in &sub.tables {
            self.tables.insert(table.clone());
        }
        for cte in &sub.cte_names {
            if !self.cte_names.contains(cte) {
                self.cte_names.push(cte.clone());
            }
        }
        self.dangerous_or |= sub.dangerous_or;
        self.unsafe_or |= sub.unsafe_or;
        self.has_condition |= sub.has_condition;
    }
}

fn upper(name: &str) -> CompactString {
    let mut s = CompactString::from(name.trim());
    if s.chars().any(|c| c.is_ascii_lowercase()) {
        s = CompactString::from(s.to_uppercase());
    }
    s
}
