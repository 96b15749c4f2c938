//! Reloadable whitelist registries for tables/columns and function names.
//!
//! Both registries are constructed once at startup from a bundled default,
//! optionally replaced wholesale from an external file, and refreshed only by
//! an explicit [`reload_from`](TableWhitelist::reload_from) call wired by the
//! caller (timer, file-watch callback, admin command). A refresh is atomic:
//! the replacement map is built outside the lock and swapped in whole, so
//! concurrent readers never observe a partially-loaded state. A failed or
//! empty reload keeps the previous state (last-known-good).
//!
//! # File format
//!
//! Line-oriented, `#` comments. Table whitelist: a `table=<NAME>` line opens a
//! section, a following `columns=<comma-separated names>` line lists its
//! allowed columns, a blank line closes the section. Function whitelist:
//! `functions=<comma-separated names>` lines (the single supported
//! convention).
//!
//! ```text
//! table=SALES_TRANSACTION
//! columns=STORE_ID,PRODUCT_ID,TX_DATE,QTY
//!
//! functions=NVL,DECODE,SUM,COUNT
//! ```
//!
//! All names are normalized to upper case on write and on read. An
//! unconfigured table implies zero allowed columns, not an error.

use std::{
    collections::{HashMap, HashSet},
    fs,
    path::Path,
    sync::RwLock
};

use crate::error::{AppResult, whitelist_empty_error, whitelist_load_error};

const DEFAULT_TABLES: &str = include_str!("../defaults/table_whitelist.conf");
const DEFAULT_FUNCTIONS: &str = include_str!("../defaults/function_whitelist.conf");

/// Table -> allowed-column-set registry.
#[derive(Debug)]
pub struct TableWhitelist {
    tables: RwLock<HashMap<String, HashSet<String>>>
}

impl TableWhitelist {
    /// Build from the bundled default. Fatal if the default is empty: the
    /// process cannot safely serve any query without an allow-list.
    pub fn bundled() -> AppResult<Self> {
        let tables = parse_tables(DEFAULT_TABLES);
        if tables.is_empty() {
            return Err(whitelist_empty_error("bundled table whitelist"));
        }
        Ok(Self {
            tables: RwLock::new(tables)
        })
    }

    /// Build from whitelist text (tests substitute fixed whitelists here).
    pub fn from_text(text: &str) -> AppResult<Self> {
        let tables = parse_tables(text);
        if tables.is_empty() {
            return Err(whitelist_empty_error("table whitelist text"));
        }
        Ok(Self {
            tables: RwLock::new(tables)
        })
    }

    /// Build from an external file, replacing nothing on failure: a missing
    /// startup source is fatal.
    pub fn from_file(path: &Path) -> AppResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| whitelist_load_error(&path.display().to_string(), e))?;
        Self::from_text(&text)
    }

    /// Replace the whole registry from an external file.
    ///
    /// On read failure or an empty parse the previous state is retained and
    /// the failure logged; readers never see an empty or torn allow-list.
    pub fn reload_from(&self, path: &Path) {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::error!(
                    "table whitelist reload failed, keeping previous state: {}: {}",
                    path.display(),
                    e
                );
                return;
            }
        };
        let parsed = parse_tables(&text);
        if parsed.is_empty() {
            log::error!(
                "table whitelist reload produced no entries, keeping previous state: {}",
                path.display()
            );
            return;
        }
        if let Ok(mut tables) = self.tables.write() {
            *tables = parsed;
            log::info!("table whitelist reloaded from {}", path.display());
        }
    }

    /// Whether the (table, column) pair is permitted.
    pub fn is_allowed(&self, table: &str, column: &str) -> bool {
        let table = table.to_uppercase();
        let column = column.to_uppercase();
        self.tables
            .read()
            .map(|t| t.get(&table).is_some_and(|cols| cols.contains(&column)))
            .unwrap_or(false)
    }

    /// Whether the table has a non-empty allowed-column set.
    pub fn has_columns(&self, table: &str) -> bool {
        let table = table.to_uppercase();
        self.tables
            .read()
            .map(|t| t.get(&table).is_some_and(|cols| !cols.is_empty()))
            .unwrap_or(false)
    }

    /// Allowed columns for a table; empty for an unconfigured table.
    pub fn allowed_columns(&self, table: &str) -> HashSet<String> {
        let table = table.to_uppercase();
        self.tables
            .read()
            .map(|t| t.get(&table).cloned().unwrap_or_default())
            .unwrap_or_default()
    }
}

/// Flat allowed-function-name registry.
#[derive(Debug)]
pub struct FunctionWhitelist {
    functions: RwLock<HashSet<String>>
}

impl FunctionWhitelist {
    pub fn bundled() -> AppResult<Self> {
        let functions = parse_functions(DEFAULT_FUNCTIONS);
        if functions.is_empty() {
            return Err(whitelist_empty_error("bundled function whitelist"));
        }
        Ok(Self {
            functions: RwLock::new(functions)
        })
    }

    pub fn from_text(text: &str) -> AppResult<Self> {
        let functions = parse_functions(text);
        if functions.is_empty() {
            return Err(whitelist_empty_error("function whitelist text"));
        }
        Ok(Self {
            functions: RwLock::new(functions)
        })
    }

    pub fn from_file(path: &Path) -> AppResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| whitelist_load_error(&path.display().to_string(), e))?;
        Self::from_text(&text)
    }

    /// Replace the whole registry from an external file; last-known-good on
    /// failure.
    pub fn reload_from(&self, path: &Path) {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                log::error!(
                    "function whitelist reload failed, keeping previous state: {}: {}",
                    path.display(),
                    e
                );
                return;
            }
        };
        let parsed = parse_functions(&text);
        if parsed.is_empty() {
            log::error!(
                "function whitelist reload produced no entries, keeping previous state: {}",
                path.display()
            );
            return;
        }
        if let Ok(mut functions) = self.functions.write() {
            *functions = parsed;
            log::info!("function whitelist reloaded from {}", path.display());
        }
    }

    pub fn is_allowed(&self, name: &str) -> bool {
        let name = name.to_uppercase();
        self.functions
            .read()
            .map(|f| f.contains(&name))
            .unwrap_or(false)
    }
}

/// The pair of registries the validator chain consults.
#[derive(Debug)]
pub struct Whitelists {
    pub tables:    TableWhitelist,
    pub functions: FunctionWhitelist
}

impl Whitelists {
    pub fn bundled() -> AppResult<Self> {
        Ok(Self {
            tables:    TableWhitelist::bundled()?,
            functions: FunctionWhitelist::bundled()?
        })
    }
}

fn parse_tables(text: &str) -> HashMap<String, HashSet<String>> {
    let mut tables: HashMap<String, HashSet<String>> = HashMap::new();
    let mut current: Option<String> = None;

    for line in text.lines() {
        let line = line.trim();
        // a blank line closes the current table section
        if line.is_empty() {
            current = None;
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        if key.eq_ignore_ascii_case("table") {
            let table = value.to_uppercase();
            tables.entry(table.clone()).or_default();
            current = Some(table);
        } else if key.eq_ignore_ascii_case("columns")
            && let Some(table) = &current
        {
            let columns = split_names(value);
            tables.insert(table.clone(), columns);
        }
    }
    tables
}

fn parse_functions(text: &str) -> HashSet<String> {
    let mut functions = HashSet::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        if key.trim().eq_ignore_ascii_case("functions") {
            functions.extend(split_names(value));
        }
    }
    functions
}

fn split_names(csv: &str) -> HashSet<String> {
    csv.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_uppercase)
        .collect()
}
