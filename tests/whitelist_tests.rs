use std::{fs, io::Write as _, path::Path};

use sql_sentry::whitelist::{FunctionWhitelist, TableWhitelist, Whitelists};
use tempfile::NamedTempFile;

fn write_temp(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_table_whitelist_parses_sections() {
    let wl = TableWhitelist::from_text(
        "table=SALES_TRANSACTION\n\
         columns=STORE_ID,QTY\n\
         \n\
         table=STORE_MASTER\n\
         columns=STORE_ID\n"
    )
    .unwrap();

    assert!(wl.is_allowed("SALES_TRANSACTION", "STORE_ID"));
    assert!(wl.is_allowed("SALES_TRANSACTION", "QTY"));
    assert!(!wl.is_allowed("SALES_TRANSACTION", "SECRET"));
    assert!(wl.is_allowed("STORE_MASTER", "STORE_ID"));
}

#[test]
fn test_table_whitelist_ignores_comments() {
    let wl = TableWhitelist::from_text(
        "# retail schema\n\
         table=SALES_TRANSACTION\n\
         # transaction columns\n\
         columns=STORE_ID\n"
    )
    .unwrap();

    assert!(wl.is_allowed("SALES_TRANSACTION", "STORE_ID"));
}

#[test]
fn test_table_whitelist_blank_line_closes_section() {
    // a columns line with no open section is dropped, not attached to the
    // previous table
    let wl = TableWhitelist::from_text(
        "table=SALES_TRANSACTION\n\
         columns=STORE_ID\n\
         \n\
         columns=SECRET\n"
    )
    .unwrap();

    assert!(wl.is_allowed("SALES_TRANSACTION", "STORE_ID"));
    assert!(!wl.is_allowed("SALES_TRANSACTION", "SECRET"));
}

#[test]
fn test_table_whitelist_is_case_insensitive() {
    let wl = TableWhitelist::from_text("table=sales_transaction\ncolumns=store_id\n").unwrap();

    assert!(wl.is_allowed("SALES_TRANSACTION", "STORE_ID"));
    assert!(wl.is_allowed("Sales_Transaction", "Store_Id"));
}

#[test]
fn test_unconfigured_table_has_no_columns() {
    let wl = TableWhitelist::from_text("table=SALES_TRANSACTION\ncolumns=STORE_ID\n").unwrap();

    assert!(!wl.has_columns("PAYROLL"));
    assert!(wl.allowed_columns("PAYROLL").is_empty());
}

#[test]
fn test_empty_table_whitelist_is_fatal() {
    assert!(TableWhitelist::from_text("").is_err());
    assert!(TableWhitelist::from_text("# only comments\n").is_err());
}

#[test]
fn test_table_whitelist_from_missing_file_is_fatal() {
    assert!(TableWhitelist::from_file(Path::new("/nonexistent/tables.conf")).is_err());
}

#[test]
fn test_table_whitelist_reload_replaces_wholesale() {
    let wl = TableWhitelist::from_text("table=SALES_TRANSACTION\ncolumns=STORE_ID\n").unwrap();
    let file = write_temp("table=STORE_MASTER\ncolumns=REGION\n");

    wl.reload_from(file.path());

    assert!(wl.is_allowed("STORE_MASTER", "REGION"));
    // replaced, not merged
    assert!(!wl.is_allowed("SALES_TRANSACTION", "STORE_ID"));
}

#[test]
fn test_table_whitelist_reload_keeps_previous_on_missing_file() {
    let wl = TableWhitelist::from_text("table=SALES_TRANSACTION\ncolumns=STORE_ID\n").unwrap();

    wl.reload_from(Path::new("/nonexistent/tables.conf"));

    assert!(wl.is_allowed("SALES_TRANSACTION", "STORE_ID"));
}

#[test]
fn test_table_whitelist_reload_keeps_previous_on_empty_file() {
    let wl = TableWhitelist::from_text("table=SALES_TRANSACTION\ncolumns=STORE_ID\n").unwrap();
    let file = write_temp("# nothing here\n");

    wl.reload_from(file.path());

    assert!(wl.is_allowed("SALES_TRANSACTION", "STORE_ID"));
}

#[test]
fn test_function_whitelist_parses_multiple_lines() {
    let wl = FunctionWhitelist::from_text(
        "functions=NVL,SUM\n\
         functions=TO_CHAR\n"
    )
    .unwrap();

    assert!(wl.is_allowed("NVL"));
    assert!(wl.is_allowed("SUM"));
    assert!(wl.is_allowed("TO_CHAR"));
    assert!(!wl.is_allowed("HACKFUNC"));
}

#[test]
fn test_function_whitelist_is_case_insensitive() {
    let wl = FunctionWhitelist::from_text("functions=nvl\n").unwrap();

    assert!(wl.is_allowed("NVL"));
    assert!(wl.is_allowed("nvl"));
}

#[test]
fn test_function_whitelist_reload_and_last_known_good() {
    let wl = FunctionWhitelist::from_text("functions=NVL\n").unwrap();
    let file = write_temp("functions=SUM\n");

    wl.reload_from(file.path());
    assert!(wl.is_allowed("SUM"));
    assert!(!wl.is_allowed("NVL"));

    wl.reload_from(Path::new("/nonexistent/functions.conf"));
    assert!(wl.is_allowed("SUM"));
}

#[test]
fn test_function_whitelist_from_file() {
    let file = write_temp("functions=NVL,DECODE\n");
    let wl = FunctionWhitelist::from_file(file.path()).unwrap();

    assert!(wl.is_allowed("DECODE"));
}

#[test]
fn test_bundled_whitelists_load() {
    let whitelists = Whitelists::bundled().unwrap();

    assert!(whitelists.tables.has_columns("SALES_TRANSACTION"));
    assert!(whitelists.functions.is_allowed("NVL"));
}

#[test]
fn test_reload_from_rewritten_file() {
    let wl = TableWhitelist::from_text("table=SALES_TRANSACTION\ncolumns=STORE_ID\n").unwrap();

    let file = write_temp("table=SALES_TRANSACTION\ncolumns=STORE_ID,QTY\n");
    wl.reload_from(file.path());
    assert!(wl.is_allowed("SALES_TRANSACTION", "QTY"));

    fs::write(file.path(), "table=SALES_TRANSACTION\ncolumns=STORE_ID\n").unwrap();
    wl.reload_from(file.path());
    assert!(!wl.is_allowed("SALES_TRANSACTION", "QTY"));
    assert!(wl.is_allowed("SALES_TRANSACTION", "STORE_ID"));
}
