pub use masterror::{AppError, AppResult};

/// Create error for a blocked keyword found by the raw-text screen
pub fn forbidden_keyword_error(keyword: &str) -> AppError {
    AppError::bad_request(format!("Forbidden keyword in SQL: {}", keyword))
}

/// Create query parse error with optional position info
pub fn parse_error(message: impl Into<String>) -> AppError {
    let msg = message.into();
    AppError::bad_request(format_sql_error("SQL parse error", &msg))
}

/// Create error for a validator chain rejection
pub fn rejection_error(rule: &str, reason: &str) -> AppError {
    AppError::bad_request(format!("[{}] {}", rule, reason))
}

/// Create error for a whitelist source that cannot be read
pub fn whitelist_load_error(path: &str, source: std::io::Error) -> AppError {
    AppError::internal(format!(
        "Failed to read whitelist file '{}': {}",
        path, source
    ))
}

/// Create error for a whitelist source that parsed to nothing
pub fn whitelist_empty_error(origin: &str) -> AppError {
    AppError::internal(format!(
        "Whitelist source '{}' contains no entries; refusing an empty allow-list",
        origin
    ))
}

/// Create config error
pub fn config_error(message: impl Into<String>) -> AppError {
    AppError::bad_request(message.into())
}

/// Format SQL error with position highlighting
fn format_sql_error(prefix: &str, message: &str) -> String {
    // sqlparser errors carry "... at Line: X, Column Y"
    if let Some(pos) = extract_position(message) {
        format!(
            "{} at line {}, column {}:\n  {}",
            prefix, pos.line, pos.column, message
        )
    } else {
        format!("{}:\n  {}", prefix, message)
    }
}

struct SqlPosition {
    line:   usize,
    column: usize
}

fn extract_position(message: &str) -> Option<SqlPosition> {
    let line_marker = "Line: ";
    let col_marker = ", Column ";

    if let Some(line_start) = message.find(line_marker) {
        let line_num_start = line_start + line_marker.len();
        if let Some(col_start) = message[line_num_start..].find(col_marker) {
            let line_str = &message[line_num_start..line_num_start + col_start];
            let col_num_start = line_num_start + col_start + col_marker.len();

            // Find end of column number
            let col_end = message[col_num_start..]
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(message.len() - col_num_start);

            let col_str = &message[col_num_start..col_num_start + col_end];

            if let (Ok(line), Ok(column)) = (line_str.parse(), col_str.parse()) {
                return Some(SqlPosition { line, column });
            }
        }
    }

    None
}
