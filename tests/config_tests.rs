use std::{env, path::PathBuf};

use sql_sentry::config::Config;

#[test]
fn test_default_config() {
    let config = Config::default();

    assert!(config.whitelist.table_file.is_none());
    assert!(config.whitelist.function_file.is_none());
}

#[test]
fn test_config_parses_toml() {
    let config: Config = toml::from_str(
        "[whitelist]\n\
         table_file = \"config/tables.conf\"\n\
         function_file = \"config/functions.conf\"\n"
    )
    .unwrap();

    assert_eq!(
        config.whitelist.table_file,
        Some(PathBuf::from("config/tables.conf"))
    );
    assert_eq!(
        config.whitelist.function_file,
        Some(PathBuf::from("config/functions.conf"))
    );
}

#[test]
fn test_config_toml_section_is_optional() {
    let config: Config = toml::from_str("").unwrap();

    assert!(config.whitelist.table_file.is_none());
}

#[test]
fn test_env_variables_override_config() {
    // no other test touches these variables, so the process-global mutation
    // is safe under the parallel test runner
    unsafe {
        env::set_var("SQL_SENTRY_TABLE_WHITELIST", "/etc/sentry/tables.conf");
        env::set_var("SQL_SENTRY_FUNCTION_WHITELIST", "/etc/sentry/functions.conf");
    }

    let config = Config::load().unwrap();

    unsafe {
        env::remove_var("SQL_SENTRY_TABLE_WHITELIST");
        env::remove_var("SQL_SENTRY_FUNCTION_WHITELIST");
    }

    assert_eq!(
        config.whitelist.table_file,
        Some(PathBuf::from("/etc/sentry/tables.conf"))
    );
    assert_eq!(
        config.whitelist.function_file,
        Some(PathBuf::from("/etc/sentry/functions.conf"))
    );
}
