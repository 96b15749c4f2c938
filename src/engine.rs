//! Validation engine: the single call surface in front of the database
//! driver.
//!
//! Orchestrates keyword screen -> AST parser -> validator chain and logs
//! every outcome. Each call is stateless apart from read access to the
//! shared whitelist registries, so an engine can be shared freely across
//! threads.

use crate::{
    config::Config,
    error::{AppResult, rejection_error},
    query::parse,
    rules::run_chain,
    screen::screen,
    whitelist::{FunctionWhitelist, TableWhitelist, Whitelists}
};

/// The validation engine. Construct once at startup and pass by reference to
/// every query-issuing collaborator.
#[derive(Debug)]
pub struct SqlSentry {
    whitelists: Whitelists
}

impl SqlSentry {
    pub fn new(whitelists: Whitelists) -> Self {
        Self {
            whitelists
        }
    }

    /// Engine over the bundled default whitelists.
    pub fn bundled() -> AppResult<Self> {
        Ok(Self::new(Whitelists::bundled()?))
    }

    /// Engine honoring configured external whitelist overrides; a missing
    /// startup source is fatal.
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let tables = match &config.whitelist.table_file {
            Some(path) => TableWhitelist::from_file(path)?,
            None => TableWhitelist::bundled()?
        };
        let functions = match &config.whitelist.function_file {
            Some(path) => FunctionWhitelist::from_file(path)?,
            None => FunctionWhitelist::bundled()?
        };
        Ok(Self::new(Whitelists {
            tables,
            functions
        }))
    }

    /// The registries, for callers wiring explicit reloads.
    pub fn whitelists(&self) -> &Whitelists {
        &self.whitelists
    }

    /// Validate fully-expanded SQL text before execution.
    ///
    /// Runs the keyword screen (fatal on hit), the parser (fatal on parse
    /// failure), then the validator chain once per produced metadata record,
    /// stopping the whole call at the first failure. Every rejection is
    /// logged with the offending SQL before it propagates; callers must treat
    /// a rejection as fatal to this execution attempt.
    pub fn validate(&self, sql: &str) -> AppResult<()> {
        let outcome = self.run(sql);
        if let Err(e) = &outcome {
            // Display renders only the error kind; the reason lives in the
            // message field
            log::warn!("rejected SQL: {}; reason: {}", sql, e.render_message());
        }
        outcome
    }

    fn run(&self, sql: &str) -> AppResult<()> {
        screen(sql)?;

        let metas = parse(sql)?;
        if metas.is_empty() {
            // non-SELECT text produces nothing to validate; execution
            // approval is not implied
            log::debug!("no SELECT blocks in SQL, nothing to validate");
            return Ok(());
        }

        for meta in &metas {
            run_chain(meta, &self.whitelists)
                .map_err(|v| rejection_error(v.rule, &v.reason))?;
            match serde_json::to_string(meta) {
                Ok(json) => log::debug!("validated block: {}", json),
                Err(e) => log::debug!("validated block (unserializable: {})", e)
            }
        }
        log::info!("SQL passed validation ({} block(s))", metas.len());
        Ok(())
    }
}
