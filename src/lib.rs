//! # SQL Sentry
//!
//! AST-based SQL injection defense for dynamically assembled SELECT
//! statements: a raw-text keyword screen, a recursive SQL-to-metadata
//! parser, an ordered chain of policy validators and reloadable whitelist
//! registries behind a single [`SqlSentry::validate`] call.

pub mod config;
pub mod engine;
pub mod error;
pub mod query;
pub mod rules;
pub mod screen;
pub mod whitelist;

pub use engine::SqlSentry;
