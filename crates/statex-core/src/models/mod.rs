//! Data models: statement line items, report envelope, configuration.

pub mod config;
pub mod report;
pub mod statement;
