//! Data models: extraction output and pipeline configuration.

pub mod config;
pub mod statement;
