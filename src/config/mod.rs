/// Database configuration and connection management
pub mod database;

/// Seed catalog loading from config.toml
pub mod catalog;

/// Operator allow-list from environment variables
pub mod operators;
