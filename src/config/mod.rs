/// Campaign and category seed loading from config.toml
pub mod campaigns;

/// Database configuration and connection management
pub mod database;

/// Settings read from environment variables
pub mod settings;
