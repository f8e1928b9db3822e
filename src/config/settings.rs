//! Runtime settings loaded from environment variables.
//!
//! Values are normally provided through the `.env` file; every setting has a
//! sensible local default so the ledger can start without any configuration.

/// Default `SQLite` location, created on first use.
pub const DEFAULT_DATABASE_URL: &str = "sqlite://data/donor_ledger.sqlite?mode=rwc";

/// Default location of the campaign seed file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Gets the database URL from `DATABASE_URL` or returns the default `SQLite` path.
#[must_use]
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string())
}

/// Gets the seed configuration path from `DONOR_LEDGER_CONFIG` or returns `config.toml`.
#[must_use]
pub fn config_path() -> String {
    std::env::var("DONOR_LEDGER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string())
}
