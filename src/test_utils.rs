//! Shared test utilities for the donation ledger.
//!
//! This module provides common helpers for setting up test databases, pinned
//! clocks, seeded state, and stores with scripted behavior.

use crate::{
    config::campaigns::{SeedConfig, default_seed},
    core::{
        campaign::Campaign,
        cart::DonorDetails,
        clock::FixedClock,
        ledger::Ledger,
        state::LedgerState,
        store::{BlobStore, MemoryBlobStore},
    },
    errors::{Error, Result},
};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use sea_orm::{DatabaseConnection, DbErr};
use tracing_subscriber::EnvFilter;

/// Installs a test-writer tracing subscriber, defaulting to `trace` level.
///
/// Safe to call from every test; only the first call installs the subscriber.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The instant every test clock is pinned to: 2024-03-01 10:00:00 UTC.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
        .single()
        .unwrap_or_default()
}

/// A clock pinned to [`fixed_now`].
#[must_use]
pub fn test_clock() -> FixedClock {
    FixedClock(fixed_now())
}

/// The built-in seed. Panics only if the shipped config.toml is broken.
#[must_use]
#[allow(clippy::expect_used)]
pub fn seed() -> SeedConfig {
    default_seed().expect("built-in seed should parse")
}

/// The campaigns from the built-in seed.
#[must_use]
pub fn seed_campaigns() -> Vec<Campaign> {
    seed().campaigns
}

/// Seeded state with an empty cart and ledger.
#[must_use]
pub fn seed_state() -> LedgerState {
    LedgerState::new(seed(), Vec::new(), Vec::new())
}

/// Opens a ledger on an empty in-memory store with the pinned clock.
pub async fn open_memory_ledger() -> Result<Ledger<MemoryBlobStore, FixedClock>> {
    Ledger::open_with_clock(MemoryBlobStore::new(), seed(), test_clock()).await
}

/// Contact details for a sample named donor.
#[must_use]
pub fn test_donor() -> DonorDetails {
    DonorDetails {
        name: "Ayesha Begum".to_string(),
        email: "ayesha@example.com".to_string(),
        phone: "01700000000".to_string(),
        anonymous: false,
    }
}

/// A store that reads as empty and rejects every write.
pub struct FailingBlobStore;

#[async_trait]
impl BlobStore for FailingBlobStore {
    async fn load(&self, _key: &str) -> Result<Option<String>> {
        Ok(None)
    }

    async fn save(&self, key: &str, _value: &str) -> Result<()> {
        Err(Error::Database(DbErr::Custom(format!(
            "write to '{key}' rejected"
        ))))
    }
}
