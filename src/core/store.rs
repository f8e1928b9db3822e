//! Blob persistence for the cart and donations ledger.
//!
//! The ledger writes whole collections as JSON under two well-known keys, the way a
//! browser app would use local storage. [`SqliteBlobStore`] keeps them in the
//! `app_state` table; [`MemoryBlobStore`] keeps them in a map.

use crate::{
    entities::{AppState, app_state},
    errors::Result,
};
use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{Set, prelude::*};
use serde::{Serialize, de::DeserializeOwned};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

/// Key holding the serialized cart.
pub const CART_KEY: &str = "donorbd-cart";

/// Key holding the serialized donations ledger.
pub const DONATIONS_KEY: &str = "donorbd-donations";

/// A key-value store of serialized blobs.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Reads the blob stored under `key`, if any.
    async fn load(&self, key: &str) -> Result<Option<String>>;

    /// Writes `value` under `key`, replacing any previous blob.
    async fn save(&self, key: &str, value: &str) -> Result<()>;
}

/// Serializes a collection into its stored form.
pub fn encode<T: Serialize>(items: &[T]) -> Result<String> {
    serde_json::to_string(items).map_err(Into::into)
}

/// Deserializes a stored collection.
///
/// A missing blob yields an empty collection. So does a blob that fails to parse;
/// the failure is logged and the stored value is otherwise ignored.
#[must_use]
pub fn decode<T: DeserializeOwned>(key: &str, blob: Option<&str>) -> Vec<T> {
    let Some(blob) = blob else {
        return Vec::new();
    };

    serde_json::from_str(blob).unwrap_or_else(|e| {
        warn!("Ignoring unreadable blob under '{}': {}", key, e);
        Vec::new()
    })
}

/// Blob store backed by the `app_state` table.
#[derive(Debug, Clone)]
pub struct SqliteBlobStore {
    db: DatabaseConnection,
}

impl SqliteBlobStore {
    /// Wraps a connection whose tables have already been created.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// The underlying connection.
    #[must_use]
    pub const fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[async_trait]
impl BlobStore for SqliteBlobStore {
    #[instrument(skip(self))]
    async fn load(&self, key: &str) -> Result<Option<String>> {
        let state = AppState::find()
            .filter(app_state::Column::Key.eq(key))
            .one(&self.db)
            .await?;
        Ok(state.map(|s| s.value))
    }

    #[instrument(skip(self, value), fields(bytes = value.len()))]
    async fn save(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now();

        let existing = AppState::find()
            .filter(app_state::Column::Key.eq(key))
            .one(&self.db)
            .await?;

        if let Some(state) = existing {
            let mut active_model: app_state::ActiveModel = state.into();
            active_model.value = Set(value.to_string());
            active_model.updated_at = Set(now);
            active_model.update(&self.db).await?;
        } else {
            let new_state = app_state::ActiveModel {
                key: Set(key.to_string()),
                value: Set(value.to_string()),
                updated_at: Set(now),
                ..Default::default()
            };
            new_state.insert(&self.db).await?;
        }

        debug!("Saved blob '{}'", key);
        Ok(())
    }
}

/// Blob store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, String>>,
}

impl MemoryBlobStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-populated with `blobs`.
    #[must_use]
    pub fn with_blobs<I, K, V>(blobs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            blobs: RwLock::new(
                blobs
                    .into_iter()
                    .map(|(k, v)| (k.into(), v.into()))
                    .collect(),
            ),
        }
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.blobs.read().await.get(key).cloned())
    }

    async fn save(&self, key: &str, value: &str) -> Result<()> {
        self.blobs
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::cart::{CartItem, DonationDraft};
    use crate::test_utils::{fixed_now, setup_test_db};

    #[tokio::test]
    async fn test_sqlite_store_roundtrip_and_overwrite() -> Result<()> {
        let store = SqliteBlobStore::new(setup_test_db().await?);

        assert_eq!(store.load(CART_KEY).await?, None);

        store.save(CART_KEY, "[]").await?;
        assert_eq!(store.load(CART_KEY).await?.as_deref(), Some("[]"));

        store.save(CART_KEY, "[1]").await?;
        assert_eq!(store.load(CART_KEY).await?.as_deref(), Some("[1]"));

        let rows = AppState::find().all(store.connection()).await?;
        assert_eq!(rows.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_sqlite_store_keys_are_independent() -> Result<()> {
        let store = SqliteBlobStore::new(setup_test_db().await?);
        store.save(CART_KEY, "cart").await?;
        store.save(DONATIONS_KEY, "donations").await?;

        assert_eq!(store.load(CART_KEY).await?.as_deref(), Some("cart"));
        assert_eq!(
            store.load(DONATIONS_KEY).await?.as_deref(),
            Some("donations")
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_memory_store_roundtrip() -> Result<()> {
        let store = MemoryBlobStore::with_blobs([(CART_KEY, "[]")]);
        assert_eq!(store.load(CART_KEY).await?.as_deref(), Some("[]"));
        assert_eq!(store.load(DONATIONS_KEY).await?, None);

        store.save(DONATIONS_KEY, "[]").await?;
        assert_eq!(store.load(DONATIONS_KEY).await?.as_deref(), Some("[]"));
        Ok(())
    }

    #[test]
    fn test_decode_missing_and_corrupt_blobs() {
        let missing: Vec<CartItem> = decode(CART_KEY, None);
        assert!(missing.is_empty());

        let corrupt: Vec<CartItem> = decode(CART_KEY, Some("{not json"));
        assert!(corrupt.is_empty());

        let wrong_shape: Vec<CartItem> = decode(CART_KEY, Some(r#"{"id": 1}"#));
        assert!(wrong_shape.is_empty());
    }

    #[test]
    fn test_encode_decode_preserves_order() {
        let items: Vec<CartItem> = (1u32..=3)
            .map(|n| CartItem {
                id: u64::from(n),
                draft: DonationDraft::for_category("food", 100.0 * f64::from(n)),
                created_at: fixed_now(),
            })
            .collect();

        let blob = encode(&items).unwrap();
        let decoded: Vec<CartItem> = decode(CART_KEY, Some(&blob));
        assert_eq!(decoded, items);
    }
}
