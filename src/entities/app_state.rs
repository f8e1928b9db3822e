//! App state entity - Key-value blob storage for the ledger.
//! Each row holds one serialized collection (the cart or the donations ledger)
//! under a well-known key, written through on every mutation.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// App state database model - stores one serialized blob per key
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "app_state")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Blob key (e.g., `"donorbd-cart"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Serialized JSON value
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// When this blob was last written
    pub updated_at: DateTimeUtc,
}

/// `AppState` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
