//! Entity module - Contains the SeaORM entity definitions for the database.
//! The ledger only persists opaque blobs, so a single key-value table suffices.

pub mod app_state;

pub use app_state::{Column as AppStateColumn, Entity as AppState, Model as AppStateModel};
