//! Core business logic - framework-agnostic campaign, cart, donation, and ledger operations.

/// Campaigns, categories, and campaign browsing
pub mod campaign;
/// Cart items and donation drafts
pub mod cart;
/// Wall-clock time source
pub mod clock;
/// Committed donations and payment details
pub mod donation;
/// Identifier generation
pub mod ids;
/// The ledger and cart manager
pub mod ledger;
/// Aggregates and dashboard summaries
pub mod report;
/// In-memory state and pure transitions
pub mod state;
/// Blob persistence
pub mod store;
/// Caller-side draft validation
pub mod validation;

pub use ledger::Ledger;
