//! Caller-side validation of donation drafts.
//!
//! The ledger assumes well-formed input and never rejects a draft itself. Donation
//! forms call [`validate_draft`] before handing a draft to the ledger.

use crate::core::cart::{DonationDraft, DonationKind};
use crate::errors::{Error, Result};

/// Checks that `draft` can be staged.
///
/// # Errors
/// - `Error::InvalidAmount` if the amount is not a finite number greater than zero
/// - `Error::MissingField` if the category is empty, or a recurring draft has no frequency
pub fn validate_draft(draft: &DonationDraft) -> Result<()> {
    if !draft.amount.is_finite() || draft.amount <= 0.0 {
        return Err(Error::InvalidAmount {
            amount: draft.amount,
        });
    }

    if draft.category.trim().is_empty() {
        return Err(Error::MissingField { field: "category" });
    }

    if draft.kind == DonationKind::Recurring && draft.frequency.is_none() {
        return Err(Error::MissingField { field: "frequency" });
    }

    Ok(())
}
