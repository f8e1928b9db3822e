//! Donation types - committed, immutable ledger entries.
//!
//! A [`Donation`] is created by committing a [`DonationIntent`], either one at a
//! time or as a checkout batch built from the cart. Payment is simulated: the
//! payment details are recorded verbatim and the donation is always `completed`.

use crate::core::cart::{CartItem, DonationDraft, DonorDetails};
use crate::core::ids::EntryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status of a donation. Only completed donations are modeled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationStatus {
    /// The donation was recorded
    #[default]
    Completed,
}

/// Mobile wallets and cards offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// bKash mobile wallet
    #[default]
    Bkash,
    /// Nagad mobile wallet
    Nagad,
    /// Rocket mobile wallet
    Rocket,
    /// Debit or credit card
    Card,
}

/// How a donation was (nominally) paid.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    /// Selected payment method
    pub method: PaymentMethod,
    /// Wallet transaction reference entered by the donor, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

/// A fully-formed request to record a donation.
#[derive(Debug, Clone, PartialEq)]
pub struct DonationIntent {
    /// The cart item this intent came from, if any
    pub cart_item_id: Option<EntryId>,
    /// What the donor chose
    pub draft: DonationDraft,
    /// When the gift was first chosen; defaults to the commit time
    pub created_at: Option<DateTime<Utc>>,
    /// Payment details collected at checkout
    pub payment: Option<PaymentDetails>,
}

impl DonationIntent {
    /// An intent that did not pass through the cart.
    #[must_use]
    pub const fn direct(draft: DonationDraft) -> Self {
        Self {
            cart_item_id: None,
            draft,
            created_at: None,
            payment: None,
        }
    }

    /// An intent carrying everything a cart item holds.
    #[must_use]
    pub fn from_cart_item(item: &CartItem) -> Self {
        Self {
            cart_item_id: Some(item.id),
            draft: item.draft.clone(),
            created_at: Some(item.created_at),
            payment: None,
        }
    }

    /// Attaches payment details.
    #[must_use]
    pub fn with_payment(mut self, payment: PaymentDetails) -> Self {
        self.payment = Some(payment);
        self
    }

    /// Replaces the donor details, keeping the cart item's own when `donor` is `None`.
    #[must_use]
    pub fn with_donor(mut self, donor: Option<DonorDetails>) -> Self {
        if donor.is_some() {
            self.draft.donor = donor;
        }
        self
    }
}

/// A committed donation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Donation {
    /// Identifier assigned at commit time
    pub id: EntryId,
    /// Cart item the donation was committed from, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cart_item_id: Option<EntryId>,
    /// What the donor chose
    #[serde(flatten)]
    pub draft: DonationDraft,
    /// When the gift was first chosen
    pub created_at: DateTime<Utc>,
    /// When the donation was committed
    pub committed_at: DateTime<Utc>,
    /// Payment details collected at checkout
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentDetails>,
    /// Always `completed`
    #[serde(default)]
    pub status: DonationStatus,
}

impl Donation {
    /// Builds the ledger entry for `intent` with an assigned id and commit time.
    #[must_use]
    pub fn from_intent(id: EntryId, intent: DonationIntent, committed_at: DateTime<Utc>) -> Self {
        Self {
            id,
            cart_item_id: intent.cart_item_id,
            draft: intent.draft,
            created_at: intent.created_at.unwrap_or(committed_at),
            committed_at,
            payment: intent.payment,
            status: DonationStatus::Completed,
        }
    }

    /// Donation amount in taka.
    #[must_use]
    pub const fn amount(&self) -> f64 {
        self.draft.amount
    }

    /// Campaign this donation was applied to, if any.
    #[must_use]
    pub const fn campaign_id(&self) -> Option<u32> {
        self.draft.campaign_id
    }
}
