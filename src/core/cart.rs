//! Cart types - donation intents a donor has staged but not yet committed.
//!
//! A [`CartItem`] lives only between "add to cart" and checkout. It wraps the
//! donor's choices ([`DonationDraft`]) with the identifier and creation time the
//! ledger assigns when the item is added.

use crate::core::ids::EntryId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether a gift is given once or repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DonationKind {
    /// A one-time gift
    #[default]
    Single,
    /// A repeating gift, see [`Frequency`]
    Recurring,
}

/// How often a recurring gift repeats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    /// Every month
    #[default]
    Monthly,
    /// Every three months
    Quarterly,
    /// Once a year
    Yearly,
}

/// Contact details a donor may attach to a gift.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonorDetails {
    /// Donor name
    pub name: String,
    /// Donor email address
    pub email: String,
    /// Donor phone number
    pub phone: String,
    /// Hide the donor's name on public listings
    #[serde(default)]
    pub anonymous: bool,
}

/// The donor's choices for one gift, before the ledger assigns an identity to it.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationDraft {
    /// Campaign this gift is for; `None` for a general category donation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_id: Option<u32>,
    /// Campaign title captured when the gift was chosen
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub campaign_title: Option<String>,
    /// Identifier of the category, matching [`crate::core::campaign::Category::id`]
    pub category: String,
    /// Amount in taka
    pub amount: f64,
    /// Single or recurring
    #[serde(rename = "type")]
    pub kind: DonationKind,
    /// Repeat interval for recurring gifts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    /// Optional note from the donor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Optional donor contact details
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donor: Option<DonorDetails>,
}

impl DonationDraft {
    /// A single gift of `amount` to a category.
    #[must_use]
    pub fn for_category(category: impl Into<String>, amount: f64) -> Self {
        Self {
            category: category.into(),
            amount,
            ..Default::default()
        }
    }

    /// A single gift of `amount` to a specific campaign.
    ///
    /// The draft takes the campaign's category id, so it lands in the same
    /// category as a direct gift built with [`DonationDraft::for_category`].
    #[must_use]
    pub fn for_campaign(campaign: &crate::core::campaign::Campaign, amount: f64) -> Self {
        Self {
            campaign_id: Some(campaign.id),
            campaign_title: Some(campaign.title.clone()),
            category: campaign.category.clone(),
            amount,
            ..Default::default()
        }
    }

    /// Turns this draft into a recurring gift.
    #[must_use]
    pub fn recurring(mut self, frequency: Frequency) -> Self {
        self.kind = DonationKind::Recurring;
        self.frequency = Some(frequency);
        self
    }

    /// Attaches a note from the donor.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Attaches donor contact details.
    #[must_use]
    pub fn with_donor(mut self, donor: DonorDetails) -> Self {
        self.donor = Some(donor);
        self
    }
}

/// A pending donation intent held in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Identifier assigned when the item was added
    pub id: EntryId,
    /// What the donor chose
    #[serde(flatten)]
    pub draft: DonationDraft,
    /// When the item was added
    pub created_at: DateTime<Utc>,
}

/// Sum of all item amounts, the checkout subtotal.
#[must_use]
pub fn cart_total(cart: &[CartItem]) -> f64 {
    cart.iter().map(|item| item.draft.amount).sum()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::campaign::find_category;
    use crate::test_utils::{fixed_now, seed};

    fn item(id: EntryId, amount: f64) -> CartItem {
        CartItem {
            id,
            draft: DonationDraft::for_category("education", amount),
            created_at: fixed_now(),
        }
    }

    #[test]
    fn test_cart_total() {
        assert_eq!(cart_total(&[]), 0.0);
        assert_eq!(cart_total(&[item(1, 500.0), item(2, 1_500.0)]), 2_000.0);
    }

    #[test]
    fn test_for_campaign_copies_campaign_fields() {
        let campaigns = seed().campaigns;
        let draft = DonationDraft::for_campaign(&campaigns[2], 2_000.0);
        assert_eq!(draft.campaign_id, Some(3));
        assert_eq!(
            draft.campaign_title.as_deref(),
            Some("Healthcare Support for Cancer Patients")
        );
        assert_eq!(draft.category, "healthcare");
        assert_eq!(draft.kind, DonationKind::Single);
    }

    #[test]
    fn test_campaign_and_category_drafts_share_category_ids() {
        let seed = seed();
        for campaign in &seed.campaigns {
            let draft = DonationDraft::for_campaign(campaign, 100.0);
            assert!(
                find_category(&seed.categories, &draft.category).is_some(),
                "campaign {} has unknown category '{}'",
                campaign.id,
                draft.category
            );
        }

        let direct = DonationDraft::for_category("healthcare", 100.0);
        let via_campaign = DonationDraft::for_campaign(&seed.campaigns[2], 100.0);
        assert_eq!(direct.category, via_campaign.category);
    }

    #[test]
    fn test_recurring_sets_kind_and_frequency() {
        let draft = DonationDraft::for_category("food", 1_000.0).recurring(Frequency::Quarterly);
        assert_eq!(draft.kind, DonationKind::Recurring);
        assert_eq!(draft.frequency, Some(Frequency::Quarterly));
    }

    #[test]
    fn test_cart_item_json_shape() {
        let cart_item = CartItem {
            id: 42,
            draft: DonationDraft::for_category("education", 500.0).with_message("for books"),
            created_at: fixed_now(),
        };
        let value = serde_json::to_value(&cart_item).unwrap();
        assert_eq!(value["id"], 42);
        assert_eq!(value["category"], "education");
        assert_eq!(value["type"], "single");
        assert_eq!(value["message"], "for books");
        assert!(value.get("campaignId").is_none());
        assert!(value.get("createdAt").is_some());
    }
}
