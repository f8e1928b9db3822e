//! In-memory ledger state and its transitions.
//!
//! [`LedgerState`] owns the campaigns, the cart, and the donations ledger. Every
//! operation here is a pure state transition with the current time passed in;
//! nothing in this module touches storage. [`crate::core::ledger::Ledger`] wraps
//! these transitions with write-through persistence.

use crate::config::campaigns::SeedConfig;
use crate::core::campaign::{Campaign, Category};
use crate::core::cart::{CartItem, DonationDraft};
use crate::core::donation::{Donation, DonationIntent};
use crate::core::ids::{EntryId, IdGenerator};
use chrono::{DateTime, Utc};
use tracing::{debug, trace, warn};

/// Campaigns, cart, and donations held by the ledger.
#[derive(Debug, Clone, Default)]
pub struct LedgerState {
    campaigns: Vec<Campaign>,
    categories: Vec<Category>,
    cart: Vec<CartItem>,
    donations: Vec<Donation>,
    ids: IdGenerator,
}

impl LedgerState {
    /// Builds the state from the seed plus a rehydrated cart and ledger.
    ///
    /// The identifier generator is primed past every id already in use.
    #[must_use]
    pub fn new(seed: SeedConfig, cart: Vec<CartItem>, donations: Vec<Donation>) -> Self {
        let mut ids = IdGenerator::default();
        for id in cart.iter().map(|i| i.id).chain(donations.iter().map(|d| d.id)) {
            ids.observe(id);
        }

        Self {
            campaigns: seed.campaigns,
            categories: seed.categories,
            cart,
            donations,
            ids,
        }
    }

    /// All campaigns in seed order.
    #[must_use]
    pub fn campaigns(&self) -> &[Campaign] {
        &self.campaigns
    }

    /// All donation categories.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Pending cart items in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CartItem] {
        &self.cart
    }

    /// Committed donations in commit order.
    #[must_use]
    pub fn donations(&self) -> &[Donation] {
        &self.donations
    }

    /// Appends a new cart item for `draft`, stamped with `now`.
    pub fn add_to_cart(&mut self, draft: DonationDraft, now: DateTime<Utc>) -> CartItem {
        let item = CartItem {
            id: self.next_id(now),
            draft,
            created_at: now,
        };
        trace!("Adding cart item {}", item.id);
        self.cart.push(item.clone());
        item
    }

    /// Removes the first cart item with `id`.
    ///
    /// Returns `false`, leaving the cart untouched, if no such item exists.
    pub fn remove_from_cart(&mut self, id: EntryId) -> bool {
        match self.cart.iter().position(|item| item.id == id) {
            Some(index) => {
                self.cart.remove(index);
                true
            }
            None => false,
        }
    }

    /// Empties the cart.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
    }

    /// Records one donation, applies it to its campaign, and empties the cart.
    pub fn commit(&mut self, intent: DonationIntent, now: DateTime<Utc>) -> Donation {
        let donation = self.record(intent, now);
        self.clear_cart();
        donation
    }

    /// Records every intent in order, applies each to its campaign, and empties the cart.
    ///
    /// All donations share the commit time `now`; their ids are still pairwise distinct.
    pub fn commit_batch(&mut self, intents: Vec<DonationIntent>, now: DateTime<Utc>) -> Vec<Donation> {
        let donations: Vec<Donation> = intents
            .into_iter()
            .map(|intent| self.record(intent, now))
            .collect();
        self.clear_cart();
        donations
    }

    fn record(&mut self, intent: DonationIntent, now: DateTime<Utc>) -> Donation {
        let donation = Donation::from_intent(self.next_id(now), intent, now);
        if let Some(campaign_id) = donation.campaign_id() {
            self.apply_to_campaign(campaign_id, donation.amount());
        }
        self.donations.push(donation.clone());
        donation
    }

    /// Issues an id not held by any cart item or donation.
    ///
    /// Ids are time-shaped while the generator has headroom. A rehydrated entry at
    /// `EntryId::MAX` exhausts it; from then on the lowest free id is used.
    fn next_id(&mut self, now: DateTime<Utc>) -> EntryId {
        let id = self.ids.next(now);
        if id < EntryId::MAX || !self.id_in_use(id) {
            return id;
        }

        let free = (1..EntryId::MAX).find(|candidate| !self.id_in_use(*candidate));
        warn!("Identifier space exhausted, falling back to free id {:?}", free);
        free.unwrap_or(id)
    }

    fn id_in_use(&self, id: EntryId) -> bool {
        self.cart.iter().any(|item| item.id == id) || self.donations.iter().any(|d| d.id == id)
    }

    /// Adds `amount` to the campaign's raised total. Unknown campaigns are ignored.
    fn apply_to_campaign(&mut self, campaign_id: u32, amount: f64) {
        match self.campaigns.iter_mut().find(|c| c.id == campaign_id) {
            Some(campaign) => {
                campaign.raised += amount;
                trace!(
                    "Campaign {} raised is now {:.2}",
                    campaign_id, campaign.raised
                );
            }
            None => debug!(
                "Campaign {} not found, donation recorded without campaign update",
                campaign_id
            ),
        }
    }
}
