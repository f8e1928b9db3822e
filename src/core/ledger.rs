//! The donation ledger and cart manager.
//!
//! [`Ledger`] owns the in-memory [`LedgerState`] together with its persistence
//! collaborator ([`BlobStore`]) and time source ([`Clock`]). Consumers hold a
//! reference to one ledger instance and call its operations; there is no global state.
//!
//! Every mutation runs the pure state transition first and then writes the
//! affected blobs through to the store. Writes are fire-and-forget: a failed write
//! is logged and the in-memory change stands. Call [`Ledger::flush`] when a caller
//! needs the write outcome.

use crate::config::campaigns::SeedConfig;
use crate::core::campaign::{self, Campaign, Category};
use crate::core::cart::{self, CartItem, DonationDraft, DonorDetails};
use crate::core::clock::{Clock, SystemClock};
use crate::core::donation::{Donation, DonationIntent, PaymentDetails};
use crate::core::ids::EntryId;
use crate::core::report;
use crate::core::state::LedgerState;
use crate::core::store::{self, BlobStore, CART_KEY, DONATIONS_KEY};
use crate::errors::{Error, Result};
use tracing::{debug, error, info, instrument};

/// Donation ledger and cart manager.
pub struct Ledger<S, C = SystemClock> {
    state: LedgerState,
    store: S,
    clock: C,
}

impl<S: BlobStore> Ledger<S, SystemClock> {
    /// Opens a ledger on the system clock. See [`Ledger::open_with_clock`].
    pub async fn open(store: S, seed: SeedConfig) -> Result<Self> {
        Self::open_with_clock(store, seed, SystemClock).await
    }
}

impl<S: BlobStore, C: Clock> Ledger<S, C> {
    /// Opens a ledger, rehydrating the cart and donations from `store`.
    ///
    /// Campaigns always come from `seed`. A blob that is missing or fails to parse
    /// starts out empty.
    ///
    /// # Errors
    /// Returns an error if the store itself cannot be read.
    #[instrument(skip_all)]
    pub async fn open_with_clock(store: S, seed: SeedConfig, clock: C) -> Result<Self> {
        let cart_blob = store.load(CART_KEY).await?;
        let donations_blob = store.load(DONATIONS_KEY).await?;

        let cart: Vec<CartItem> = store::decode(CART_KEY, cart_blob.as_deref());
        let donations: Vec<Donation> = store::decode(DONATIONS_KEY, donations_blob.as_deref());
        info!(
            "Ledger opened with {} campaigns, {} cart items, {} donations",
            seed.campaigns.len(),
            cart.len(),
            donations.len()
        );

        Ok(Self {
            state: LedgerState::new(seed, cart, donations),
            store,
            clock,
        })
    }

    /// The persistence collaborator.
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Consumes the ledger and returns its store.
    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }

    /// All campaigns in seed order.
    #[must_use]
    pub fn campaigns(&self) -> &[Campaign] {
        self.state.campaigns()
    }

    /// Finds a campaign by id.
    #[must_use]
    pub fn campaign(&self, id: u32) -> Option<&Campaign> {
        campaign::find(self.state.campaigns(), id)
    }

    /// All donation categories.
    #[must_use]
    pub fn categories(&self) -> &[Category] {
        self.state.categories()
    }

    /// Pending cart items in insertion order.
    #[must_use]
    pub fn cart(&self) -> &[CartItem] {
        self.state.cart()
    }

    /// Committed donations in commit order.
    #[must_use]
    pub fn donations(&self) -> &[Donation] {
        self.state.donations()
    }

    /// Sum of every campaign's raised amount.
    #[must_use]
    pub fn total_raised(&self) -> f64 {
        report::total_raised(self.state.campaigns())
    }

    /// Number of donations in the ledger.
    #[must_use]
    pub fn total_donors(&self) -> usize {
        report::total_donors(self.state.donations())
    }

    /// Personal dashboard figures over the whole ledger.
    #[must_use]
    pub fn donor_summary(&self) -> report::DonorSummary {
        report::donor_summary(self.state.donations())
    }

    /// Admin overview figures.
    #[must_use]
    pub fn admin_overview(&self) -> report::AdminOverview {
        report::admin_overview(self.state.campaigns(), self.state.donations())
    }

    /// Funding report for one campaign.
    ///
    /// # Errors
    /// Returns `Error::CampaignNotFound` if no campaign has this id.
    pub fn campaign_report(&self, id: u32) -> Result<report::CampaignReport> {
        report::campaign_report(self.state.campaigns(), self.state.donations(), id)
            .ok_or(Error::CampaignNotFound { id })
    }

    /// Checkout subtotal of the current cart.
    #[must_use]
    pub fn cart_total(&self) -> f64 {
        cart::cart_total(self.state.cart())
    }

    /// Stages a donation in the cart.
    ///
    /// The caller is responsible for validating `draft` first
    /// (see [`crate::core::validation::validate_draft`]).
    pub async fn add_to_cart(&mut self, draft: DonationDraft) -> CartItem {
        let item = self.state.add_to_cart(draft, self.clock.now());
        info!(
            "Added cart item {} ({:.2} for '{}')",
            item.id, item.draft.amount, item.draft.category
        );
        self.persist_cart().await;
        item
    }

    /// Removes a cart item. Unknown ids leave the cart unchanged.
    pub async fn remove_from_cart(&mut self, id: EntryId) -> bool {
        let removed = self.state.remove_from_cart(id);
        if removed {
            info!("Removed cart item {}", id);
        } else {
            debug!("Cart item {} not found, nothing removed", id);
        }
        self.persist_cart().await;
        removed
    }

    /// Empties the cart.
    pub async fn clear_cart(&mut self) {
        self.state.clear_cart();
        info!("Cart cleared");
        self.persist_cart().await;
    }

    /// Commits a single donation and empties the cart.
    ///
    /// If the intent references a campaign, that campaign's raised amount grows by
    /// the donation amount. An unknown campaign id is tolerated: the donation is still
    /// recorded.
    pub async fn commit(&mut self, intent: DonationIntent) -> Donation {
        let donation = self.state.commit(intent, self.clock.now());
        info!(
            "Committed donation {} ({:.2}, campaign {:?})",
            donation.id,
            donation.amount(),
            donation.campaign_id()
        );
        self.persist_all().await;
        donation
    }

    /// Commits every intent in order and empties the cart.
    ///
    /// Returns the created donations in input order.
    pub async fn commit_batch(&mut self, intents: Vec<DonationIntent>) -> Vec<Donation> {
        let donations = self.state.commit_batch(intents, self.clock.now());
        info!(
            "Committed batch of {} donations totalling {:.2}",
            donations.len(),
            donations.iter().map(Donation::amount).sum::<f64>()
        );
        self.persist_all().await;
        donations
    }

    /// Checks out the whole cart with the given payment and donor details.
    ///
    /// Each cart item becomes one donation. `donor` overrides the contact details
    /// stored on the items when provided. An empty cart commits nothing.
    pub async fn checkout(
        &mut self,
        payment: &PaymentDetails,
        donor: Option<&DonorDetails>,
    ) -> Vec<Donation> {
        if self.state.cart().is_empty() {
            debug!("Checkout requested with an empty cart");
            return Vec::new();
        }

        let intents: Vec<DonationIntent> = self
            .state
            .cart()
            .iter()
            .map(|item| {
                DonationIntent::from_cart_item(item)
                    .with_payment(payment.clone())
                    .with_donor(donor.cloned())
            })
            .collect();

        self.commit_batch(intents).await
    }

    /// Writes both the cart and the donations, reporting the first failure.
    pub async fn flush(&self) -> Result<()> {
        self.store
            .save(CART_KEY, &store::encode(self.state.cart())?)
            .await?;
        self.store
            .save(DONATIONS_KEY, &store::encode(self.state.donations())?)
            .await?;
        debug!("Ledger flushed");
        Ok(())
    }

    async fn persist_cart(&self) {
        if let Err(e) = self.write_blob(CART_KEY, self.state.cart()).await {
            error!("Failed to persist cart: {}", e);
        }
    }

    async fn persist_all(&self) {
        if let Err(e) = self.write_blob(DONATIONS_KEY, self.state.donations()).await {
            error!("Failed to persist donations: {}", e);
        }
        self.persist_cart().await;
    }

    async fn write_blob<T: serde::Serialize + Sync>(&self, key: &str, items: &[T]) -> Result<()> {
        let blob = store::encode(items)?;
        self.store.save(key, &blob).await
    }
}
