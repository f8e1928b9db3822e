//! Aggregates and dashboard summaries.
//!
//! Everything here is recomputed from the current campaigns and donations on every
//! call; nothing is cached or stored. The functions are framework-agnostic and
//! return structured data for the presentation layer to format.

use crate::core::campaign::{self, Campaign};
use crate::core::cart::DonationKind;
use crate::core::donation::Donation;
use std::collections::HashSet;

/// Number of donations shown in "recent donations" lists.
pub const RECENT_DONATIONS_LIMIT: usize = 5;

/// Sum of every campaign's raised amount.
#[must_use]
pub fn total_raised(campaigns: &[Campaign]) -> f64 {
    campaigns.iter().map(|c| c.raised).sum()
}

/// Number of donations in the ledger.
#[must_use]
pub const fn total_donors(donations: &[Donation]) -> usize {
    donations.len()
}

/// Sum of all donation amounts.
#[must_use]
pub fn total_donated(donations: &[Donation]) -> f64 {
    donations.iter().map(Donation::amount).sum()
}

/// The last `limit` donations, newest first.
#[must_use]
pub fn recent_donations(donations: &[Donation], limit: usize) -> Vec<&Donation> {
    donations.iter().rev().take(limit).collect()
}

/// Personal dashboard figures.
#[derive(Debug, Clone, PartialEq)]
pub struct DonorSummary {
    /// Sum of all donation amounts
    pub total_donated: f64,
    /// Number of donations
    pub donation_count: usize,
    /// Number of recurring donations
    pub recurring_count: usize,
    /// Number of distinct campaigns donated to
    pub campaigns_supported: usize,
    /// Most recent donations, newest first
    pub recent: Vec<Donation>,
}

/// Builds the personal dashboard summary for `donations`.
#[must_use]
pub fn donor_summary(donations: &[Donation]) -> DonorSummary {
    let campaigns_supported = donations
        .iter()
        .filter_map(Donation::campaign_id)
        .collect::<HashSet<_>>()
        .len();

    DonorSummary {
        total_donated: total_donated(donations),
        donation_count: donations.len(),
        recurring_count: donations
            .iter()
            .filter(|d| d.draft.kind == DonationKind::Recurring)
            .count(),
        campaigns_supported,
        recent: recent_donations(donations, RECENT_DONATIONS_LIMIT)
            .into_iter()
            .cloned()
            .collect(),
    }
}

/// Admin overview figures.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminOverview {
    /// Sum of all donation amounts
    pub total_revenue: f64,
    /// Number of donations
    pub total_donors: usize,
    /// Number of campaigns
    pub active_campaigns: usize,
    /// Number of campaigns flagged urgent
    pub urgent_campaigns: usize,
    /// Sum of every campaign's raised amount
    pub total_raised: f64,
}

/// Builds the admin overview from the campaigns and the ledger.
#[must_use]
pub fn admin_overview(campaigns: &[Campaign], donations: &[Donation]) -> AdminOverview {
    AdminOverview {
        total_revenue: total_donated(donations),
        total_donors: total_donors(donations),
        active_campaigns: campaigns.len(),
        urgent_campaigns: campaigns.iter().filter(|c| c.urgent).count(),
        total_raised: total_raised(campaigns),
    }
}

/// Funding status of one campaign.
#[derive(Debug, Clone)]
pub struct CampaignReport {
    /// The campaign being reported on
    pub campaign: Campaign,
    /// Raised as a percentage of target
    pub progress_percent: f64,
    /// Amount still needed
    pub remaining: f64,
    /// Donations in this ledger referencing the campaign
    pub ledger_donations: usize,
    /// Sum of those donations
    pub ledger_amount: f64,
}

/// Builds the funding report for the campaign with `campaign_id`.
///
/// Returns `None` if no such campaign exists.
#[must_use]
pub fn campaign_report(
    campaigns: &[Campaign],
    donations: &[Donation],
    campaign_id: u32,
) -> Option<CampaignReport> {
    let campaign = campaign::find(campaigns, campaign_id)?;
    let mine: Vec<&Donation> = donations
        .iter()
        .filter(|d| d.campaign_id() == Some(campaign_id))
        .collect();

    Some(CampaignReport {
        progress_percent: campaign::progress_percent(campaign),
        remaining: campaign::remaining(campaign),
        ledger_donations: mine.len(),
        ledger_amount: mine.iter().map(|d| d.amount()).sum(),
        campaign: campaign.clone(),
    })
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80%`
#[must_use]
pub fn format_progress_bar(progress_percent: f64, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = progress_percent.clamp(0.0, 100.0);

    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    let filled = ((clamped / 100.0) * length as f64).round() as usize;
    let empty = length.saturating_sub(filled);

    format!(
        "[{}{}] {:.0}%",
        "█".repeat(filled),
        "░".repeat(empty),
        progress_percent
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::core::cart::{DonationDraft, Frequency};
    use crate::core::donation::DonationIntent;
    use crate::test_utils::{fixed_now, seed_campaigns, seed_state};

    fn sample_ledger() -> (Vec<Campaign>, Vec<Donation>) {
        let mut state = seed_state();
        let campaigns = state.campaigns().to_vec();
        let intents = vec![
            DonationIntent::direct(DonationDraft::for_campaign(&campaigns[0], 1_000.0)),
            DonationIntent::direct(DonationDraft::for_campaign(&campaigns[0], 500.0)),
            DonationIntent::direct(DonationDraft::for_campaign(&campaigns[2], 2_000.0)),
            DonationIntent::direct(
                DonationDraft::for_category("food", 300.0).recurring(Frequency::Monthly),
            ),
        ];
        state.commit_batch(intents, fixed_now());
        (state.campaigns().to_vec(), state.donations().to_vec())
    }

    #[test]
    fn test_total_raised_seed() {
        // 320k + 180k + 650k + 125k + 150k + 75k
        assert_eq!(total_raised(&seed_campaigns()), 1_500_000.0);
    }

    #[test]
    fn test_donor_summary() {
        let (_, donations) = sample_ledger();
        let summary = donor_summary(&donations);
        assert_eq!(summary.total_donated, 3_800.0);
        assert_eq!(summary.donation_count, 4);
        assert_eq!(summary.recurring_count, 1);
        assert_eq!(summary.campaigns_supported, 2);
        assert_eq!(summary.recent.len(), 4);
        assert_eq!(summary.recent[0].id, donations[3].id);
        assert_eq!(summary.recent[3].id, donations[0].id);
    }

    #[test]
    fn test_recent_donations_limit() {
        let (_, donations) = sample_ledger();
        let recent = recent_donations(&donations, 2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].id, donations[3].id);
        assert_eq!(recent[1].id, donations[2].id);
    }

    #[test]
    fn test_admin_overview() {
        let (campaigns, donations) = sample_ledger();
        let overview = admin_overview(&campaigns, &donations);
        assert_eq!(overview.total_revenue, 3_800.0);
        assert_eq!(overview.total_donors, 4);
        assert_eq!(overview.active_campaigns, 6);
        assert_eq!(overview.urgent_campaigns, 2);
        assert_eq!(overview.total_raised, 1_503_500.0);
    }

    #[test]
    fn test_campaign_report() {
        let (campaigns, donations) = sample_ledger();
        let report = campaign_report(&campaigns, &donations, 1).unwrap();
        assert_eq!(report.campaign.raised, 321_500.0);
        assert_eq!(report.ledger_donations, 2);
        assert_eq!(report.ledger_amount, 1_500.0);
        assert_eq!(report.remaining, 178_500.0);

        assert!(campaign_report(&campaigns, &donations, 99).is_none());
    }

    #[test]
    fn test_format_progress_bar() {
        assert_eq!(format_progress_bar(64.0, None), "[██████░░░░] 64%");
        assert_eq!(format_progress_bar(0.0, Some(4)), "[░░░░] 0%");
        assert_eq!(format_progress_bar(130.0, Some(4)), "[████] 130%");
    }
}
