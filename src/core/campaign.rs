//! Campaign business logic - fundraising goals and their browsing helpers.
//!
//! Campaigns are seeded at startup and never created at runtime. Their `raised`
//! amount is only ever changed by the ledger when a donation referencing the
//! campaign is committed. This module also provides the search, filter, and sort
//! operations used by campaign listings.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A fundraising goal with a target amount and accumulated raised amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Campaign {
    /// Unique, stable identifier
    pub id: u32,
    /// Display title (e.g., "Flood Relief in Sylhet")
    pub title: String,
    /// Identifier of the category this campaign belongs to (e.g., "emergency")
    pub category: String,
    /// Free-text description
    pub description: String,
    /// Fundraising target in taka
    pub target: f64,
    /// Amount raised so far in taka
    pub raised: f64,
    /// Last day the campaign accepts donations
    pub deadline: NaiveDate,
    /// Number of donors recorded in the seed data
    pub donors: u32,
    /// Whether the campaign is flagged as urgent
    pub urgent: bool,
    /// Where the funds are spent
    pub location: String,
    /// Optional cover image path
    #[serde(default)]
    pub image: Option<String>,
    /// When the campaign was created
    pub created_at: NaiveDate,
}

/// A donation category (e.g., education, healthcare).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Short identifier (e.g., `"education"`)
    pub id: String,
    /// Display name (e.g., "Education")
    pub name: String,
    /// Icon key used by the presentation layer
    pub icon_name: String,
    /// Number of programs in this category
    pub count: u32,
}

/// Sort orders offered by the campaign listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignSort {
    /// Most recently created first
    #[default]
    Newest,
    /// Earliest deadline first
    Deadline,
    /// Highest progress percentage first
    MostFunded,
    /// Lowest progress percentage first
    LeastFunded,
    /// Keep seed order
    Unsorted,
}

/// Filter and sort options for [`browse`].
#[derive(Debug, Clone, Default)]
pub struct CampaignQuery {
    /// Case-insensitive text matched against title and description
    pub search: String,
    /// Category identifier to restrict to; `None` means all categories
    pub category: Option<String>,
    /// Sort order for the results
    pub sort: CampaignSort,
}

/// Calculates how much of the target has been raised, as a percentage.
///
/// Returns 0 for a campaign without a target. Values above 100 mean the
/// campaign is overfunded.
#[must_use]
pub fn progress_percent(campaign: &Campaign) -> f64 {
    if campaign.target <= 0.0 {
        return 0.0;
    }

    (campaign.raised / campaign.target) * 100.0
}

/// Amount still needed to reach the target, never negative.
#[must_use]
pub fn remaining(campaign: &Campaign) -> f64 {
    (campaign.target - campaign.raised).max(0.0)
}

/// Finds a campaign by id.
#[must_use]
pub fn find(campaigns: &[Campaign], id: u32) -> Option<&Campaign> {
    campaigns.iter().find(|c| c.id == id)
}

/// Finds a category by its short identifier.
#[must_use]
pub fn find_category<'a>(categories: &'a [Category], id: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.id == id)
}

/// Returns the campaigns matching `query`, in the requested order.
///
/// The search is a case-insensitive substring match over title and description.
/// Sorting is stable, so campaigns that compare equal keep their seed order.
#[must_use]
pub fn browse<'a>(campaigns: &'a [Campaign], query: &CampaignQuery) -> Vec<&'a Campaign> {
    let needle = query.search.to_lowercase();

    let mut results: Vec<&Campaign> = campaigns
        .iter()
        .filter(|c| {
            c.title.to_lowercase().contains(&needle)
                || c.description.to_lowercase().contains(&needle)
        })
        .filter(|c| query.category.as_ref().is_none_or(|cat| &c.category == cat))
        .collect();

    match query.sort {
        CampaignSort::Newest => results.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
        CampaignSort::Deadline => results.sort_by(|a, b| a.deadline.cmp(&b.deadline)),
        CampaignSort::MostFunded => results.sort_by(|a, b| cmp_progress(b, a)),
        CampaignSort::LeastFunded => results.sort_by(|a, b| cmp_progress(a, b)),
        CampaignSort::Unsorted => {}
    }

    results
}

fn cmp_progress(a: &Campaign, b: &Campaign) -> Ordering {
    progress_percent(a).total_cmp(&progress_percent(b))
}
