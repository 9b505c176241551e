//! Campaign progress reporting.
//!
//! Framework-agnostic helpers that turn a campaign record into the numbers and
//! short strings a frontend shows: funding percentage, time remaining, urgency.

use crate::models::{CampaignRecord, CampaignStatus, Priority};
use chrono::{DateTime, Duration, Utc};

/// Campaigns with fewer days left than this are shown as urgent
const URGENT_DAYS: i64 = 7;

/// Snapshot of a campaign's progress at a point in time.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignProgress {
    /// Campaign identifier
    pub campaign_id: String,
    /// Campaign title
    pub title: String,
    /// Total raised so far
    pub raised_amount: f64,
    /// Funding target
    pub target_amount: f64,
    /// Whole percent funded, capped at 100
    pub percent_funded: u8,
    /// Whole days until the campaign ends
    pub days_left: i64,
    /// Number of donations received
    pub donor_count: usize,
    /// Whether to show the campaign as urgent
    pub is_urgent: bool,
    /// Lifecycle state
    pub status: CampaignStatus,
}

/// Summarizes `campaign` as of `now`.
#[must_use]
pub fn summarize(campaign: &CampaignRecord, now: DateTime<Utc>) -> CampaignProgress {
    let days_left = days_left(campaign.created_at, campaign.duration_days, now);
    CampaignProgress {
        campaign_id: campaign.id.clone(),
        title: campaign.title.clone(),
        raised_amount: campaign.raised_amount,
        target_amount: campaign.target_amount,
        percent_funded: calculate_percentage(campaign.raised_amount, campaign.target_amount),
        days_left,
        donor_count: campaign.donations.len(),
        is_urgent: is_urgent(campaign, days_left),
        status: campaign.status,
    }
}

/// Percentage of the target raised, rounded and capped at 100.
///
/// A zero target reports 0 rather than dividing by zero.
#[must_use]
pub fn calculate_percentage(raised: f64, target: f64) -> u8 {
    if target <= 0.0 || !raised.is_finite() {
        return 0;
    }

    // Clamped to [0, 100] before the cast
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let percent = ((raised / target) * 100.0).round().clamp(0.0, 100.0) as u8;
    percent
}

/// Whole days until the campaign ends; never negative.
///
/// An end date past what `chrono` can represent saturates to `i64::MAX`.
#[must_use]
pub fn days_left(created_at: DateTime<Utc>, duration_days: u32, now: DateTime<Utc>) -> i64 {
    Duration::try_days(i64::from(duration_days))
        .and_then(|span| created_at.checked_add_signed(span))
        .map_or(i64::MAX, |ends_at| (ends_at - now).num_days().max(0))
}

/// An active campaign is urgent when flagged so or when it is about to run out of time.
#[must_use]
pub fn is_urgent(campaign: &CampaignRecord, days_left: i64) -> bool {
    campaign.status == CampaignStatus::Active
        && (campaign.priority == Priority::Urgent || days_left < URGENT_DAYS)
}

/// Human-readable time remaining, e.g. `"3 days left"` or `"2 weeks left"`.
#[must_use]
pub fn days_remaining_text(days: i64) -> String {
    match days {
        d if d <= 0 => "Last day!".to_string(),
        1 => "1 day left".to_string(),
        2..=6 => format!("{days} days left"),
        7..=29 => format!("{} weeks left", days / 7),
        _ => format!("{} months left", days / 30),
    }
}

/// Generates a progress bar string for visual representation.
///
/// Creates a text-based progress bar like: `[████████░░] 80%`
#[must_use]
pub fn format_progress_bar(percent: u8, bar_length: Option<usize>) -> String {
    let length = bar_length.unwrap_or(10);
    let clamped = usize::from(percent.min(100));
    let filled = (clamped * length + 50) / 100;
    let empty = length.saturating_sub(filled);

    format!("[{}{}] {percent}%", "█".repeat(filled), "░".repeat(empty))
}

/// Shortens a wallet address or transaction hash for display: `0x1234...cdef`.
#[must_use]
pub fn truncate_hash(hash: &str, chars: usize) -> String {
    if hash.len() <= chars * 2 || !hash.is_ascii() {
        return hash.to_string();
    }
    format!("{}...{}", &hash[..chars], &hash[hash.len() - chars..])
}
