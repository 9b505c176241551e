//! Donor statistics and leaderboards.
//!
//! Pure functions over a campaign list; donor identifiers are compared
//! case-insensitively, since the same wallet address shows up in different
//! letter cases depending on where it was copied from.

use crate::models::CampaignRecord;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};

/// One donation as seen from the donor's side
#[derive(Debug, Clone, PartialEq)]
pub struct DonationHistoryItem {
    /// Campaign the donation went to
    pub campaign_id: String,
    /// That campaign's title
    pub campaign_title: String,
    /// Amount donated
    pub amount: f64,
    /// When it was recorded
    pub timestamp: DateTime<Utc>,
    /// Transaction hash of the donation
    pub tx_reference: String,
}

/// Aggregated giving of a single donor
#[derive(Debug, Clone, PartialEq)]
pub struct UserStatistics {
    /// The donor identifier as queried
    pub donor: String,
    /// Sum of all donations
    pub total_donated: f64,
    /// Number of donations
    pub donation_count: usize,
    /// Distinct campaign ids, in ledger order
    pub campaigns_supported: Vec<String>,
    /// Newest first
    pub history: Vec<DonationHistoryItem>,
}

/// A donor's position on the leaderboard
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardEntry {
    /// 1-based
    pub rank: usize,
    /// Donor identifier as first seen in the ledger
    pub donor: String,
    /// Sum of all donations
    pub total_donated: f64,
    /// Number of donations
    pub donation_count: usize,
    /// Number of distinct campaigns donated to
    pub campaigns_supported: usize,
}

fn donor_key(donor: &str) -> String {
    donor.to_lowercase()
}

/// Sums every donation made by `donor` across all campaigns.
///
/// A donor with no donations gets zeroed statistics rather than an error.
#[must_use]
pub fn compute_user_statistics(campaigns: &[CampaignRecord], donor: &str) -> UserStatistics {
    let key = donor_key(donor);
    let mut total_donated = 0.0;
    let mut campaigns_supported = Vec::new();
    let mut history = Vec::new();

    for campaign in campaigns {
        let mut supported = false;
        for donation in campaign
            .donations
            .iter()
            .filter(|d| donor_key(&d.donor) == key)
        {
            total_donated += donation.amount;
            supported = true;
            history.push(DonationHistoryItem {
                campaign_id: campaign.id.clone(),
                campaign_title: campaign.title.clone(),
                amount: donation.amount,
                timestamp: donation.timestamp,
                tx_reference: donation.tx_reference.clone(),
            });
        }
        if supported && !campaigns_supported.contains(&campaign.id) {
            campaigns_supported.push(campaign.id.clone());
        }
    }

    history.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

    UserStatistics {
        donor: donor.to_string(),
        total_donated,
        donation_count: history.len(),
        campaigns_supported,
        history,
    }
}

/// Ranks donors by total donated, highest first. Ties are broken by donor id.
#[must_use]
pub fn leaderboard(campaigns: &[CampaignRecord], limit: Option<usize>) -> Vec<LeaderboardEntry> {
    struct Tally<'a> {
        donor: &'a str,
        total: f64,
        count: usize,
        campaigns: HashSet<&'a str>,
    }

    let mut tallies: HashMap<String, Tally<'_>> = HashMap::new();
    for campaign in campaigns {
        for donation in &campaign.donations {
            let tally = tallies
                .entry(donor_key(&donation.donor))
                .or_insert_with(|| Tally {
                    donor: &donation.donor,
                    total: 0.0,
                    count: 0,
                    campaigns: HashSet::new(),
                });
            tally.total += donation.amount;
            tally.count += 1;
            tally.campaigns.insert(&campaign.id);
        }
    }

    let mut ranked: Vec<(String, Tally<'_>)> = tallies.into_iter().collect();
    ranked.sort_by(|(a_key, a), (b_key, b)| {
        b.total.total_cmp(&a.total).then_with(|| a_key.cmp(b_key))
    });

    ranked
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .enumerate()
        .map(|(index, (_, tally))| LeaderboardEntry {
            rank: index + 1,
            donor: tally.donor.to_string(),
            total_donated: tally.total,
            donation_count: tally.count,
            campaigns_supported: tally.campaigns.len(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::{test_campaign, test_donation};

    fn ledger_fixture() -> Vec<CampaignRecord> {
        let mut school = test_campaign("school", 1000.0, 0.0);
        school.title = "School library".to_string();
        school.donations = vec![
            test_donation("0xAAA", 10.0, 1),
            test_donation("0xBBB", 300.0, 5),
            test_donation("0xaaa", 15.0, 30),
        ];

        let mut clinic = test_campaign("clinic", 500.0, 0.0);
        clinic.title = "Clinic roof".to_string();
        clinic.donations = vec![test_donation("0xAaA", 40.0, 10)];

        let mut park = test_campaign("park", 200.0, 0.0);
        park.donations = vec![test_donation("0xCCC", 65.0, 2)];

        vec![school, clinic, park]
    }

    #[test]
    fn test_statistics_match_any_case() {
        let stats = compute_user_statistics(&ledger_fixture(), "0xaaa");

        assert_eq!(stats.donor, "0xaaa");
        assert_eq!(stats.total_donated, 65.0);
        assert_eq!(stats.donation_count, 3);
        assert_eq!(stats.campaigns_supported, vec!["school", "clinic"]);
    }

    #[test]
    fn test_history_is_newest_first() {
        let stats = compute_user_statistics(&ledger_fixture(), "0xAAA");

        let amounts: Vec<f64> = stats.history.iter().map(|h| h.amount).collect();
        assert_eq!(amounts, vec![10.0, 40.0, 15.0]);
        assert_eq!(stats.history[1].campaign_title, "Clinic roof");
    }

    #[test]
    fn test_unknown_donor_has_zero_stats() {
        let stats = compute_user_statistics(&ledger_fixture(), "0xNOBODY");
        assert_eq!(stats.total_donated, 0.0);
        assert!(stats.campaigns_supported.is_empty());
        assert!(stats.history.is_empty());
    }

    #[test]
    fn test_leaderboard_ranks_by_total() {
        let board = leaderboard(&ledger_fixture(), None);

        assert_eq!(board.len(), 3);
        assert_eq!(board[0].donor, "0xBBB");
        assert_eq!(board[0].rank, 1);
        assert_eq!(board[1].total_donated, 65.0);
        assert_eq!(board[1].campaigns_supported, 2);
        assert_eq!(board[1].donation_count, 3);
        // 0xAAA and 0xCCC tie at 65; the lowercase key decides
        assert_eq!(board[1].donor.to_lowercase(), "0xaaa");
        assert_eq!(board[2].donor, "0xCCC");
        assert_eq!(board[2].rank, 3);
    }

    #[test]
    fn test_leaderboard_limit() {
        let board = leaderboard(&ledger_fixture(), Some(1));
        assert_eq!(board.len(), 1);
        assert_eq!(board[0].donor, "0xBBB");
    }
}
