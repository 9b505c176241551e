//! Core business logic - framework-agnostic ledger, statistics and reporting.

/// Campaign ledger: create, list, donate, release
pub mod ledger;
/// Synthetic campaign ids and transaction hashes
pub mod reference;
/// Progress, urgency and display helpers
pub mod report;
/// Donor statistics and leaderboards
pub mod stats;

pub use ledger::{CampaignLedger, DonationReceipt, ReleaseReceipt};
pub use stats::{DonationHistoryItem, LeaderboardEntry, UserStatistics};
