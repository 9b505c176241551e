//! Campaign and donation records as they are persisted in the ledger slot.
//!
//! The whole ledger is one JSON array of [`CampaignRecord`]s, so every field
//! here must survive a `serde_json` round trip unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Who a campaign raises money for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignType {
    /// A person raising money for themselves or a relative
    Individual,
    /// A registered organization
    Charity,
}

/// Lifecycle state of a campaign. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampaignStatus {
    /// Accepting donations, target not yet reached
    Active,
    /// Target reached, waiting for a verifier to release funds
    Completed,
    /// Funds handed over; terminal
    FundsReleased,
}

impl CampaignStatus {
    /// Position in the one-directional lifecycle
    const fn rank(self) -> u8 {
        match self {
            Self::Active => 0,
            Self::Completed => 1,
            Self::FundsReleased => 2,
        }
    }

    /// Whether moving from `self` to `next` is a single forward step
    #[must_use]
    pub const fn can_advance_to(self, next: Self) -> bool {
        next.rank() == self.rank() + 1
    }
}

impl fmt::Display for CampaignStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Active => "active",
            Self::Completed => "completed",
            Self::FundsReleased => "funds_released",
        };
        f.write_str(label)
    }
}

/// Display priority chosen by the campaign creator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    /// Shown in the urgent banner
    Urgent,
    /// Listed in the regular feed
    #[default]
    Normal,
}

/// How money reaches the campaign.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Funding {
    /// Donations are recorded locally with synthetic transaction hashes
    LocalOnly,
    /// Donations go through the wallet gateway to this on-chain target
    OnChain {
        /// Contract or campaign address on chain
        reference: String,
    },
}

/// One immutable contribution to a campaign
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DonationRecord {
    /// Wallet address or placeholder name of the donor
    pub donor: String,
    /// Positive amount donated
    pub amount: f64,
    /// When the donation was recorded
    pub timestamp: DateTime<Utc>,
    /// Transaction hash returned by the gateway, or a synthetic one
    pub tx_reference: String,
}

/// A fundraising campaign and everything donated to it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    /// Unique identifier, e.g. `camp_1a2b3c4d5e6f7a8b`
    pub id: String,
    /// Individual or charity
    pub campaign_type: CampaignType,
    /// Headline shown on the campaign card
    pub title: String,
    /// Longer story behind the campaign
    pub description: String,
    /// Free-form category, e.g. `"medical"` or `"education"`
    pub category: String,
    /// Display priority
    #[serde(default)]
    pub priority: Priority,
    /// Amount the campaign aims to raise
    pub target_amount: f64,
    /// Total raised so far, including any amount the campaign started with
    pub raised_amount: f64,
    /// How long the campaign runs after creation
    pub duration_days: u32,
    /// Creation time
    pub created_at: DateTime<Utc>,
    /// Beneficiary name for individual campaigns, organization name for charities
    pub beneficiary: String,
    /// Hospital or administrator allowed to release funds
    #[serde(default)]
    pub verifier_id: Option<String>,
    /// Lifecycle state
    pub status: CampaignStatus,
    /// Newest first
    #[serde(default)]
    pub donations: Vec<DonationRecord>,
    /// Where donations are sent
    pub funding: Funding,
    /// Set once funds are released
    #[serde(default)]
    pub release_tx: Option<String>,
}

/// Input for creating a campaign; the ledger fills in id, totals and status.
#[derive(Debug, Clone, Deserialize)]
pub struct CampaignDraft {
    /// Individual or charity
    pub campaign_type: CampaignType,
    /// Headline shown on the campaign card
    pub title: String,
    /// Longer story; may be omitted
    #[serde(default)]
    pub description: String,
    /// Free-form category
    pub category: String,
    /// Display priority, normal when omitted
    #[serde(default)]
    pub priority: Priority,
    /// Amount the campaign aims to raise
    pub target_amount: f64,
    /// How long the campaign runs
    pub duration_days: u32,
    /// Beneficiary or organization name
    pub beneficiary: String,
    /// Hospital or administrator allowed to release funds
    #[serde(default)]
    pub verifier_id: Option<String>,
    /// On-chain target; omitted means local-only funding
    #[serde(default)]
    pub on_chain_reference: Option<String>,
}

impl CampaignRecord {
    /// Builds a fresh active campaign with no donations from a draft.
    #[must_use]
    pub fn from_draft(id: String, draft: CampaignDraft, created_at: DateTime<Utc>) -> Self {
        let funding = draft
            .on_chain_reference
            .map_or(Funding::LocalOnly, |reference| Funding::OnChain { reference });

        Self {
            id,
            campaign_type: draft.campaign_type,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            priority: draft.priority,
            target_amount: draft.target_amount,
            raised_amount: 0.0,
            duration_days: draft.duration_days,
            created_at,
            beneficiary: draft.beneficiary,
            verifier_id: draft.verifier_id,
            status: CampaignStatus::Active,
            donations: Vec::new(),
            funding,
            release_tx: None,
        }
    }

    /// Whether the raised total has met the target
    #[must_use]
    pub fn is_fully_funded(&self) -> bool {
        self.raised_amount >= self.target_amount
    }
}

/// Optional narrowing applied by `list`. Empty filter returns everything.
#[derive(Debug, Clone, Default)]
pub struct CampaignFilter {
    /// Only campaigns of this type
    pub campaign_type: Option<CampaignType>,
    /// Matched case-insensitively
    pub category: Option<String>,
    /// Only campaigns in this state
    pub status: Option<CampaignStatus>,
    /// Maximum number of results
    pub limit: Option<usize>,
}

impl CampaignFilter {
    /// Whether a record passes every set criterion (the limit is applied separately)
    #[must_use]
    pub fn matches(&self, record: &CampaignRecord) -> bool {
        self.campaign_type.is_none_or(|t| record.campaign_type == t)
            && self
                .category
                .as_deref()
                .is_none_or(|c| record.category.eq_ignore_ascii_case(c))
            && self.status.is_none_or(|s| record.status == s)
    }
}
