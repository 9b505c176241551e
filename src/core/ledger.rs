//! Campaign ledger - CRUD and aggregation over the persisted campaign list.
//!
//! The full list of campaigns lives in one slot of a [`SlotStore`] as a JSON
//! array. Every write is a read-modify-write cycle over the whole list:
//! load, mutate in memory, save everything back. Within one ledger the cycles
//! are serialized by a mutex; across ledgers or processes the slot revision
//! check turns a would-be lost update into [`Error::ConcurrentModification`].

use crate::{
    config::LedgerSettings,
    core::{
        reference::{generate_campaign_id, generate_tx_hash},
        stats::{self, LeaderboardEntry, UserStatistics},
    },
    errors::{Error, Result},
    models::{
        CampaignDraft, CampaignFilter, CampaignRecord, CampaignStatus, DonationRecord, Funding,
    },
    store::SlotStore,
    wallet::{TransferGateway, TransferRequest},
};
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, instrument, warn};

/// Result of a successful donation
#[derive(Debug, Clone, PartialEq)]
pub struct DonationReceipt {
    /// The donation as appended to the campaign
    pub donation: DonationRecord,
    /// The campaign after the donation was applied
    pub campaign: CampaignRecord,
}

/// Result of a successful fund release
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseReceipt {
    /// The released campaign
    pub campaign_id: String,
    /// Transaction reference assigned to the release
    pub tx_reference: String,
}

/// Durable store of campaign records.
///
/// Generic over where the slot lives (`S`) and how on-chain transfers are made (`W`).
#[derive(Debug)]
pub struct CampaignLedger<S, W> {
    store: S,
    gateway: W,
    settings: LedgerSettings,
    write_lock: Mutex<()>,
}

impl<S, W> CampaignLedger<S, W>
where
    S: SlotStore,
    W: TransferGateway,
{
    /// Creates a ledger over `store`, sending on-chain donations through `gateway`.
    pub fn new(store: S, gateway: W, settings: LedgerSettings) -> Self {
        Self {
            store,
            gateway,
            settings,
            write_lock: Mutex::new(()),
        }
    }

    /// Settings this ledger was built with
    pub const fn settings(&self) -> &LedgerSettings {
        &self.settings
    }

    /// The backing slot store
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Loads and decodes the campaign list, with the revision it was read at.
    ///
    /// A missing slot is an empty ledger. Content that does not decode is a
    /// [`Error::Serialization`]; [`Self::reset`] is the way out.
    async fn read_slot(&self) -> Result<(Vec<CampaignRecord>, Option<i64>)> {
        let Some(slot) = self.store.load(&self.settings.slot_key).await? else {
            return Ok((Vec::new(), None));
        };

        let records: Vec<CampaignRecord> = serde_json::from_str(&slot.contents)
            .inspect_err(|e| {
                error!(
                    "Ledger slot '{}' does not hold a campaign list: {}",
                    self.settings.slot_key, e
                );
            })?;
        Ok((records, Some(slot.revision)))
    }

    async fn write_slot(&self, records: &[CampaignRecord], revision: Option<i64>) -> Result<i64> {
        let contents = serde_json::to_string(records)?;
        let new_revision = self
            .store
            .save(&self.settings.slot_key, contents, revision)
            .await?;
        debug!(
            "Persisted {} campaigns at revision {}",
            records.len(),
            new_revision
        );
        Ok(new_revision)
    }

    /// Every stored campaign, newest first.
    pub async fn load_all(&self) -> Result<Vec<CampaignRecord>> {
        Ok(self.read_slot().await?.0)
    }

    /// Prepends a campaign record to the ledger.
    ///
    /// Rejects a record whose id is already present and amounts that are
    /// negative or not finite.
    #[instrument(skip(self, record), fields(id = %record.id))]
    pub async fn create(&self, record: CampaignRecord) -> Result<CampaignRecord> {
        for amount in [record.target_amount, record.raised_amount] {
            if !amount.is_finite() || amount < 0.0 {
                return Err(Error::InvalidAmount { amount });
            }
        }

        let _guard = self.write_lock.lock().await;
        let (mut records, revision) = self.read_slot().await?;

        if records.iter().any(|r| r.id == record.id) {
            return Err(Error::DuplicateCampaign { id: record.id });
        }

        records.insert(0, record.clone());
        self.write_slot(&records, revision).await?;

        info!(
            "Created campaign '{}' ({}) with target {}",
            record.title, record.id, record.target_amount
        );
        Ok(record)
    }

    /// Builds a new active campaign from a draft and stores it.
    pub async fn create_from_draft(&self, draft: CampaignDraft) -> Result<CampaignRecord> {
        let record = CampaignRecord::from_draft(generate_campaign_id(), draft, Utc::now());
        self.create(record).await
    }

    /// All campaigns passing `filter`, in ledger order, truncated to its limit.
    pub async fn list(&self, filter: &CampaignFilter) -> Result<Vec<CampaignRecord>> {
        let records = self.load_all().await?;
        let limit = filter.limit.unwrap_or(usize::MAX);

        Ok(records
            .into_iter()
            .filter(|r| filter.matches(r))
            .take(limit)
            .collect())
    }

    /// Finds a campaign by id, returning `None` if it is not in the ledger.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<CampaignRecord>> {
        let records = self.load_all().await?;
        Ok(records.into_iter().find(|r| r.id == id))
    }

    /// Records a donation of `amount` from `donor` to campaign `id`.
    ///
    /// On-chain campaigns move the money through the gateway first; if that
    /// fails nothing is written. Local-only campaigns get a synthetic
    /// transaction hash. The campaign completes once its total reaches the
    /// target. Campaigns whose funds were already released accept nothing, and
    /// a donation that would push the total past what `f64` can hold is
    /// rejected before any transfer. Every gateway failure surfaces as
    /// [`Error::ExternalTransferFailed`].
    #[instrument(skip(self))]
    pub async fn record_donation(
        &self,
        id: &str,
        amount: f64,
        donor: &str,
    ) -> Result<DonationReceipt> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidAmount { amount });
        }

        let _guard = self.write_lock.lock().await;
        let (mut records, revision) = self.read_slot().await?;

        let campaign = records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| Error::CampaignNotFound { id: id.to_string() })?;

        if campaign.status == CampaignStatus::FundsReleased {
            return Err(Error::CampaignClosed { id: id.to_string() });
        }

        // JSON has no encoding for infinity; an overflowing total would poison the slot
        let new_total = campaign.raised_amount + amount;
        if !new_total.is_finite() {
            return Err(Error::InvalidAmount { amount: new_total });
        }

        let tx_reference = match &campaign.funding {
            Funding::OnChain { reference } => {
                let request = TransferRequest {
                    target: reference.clone(),
                    amount,
                    donor: donor.to_string(),
                };
                self.gateway
                    .transfer(&request)
                    .await
                    .map_err(|e| match e {
                        e @ Error::ExternalTransferFailed { .. } => e,
                        other => Error::ExternalTransferFailed {
                            reason: other.to_string(),
                        },
                    })
                    .inspect_err(|e| warn!("Donation to {} aborted: {}", id, e))?
            }
            Funding::LocalOnly => generate_tx_hash(),
        };

        let donation = DonationRecord {
            donor: donor.to_string(),
            amount,
            timestamp: Utc::now(),
            tx_reference,
        };

        campaign.donations.insert(0, donation.clone());
        campaign.raised_amount = new_total;
        if campaign.status == CampaignStatus::Active && campaign.is_fully_funded() {
            campaign.status = CampaignStatus::Completed;
            info!(
                "Campaign {} reached its target ({} of {})",
                id, campaign.raised_amount, campaign.target_amount
            );
        }
        let campaign = campaign.clone();

        self.write_slot(&records, revision).await.inspect_err(|e| {
            // The transfer, if any, already happened; keep its reference in the logs
            error!(
                "Donation {} to {} was not persisted: {}",
                donation.tx_reference, id, e
            );
        })?;

        info!(
            "Recorded donation of {} from {} to {} (raised {} of {})",
            amount, donor, id, campaign.raised_amount, campaign.target_amount
        );
        Ok(DonationReceipt { donation, campaign })
    }

    /// Marks a completed campaign's funds as released.
    ///
    /// Assigns a synthetic transaction reference, persists, then waits the
    /// configured release delay before reporting. A missing campaign or one
    /// that is not `completed` leaves the ledger untouched.
    #[instrument(skip(self))]
    pub async fn release_funds(&self, id: &str) -> Result<ReleaseReceipt> {
        let receipt = {
            let _guard = self.write_lock.lock().await;
            let (mut records, revision) = self.read_slot().await?;

            let campaign = records
                .iter_mut()
                .find(|r| r.id == id)
                .ok_or_else(|| Error::CampaignNotFound { id: id.to_string() })?;

            if !campaign
                .status
                .can_advance_to(CampaignStatus::FundsReleased)
            {
                return Err(Error::InvalidTransition {
                    id: id.to_string(),
                    from: campaign.status,
                    to: CampaignStatus::FundsReleased,
                });
            }

            let tx_reference = generate_tx_hash();
            campaign.status = CampaignStatus::FundsReleased;
            campaign.release_tx = Some(tx_reference.clone());

            self.write_slot(&records, revision).await?;
            ReleaseReceipt {
                campaign_id: id.to_string(),
                tx_reference,
            }
        };

        if !self.settings.release_delay.is_zero() {
            tokio::time::sleep(self.settings.release_delay).await;
        }

        info!(
            "Released funds for {} with transaction {}",
            id, receipt.tx_reference
        );
        Ok(receipt)
    }

    /// Campaigns a verifier is responsible for that have reached their target,
    /// whether or not the funds have been released yet.
    pub async fn verifier_campaigns(&self, verifier_id: &str) -> Result<Vec<CampaignRecord>> {
        let records = self.load_all().await?;
        Ok(records
            .into_iter()
            .filter(|r| r.verifier_id.as_deref() == Some(verifier_id))
            .filter(|r| {
                matches!(
                    r.status,
                    CampaignStatus::Completed | CampaignStatus::FundsReleased
                )
            })
            .collect())
    }

    /// Donation totals and history for one donor across every campaign.
    pub async fn compute_user_statistics(&self, donor: &str) -> Result<UserStatistics> {
        let records = self.load_all().await?;
        Ok(stats::compute_user_statistics(&records, donor))
    }

    /// Donors ranked by total donated.
    pub async fn leaderboard(&self, limit: Option<usize>) -> Result<Vec<LeaderboardEntry>> {
        let records = self.load_all().await?;
        Ok(stats::leaderboard(&records, limit))
    }

    /// Replaces the slot contents with an empty campaign list.
    ///
    /// Works even when the current contents do not decode.
    #[instrument(skip(self))]
    pub async fn reset(&self) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let revision = self
            .store
            .load(&self.settings.slot_key)
            .await?
            .map(|slot| slot.revision);
        self.write_slot(&[], revision).await?;
        warn!("Ledger slot '{}' was reset", self.settings.slot_key);
        Ok(())
    }
}
