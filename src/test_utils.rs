//! Shared test utilities for the campaign ledger.
//!
//! Helpers for setting up stores and ledgers and for building campaign and
//! donation fixtures with sensible defaults.

use crate::{
    config::LedgerSettings,
    core::CampaignLedger,
    errors::{Error, Result},
    models::{
        CampaignDraft, CampaignRecord, CampaignStatus, CampaignType, DonationRecord, Funding,
        Priority,
    },
    store::MemorySlotStore,
    wallet::{SimulatedGateway, TransferGateway, TransferRequest},
};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Routes `tracing` output to the test harness; safe to call repeatedly.
pub fn init_test_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace")),
        )
        .with_test_writer()
        .try_init();
}

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// A ledger over an in-memory slot with a simulated gateway and no release delay.
pub fn memory_ledger() -> CampaignLedger<MemorySlotStore, SimulatedGateway> {
    init_test_tracing();
    CampaignLedger::new(
        MemorySlotStore::new(),
        SimulatedGateway,
        LedgerSettings::immediate(),
    )
}

/// Creates a local-only active campaign.
///
/// # Defaults
/// * `campaign_type`: individual
/// * `category`: `"medical"`
/// * `duration_days`: 30
/// * no verifier, no donations
pub fn test_campaign(id: &str, target_amount: f64, raised_amount: f64) -> CampaignRecord {
    CampaignRecord {
        id: id.to_string(),
        campaign_type: CampaignType::Individual,
        title: format!("Campaign {id}"),
        description: "Test campaign".to_string(),
        category: "medical".to_string(),
        priority: Priority::Normal,
        target_amount,
        raised_amount,
        duration_days: 30,
        created_at: Utc::now(),
        beneficiary: "Test Beneficiary".to_string(),
        verifier_id: None,
        status: CampaignStatus::Active,
        donations: Vec::new(),
        funding: Funding::LocalOnly,
        release_tx: None,
    }
}

/// Creates an active campaign funded through the gateway at `reference`.
pub fn on_chain_campaign(id: &str, target_amount: f64, reference: &str) -> CampaignRecord {
    CampaignRecord {
        funding: Funding::OnChain {
            reference: reference.to_string(),
        },
        ..test_campaign(id, target_amount, 0.0)
    }
}

/// Creates a donation made `minutes_ago` minutes before now.
pub fn test_donation(donor: &str, amount: f64, minutes_ago: i64) -> DonationRecord {
    DonationRecord {
        donor: donor.to_string(),
        amount,
        timestamp: Utc::now() - Duration::minutes(minutes_ago),
        tx_reference: crate::core::reference::generate_tx_hash(),
    }
}

/// Creates a local-only individual campaign draft.
pub fn test_draft(title: &str, target_amount: f64) -> CampaignDraft {
    CampaignDraft {
        campaign_type: CampaignType::Individual,
        title: title.to_string(),
        description: String::new(),
        category: "medical".to_string(),
        priority: Priority::Normal,
        target_amount,
        duration_days: 30,
        beneficiary: "Test Beneficiary".to_string(),
        verifier_id: None,
        on_chain_reference: None,
    }
}

/// Gateway with a fixed outcome that records every request it receives.
#[derive(Debug, Clone)]
pub struct ScriptedGateway {
    outcome: std::result::Result<String, String>,
    calls: Arc<Mutex<Vec<TransferRequest>>>,
}

impl ScriptedGateway {
    /// Every transfer succeeds with `tx_reference`
    pub fn succeeding(tx_reference: &str) -> Self {
        Self {
            outcome: Ok(tx_reference.to_string()),
            calls: Arc::default(),
        }
    }

    /// Every transfer fails with `reason`
    pub fn failing(reason: &str) -> Self {
        Self {
            outcome: Err(reason.to_string()),
            calls: Arc::default(),
        }
    }

    /// Requests received so far
    pub async fn calls(&self) -> Vec<TransferRequest> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl TransferGateway for ScriptedGateway {
    async fn transfer(&self, request: &TransferRequest) -> Result<String> {
        // Hand control back to the runtime like a real network call would
        tokio::task::yield_now().await;
        self.calls.lock().await.push(request.clone());
        self.outcome
            .clone()
            .map_err(|reason| Error::ExternalTransferFailed { reason })
    }
}
