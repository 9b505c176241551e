use chrono::Utc;
use dotenvy::dotenv;
use heartchain_ledger::{
    config::{self, LedgerSettings},
    core::{CampaignLedger, report},
    errors::Result,
    store::{DatabaseSlotStore, SlotStore},
    wallet::{SimulatedGateway, TransferGateway},
};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

const SEED_CONFIG_PATH: &str = "config.toml";

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; variables may also be set externally
    dotenv().ok();
    info!("Attempted to load .env file.");

    // 3. Ledger settings
    let settings = LedgerSettings::from_env()
        .inspect_err(|e| error!("Invalid ledger settings: {}", e))?;

    // 4. Database
    let db = config::database::create_connection()
        .await
        .inspect_err(|e| error!("Failed to connect to database: {}", e))?;
    config::database::create_tables(&db)
        .await
        .inspect(|_| info!("Database tables ready."))
        .inspect_err(|e| error!("Failed to create tables: {}", e))?;

    let ledger = CampaignLedger::new(DatabaseSlotStore::new(db), SimulatedGateway, settings);
    info!("Using ledger slot '{}'", ledger.settings().slot_key);

    // 5. Seed campaigns on first run
    seed_campaigns(&ledger).await?;

    // 6. Summary
    log_summary(&ledger).await
}

/// Creates the campaigns from config.toml when the ledger is still empty.
async fn seed_campaigns<S, W>(ledger: &CampaignLedger<S, W>) -> Result<()>
where
    S: SlotStore,
    W: TransferGateway,
{
    if !ledger.load_all().await?.is_empty() {
        info!("Ledger already holds campaigns; skipping seed.");
        return Ok(());
    }
    if !Path::new(SEED_CONFIG_PATH).exists() {
        warn!("No {} found; starting with an empty ledger.", SEED_CONFIG_PATH);
        return Ok(());
    }

    let seed = config::campaigns::load_default_config()
        .inspect_err(|e| error!("Critical error loading {}: {}", SEED_CONFIG_PATH, e))?;
    let count = seed.campaigns.len();
    for draft in seed.campaigns {
        ledger.create_from_draft(draft).await?;
    }
    info!("Seeded {} campaigns from {}.", count, SEED_CONFIG_PATH);
    Ok(())
}

async fn log_summary<S, W>(ledger: &CampaignLedger<S, W>) -> Result<()>
where
    S: SlotStore,
    W: TransferGateway,
{
    let now = Utc::now();
    for campaign in ledger.load_all().await? {
        let progress = report::summarize(&campaign, now);
        info!(
            "{} {} | {} | {} | {}{}",
            progress.campaign_id,
            progress.title,
            report::format_progress_bar(progress.percent_funded, None),
            report::days_remaining_text(progress.days_left),
            progress.status,
            if progress.is_urgent { " | URGENT" } else { "" }
        );
    }

    for entry in ledger.leaderboard(Some(10)).await? {
        info!(
            "#{} {} donated {:.2} to {} campaigns",
            entry.rank,
            report::truncate_hash(&entry.donor, 6),
            entry.total_donated,
            entry.campaigns_supported
        );
    }
    Ok(())
}
