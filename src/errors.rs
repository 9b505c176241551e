//! Unified error types for the campaign ledger.
//!
//! Every failure is a returned value. "Not found", closed campaigns and
//! gateway rejections are recoverable results the caller decides how to present.

use crate::models::CampaignStatus;
use thiserror::Error;

/// Errors returned by ledger, store and gateway operations
#[derive(Debug, Error)]
pub enum Error {
    /// No campaign with this identifier exists in the ledger
    #[error("Campaign not found: {id}")]
    CampaignNotFound {
        /// Identifier that was looked up
        id: String,
    },

    /// A campaign with this identifier is already stored
    #[error("Campaign already exists: {id}")]
    DuplicateCampaign {
        /// Identifier already taken
        id: String,
    },

    /// The campaign's funds were released; it accepts no further donations
    #[error("Campaign {id} is closed: funds were already released")]
    CampaignClosed {
        /// Identifier of the closed campaign
        id: String,
    },

    /// The wallet or contract rejected the value transfer
    #[error("External transfer failed: {reason}")]
    ExternalTransferFailed {
        /// Gateway-provided description of the failure
        reason: String,
    },

    /// Amount is zero, negative, NaN or infinite where a positive value is required
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount or resulting total
        amount: f64,
    },

    /// The requested status change would move a campaign backwards or out of a terminal state
    #[error("Campaign {id} cannot move from {from} to {to}")]
    InvalidTransition {
        /// Campaign identifier
        id: String,
        /// Current status
        from: CampaignStatus,
        /// Requested status
        to: CampaignStatus,
    },

    /// Another writer changed the slot since it was read
    #[error("Slot '{key}' was modified concurrently")]
    ConcurrentModification {
        /// Slot name
        key: String,
    },

    /// Stored slot content is not a valid campaign list
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The slot store's database query failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// A setting or seed file holds an unusable value
    #[error("Configuration error: {message}")]
    Config {
        /// What was wrong with the value
        message: String,
    },

    /// Reading a config file or creating the data directory failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// An environment variable could not be read
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
