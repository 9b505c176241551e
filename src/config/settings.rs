//! Ledger runtime settings loaded from environment variables.
//!
//! All values are optional; missing variables fall back to defaults. A value
//! that is present but unparsable is a configuration error rather than being
//! silently replaced.

use crate::errors::{Error, Result};
use std::time::Duration;

/// Slot name used when `LEDGER_SLOT_KEY` is not set
pub const DEFAULT_SLOT_KEY: &str = "heartchain_campaigns";

const DEFAULT_RELEASE_DELAY_MS: u64 = 1500;

/// Settings shared by every ledger operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSettings {
    /// Name of the slot holding the campaign list
    pub slot_key: String,
    /// Artificial pause before a fund release is reported
    pub release_delay: Duration,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            slot_key: DEFAULT_SLOT_KEY.to_string(),
            release_delay: Duration::from_millis(DEFAULT_RELEASE_DELAY_MS),
        }
    }
}

impl LedgerSettings {
    /// Reads `LEDGER_SLOT_KEY` and `FUND_RELEASE_DELAY_MS` from the environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds settings from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();

        if let Some(key) = lookup("LEDGER_SLOT_KEY") {
            let key = key.trim();
            if key.is_empty() {
                return Err(Error::Config {
                    message: "LEDGER_SLOT_KEY cannot be empty".to_string(),
                });
            }
            settings.slot_key = key.to_string();
        }

        if let Some(raw) = lookup("FUND_RELEASE_DELAY_MS") {
            let millis = raw.trim().parse::<u64>().map_err(|e| Error::Config {
                message: format!("Invalid FUND_RELEASE_DELAY_MS '{raw}': {e}"),
            })?;
            settings.release_delay = Duration::from_millis(millis);
        }

        Ok(settings)
    }

    /// Settings with no release delay, for tests and batch tools.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            release_delay: Duration::ZERO,
            ..Self::default()
        }
    }
}
