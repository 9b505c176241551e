/// Campaign seed loading from config.toml
pub mod campaigns;

/// Database configuration and connection management
pub mod database;

/// Ledger settings from environment variables
pub mod settings;

pub use settings::LedgerSettings;
