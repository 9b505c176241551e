//! Ledger slot entity - Named key/value slots backing the campaign ledger.
//!
//! The whole campaign list lives in a single slot as a JSON array. `revision`
//! increases by one on every write and is used for compare-and-swap updates.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Ledger slot database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ledger_slots")]
pub struct Model {
    /// Unique identifier
    #[sea_orm(primary_key)]
    pub id: i32,
    /// Slot name (e.g., `"heartchain_campaigns"`)
    #[sea_orm(unique)]
    pub key: String,
    /// Serialized slot contents
    #[sea_orm(column_type = "Text")]
    pub value: String,
    /// Write counter, starts at 1
    pub revision: i64,
    /// When this slot was last written
    pub updated_at: DateTime,
}

/// `LedgerSlot` has no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
