//! Entity module - SeaORM entity definitions for the database.
//! The ledger only needs one table: named slots holding serialized data.

pub mod ledger_slot;

pub use ledger_slot::{Column as LedgerSlotColumn, Entity as LedgerSlot, Model as LedgerSlotModel};
