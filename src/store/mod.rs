//! Slot storage - the key/value backing medium of the ledger.
//!
//! A slot is a named string value plus a revision counter. Writers pass the
//! revision they read; a mismatch means another writer got there first and the
//! save fails with [`Error::ConcurrentModification`](crate::errors::Error::ConcurrentModification)
//! instead of overwriting their change.

use crate::errors::Result;
use async_trait::async_trait;

/// Database-backed slot store using `SeaORM`
pub mod database;
/// In-memory slot store
pub mod memory;

pub use database::DatabaseSlotStore;
pub use memory::MemorySlotStore;

/// Contents of a slot together with the revision they were read at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredSlot {
    /// Raw serialized value
    pub contents: String,
    /// Revision of this value; the first write produces revision 1
    pub revision: i64,
}

/// Backing store contract for the ledger: named slots with compare-and-swap writes.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// Reads a slot, returning `None` if it has never been written.
    async fn load(&self, key: &str) -> Result<Option<StoredSlot>>;

    /// Writes a slot if its current revision equals `expected_revision`.
    ///
    /// `None` means the caller saw no slot at all. Returns the new revision.
    async fn save(&self, key: &str, contents: String, expected_revision: Option<i64>) -> Result<i64>;
}
