use super::{SlotStore, StoredSlot};
use crate::errors::{Error, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::trace;

/// Slot store kept entirely in process memory.
///
/// Nothing survives a restart; used by tests and throwaway ledgers.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: RwLock<HashMap<String, StoredSlot>>,
}

impl MemorySlotStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn load(&self, key: &str) -> Result<Option<StoredSlot>> {
        let slots = self.slots.read().await;
        Ok(slots.get(key).cloned())
    }

    async fn save(&self, key: &str, contents: String, expected_revision: Option<i64>) -> Result<i64> {
        let mut slots = self.slots.write().await;
        let current = slots.get(key).map(|slot| slot.revision);
        if current != expected_revision {
            return Err(Error::ConcurrentModification {
                key: key.to_string(),
            });
        }

        let revision = current.map_or(1, |rev| rev + 1);
        slots.insert(key.to_string(), StoredSlot { contents, revision });
        trace!("Memory slot '{}' now at revision {}", key, revision);
        Ok(revision)
    }
}
