use super::{SlotStore, StoredSlot};
use crate::{
    entities::{LedgerSlot, ledger_slot},
    errors::{Error, Result},
};
use async_trait::async_trait;
use sea_orm::{Set, prelude::*, sea_query::Expr};
use tracing::{debug, instrument, warn};

/// Slot store persisted in the `ledger_slots` table.
///
/// Updates are a single `UPDATE ... WHERE key = ? AND revision = ?`, so the
/// revision check and the write cannot interleave with another writer.
#[derive(Debug, Clone)]
pub struct DatabaseSlotStore {
    db: DatabaseConnection,
}

impl DatabaseSlotStore {
    /// Wraps an open connection. Tables must already exist.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn find_slot(&self, key: &str) -> Result<Option<ledger_slot::Model>> {
        LedgerSlot::find()
            .filter(ledger_slot::Column::Key.eq(key))
            .one(&self.db)
            .await
            .map_err(Into::into)
    }

    async fn insert_slot(&self, key: &str, contents: String) -> Result<i64> {
        if self.find_slot(key).await?.is_some() {
            return Err(Error::ConcurrentModification {
                key: key.to_string(),
            });
        }

        let slot = ledger_slot::ActiveModel {
            key: Set(key.to_string()),
            value: Set(contents),
            revision: Set(1),
            updated_at: Set(chrono::Utc::now().naive_utc()),
            ..Default::default()
        };

        match slot.insert(&self.db).await {
            Ok(inserted) => Ok(inserted.revision),
            Err(e) => {
                // Lost a race with another first writer on the unique key
                if self.find_slot(key).await?.is_some() {
                    warn!("Slot '{}' was created concurrently: {}", key, e);
                    return Err(Error::ConcurrentModification {
                        key: key.to_string(),
                    });
                }
                Err(e.into())
            }
        }
    }
}

#[async_trait]
impl SlotStore for DatabaseSlotStore {
    async fn load(&self, key: &str) -> Result<Option<StoredSlot>> {
        Ok(self.find_slot(key).await?.map(|slot| StoredSlot {
            contents: slot.value,
            revision: slot.revision,
        }))
    }

    #[instrument(skip(self, contents))]
    async fn save(&self, key: &str, contents: String, expected_revision: Option<i64>) -> Result<i64> {
        let Some(expected) = expected_revision else {
            return self.insert_slot(key, contents).await;
        };

        let next = expected + 1;
        let result = LedgerSlot::update_many()
            .col_expr(ledger_slot::Column::Value, Expr::value(contents))
            .col_expr(ledger_slot::Column::Revision, Expr::value(next))
            .col_expr(
                ledger_slot::Column::UpdatedAt,
                Expr::value(chrono::Utc::now().naive_utc()),
            )
            .filter(ledger_slot::Column::Key.eq(key))
            .filter(ledger_slot::Column::Revision.eq(expected))
            .exec(&self.db)
            .await?;

        if result.rows_affected == 0 {
            return Err(Error::ConcurrentModification {
                key: key.to_string(),
            });
        }

        debug!("Slot '{}' written at revision {}", key, next);
        Ok(next)
    }
}
