use anyhow::Result;

use crate::db::Database;
use crate::models::{Transaction, TransactionType};
use crate::sync::{PushOutcome, SnapshotSync, SyncError};

/// What happened to the remote snapshot after a local write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum SyncStatus {
    LocalOnly,
    Pushed,
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct SaveOutcome {
    pub(crate) id: i64,
    pub(crate) sync: SyncStatus,
}

impl SaveOutcome {
    pub(crate) fn describe(&self) -> String {
        match &self.sync {
            SyncStatus::LocalOnly => format!("Saved #{}", self.id),
            SyncStatus::Pushed => format!("Saved #{} and synced", self.id),
            SyncStatus::Failed(reason) => {
                format!("Saved #{} locally, but sync FAILED: {reason}", self.id)
            }
        }
    }
}

/// The local store plus, when configured, its remote mirror.
pub(crate) struct Ledger {
    pub(crate) db: Database,
    sync: Option<SnapshotSync>,
}

impl Ledger {
    pub(crate) fn new(db: Database, sync: Option<SnapshotSync>) -> Self {
        Self { db, sync }
    }

    pub(crate) fn has_remote(&self) -> bool {
        self.sync.is_some()
    }

    /// Inserts the row, then pushes the snapshot.
    ///
    /// The two steps are not atomic: a failed push leaves the row committed
    /// locally and the remote stale until the next successful push.
    pub(crate) fn record(&mut self, txn: &Transaction) -> Result<SaveOutcome> {
        let id = self.db.insert_transaction(txn)?;
        log::info!("recorded {} #{id} on {}", txn.kind, txn.date);

        let sync = match self.push_now() {
            None => SyncStatus::LocalOnly,
            Some(Ok(_)) => SyncStatus::Pushed,
            Some(Err(e)) => {
                log::error!("push after insert #{id} failed: {e}");
                SyncStatus::Failed(e.to_string())
            }
        };
        Ok(SaveOutcome { id, sync })
    }

    /// `None` when no remote is configured.
    pub(crate) fn push_now(&self) -> Option<Result<PushOutcome, SyncError>> {
        self.sync.as_ref().map(SnapshotSync::push)
    }

    pub(crate) fn transactions(&self, kind: Option<TransactionType>) -> Result<Vec<Transaction>> {
        self.db.get_transactions(kind)
    }
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
