use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::ledger::{BatchSummary, Ledger, StoredBatch, StoredTransaction};
use crate::models::page::{Page, PageRequest};
use crate::models::transaction::NormalizedTransaction;

use super::traits::TransactionStore;

/// Transaction store holding a [`Ledger`] in memory.
///
/// Snapshots of the ledger can be written to disk with
/// [`StorageManager`](super::manager::StorageManager).
#[derive(Debug, Default)]
pub struct InMemoryTransactionStore {
    ledger: RwLock<Ledger>,
}

impl InMemoryTransactionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_ledger(ledger: Ledger) -> Self {
        Self {
            ledger: RwLock::new(ledger),
        }
    }

    /// Copy of the current ledger, e.g. for saving to a file.
    pub fn snapshot(&self) -> Result<Ledger, CoreError> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Ledger>, CoreError> {
        self.ledger
            .read()
            .map_err(|_| CoreError::Storage("ledger lock poisoned".into()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Ledger>, CoreError> {
        self.ledger
            .write()
            .map_err(|_| CoreError::Storage("ledger lock poisoned".into()))
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl TransactionStore for InMemoryTransactionStore {
    async fn insert_batch(
        &self,
        user_id: Uuid,
        batch_id: Uuid,
        transactions: &[NormalizedTransaction],
    ) -> Result<Vec<Uuid>, CoreError> {
        // Validate everything before touching the ledger: all or nothing.
        if let Some(stray) = transactions.iter().find(|t| t.import_batch_id != batch_id) {
            return Err(CoreError::ValidationError(format!(
                "transaction from row {} belongs to batch {}, not {batch_id}",
                stray.row_number, stray.import_batch_id
            )));
        }

        let mut ledger = self.write()?;
        if ledger
            .batches
            .iter()
            .any(|b| b.user_id == user_id && b.batch_id == batch_id)
        {
            return Err(CoreError::DuplicateBatch(batch_id.to_string()));
        }

        let stored: Vec<StoredTransaction> = transactions
            .iter()
            .map(|t| StoredTransaction {
                id: Uuid::new_v4(),
                user_id,
                transaction: t.clone(),
            })
            .collect();
        let ids = stored.iter().map(|t| t.id).collect();

        ledger.batches.push(StoredBatch {
            user_id,
            batch_id,
            stored_at: Utc::now(),
            transactions: stored,
        });
        Ok(ids)
    }

    async fn list_transactions(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<StoredTransaction>, CoreError> {
        let ledger = self.read()?;
        let mut all: Vec<&StoredTransaction> = ledger
            .batches
            .iter()
            .filter(|b| b.user_id == user_id)
            .flat_map(|b| b.transactions.iter())
            .collect();
        // Stable sort keeps statement order within a day.
        all.sort_by(|a, b| b.transaction.transaction_date.cmp(&a.transaction.transaction_date));
        let all: Vec<StoredTransaction> = all.into_iter().cloned().collect();
        Ok(Page::slice(&all, page))
    }

    async fn batch_transactions(
        &self,
        user_id: Uuid,
        batch_id: Uuid,
    ) -> Result<Vec<StoredTransaction>, CoreError> {
        let ledger = self.read()?;
        ledger
            .batches
            .iter()
            .find(|b| b.user_id == user_id && b.batch_id == batch_id)
            .map(|b| b.transactions.clone())
            .ok_or_else(|| CoreError::BatchNotFound(batch_id.to_string()))
    }

    async fn list_batches(&self, user_id: Uuid) -> Result<Vec<BatchSummary>, CoreError> {
        let ledger = self.read()?;
        let mut summaries: Vec<BatchSummary> = ledger
            .batches
            .iter()
            .filter(|b| b.user_id == user_id)
            .map(StoredBatch::summary)
            .collect();
        summaries.reverse();
        Ok(summaries)
    }

    async fn delete_batch(&self, user_id: Uuid, batch_id: Uuid) -> Result<usize, CoreError> {
        let mut ledger = self.write()?;
        let idx = ledger
            .batches
            .iter()
            .position(|b| b.user_id == user_id && b.batch_id == batch_id)
            .ok_or_else(|| CoreError::BatchNotFound(batch_id.to_string()))?;
        Ok(ledger.batches.remove(idx).transactions.len())
    }
}
