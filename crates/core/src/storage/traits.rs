use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::ledger::{BatchSummary, StoredTransaction};
use crate::models::page::{Page, PageRequest};
use crate::models::transaction::NormalizedTransaction;

/// Persistence boundary for imported transactions.
///
/// Implementations own the transactions once `insert_batch` returns and are
/// responsible for id assignment and per-user isolation.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait TransactionStore: Send + Sync {
    /// Store every transaction of one import batch, or none of them.
    /// Returns the ids assigned, in input order.
    async fn insert_batch(
        &self,
        user_id: Uuid,
        batch_id: Uuid,
        transactions: &[NormalizedTransaction],
    ) -> Result<Vec<Uuid>, CoreError>;

    /// A user's transactions, newest first.
    async fn list_transactions(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<StoredTransaction>, CoreError>;

    /// Transactions of one batch in statement order.
    async fn batch_transactions(
        &self,
        user_id: Uuid,
        batch_id: Uuid,
    ) -> Result<Vec<StoredTransaction>, CoreError>;

    /// A user's batches, most recently stored first.
    async fn list_batches(&self, user_id: Uuid) -> Result<Vec<BatchSummary>, CoreError>;

    /// Remove a batch and its transactions. Returns how many transactions went.
    async fn delete_batch(&self, user_id: Uuid, batch_id: Uuid) -> Result<usize, CoreError>;
}
