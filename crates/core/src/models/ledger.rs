use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::transaction::NormalizedTransaction;

/// A transaction after the store accepted it and assigned it an id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredTransaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub transaction: NormalizedTransaction,
}

/// Everything one import call persisted, keyed by `(user_id, batch_id)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredBatch {
    pub user_id: Uuid,
    pub batch_id: Uuid,
    pub stored_at: DateTime<Utc>,
    pub transactions: Vec<StoredTransaction>,
}

impl StoredBatch {
    pub fn summary(&self) -> BatchSummary {
        let dates = self.transactions.iter().map(|t| t.transaction.transaction_date);
        BatchSummary {
            batch_id: self.batch_id,
            stored_at: self.stored_at,
            transaction_count: self.transactions.len(),
            first_date: dates.clone().min(),
            last_date: dates.max(),
            net_amount: self
                .transactions
                .iter()
                .map(|t| t.transaction.total_amount)
                .sum(),
        }
    }
}

/// Overview of one stored import batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub batch_id: Uuid,
    pub stored_at: DateTime<Utc>,
    pub transaction_count: usize,
    pub first_date: Option<NaiveDate>,
    pub last_date: Option<NaiveDate>,
    /// Sum of signed amounts in the batch
    pub net_amount: Decimal,
}

/// The whole persisted state of a store. Gets serialized into the ledger file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    pub batches: Vec<StoredBatch>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transaction_count(&self) -> usize {
        self.batches.iter().map(|b| b.transactions.len()).sum()
    }
}
