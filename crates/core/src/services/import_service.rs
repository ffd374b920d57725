use std::sync::Arc;

use chrono::NaiveDate;
use log::info;
use uuid::Uuid;

use crate::errors::CoreError;
use crate::importer::orchestrator::StatementImporter;
use crate::models::import::ImportResult;
use crate::storage::traits::TransactionStore;

/// Runs the importer and hands the accepted rows to the store.
pub struct ImportService {
    importer: StatementImporter,
    store: Arc<dyn TransactionStore>,
}

impl ImportService {
    pub fn new(importer: StatementImporter, store: Arc<dyn TransactionStore>) -> Self {
        Self { importer, store }
    }

    /// Import a statement for `user_id` and persist every accepted row under
    /// the new batch id. A batch with no accepted rows is still recorded so
    /// its id stays resolvable.
    pub async fn import_for_user(
        &self,
        user_id: Uuid,
        workbook_bytes: &[u8],
        today: NaiveDate,
    ) -> Result<ImportResult, CoreError> {
        let result = self.importer.import_at(workbook_bytes, today)?;
        self.store
            .insert_batch(user_id, result.batch_id, &result.imported)
            .await?;
        info!(
            "Stored batch {} for user {user_id}: {} imported, {} rejected",
            result.batch_id,
            result.imported_count(),
            result.rejected_count()
        );
        Ok(result)
    }
}
