pub mod errors;
pub mod importer;
pub mod models;
pub mod providers;
pub mod services;
pub mod statement;
pub mod storage;

use std::sync::Arc;

use chrono::NaiveDate;
use uuid::Uuid;

use errors::CoreError;
use importer::orchestrator::{local_today, StatementImporter};
use models::{
    import::ImportTransactionsResponse,
    ledger::{BatchSummary, StoredTransaction},
    page::{Page, PageRequest},
    quote::Quote,
    settings::Settings,
};
use providers::registry::QuoteProviderRegistry;
use services::{import_service::ImportService, quote_service::QuoteService};
use storage::{memory::InMemoryTransactionStore, traits::TransactionStore};

/// Main entry point for the Janus core library.
/// Wires the statement importer, the transaction store and the quote providers.
#[must_use]
pub struct Janus {
    settings: Settings,
    store: Arc<dyn TransactionStore>,
    import_service: ImportService,
    quote_service: QuoteService,
}

impl std::fmt::Debug for Janus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Janus")
            .field("settings", &self.settings)
            .finish_non_exhaustive()
    }
}

impl Janus {
    /// In-memory store and the default quote providers.
    pub fn new(settings: Settings) -> Self {
        let registry = QuoteProviderRegistry::new_with_defaults(&settings.quotes);
        Self::with_parts(settings, Arc::new(InMemoryTransactionStore::new()), registry)
    }

    /// Build from an explicit store and provider registry.
    pub fn with_parts(
        settings: Settings,
        store: Arc<dyn TransactionStore>,
        registry: QuoteProviderRegistry,
    ) -> Self {
        let importer = StatementImporter::new(settings.import.clone());
        Self {
            import_service: ImportService::new(importer, Arc::clone(&store)),
            quote_service: QuoteService::new(registry),
            store,
            settings,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    // ── Import ──────────────────────────────────────────────────────

    /// Import a statement file for `user_id` and store the accepted rows.
    /// Rows dated after the local calendar date are rejected as future-dated.
    pub async fn import_statement(
        &self,
        user_id: Uuid,
        workbook_bytes: &[u8],
    ) -> Result<ImportTransactionsResponse, CoreError> {
        self.import_statement_at(user_id, workbook_bytes, local_today())
            .await
    }

    /// Like [`Janus::import_statement`] with a fixed "today" for the future-date check.
    pub async fn import_statement_at(
        &self,
        user_id: Uuid,
        workbook_bytes: &[u8],
        today: NaiveDate,
    ) -> Result<ImportTransactionsResponse, CoreError> {
        let result = self
            .import_service
            .import_for_user(user_id, workbook_bytes, today)
            .await?;
        Ok(result.to_response())
    }

    // ── Ledger ──────────────────────────────────────────────────────

    pub async fn list_transactions(
        &self,
        user_id: Uuid,
        page: PageRequest,
    ) -> Result<Page<StoredTransaction>, CoreError> {
        self.store.list_transactions(user_id, page).await
    }

    pub async fn list_batches(&self, user_id: Uuid) -> Result<Vec<BatchSummary>, CoreError> {
        self.store.list_batches(user_id).await
    }

    pub async fn batch_transactions(
        &self,
        user_id: Uuid,
        batch_id: Uuid,
    ) -> Result<Vec<StoredTransaction>, CoreError> {
        self.store.batch_transactions(user_id, batch_id).await
    }

    pub async fn delete_batch(&self, user_id: Uuid, batch_id: Uuid) -> Result<usize, CoreError> {
        self.store.delete_batch(user_id, batch_id).await
    }

    // ── Quotes ──────────────────────────────────────────────────────

    pub async fn latest_quote(&self, symbol: &str) -> Result<Quote, CoreError> {
        self.quote_service.latest_quote(symbol).await
    }

    /// Providers [`Janus::latest_quote`] would ask for `symbol`, in order.
    pub fn quote_providers(&self, symbol: &str) -> Vec<String> {
        self.quote_service.provider_names_for(symbol)
    }
}
