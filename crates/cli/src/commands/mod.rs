//! CLI command implementations

pub mod batches;
pub mod import;
pub mod quote;
pub mod transactions;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use janus_core::models::settings::Settings;
use janus_core::providers::registry::QuoteProviderRegistry;
use janus_core::storage::manager::StorageManager;
use janus_core::storage::memory::InMemoryTransactionStore;
use janus_core::Janus;
use uuid::Uuid;

/// Options shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub config: Option<PathBuf>,
    pub ledger: PathBuf,
    pub user: Uuid,
}

/// A `Janus` instance backed by the on-disk ledger.
pub struct Context {
    pub janus: Janus,
    pub user: Uuid,
    store: Arc<InMemoryTransactionStore>,
    ledger_path: PathBuf,
}

impl Context {
    pub fn open(args: &GlobalArgs) -> Result<Self> {
        let settings = crate::config::load_settings(args.config.as_deref())?;
        Self::open_with(settings, &args.ledger, args.user)
    }

    pub fn open_with(settings: Settings, ledger_path: &Path, user: Uuid) -> Result<Self> {
        let ledger = StorageManager::load_from_file(ledger_path)
            .with_context(|| format!("Failed to load ledger {}", ledger_path.display()))?;
        log::debug!(
            "loaded {} transactions from {}",
            ledger.transaction_count(),
            ledger_path.display()
        );

        let store = Arc::new(InMemoryTransactionStore::from_ledger(ledger));
        let registry = QuoteProviderRegistry::new_with_defaults(&settings.quotes);
        let janus = Janus::with_parts(settings, store.clone(), registry);

        Ok(Self {
            janus,
            user,
            store,
            ledger_path: ledger_path.to_path_buf(),
        })
    }

    /// Write the ledger back to disk.
    pub fn save(&self) -> Result<()> {
        let ledger = self.store.snapshot()?;
        StorageManager::save_to_file(&ledger, &self.ledger_path)
            .with_context(|| format!("Failed to save ledger {}", self.ledger_path.display()))?;
        log::debug!("saved ledger to {}", self.ledger_path.display());
        Ok(())
    }
}
