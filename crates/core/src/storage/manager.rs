use crate::errors::CoreError;
use crate::models::ledger::Ledger;

use super::format;

/// Save/load a ledger snapshot to/from bytes or files.
pub struct StorageManager;

impl StorageManager {
    /// Serialize a ledger to raw bytes (portable, platform-independent).
    ///
    /// Flow: Ledger → bincode → JNUS format bytes
    pub fn save_to_bytes(ledger: &Ledger) -> Result<Vec<u8>, CoreError> {
        let payload = bincode::serialize(ledger)
            .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))?;
        Ok(format::write_file(format::CURRENT_VERSION, &payload))
    }

    /// Deserialize a ledger from raw bytes.
    ///
    /// Flow: JNUS bytes → parse header → bincode → Ledger
    pub fn load_from_bytes(data: &[u8]) -> Result<Ledger, CoreError> {
        let (_header, payload) = format::read_file(data)?;
        bincode::deserialize(payload)
            .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize ledger: {e}")))
    }

    /// Save a ledger to a file on disk (native only).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_file(ledger: &Ledger, path: impl AsRef<std::path::Path>) -> Result<(), CoreError> {
        let bytes = Self::save_to_bytes(ledger)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }

    /// Load a ledger from disk (native only). A missing file is an empty ledger.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Ledger, CoreError> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("ledger file {} does not exist yet, starting empty", path.display());
            return Ok(Ledger::new());
        }
        let bytes = std::fs::read(path)?;
        Self::load_from_bytes(&bytes)
    }
}
