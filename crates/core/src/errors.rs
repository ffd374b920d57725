use thiserror::Error;

/// Unified error type for the entire janus-core library.
/// Every public function returns `Result<T, CoreError>`.
///
/// Per-row import failures are NOT `CoreError`s: they are collected as
/// [`RowParseError`](crate::models::import::RowParseError) values next to
/// the successfully imported rows.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Statement structure (aborts the whole import) ───────────────
    #[error("Unreadable workbook: {0}")]
    UnreadableWorkbook(String),

    #[error("Worksheet not found: expected exactly one sheet matching '{label}', found {matches}")]
    WorksheetNotFound { label: String, matches: usize },

    #[error("Header row not found in worksheet '{sheet}' (missing columns: {missing})")]
    HeaderNotFound { sheet: String, missing: String },

    // ── Storage / File ──────────────────────────────────────────────
    #[error("Invalid file format: {0}")]
    InvalidFileFormat(String),

    #[error("Unsupported file version: {0}")]
    UnsupportedVersion(u16),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("File I/O error: {0}")]
    FileIO(String),

    #[error("Import batch already stored: {0}")]
    DuplicateBatch(String),

    #[error("Import batch not found: {0}")]
    BatchNotFound(String),

    #[error("Storage error: {0}")]
    Storage(String),

    // ── API / Network ───────────────────────────────────────────────
    #[error("API error ({provider}): {message}")]
    Api {
        provider: String,
        message: String,
    },

    #[error("Network error: {0}")]
    Network(String),

    #[error("No quote provider available for symbol: {0}")]
    NoProvider(String),

    #[error("Quote not available for {0}")]
    QuoteNotAvailable(String),

    // ── Business Logic ──────────────────────────────────────────────
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl CoreError {
    /// True for failures that reject a statement before any row is processed.
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            CoreError::UnreadableWorkbook(_)
                | CoreError::WorksheetNotFound { .. }
                | CoreError::HeaderNotFound { .. }
        )
    }
}

// ── Conversion helpers (From impls) ─────────────────────────────────

impl From<std::io::Error> for CoreError {
    fn from(e: std::io::Error) -> Self {
        CoreError::FileIO(e.to_string())
    }
}

impl From<bincode::Error> for CoreError {
    fn from(e: bincode::Error) -> Self {
        CoreError::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(e: serde_json::Error) -> Self {
        CoreError::Deserialization(e.to_string())
    }
}

impl From<calamine::Error> for CoreError {
    fn from(e: calamine::Error) -> Self {
        CoreError::UnreadableWorkbook(e.to_string())
    }
}

impl From<reqwest::Error> for CoreError {
    fn from(e: reqwest::Error) -> Self {
        // reqwest errors carry the full URL; strip the query string.
        let msg = e.to_string();
        let sanitized = if let Some(idx) = msg.find('?') {
            format!("{}?<query redacted>", &msg[..idx])
        } else {
            msg
        };
        CoreError::Network(sanitized)
    }
}
