use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::Quote;

/// Trait abstraction for market quote sources.
///
/// Quote endpoints are public, free and unreliable. Implementations must turn
/// every failure (HTTP status, malformed body, missing fields) into a
/// `CoreError` and never panic.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait QuoteProvider: Send + Sync {
    /// Human-readable name of this provider (for logs/errors).
    fn name(&self) -> &str;

    /// Whether this provider can quote `symbol` (statement form, e.g. "AAPL.US").
    fn supports(&self, symbol: &str) -> bool {
        !symbol.trim().is_empty()
    }

    /// Latest available quote for `symbol`.
    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, CoreError>;
}
