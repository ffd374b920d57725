use crate::models::settings::QuoteSettings;

use super::stooq::StooqProvider;
use super::traits::QuoteProvider;
#[cfg(not(target_arch = "wasm32"))]
use super::yahoo_finance::YahooFinanceProvider;

/// Registry of available quote providers, in priority order.
///
/// New providers can be added without modifying existing code.
pub struct QuoteProviderRegistry {
    providers: Vec<Box<dyn QuoteProvider>>,
}

impl QuoteProviderRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Create a registry with the providers enabled in `settings`.
    pub fn new_with_defaults(settings: &QuoteSettings) -> Self {
        let mut registry = Self::new();

        // Stooq — no API key needed (primary)
        if settings.stooq_enabled {
            registry.register(Box::new(StooqProvider::with_timeout(settings.request_timeout_secs)));
        }

        // Yahoo Finance — no API key needed (fallback), native only
        #[cfg(not(target_arch = "wasm32"))]
        {
            if settings.yahoo_enabled {
                match YahooFinanceProvider::new() {
                    Ok(yahoo) => registry.register(Box::new(yahoo)),
                    Err(e) => log::warn!("Yahoo Finance provider unavailable: {e}"),
                }
            }
        }

        registry
    }

    /// Register a new quote provider.
    pub fn register(&mut self, provider: Box<dyn QuoteProvider>) {
        self.providers.push(provider);
    }

    /// All providers able to quote `symbol`, ordered by registration priority.
    /// Used for fallback: if the first provider fails, try the next one.
    pub fn get_providers_for(&self, symbol: &str) -> Vec<&dyn QuoteProvider> {
        self.providers
            .iter()
            .filter(|p| p.supports(symbol))
            .map(|p| p.as_ref())
            .collect()
    }

    pub fn provider_names(&self) -> Vec<String> {
        self.providers.iter().map(|p| p.name().to_string()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl Default for QuoteProviderRegistry {
    fn default() -> Self {
        Self::new()
    }
}
