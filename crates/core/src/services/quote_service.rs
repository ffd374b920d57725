use log::{debug, warn};

use crate::errors::CoreError;
use crate::models::quote::Quote;
use crate::providers::registry::QuoteProviderRegistry;

/// Latest-quote lookup over the registered providers.
///
/// Providers are tried in registration order; the first success wins. There
/// is no retry of a failed provider and no caching.
pub struct QuoteService {
    registry: QuoteProviderRegistry,
}

impl QuoteService {
    pub fn new(registry: QuoteProviderRegistry) -> Self {
        Self { registry }
    }

    /// Names of the providers that would be asked for `symbol`, in order.
    pub fn provider_names_for(&self, symbol: &str) -> Vec<String> {
        self.registry
            .get_providers_for(symbol.trim())
            .iter()
            .map(|p| p.name().to_string())
            .collect()
    }

    pub async fn latest_quote(&self, symbol: &str) -> Result<Quote, CoreError> {
        let symbol = symbol.trim();
        let providers = self.registry.get_providers_for(symbol);
        if providers.is_empty() {
            return Err(CoreError::NoProvider(symbol.to_string()));
        }

        let mut last_error = None;
        for provider in &providers {
            match provider.get_latest_quote(symbol).await {
                Ok(quote) if quote.close.is_finite() && quote.close >= 0.0 => {
                    debug!("{} quoted {symbol} at {}", provider.name(), quote.close);
                    return Ok(quote);
                }
                Ok(quote) => {
                    warn!("{} returned an invalid close for {symbol}: {}", provider.name(), quote.close);
                    last_error = Some(CoreError::Api {
                        provider: provider.name().to_string(),
                        message: format!("invalid close price {}", quote.close),
                    });
                }
                Err(e) => {
                    warn!("{} failed to quote {symbol}: {e}", provider.name());
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or_else(|| CoreError::NoProvider(symbol.to_string())))
    }
}
