use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::quote::Quote;
use super::symbols::to_yahoo;
use super::traits::QuoteProvider;

const PROVIDER: &str = "Yahoo Finance";

/// Yahoo Finance quote provider, used as a fallback behind Stooq.
///
/// - **Free**: No API key required.
/// - **Coverage**: Global equities and ETFs, including most listings XTB offers.
///
/// Uses the `yahoo_finance_api` crate. Statement symbols are translated to
/// Yahoo's exchange suffixes first (`PKN.PL` → `PKN.WA`).
///
/// **Note**: Not WASM-compatible (uses native reqwest/tokio).
pub struct YahooFinanceProvider {
    connector: yahoo_finance_api::YahooConnector,
}

impl YahooFinanceProvider {
    pub fn new() -> Result<Self, CoreError> {
        let connector = yahoo_finance_api::YahooConnector::new().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Failed to create connector: {e}"),
        })?;
        Ok(Self { connector })
    }
}

#[async_trait]
impl QuoteProvider for YahooFinanceProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, CoreError> {
        let yahoo_symbol = to_yahoo(symbol);
        let resp = self
            .connector
            .get_latest_quotes(&yahoo_symbol, "1d")
            .await
            .map_err(|e| CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("Failed to fetch latest quote for {yahoo_symbol}: {e}"),
            })?;

        let quote = resp.last_quote().map_err(|e| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("No quote data for {yahoo_symbol}: {e}"),
        })?;

        if !quote.close.is_finite() {
            return Err(CoreError::QuoteNotAvailable(symbol.to_string()));
        }

        let at = chrono::DateTime::from_timestamp(quote.timestamp as i64, 0);
        Ok(Quote {
            symbol: symbol.to_string(),
            date: at.map(|dt| dt.date_naive()),
            time: at.map(|dt| dt.time()),
            open: Some(quote.open),
            high: Some(quote.high),
            low: Some(quote.low),
            close: quote.close,
            volume: Some(quote.volume),
            provider: PROVIDER.to_string(),
        })
    }
}
