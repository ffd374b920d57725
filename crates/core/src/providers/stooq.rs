use async_trait::async_trait;
use chrono::{NaiveDate, NaiveTime};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use crate::errors::CoreError;
use crate::models::quote::Quote;
use super::symbols::to_stooq;
use super::traits::QuoteProvider;

const BASE_URL: &str = "https://stooq.com/q/l/";
const PROVIDER: &str = "Stooq";

/// Stooq quote provider.
///
/// - **Free**: No API key.
/// - **Coverage**: Warsaw Stock Exchange plus major US/European listings.
/// - **Endpoint**: `/q/l/?s={symbol}&f=sd2t2ohlcv&h&e=json`, returning
///   `{"symbols":[{"symbol","date","time","open","high","low","close","volume"}]}`.
///
/// Unknown symbols come back as a `symbols` entry without prices, or with
/// `"N/D"` in place of numbers.
pub struct StooqProvider {
    client: Client,
    base_url: String,
}

impl StooqProvider {
    pub fn new() -> Self {
        Self::with_timeout(30)
    }

    pub fn with_timeout(timeout_secs: u64) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(timeout_secs));
        #[cfg(target_arch = "wasm32")]
        let _ = timeout_secs;
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Point the provider at another host (mirrors, local test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

impl Default for StooqProvider {
    fn default() -> Self {
        Self::new()
    }
}

// ── Stooq API response types ────────────────────────────────────────

#[derive(Deserialize)]
struct QuoteResponse {
    symbols: Option<Vec<SymbolQuote>>,
}

#[derive(Deserialize)]
struct SymbolQuote {
    date: Option<Value>,
    time: Option<Value>,
    open: Option<Value>,
    high: Option<Value>,
    low: Option<Value>,
    close: Option<Value>,
    volume: Option<Value>,
}

fn number(v: &Option<Value>) -> Option<f64> {
    let n = match v.as_ref()? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|n| n.is_finite())
}

fn date(v: &Option<Value>) -> Option<NaiveDate> {
    match v.as_ref()? {
        Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(s.trim(), "%Y%m%d"))
            .ok(),
        Value::Number(n) => NaiveDate::parse_from_str(&n.to_string(), "%Y%m%d").ok(),
        _ => None,
    }
}

fn time(v: &Option<Value>) -> Option<NaiveTime> {
    match v.as_ref()? {
        Value::String(s) => NaiveTime::parse_from_str(s.trim(), "%H:%M:%S").ok(),
        Value::Number(n) => NaiveTime::parse_from_str(&format!("{:06}", n.as_u64()?), "%H%M%S").ok(),
        _ => None,
    }
}

/// Parse a Stooq JSON body into a quote for `symbol`.
pub fn parse_quote(symbol: &str, body: &str) -> Result<Quote, CoreError> {
    let resp: QuoteResponse = serde_json::from_str(body).map_err(|e| CoreError::Api {
        provider: PROVIDER.into(),
        message: format!("Failed to parse response for {symbol}: {e}"),
    })?;

    let entry = resp
        .symbols
        .ok_or_else(|| CoreError::Api {
            provider: PROVIDER.into(),
            message: format!("Response for {symbol} has no symbols array"),
        })?
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::QuoteNotAvailable(symbol.to_string()))?;

    let close = number(&entry.close).ok_or_else(|| CoreError::QuoteNotAvailable(symbol.to_string()))?;

    Ok(Quote {
        symbol: symbol.to_string(),
        date: date(&entry.date),
        time: time(&entry.time),
        open: number(&entry.open),
        high: number(&entry.high),
        low: number(&entry.low),
        close,
        volume: number(&entry.volume).filter(|v| *v >= 0.0).map(|v| v as u64),
        provider: PROVIDER.to_string(),
    })
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl QuoteProvider for StooqProvider {
    fn name(&self) -> &str {
        PROVIDER
    }

    async fn get_latest_quote(&self, symbol: &str) -> Result<Quote, CoreError> {
        let url = format!("{}?s={}&f=sd2t2ohlcv&h&e=json", self.base_url, to_stooq(symbol));

        let resp = self.client.get(&url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::Api {
                provider: PROVIDER.into(),
                message: format!("HTTP {status} for {symbol}"),
            });
        }

        let body = resp.text().await?;
        parse_quote(symbol, &body)
    }
}
