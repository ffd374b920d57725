use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

/// Latest market quote for one instrument.
///
/// Quote sources are untrusted: every field except `close` may be missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Symbol as requested by the caller (statement form, e.g. "AAPL.US")
    pub symbol: String,
    pub date: Option<NaiveDate>,
    pub time: Option<NaiveTime>,
    pub open: Option<f64>,
    pub high: Option<f64>,
    pub low: Option<f64>,
    pub close: f64,
    pub volume: Option<u64>,
    /// Name of the provider that produced the quote
    pub provider: String,
}
