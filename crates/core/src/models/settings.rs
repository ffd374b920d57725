use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::transaction::TransactionType;

/// Top-level configuration, loadable from JSON. Every field has a default.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Settings {
    pub import: ImportSettings,
    pub quotes: QuoteSettings,
}

/// Knobs for the statement importer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImportSettings {
    /// Names of the operational-history worksheet. A sheet matches when its
    /// name equals or starts with one of these (case-insensitive).
    pub worksheet_labels: Vec<String>,

    /// How many leading rows to search for the header row.
    /// XTB puts account metadata above the table.
    pub header_scan_rows: usize,

    /// Reject rows dated after the import date.
    pub reject_future_dates: bool,

    /// Extra chrono formats tried after the built-in date formats.
    pub extra_date_formats: Vec<String>,

    /// How separators in numbers stored as text are read.
    pub number_format: NumberFormat,

    /// Additional operation labels (e.g. "Stock split" → other),
    /// consulted before the built-in vocabulary.
    pub type_overrides: HashMap<String, TransactionType>,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            worksheet_labels: vec![
                "CASH OPERATION HISTORY".to_string(),
                "Cash Operations".to_string(),
                "Operacje gotówkowe".to_string(),
                "HISTORIA OPERACJI GOTÓWKOWYCH".to_string(),
            ],
            header_scan_rows: 30,
            reject_future_dates: true,
            extra_date_formats: Vec::new(),
            number_format: NumberFormat::Auto,
            type_overrides: HashMap::new(),
        }
    }
}

/// Decimal separator convention for amounts written as text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NumberFormat {
    /// Decide per value. A lone separator followed by exactly three digits
    /// (`1,500`, `1.500`) could be either and is rejected.
    #[default]
    Auto,
    /// `1,234.56`
    DotDecimal,
    /// `1.234,56` or `1 234,56`
    CommaDecimal,
}

/// Quote provider configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QuoteSettings {
    pub stooq_enabled: bool,
    /// Yahoo Finance is used as a fallback (native targets only)
    pub yahoo_enabled: bool,
    pub request_timeout_secs: u64,
}

impl Default for QuoteSettings {
    fn default() -> Self {
        Self {
            stooq_enabled: true,
            yahoo_enabled: true,
            request_timeout_secs: 30,
        }
    }
}
