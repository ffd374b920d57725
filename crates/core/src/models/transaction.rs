use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of cash operation found on a brokerage statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Cash paid into the account
    Deposit,
    /// Cash taken out of the account
    Withdrawal,
    /// Purchase of a stock or ETF
    Buy,
    /// Sale of a stock or ETF
    Sell,
    Dividend,
    Commission,
    /// Withholding tax, interest tax and similar charges
    Tax,
    /// Interest paid on free funds
    Interest,
    /// Any operation the importer does not model by name. Kept for reconciliation.
    Other,
}

/// Which way money moves for a given transaction type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CashDirection {
    Inflow,
    Outflow,
    /// Keep whatever sign the statement reported.
    AsReported,
}

impl TransactionType {
    pub const ALL: [TransactionType; 9] = [
        TransactionType::Deposit,
        TransactionType::Withdrawal,
        TransactionType::Buy,
        TransactionType::Sell,
        TransactionType::Dividend,
        TransactionType::Commission,
        TransactionType::Tax,
        TransactionType::Interest,
        TransactionType::Other,
    ];

    /// Buy and sell rows carry quantity and price.
    pub fn is_trade(self) -> bool {
        matches!(self, TransactionType::Buy | TransactionType::Sell)
    }

    /// Only trades and dividends refer to an instrument.
    pub fn carries_ticker(self) -> bool {
        matches!(
            self,
            TransactionType::Buy | TransactionType::Sell | TransactionType::Dividend
        )
    }

    pub fn direction(self) -> CashDirection {
        match self {
            TransactionType::Deposit
            | TransactionType::Sell
            | TransactionType::Dividend
            | TransactionType::Interest => CashDirection::Inflow,
            TransactionType::Withdrawal
            | TransactionType::Buy
            | TransactionType::Commission
            | TransactionType::Tax => CashDirection::Outflow,
            TransactionType::Other => CashDirection::AsReported,
        }
    }

    /// Apply the sign convention: outflows negative, inflows positive.
    pub fn signed_amount(self, amount: Decimal) -> Decimal {
        match self.direction() {
            CashDirection::Inflow => amount.abs(),
            CashDirection::Outflow => -amount.abs(),
            CashDirection::AsReported => amount,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdrawal => "withdrawal",
            TransactionType::Buy => "buy",
            TransactionType::Sell => "sell",
            TransactionType::Dividend => "dividend",
            TransactionType::Commission => "commission",
            TransactionType::Tax => "tax",
            TransactionType::Interest => "interest",
            TransactionType::Other => "other",
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        TransactionType::ALL
            .into_iter()
            .find(|t| t.as_str() == wanted)
            .ok_or_else(|| format!("unknown transaction type '{s}'"))
    }
}

/// A typed, validated record derived from one statement row.
///
/// Created by the importer and handed to a
/// [`TransactionStore`](crate::storage::traits::TransactionStore), which owns
/// it from then on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedTransaction {
    /// Date of the operation (time of day is dropped)
    pub transaction_date: NaiveDate,

    pub transaction_type: TransactionType,

    /// Uppercased instrument symbol, e.g. "AAPL.US". Buy/sell/dividend only.
    pub ticker: Option<String>,

    /// Number of units traded. Paired with `price`.
    pub quantity: Option<Decimal>,

    /// Unit price of the trade. Paired with `quantity`.
    pub price: Option<Decimal>,

    /// Signed cash effect in the account currency (outflows negative)
    pub total_amount: Decimal,

    /// Commission charged on the row, never negative
    pub commission: Decimal,

    /// Free text carried over from the statement's comment column
    pub notes: Option<String>,

    /// Shared by every row produced by one import call
    pub import_batch_id: Uuid,

    /// Operation name exactly as the statement printed it
    pub source_label: String,

    /// Vendor operation id, when the statement has an ID column
    pub source_id: Option<String>,

    /// 1-based position among the data rows below the header
    pub row_number: usize,
}

impl NormalizedTransaction {
    /// True when quantity and price are either both set or both unset.
    pub fn has_paired_trade_details(&self) -> bool {
        self.quantity.is_some() == self.price.is_some()
    }
}
