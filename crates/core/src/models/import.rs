use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::statement::ColumnKind;
use super::transaction::{NormalizedTransaction, TransactionType};

/// A data-model invariant violated by a single transaction.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum ValidationError {
    #[error("quantity must not be negative (got {0})")]
    NegativeQuantity(Decimal),

    #[error("price must not be negative (got {0})")]
    NegativePrice(Decimal),

    #[error("commission must not be negative (got {0})")]
    NegativeCommission(Decimal),

    #[error("quantity and price must be given together")]
    UnpairedTradeDetails,

    #[error("{0} requires quantity and price")]
    MissingTradeDetails(TransactionType),

    #[error("{0} must not carry quantity or price")]
    UnexpectedTradeDetails(TransactionType),

    #[error("{0} must not carry a ticker")]
    UnexpectedTicker(TransactionType),

    #[error("{transaction_type} amount has the wrong sign ({amount})")]
    WrongSign {
        transaction_type: TransactionType,
        amount: Decimal,
    },

    #[error("date {date} is after the import date {today}")]
    FutureDate { date: NaiveDate, today: NaiveDate },
}

/// Why a single statement row was not imported.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RowRejection {
    #[error("missing {0} value")]
    MissingValue(ColumnKind),

    #[error("invalid date '{0}'")]
    InvalidDate(String),

    #[error("invalid number '{value}' in {column} column")]
    InvalidNumber { column: ColumnKind, value: String },

    #[error("duplicate operation id {0}")]
    DuplicateOperation(String),

    #[error("{}", join_validation(.0))]
    Validation(Vec<ValidationError>),
}

fn join_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A rejected row. Rejections never abort the import.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("row {row_number}: {reason}")]
pub struct RowParseError {
    /// 1-based position among the data rows below the header
    pub row_number: usize,
    /// 1-based row in the worksheet, for pointing the user at the cell
    pub sheet_row: usize,
    pub reason: RowRejection,
}

/// Outcome of one import call: a batch id plus per-row successes and failures.
#[derive(Debug, Clone)]
pub struct ImportResult {
    pub batch_id: Uuid,
    /// Name of the worksheet the rows came from
    pub sheet_name: String,
    pub imported: Vec<NormalizedTransaction>,
    pub rejected: Vec<RowParseError>,
}

impl ImportResult {
    pub fn imported_count(&self) -> usize {
        self.imported.len()
    }

    pub fn rejected_count(&self) -> usize {
        self.rejected.len()
    }

    /// Some rows made it in and some did not.
    pub fn is_partial(&self) -> bool {
        !self.imported.is_empty() && !self.rejected.is_empty()
    }

    /// Build the response returned to API callers.
    pub fn to_response(&self) -> ImportTransactionsResponse {
        let message = match (self.imported_count(), self.rejected_count()) {
            (0, 0) => "Statement contained no transactions".to_string(),
            (n, 0) => format!("Imported {n} transactions"),
            (0, r) => format!("No transactions imported, {r} rows rejected"),
            (n, r) => format!("Imported {n} transactions, {r} rows rejected"),
        };
        ImportTransactionsResponse {
            message,
            imported_count: self.imported_count(),
            import_batch_id: self.batch_id,
            rejected_count: self.rejected_count(),
            rejected: self.rejected.iter().map(RejectedRow::from).collect(),
        }
    }
}

/// Response body of the import endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportTransactionsResponse {
    pub message: String,
    pub imported_count: usize,
    pub import_batch_id: Uuid,
    pub rejected_count: usize,
    pub rejected: Vec<RejectedRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedRow {
    pub row_number: usize,
    pub sheet_row: usize,
    pub reason: String,
}

impl From<&RowParseError> for RejectedRow {
    fn from(e: &RowParseError) -> Self {
        Self {
            row_number: e.row_number,
            sheet_row: e.sheet_row,
            reason: e.reason.to_string(),
        }
    }
}
