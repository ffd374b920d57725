use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::models::import::{RowParseError, RowRejection};
use crate::models::settings::{ImportSettings, NumberFormat};
use crate::models::statement::{ColumnKind, RawStatementRow};
use crate::models::transaction::NormalizedTransaction;

use super::classifier::Classification;
use super::coerce::{cell_to_date, cell_to_decimal, normalize_ticker, parse_trade_comment};
use super::header::HeaderMap;
use super::validation::validate_transaction;

/// Per-row facts the mapper needs from the orchestrator.
#[derive(Debug, Clone, Copy)]
pub struct RowContext {
    /// 1-based position among the data rows below the header
    pub row_number: usize,
    pub batch_id: Uuid,
    /// Import date for the future-date rule; `None` disables the rule
    pub today: Option<NaiveDate>,
}

/// Turns a classified row into a [`NormalizedTransaction`].
pub struct FieldMapper<'a> {
    header: &'a HeaderMap,
    extra_date_formats: &'a [String],
    number_format: NumberFormat,
}

impl<'a> FieldMapper<'a> {
    pub fn new(header: &'a HeaderMap, settings: &'a ImportSettings) -> Self {
        Self {
            header,
            extra_date_formats: &settings.extra_date_formats,
            number_format: settings.number_format,
        }
    }

    pub fn map_row(
        &self,
        row: &RawStatementRow,
        classification: &Classification,
        ctx: RowContext,
    ) -> Result<NormalizedTransaction, RowParseError> {
        let reject = |reason: RowRejection| RowParseError {
            row_number: ctx.row_number,
            sheet_row: row.sheet_row,
            reason,
        };
        let kind = classification.transaction_type;

        let date_cell = self.header.cell(row, ColumnKind::Time);
        if date_cell.is_empty() {
            return Err(reject(RowRejection::MissingValue(ColumnKind::Time)));
        }
        let transaction_date =
            cell_to_date(date_cell, self.extra_date_formats).map_err(|v| reject(RowRejection::InvalidDate(v)))?;

        let amount = self
            .decimal(row, ColumnKind::Amount)
            .map_err(&reject)?
            .ok_or_else(|| reject(RowRejection::MissingValue(ColumnKind::Amount)))?;

        let notes = self
            .header
            .cell(row, ColumnKind::Comment)
            .as_text()
            .map(str::to_string);

        let ticker = if kind.carries_ticker() {
            normalize_ticker(self.header.cell(row, ColumnKind::Symbol))
        } else {
            None
        };

        let (quantity, price) = if kind.is_trade() {
            let quantity = self.decimal(row, ColumnKind::Quantity).map_err(&reject)?;
            let price = self.decimal(row, ColumnKind::Price).map_err(&reject)?;
            match (quantity, price) {
                (None, None) => notes
                    .as_deref()
                    .and_then(parse_trade_comment)
                    .map_or((None, None), |(q, p)| (Some(q), Some(p))),
                pair => pair,
            }
        } else {
            (None, None)
        };

        let commission = self
            .decimal(row, ColumnKind::Commission)
            .map_err(&reject)?
            .map(|c| c.abs())
            .unwrap_or(Decimal::ZERO);

        let source_id = {
            let id = self.header.cell(row, ColumnKind::Id).display();
            (!id.is_empty()).then_some(id)
        };

        let tx = NormalizedTransaction {
            transaction_date,
            transaction_type: kind,
            ticker,
            quantity,
            price,
            total_amount: kind.signed_amount(amount),
            commission,
            notes,
            import_batch_id: ctx.batch_id,
            source_label: classification.source_label.clone(),
            source_id,
            row_number: ctx.row_number,
        };

        validate_transaction(&tx, ctx.today).map_err(|errors| reject(RowRejection::Validation(errors)))?;
        Ok(tx)
    }

    fn decimal(&self, row: &RawStatementRow, column: ColumnKind) -> Result<Option<Decimal>, RowRejection> {
        cell_to_decimal(self.header.cell(row, column), self.number_format)
            .map_err(|value| RowRejection::InvalidNumber { column, value })
    }
}
