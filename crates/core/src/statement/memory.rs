use crate::errors::CoreError;
use crate::models::statement::{CellValue, RawStatementRow};

use super::source::{RowStream, StatementWorkbook};

/// Workbook held entirely in memory. Used for fixtures and for callers that
/// already decoded a statement some other way.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkbook {
    sheets: Vec<(String, Vec<Vec<CellValue>>)>,
}

impl InMemoryWorkbook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a worksheet. Rows are numbered from 1 in insertion order.
    pub fn with_sheet(mut self, name: impl Into<String>, rows: Vec<Vec<CellValue>>) -> Self {
        self.sheets.push((name.into(), rows));
        self
    }
}

impl StatementWorkbook for InMemoryWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|(name, _)| name.clone()).collect()
    }

    fn rows(&mut self, sheet: &str) -> Result<RowStream<'_>, CoreError> {
        let (_, rows) = self
            .sheets
            .iter()
            .find(|(name, _)| name == sheet)
            .ok_or_else(|| CoreError::UnreadableWorkbook(format!("no worksheet named '{sheet}'")))?;
        Ok(Box::new(
            rows.iter()
                .enumerate()
                .map(|(idx, cells)| RawStatementRow::new(idx + 1, cells.clone())),
        ))
    }
}
