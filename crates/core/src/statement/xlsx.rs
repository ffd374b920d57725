use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Range, Reader, Sheets};

use crate::errors::CoreError;
use crate::models::statement::{CellValue, RawStatementRow};

use super::source::{RowStream, StatementWorkbook};

/// Workbook backed by calamine. The format (xlsx, xlsm, xls, ods) is
/// detected from the bytes, so uploads need no file name.
pub struct XlsxWorkbook {
    sheets: Sheets<Cursor<Vec<u8>>>,
}

impl XlsxWorkbook {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        if bytes.is_empty() {
            return Err(CoreError::UnreadableWorkbook("file is empty".into()));
        }
        let sheets = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
        Ok(Self { sheets })
    }
}

impl std::fmt::Debug for XlsxWorkbook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("XlsxWorkbook")
            .field("sheets", &self.sheets.sheet_names())
            .finish()
    }
}

impl StatementWorkbook for XlsxWorkbook {
    fn sheet_names(&self) -> Vec<String> {
        self.sheets.sheet_names()
    }

    fn rows(&mut self, sheet: &str) -> Result<RowStream<'_>, CoreError> {
        let range = self.sheets.worksheet_range(sheet)?;
        Ok(Box::new(RangeRows::new(range)))
    }
}

/// Walks a calamine range row by row, converting cells on the fly.
struct RangeRows {
    range: Range<Data>,
    /// 0-based worksheet row of the range's first row
    origin_row: usize,
    height: usize,
    width: usize,
    next: usize,
}

impl RangeRows {
    fn new(range: Range<Data>) -> Self {
        let origin_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);
        let (height, width) = range.get_size();
        Self {
            range,
            origin_row,
            height,
            width,
            next: 0,
        }
    }
}

impl Iterator for RangeRows {
    type Item = RawStatementRow;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.height {
            return None;
        }
        let row = self.next;
        self.next += 1;
        let cells = (0..self.width)
            .map(|col| self.range.get((row, col)).map(convert_cell).unwrap_or(CellValue::Empty))
            .collect();
        Some(RawStatementRow::new(self.origin_row + row + 1, cells))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.height.saturating_sub(self.next);
        (left, Some(left))
    }
}

fn convert_cell(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Empty,
        Data::String(s) if s.trim().is_empty() => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateSerial(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::DateText(s.clone()),
        Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Error(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_bytes_are_unreadable() {
        let err = XlsxWorkbook::from_bytes(&[]).unwrap_err();
        assert!(matches!(err, CoreError::UnreadableWorkbook(_)));
    }

    #[test]
    fn garbage_bytes_are_unreadable() {
        let err = XlsxWorkbook::from_bytes(b"definitely not a spreadsheet").unwrap_err();
        assert!(err.is_structural());
    }

    #[test]
    fn converts_calamine_cells() {
        assert_eq!(convert_cell(&Data::Int(7)), CellValue::Number(7.0));
        assert_eq!(convert_cell(&Data::String("  ".into())), CellValue::Empty);
        assert_eq!(
            convert_cell(&Data::DateTimeIso("2024-01-05T10:00:00".into())),
            CellValue::DateText("2024-01-05T10:00:00".into())
        );
    }
}
