use std::collections::BTreeMap;

use crate::models::statement::{CellValue, ColumnKind, RawStatementRow};

use super::normalize_label;

/// Header spellings seen in XTB exports (English and Polish UI) and in
/// hand-edited statements.
fn aliases(kind: ColumnKind) -> &'static [&'static str] {
    match kind {
        ColumnKind::Id => &["id", "nr", "operation id", "position"],
        ColumnKind::Type => &["type", "typ", "operation type", "rodzaj", "operation"],
        ColumnKind::Time => &["time", "date", "czas", "data", "data operacji", "operation date"],
        ColumnKind::Symbol => &["symbol", "ticker", "instrument"],
        ColumnKind::Comment => &["comment", "komentarz", "description", "opis"],
        ColumnKind::Amount => &["amount", "kwota", "value", "wartość"],
        ColumnKind::Quantity => &["quantity", "volume", "ilość", "ilosc", "wolumen"],
        ColumnKind::Price => &["price", "cena", "unit price"],
        ColumnKind::Commission => &["commission", "prowizja", "fee"],
    }
}

fn kind_for_header(text: &str) -> Option<ColumnKind> {
    let normalized = normalize_label(text);
    let label = normalized.trim_end_matches([':', '.']).trim_end();
    ColumnKind::ALL
        .into_iter()
        .find(|kind| aliases(*kind).contains(&label))
}

/// Maps logical columns to their index in the worksheet.
#[derive(Debug, Clone, PartialEq)]
pub struct HeaderMap {
    columns: BTreeMap<ColumnKind, usize>,
    /// 1-based worksheet row holding the header
    pub sheet_row: usize,
}

impl HeaderMap {
    /// Recognize `row` as a header row. Returns `None` unless every
    /// [`ColumnKind::REQUIRED`] column is present. The first occurrence of a
    /// header wins when a label repeats.
    pub fn detect(row: &RawStatementRow) -> Option<Self> {
        let map = Self::scan(row);
        ColumnKind::REQUIRED
            .iter()
            .all(|k| map.columns.contains_key(k))
            .then_some(map)
    }

    /// Required columns absent from `row`.
    pub fn missing_required(row: &RawStatementRow) -> Vec<ColumnKind> {
        let map = Self::scan(row);
        ColumnKind::REQUIRED
            .into_iter()
            .filter(|k| !map.columns.contains_key(k))
            .collect()
    }

    fn scan(row: &RawStatementRow) -> Self {
        let mut columns = BTreeMap::new();
        for (idx, cell) in row.cells.iter().enumerate() {
            if let Some(kind) = cell.as_text().and_then(kind_for_header) {
                columns.entry(kind).or_insert(idx);
            }
        }
        Self {
            columns,
            sheet_row: row.sheet_row,
        }
    }

    pub fn index(&self, kind: ColumnKind) -> Option<usize> {
        self.columns.get(&kind).copied()
    }

    pub fn has(&self, kind: ColumnKind) -> bool {
        self.columns.contains_key(&kind)
    }

    /// Cell of `row` under `kind`; empty when the column does not exist.
    pub fn cell<'r>(&self, row: &'r RawStatementRow, kind: ColumnKind) -> &'r CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        match self.index(kind) {
            Some(idx) => row.cell(idx),
            None => &EMPTY,
        }
    }
}
