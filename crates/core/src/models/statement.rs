use serde::{Deserialize, Serialize};

/// A single worksheet cell, decoupled from any spreadsheet library.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excel serial date (1900 date system), fractional part is the time of day
    DateSerial(f64),
    /// ISO-8601 date or datetime stored as text by the workbook format
    DateText(String),
    /// Cell holding a spreadsheet error such as `#N/A`
    Error(String),
}

static EMPTY_CELL: CellValue = CellValue::Empty;

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Trimmed text content, if the cell holds text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) | CellValue::DateText(s) => {
                let t = s.trim();
                (!t.is_empty()).then_some(t)
            }
            _ => None,
        }
    }

    /// Display form used in error messages and for id/ticker cells.
    /// Whole numbers print without a fractional part.
    pub fn display(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) | CellValue::DateText(s) | CellValue::Error(s) => s.trim().to_string(),
            CellValue::Number(n) | CellValue::DateSerial(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    n.to_string()
                }
            }
            CellValue::Bool(b) => b.to_string(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// One worksheet row as read from a statement. Lives for a single import pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStatementRow {
    /// 1-based row number in the worksheet
    pub sheet_row: usize,
    pub cells: Vec<CellValue>,
}

impl RawStatementRow {
    pub fn new(sheet_row: usize, cells: Vec<CellValue>) -> Self {
        Self { sheet_row, cells }
    }

    /// Cell at `index`, or an empty cell past the end of the row.
    pub fn cell(&self, index: usize) -> &CellValue {
        self.cells.get(index).unwrap_or(&EMPTY_CELL)
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(CellValue::is_empty)
    }

    /// First cell that is not empty.
    pub fn first_filled(&self) -> Option<&CellValue> {
        self.cells.iter().find(|c| !c.is_empty())
    }
}

/// Logical statement columns the importer understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ColumnKind {
    Id,
    Type,
    Time,
    Symbol,
    Comment,
    Amount,
    Quantity,
    Price,
    Commission,
}

impl ColumnKind {
    /// Columns a statement must have for rows to be importable.
    pub const REQUIRED: [ColumnKind; 3] = [ColumnKind::Type, ColumnKind::Time, ColumnKind::Amount];

    pub const ALL: [ColumnKind; 9] = [
        ColumnKind::Id,
        ColumnKind::Type,
        ColumnKind::Time,
        ColumnKind::Symbol,
        ColumnKind::Comment,
        ColumnKind::Amount,
        ColumnKind::Quantity,
        ColumnKind::Price,
        ColumnKind::Commission,
    ];
}

impl std::fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ColumnKind::Id => "id",
            ColumnKind::Type => "type",
            ColumnKind::Time => "date",
            ColumnKind::Symbol => "symbol",
            ColumnKind::Comment => "comment",
            ColumnKind::Amount => "amount",
            ColumnKind::Quantity => "quantity",
            ColumnKind::Price => "price",
            ColumnKind::Commission => "commission",
        };
        f.write_str(name)
    }
}
