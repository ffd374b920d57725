use crate::errors::CoreError;
use crate::models::statement::RawStatementRow;

/// Lazy, finite, non-restartable stream of worksheet rows.
pub type RowStream<'a> = Box<dyn Iterator<Item = RawStatementRow> + 'a>;

/// Read access to a statement workbook.
///
/// The importer only needs two things from a spreadsheet: the names of its
/// worksheets and a sequential pass over one of them, empty cells included.
/// Keeping that behind a trait lets the importer run against calamine
/// workbooks and in-memory fixtures alike.
pub trait StatementWorkbook {
    /// Worksheet names in workbook order.
    fn sheet_names(&self) -> Vec<String>;

    /// Stream the rows of `sheet` from top to bottom.
    fn rows(&mut self, sheet: &str) -> Result<RowStream<'_>, CoreError>;
}
