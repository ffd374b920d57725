use std::collections::HashSet;

use chrono::{Local, NaiveDate};
use log::{debug, info};
use uuid::Uuid;

use crate::errors::CoreError;
use crate::models::import::{ImportResult, RowParseError, RowRejection};
use crate::models::settings::ImportSettings;
use crate::models::statement::{ColumnKind, RawStatementRow};
use crate::statement::source::StatementWorkbook;
use crate::statement::xlsx::XlsxWorkbook;

use super::classifier::RowClassifier;
use super::header::HeaderMap;
use super::locator::locate_worksheet;
use super::mapper::{FieldMapper, RowContext};

/// Turns a brokerage statement into normalized transactions.
///
/// Pure transformation: nothing is persisted here. Holds no mutable state,
/// so one importer can serve concurrent imports.
#[derive(Debug, Clone)]
pub struct StatementImporter {
    settings: ImportSettings,
    classifier: RowClassifier,
}

impl StatementImporter {
    pub fn new(settings: ImportSettings) -> Self {
        let classifier = RowClassifier::with_overrides(&settings.type_overrides);
        Self { settings, classifier }
    }

    pub fn settings(&self) -> &ImportSettings {
        &self.settings
    }

    /// Import a statement file (xlsx, xls or ods bytes) as of [`local_today`].
    pub fn import(&self, workbook_bytes: &[u8]) -> Result<ImportResult, CoreError> {
        self.import_at(workbook_bytes, local_today())
    }

    /// Import a statement file, treating `today` as the import date.
    pub fn import_at(&self, workbook_bytes: &[u8], today: NaiveDate) -> Result<ImportResult, CoreError> {
        let mut workbook = XlsxWorkbook::from_bytes(workbook_bytes)?;
        self.import_workbook(&mut workbook, today)
    }

    /// Import from any [`StatementWorkbook`].
    ///
    /// The batch id is drawn before the first row is read, so an import whose
    /// rows were all rejected still reports one. Structural problems (no
    /// unique history sheet, no header row) fail the whole call.
    pub fn import_workbook<W: StatementWorkbook + ?Sized>(
        &self,
        workbook: &mut W,
        today: NaiveDate,
    ) -> Result<ImportResult, CoreError> {
        let batch_id = Uuid::new_v4();

        let sheet_name = locate_worksheet(&workbook.sheet_names(), &self.settings.worksheet_labels)?;
        debug!("Import {batch_id}: reading worksheet '{sheet_name}'");

        let mut rows = workbook.rows(&sheet_name)?;

        let mut header = None;
        let mut scanned = Vec::new();
        for row in rows.by_ref().take(self.settings.header_scan_rows) {
            if let Some(found) = HeaderMap::detect(&row) {
                header = Some(found);
                break;
            }
            scanned.push(row);
        }
        let header = header.ok_or_else(|| CoreError::HeaderNotFound {
            sheet: sheet_name.clone(),
            missing: best_header_candidate_missing(&scanned),
        })?;

        let today = self.settings.reject_future_dates.then_some(today);
        let mapper = FieldMapper::new(&header, &self.settings);
        let mut imported = Vec::new();
        let mut rejected = Vec::new();
        let mut seen_ids = HashSet::new();

        for (idx, row) in rows.enumerate() {
            let row_number = idx + 1;
            if row.is_blank() || self.classifier.is_footer(&row, &header) {
                continue;
            }

            let classification = self.classifier.classify(&row, &header);
            let ctx = RowContext {
                row_number,
                batch_id,
                today,
            };
            match mapper.map_row(&row, &classification, ctx) {
                Ok(tx) => {
                    if let Some(id) = &tx.source_id {
                        if !seen_ids.insert(id.clone()) {
                            let err = RowParseError {
                                row_number,
                                sheet_row: row.sheet_row,
                                reason: RowRejection::DuplicateOperation(id.clone()),
                            };
                            debug!("Import {batch_id}: {err}");
                            rejected.push(err);
                            continue;
                        }
                    }
                    imported.push(tx);
                }
                Err(err) => {
                    debug!("Import {batch_id}: {err}");
                    rejected.push(err);
                }
            }
        }

        info!(
            "Import {batch_id} from '{sheet_name}': {} imported, {} rejected",
            imported.len(),
            rejected.len()
        );

        Ok(ImportResult {
            batch_id,
            sheet_name,
            imported,
            rejected,
        })
    }
}

/// Import date for the future-date rule. Statement timestamps are the
/// broker's wall-clock times, so this is the local calendar date, not UTC.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

impl Default for StatementImporter {
    fn default() -> Self {
        Self::new(ImportSettings::default())
    }
}

/// Describe what the closest-looking header row lacked, for the error message.
fn best_header_candidate_missing(scanned: &[RawStatementRow]) -> String {
    scanned
        .iter()
        .map(HeaderMap::missing_required)
        .min_by_key(Vec::len)
        .unwrap_or_else(|| ColumnKind::REQUIRED.to_vec())
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::statement::CellValue;
    use crate::statement::memory::InMemoryWorkbook;

    fn t(s: &str) -> CellValue {
        CellValue::from(s)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
    }

    #[test]
    fn header_must_appear_within_scan_window() {
        let mut rows: Vec<Vec<CellValue>> = (0..5).map(|_| vec![t("meta"), t("data")]).collect();
        rows.push(vec![t("Type"), t("Time"), t("Amount")]);
        let mut wb = InMemoryWorkbook::new().with_sheet("CASH OPERATION HISTORY", rows);

        let importer = StatementImporter::new(ImportSettings {
            header_scan_rows: 3,
            ..ImportSettings::default()
        });
        let err = importer.import_workbook(&mut wb, today()).unwrap_err();
        match err {
            CoreError::HeaderNotFound { missing, .. } => assert_eq!(missing, "type, date, amount"),
            other => panic!("expected HeaderNotFound, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_operation_ids_are_rejected() {
        let mut wb = InMemoryWorkbook::new().with_sheet(
            "CASH OPERATION HISTORY",
            vec![
                vec![t("ID"), t("Type"), t("Time"), t("Amount")],
                vec![t("77"), t("Deposit"), t("05.01.2024"), t("100")],
                vec![t("77"), t("Deposit"), t("05.01.2024"), t("100")],
            ],
        );
        let result = StatementImporter::default().import_workbook(&mut wb, today()).unwrap();
        assert_eq!(result.imported_count(), 1);
        assert_eq!(result.rejected[0].reason, RowRejection::DuplicateOperation("77".into()));
        assert_eq!(result.rejected[0].row_number, 2);
    }

    #[test]
    fn future_rule_can_be_disabled() {
        let mut wb = InMemoryWorkbook::new().with_sheet(
            "CASH OPERATION HISTORY",
            vec![
                vec![t("Type"), t("Time"), t("Amount")],
                vec![t("Deposit"), t("05.01.2030"), t("100")],
            ],
        );
        let importer = StatementImporter::new(ImportSettings {
            reject_future_dates: false,
            ..ImportSettings::default()
        });
        let result = importer.import_workbook(&mut wb, today()).unwrap();
        assert_eq!(result.imported_count(), 1);
    }
}
