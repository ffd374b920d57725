use std::collections::HashMap;

use crate::models::statement::{CellValue, ColumnKind, RawStatementRow};
use crate::models::transaction::TransactionType;

use super::header::HeaderMap;
use super::normalize_label;

/// Operation names XTB prints in the "Type" column, in the English and
/// Polish UI, mapped to normalized transaction types.
const VOCABULARY: &[(&str, TransactionType)] = &[
    // deposits
    ("deposit", TransactionType::Deposit),
    ("ike deposit", TransactionType::Deposit),
    ("ikze deposit", TransactionType::Deposit),
    ("transfer in", TransactionType::Deposit),
    ("wpłata", TransactionType::Deposit),
    ("wplata", TransactionType::Deposit),
    // withdrawals
    ("withdrawal", TransactionType::Withdrawal),
    ("ike withdrawal", TransactionType::Withdrawal),
    ("transfer out", TransactionType::Withdrawal),
    ("wypłata", TransactionType::Withdrawal),
    ("wyplata", TransactionType::Withdrawal),
    // trades
    ("stocks/etf purchase", TransactionType::Buy),
    ("stock purchase", TransactionType::Buy),
    ("etf purchase", TransactionType::Buy),
    ("zakup akcji/etf", TransactionType::Buy),
    ("stocks/etf sale", TransactionType::Sell),
    ("stock sale", TransactionType::Sell),
    ("etf sale", TransactionType::Sell),
    ("sprzedaż akcji/etf", TransactionType::Sell),
    // income
    ("dividend", TransactionType::Dividend),
    ("divident", TransactionType::Dividend),
    ("dywidenda", TransactionType::Dividend),
    ("free-funds interest", TransactionType::Interest),
    ("interest", TransactionType::Interest),
    ("odsetki", TransactionType::Interest),
    ("odsetki od wolnych środków", TransactionType::Interest),
    // charges
    ("commission", TransactionType::Commission),
    ("sec fee", TransactionType::Commission),
    ("prowizja", TransactionType::Commission),
    ("withholding tax", TransactionType::Tax),
    ("free-funds interest tax", TransactionType::Tax),
    ("tax", TransactionType::Tax),
    ("podatek", TransactionType::Tax),
    ("podatek od dywidend", TransactionType::Tax),
    ("podatek od odsetek", TransactionType::Tax),
];

/// First-cell texts that mark a summary row below the table.
const FOOTER_LABELS: &[&str] = &["total", "suma", "razem"];

/// Result of classifying one row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub transaction_type: TransactionType,
    /// Type cell as printed on the statement (trimmed)
    pub source_label: String,
}

/// Decides the transaction type of a row from its type cell.
///
/// Unknown labels classify as [`TransactionType::Other`]; such rows are kept
/// so that a person can reconcile them by hand.
#[derive(Debug, Clone)]
pub struct RowClassifier {
    vocabulary: HashMap<String, TransactionType>,
}

impl RowClassifier {
    pub fn new() -> Self {
        let vocabulary = VOCABULARY
            .iter()
            .map(|(label, kind)| (label.to_string(), *kind))
            .collect();
        Self { vocabulary }
    }

    /// Built-in vocabulary extended (or overridden) by `overrides`.
    pub fn with_overrides(overrides: &HashMap<String, TransactionType>) -> Self {
        let mut classifier = Self::new();
        for (label, kind) in overrides {
            classifier.vocabulary.insert(normalize_label(label), *kind);
        }
        classifier
    }

    pub fn classify_label(&self, label: &str) -> TransactionType {
        self.vocabulary
            .get(&normalize_label(label))
            .copied()
            .unwrap_or(TransactionType::Other)
    }

    pub fn classify(&self, row: &RawStatementRow, header: &HeaderMap) -> Classification {
        let source_label = header.cell(row, ColumnKind::Type).display();
        Classification {
            transaction_type: self.classify_label(&source_label),
            source_label,
        }
    }

    /// Summary rows ("Total" and friends) close the table and carry no operation.
    /// The label may sit in the type column itself or, with the type cell
    /// empty, in whichever cell comes first.
    pub fn is_footer(&self, row: &RawStatementRow, header: &HeaderMap) -> bool {
        let type_cell = header.cell(row, ColumnKind::Type);
        if !type_cell.is_empty() {
            return is_footer_label(type_cell);
        }
        row.first_filled().is_some_and(is_footer_label)
    }
}

fn is_footer_label(cell: &CellValue) -> bool {
    cell.as_text()
        .is_some_and(|t| FOOTER_LABELS.contains(&normalize_label(t).trim_end_matches(':')))
}

impl Default for RowClassifier {
    fn default() -> Self {
        Self::new()
    }
}
