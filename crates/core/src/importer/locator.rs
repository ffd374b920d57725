use crate::errors::CoreError;

use super::normalize_label;

/// Pick the one worksheet holding the cash-operation history.
///
/// A sheet matches when its normalized name equals, or starts with, one of
/// `labels` (XTB sometimes appends a date to sheet names). Statements with no
/// match or with several matching sheets are rejected instead of guessed.
pub fn locate_worksheet(sheet_names: &[String], labels: &[String]) -> Result<String, CoreError> {
    let wanted: Vec<String> = labels
        .iter()
        .map(|l| normalize_label(l))
        .filter(|l| !l.is_empty())
        .collect();

    let matches: Vec<&String> = sheet_names
        .iter()
        .filter(|name| {
            let name = normalize_label(name);
            wanted.iter().any(|label| name.starts_with(label.as_str()))
        })
        .collect();

    match matches.as_slice() {
        [only] => Ok((*only).clone()),
        _ => Err(CoreError::WorksheetNotFound {
            label: labels.join(" | "),
            matches: matches.len(),
        }),
    }
}
