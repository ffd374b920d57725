//! Brokerage statement import: worksheet lookup, header detection, row
//! classification, field coercion and validation, tied together by
//! [`orchestrator::StatementImporter`].

pub mod classifier;
pub mod coerce;
pub mod header;
pub mod locator;
pub mod mapper;
pub mod orchestrator;
pub mod validation;

/// Lowercase, trim and collapse inner whitespace. Shared by every lookup that
/// compares statement text against known labels.
pub(crate) fn normalize_label(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
