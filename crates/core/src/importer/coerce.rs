//! Cell coercion: locale-tolerant decimals, spreadsheet dates, tickers and
//! the quantity/price embedded in XTB trade comments.

use std::str::FromStr;
use std::sync::OnceLock;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime};
use regex::Regex;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;

use crate::models::settings::NumberFormat;
use crate::models::statement::CellValue;

/// Formats carrying a time of day; the time is dropped after parsing.
const DATETIME_FORMATS: &[&str] = &[
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%d.%m.%Y", "%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y", "%Y/%m/%d"];

/// Largest serial Excel can represent (9999-12-31).
const MAX_EXCEL_SERIAL: f64 = 2_958_465.0;

/// Parse a decimal written in either `1,234.56` or `1 234,56` / `1.234,56`
/// style, guessing the convention from the value itself. Currency codes and
/// symbols around the number are ignored, and `(500)` reads as `-500`.
///
/// A lone separator is the decimal point (`1,5` and `1.5` are both one and a
/// half) unless exactly three digits follow it: `1,500` is ambiguous and
/// yields `None`.
pub fn parse_decimal(text: &str) -> Option<Decimal> {
    parse_decimal_as(text, NumberFormat::Auto)
}

/// [`parse_decimal`] under a fixed separator convention.
pub fn parse_decimal_as(text: &str, format: NumberFormat) -> Option<Decimal> {
    let compact: String = text
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '\'')
        .map(|c| if c == '\u{2212}' { '-' } else { c })
        .collect();
    let mut s = compact.trim_matches(|c: char| c.is_alphabetic() || matches!(c, '$' | '€' | '£' | '¥'));

    let parenthesized = s.len() > 2 && s.starts_with('(') && s.ends_with(')');
    if parenthesized {
        s = &s[1..s.len() - 1];
    }
    if s.is_empty() || !s.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }
    if !s.chars().all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+')) {
        return None;
    }

    let (decimal_sep, group_sep) = separators(s, format)?;
    let normalized = ungroup(s, decimal_sep, group_sep)?;
    let value = Decimal::from_str(&normalized).ok()?;
    Some(if parenthesized { -value } else { value })
}

/// `(decimal, grouping)` separators for `s`, or `None` when they cannot be told apart.
fn separators(s: &str, format: NumberFormat) -> Option<(char, char)> {
    const DOT: (char, char) = ('.', ',');
    const COMMA: (char, char) = (',', '.');
    match format {
        NumberFormat::DotDecimal => Some(DOT),
        NumberFormat::CommaDecimal => Some(COMMA),
        NumberFormat::Auto => {
            let last_dot = s.rfind('.');
            let last_comma = s.rfind(',');
            match (s.matches('.').count(), s.matches(',').count()) {
                (0, 0) => Some(DOT),
                (_, 0) if last_dot != s.find('.') => Some(COMMA),
                (0, _) if last_comma != s.find(',') => Some(DOT),
                (1, 0) | (0, 1) => {
                    let sep = if last_dot.is_some() { '.' } else { ',' };
                    let (int, frac) = s.split_once(sep)?;
                    let int = int.trim_start_matches(['-', '+']);
                    let looks_grouped = frac.len() == 3
                        && frac.chars().all(|c| c.is_ascii_digit())
                        && !int.is_empty()
                        && int != "0";
                    match (looks_grouped, sep) {
                        (true, _) => None,
                        (false, '.') => Some(DOT),
                        (false, _) => Some(COMMA),
                    }
                }
                // Both present: whichever comes last is the decimal separator.
                _ if last_dot > last_comma => Some(DOT),
                _ => Some(COMMA),
            }
        }
    }
}

/// Drop grouping separators, checking they sit every three digits, and
/// rewrite the decimal separator as `.`.
fn ungroup(s: &str, decimal_sep: char, group_sep: char) -> Option<String> {
    let (int, frac) = match s.split_once(decimal_sep) {
        Some((int, frac)) => (int, Some(frac)),
        None => (s, None),
    };
    if frac.is_some_and(|f| f.contains([decimal_sep, group_sep])) {
        return None;
    }

    let digits = int.trim_start_matches(['-', '+']);
    let sign = &int[..int.len() - digits.len()];
    if digits.contains(group_sep) {
        let mut groups = digits.split(group_sep);
        let lead = groups.next()?;
        if lead.is_empty() || lead.len() > 3 || groups.any(|g| g.len() != 3) {
            return None;
        }
    }

    let mut out = String::with_capacity(s.len());
    out.push_str(sign);
    out.extend(digits.chars().filter(|&c| c != group_sep));
    if let Some(frac) = frac {
        out.push('.');
        out.push_str(frac);
    }
    Some(out)
}

/// Exact-enough conversion of a spreadsheet float into a decimal.
pub fn decimal_from_f64(value: f64) -> Option<Decimal> {
    if !value.is_finite() {
        return None;
    }
    Decimal::from_f64(value).map(|d| d.normalize())
}

/// Numeric cell → decimal. `Ok(None)` for empty cells and a lone dash;
/// `Err` carries the offending text.
pub fn cell_to_decimal(cell: &CellValue, format: NumberFormat) -> Result<Option<Decimal>, String> {
    if cell.is_empty() {
        return Ok(None);
    }
    match cell {
        CellValue::Number(n) => decimal_from_f64(*n).map(Some).ok_or_else(|| cell.display()),
        CellValue::Text(s) if s.trim() == "-" => Ok(None),
        CellValue::Text(s) => parse_decimal_as(s, format).map(Some).ok_or_else(|| s.trim().to_string()),
        other => Err(other.display()),
    }
}

/// Excel 1900 date system serial → calendar date (time of day dropped).
pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    if !serial.is_finite() || !(1.0..=MAX_EXCEL_SERIAL).contains(&serial) {
        return None;
    }
    let mut days = serial.floor() as i64;
    // Serials below 60 predate Excel's phantom 1900-02-29.
    if days < 60 {
        days += 1;
    }
    NaiveDate::from_ymd_opt(1899, 12, 30)?.checked_add_signed(Duration::days(days))
}

/// Textual date → calendar date. `extra_formats` are tried last.
pub fn parse_date_text(text: &str, extra_formats: &[String]) -> Option<NaiveDate> {
    let s = text.trim();
    if s.is_empty() {
        return None;
    }

    let builtin = DATETIME_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok().map(|dt| dt.date()))
        .or_else(|| DATE_FORMATS.iter().find_map(|f| NaiveDate::parse_from_str(s, f).ok()))
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()));
    if builtin.is_some() {
        return builtin;
    }

    if let Some(date) = extra_formats.iter().find_map(|f| {
        NaiveDateTime::parse_from_str(s, f)
            .map(|dt| dt.date())
            .or_else(|_| NaiveDate::parse_from_str(s, f))
            .ok()
    }) {
        return Some(date);
    }

    // A serial that ended up stored as text
    s.parse::<f64>().ok().and_then(excel_serial_to_date)
}

/// Date cell → calendar date. `Err` carries the offending text.
pub fn cell_to_date(cell: &CellValue, extra_formats: &[String]) -> Result<NaiveDate, String> {
    let parsed = match cell {
        CellValue::Number(n) | CellValue::DateSerial(n) => excel_serial_to_date(*n),
        CellValue::Text(s) | CellValue::DateText(s) => parse_date_text(s, extra_formats),
        _ => None,
    };
    parsed.ok_or_else(|| cell.display())
}

/// Ticker cell → trimmed uppercase symbol.
pub fn normalize_ticker(cell: &CellValue) -> Option<String> {
    let symbol = cell.display().trim().to_uppercase();
    (!symbol.is_empty()).then_some(symbol)
}

fn trade_comment_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\b(?:open|close)\s+(?:buy|sell)\s+([0-9][0-9.,]*)(?:\s*/\s*[0-9][0-9.,]*)?\s*@\s*([0-9][0-9.,]*)").ok()
    })
    .as_ref()
}

/// Quantity and unit price from an XTB trade comment such as
/// `OPEN BUY 10 @ 150.00` or `CLOSE BUY 2/10 @ 160.5`.
pub fn parse_trade_comment(comment: &str) -> Option<(Decimal, Decimal)> {
    let caps = trade_comment_re()?.captures(comment)?;
    let quantity = parse_decimal_as(caps.get(1)?.as_str(), NumberFormat::DotDecimal)?;
    let price = parse_decimal_as(caps.get(2)?.as_str(), NumberFormat::DotDecimal)?;
    Some((quantity, price))
}
