// ═══════════════════════════════════════════════════════════════════
// Shared fixtures — statement rows and a minimal xlsx writer
// ═══════════════════════════════════════════════════════════════════
#![allow(dead_code)]

use std::io::{Cursor, Write};

use chrono::NaiveDate;
use janus_core::models::statement::CellValue;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const HISTORY_SHEET: &str = "CASH OPERATION HISTORY";

pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 30).unwrap()
}

pub fn t(s: &str) -> CellValue {
    CellValue::from(s)
}

pub fn n(v: f64) -> CellValue {
    CellValue::from(v)
}

pub fn text_row(cells: &[&str]) -> Vec<CellValue> {
    cells.iter().map(|c| CellValue::from(*c)).collect()
}

pub fn standard_header() -> Vec<CellValue> {
    text_row(&["ID", "Type", "Time", "Symbol", "Comment", "Amount", "Quantity", "Price"])
}

/// Withdrawal, AAPL purchase and a garbage row under a standard header.
pub fn three_row_sample() -> Vec<Vec<CellValue>> {
    vec![
        standard_header(),
        text_row(&["1", "Withdrawal", "2024-01-05", "", "", "-500 PLN", "", ""]),
        text_row(&["2", "Stocks/ETF purchase", "2024-01-06", "AAPL", "", "1500", "10", "150"]),
        text_row(&["3", "???", "not a date", "", "", "abc", "", ""]),
    ]
}

// ── xlsx writer ─────────────────────────────────────────────────────

/// Cell content written into a generated worksheet.
#[derive(Debug, Clone)]
pub enum XCell {
    Str(String),
    Num(f64),
    Blank,
}

pub fn xs(s: &str) -> XCell {
    XCell::Str(s.to_string())
}

pub fn xn(v: f64) -> XCell {
    XCell::Num(v)
}

pub fn x_row(cells: &[&str]) -> Vec<XCell> {
    cells
        .iter()
        .map(|c| if c.is_empty() { XCell::Blank } else { xs(c) })
        .collect()
}

/// Builds a workbook with inline strings only (no shared strings, no styles).
#[derive(Default)]
pub struct XlsxBuilder {
    sheets: Vec<(String, Vec<Vec<XCell>>)>,
}

impl XlsxBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sheet(mut self, name: &str, rows: Vec<Vec<XCell>>) -> Self {
        self.sheets.push((name.to_string(), rows));
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);

        let mut put = |name: &str, body: String| {
            zip.start_file(name, options).unwrap();
            zip.write_all(body.as_bytes()).unwrap();
        };

        put("[Content_Types].xml", self.content_types());
        put("_rels/.rels", ROOT_RELS.to_string());
        put("xl/workbook.xml", self.workbook());
        put("xl/_rels/workbook.xml.rels", self.workbook_rels());
        for (idx, (_, rows)) in self.sheets.iter().enumerate() {
            put(&format!("xl/worksheets/sheet{}.xml", idx + 1), worksheet(rows));
        }

        zip.finish().unwrap().into_inner()
    }

    fn content_types(&self) -> String {
        let overrides: String = (1..=self.sheets.len())
            .map(|i| {
                format!(
                    r#"<Override PartName="/xl/worksheets/sheet{i}.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>"#
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>{overrides}</Types>"#
        )
    }

    fn workbook(&self) -> String {
        let sheets: String = self
            .sheets
            .iter()
            .enumerate()
            .map(|(i, (name, _))| {
                format!(
                    r#"<sheet name="{}" sheetId="{}" r:id="rId{}"/>"#,
                    escape(name),
                    i + 1,
                    i + 1
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets>{sheets}</sheets></workbook>"#
        )
    }

    fn workbook_rels(&self) -> String {
        let rels: String = (1..=self.sheets.len())
            .map(|i| {
                format!(
                    r#"<Relationship Id="rId{i}" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet{i}.xml"/>"#
                )
            })
            .collect();
        format!(
            r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">{rels}</Relationships>"#
        )
    }
}

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

fn worksheet(rows: &[Vec<XCell>]) -> String {
    let mut body = String::new();
    for (r, row) in rows.iter().enumerate() {
        let r = r + 1;
        body.push_str(&format!(r#"<row r="{r}">"#));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{r}", column_name(c));
            match cell {
                XCell::Str(s) => body.push_str(&format!(
                    r#"<c r="{reference}" t="inlineStr"><is><t>{}</t></is></c>"#,
                    escape(s)
                )),
                XCell::Num(v) => body.push_str(&format!(r#"<c r="{reference}"><v>{v}</v></c>"#)),
                XCell::Blank => {}
            }
        }
        body.push_str("</row>");
    }
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{body}</sheetData></worksheet>"#
    )
}

fn column_name(mut idx: usize) -> String {
    let mut name = Vec::new();
    loop {
        name.push(b'A' + (idx % 26) as u8);
        if idx < 26 {
            break;
        }
        idx = idx / 26 - 1;
    }
    name.reverse();
    String::from_utf8(name).unwrap()
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
