use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::classify::StampRecord;
use crate::error::{Result, StampError};

/// Spreadsheet tools need the BOM to pick UTF-8 for the Cyrillic header.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const HEADER: [&str; 3] = ["Лист", "Исполнитель", "Заказчик"];
const YES: &str = "Да";
const NO: &str = "Нет";
const LINE_END: &str = "\r\n";

/// Records of one run, in processing order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StampReport {
    records: Vec<StampRecord>,
}

impl StampReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: StampRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[StampRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serializes the report as BOM-prefixed UTF-8 CSV.
    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        out.write_all(UTF8_BOM)?;
        write_row(out, &HEADER)?;
        for record in &self.records {
            write_row(
                out,
                &[record.filename.as_str(), yes_no(record.performer), yes_no(record.customer)],
            )?;
        }
        out.flush()
    }

    pub fn write_csv(&self, path: &Path) -> Result<()> {
        let report_error = |source: io::Error| StampError::Report {
            path: path.to_path_buf(),
            source,
        };
        let file = File::create(path).map_err(report_error)?;
        self.write_to(&mut BufWriter::new(file)).map_err(report_error)?;
        info!("StampReport.write_csv | {} rows written to {:?}", self.len(), path);
        Ok(())
    }
}

fn yes_no(value: bool) -> &'static str {
    if value {
        YES
    } else {
        NO
    }
}

fn write_row<W: Write>(out: &mut W, fields: &[&str]) -> io::Result<()> {
    let row: Vec<String> = fields.iter().map(|field| escape(field)).collect();
    write!(out, "{}{}", row.join(","), LINE_END)
}

/// Minimal quoting: only fields with a delimiter, quote or line break are quoted.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
