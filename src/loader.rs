use std::path::Path;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{ClaimsheetError, Result};
use crate::models::{RawTable, Value};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%m/%d/%Y", "%Y/%m/%d", "%d-%b-%Y", "%d %b %Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%m/%d/%Y %H:%M"];

pub fn parse_date_text(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|f| NaiveDate::parse_from_str(raw, f).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|f| chrono::NaiveDateTime::parse_from_str(raw, f).ok())
                .map(|dt| dt.date())
        })
}

pub fn excel_serial_to_date(serial: f64) -> Option<NaiveDate> {
    // Excel epoch is 1899-12-30 (accounting for the 1900 leap year bug)
    if !(1.0..2_958_466.0).contains(&serial) {
        return None;
    }
    let base = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    base.checked_add_signed(chrono::Duration::days(serial as i64))
}

/// Coerce a cell to a date. Blank and unparseable cells give `None`.
pub fn coerce_date(value: &Value) -> Option<NaiveDate> {
    match value {
        Value::Date(d) => Some(*d),
        Value::Number(n) => excel_serial_to_date(*n),
        Value::Text(s) => parse_date_text(s),
        Value::Empty => None,
    }
}

// ---------------------------------------------------------------------------
// Table loading
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceKind {
    Delimited,
    #[cfg(feature = "xlsx")]
    Spreadsheet,
}

impl SourceKind {
    pub fn detect(file_path: &Path) -> Result<Self> {
        let ext = file_path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "csv" | "txt" => Ok(Self::Delimited),
            #[cfg(feature = "xlsx")]
            "xlsx" | "xlsm" | "xls" | "ods" => Ok(Self::Spreadsheet),
            _ => Err(ClaimsheetError::UnsupportedFormat(file_path.display().to_string())),
        }
    }
}

pub fn load_table(file_path: &Path) -> Result<RawTable> {
    let table = match SourceKind::detect(file_path)? {
        SourceKind::Delimited => read_delimited(file_path)?,
        #[cfg(feature = "xlsx")]
        SourceKind::Spreadsheet => read_spreadsheet(file_path)?,
    };
    debug!(
        path = %file_path.display(),
        columns = table.columns.len(),
        rows = table.len(),
        "loaded table"
    );
    Ok(table)
}

pub fn read_delimited(file_path: &Path) -> Result<RawTable> {
    let file = std::fs::File::open(file_path)?;
    read_delimited_from(std::io::BufReader::new(file))
}

pub fn read_delimited_from<R: std::io::Read>(reader: R) -> Result<RawTable> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);
    let columns = rdr
        .headers()?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect();
    let mut table = RawTable::new(columns);
    for result in rdr.records() {
        let record = result?;
        if record.iter().all(|f| f.trim().is_empty()) {
            continue;
        }
        table.push_row(record.iter().map(Value::from_field).collect());
    }
    Ok(table)
}

#[cfg(feature = "xlsx")]
pub fn read_spreadsheet(file_path: &Path) -> Result<RawTable> {
    use calamine::{Data, Reader};

    let mut workbook = calamine::open_workbook_auto(file_path)
        .map_err(|e| ClaimsheetError::Spreadsheet(format!("Failed to open {}: {e}", file_path.display())))?;
    let Some(first) = workbook.sheet_names().first().cloned() else {
        return Ok(RawTable::default());
    };
    let range = workbook
        .worksheet_range(&first)
        .map_err(|e| ClaimsheetError::Spreadsheet(format!("Failed to read sheet '{first}': {e}")))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(RawTable::default());
    };
    let columns = header
        .iter()
        .map(|c| match c {
            Data::Empty => String::new(),
            other => other.to_string(),
        })
        .collect();
    let mut table = RawTable::new(columns);

    for row in rows {
        let cells: Vec<Value> = row
            .iter()
            .map(|c| match c {
                Data::Int(i) => Value::from_int(*i),
                Data::Float(f) => Value::Number(*f),
                Data::String(s) => Value::Text(s.clone()),
                Data::Bool(b) => Value::Text(if *b { "TRUE" } else { "FALSE" }.to_string()),
                Data::DateTime(dt) => excel_serial_to_date(dt.as_f64())
                    .map(Value::Date)
                    .unwrap_or(Value::Number(dt.as_f64())),
                Data::DateTimeIso(s) => parse_date_text(s)
                    .map(Value::Date)
                    .unwrap_or_else(|| Value::Text(s.clone())),
                Data::DurationIso(s) => Value::Text(s.clone()),
                Data::Error(_) | Data::Empty => Value::Empty,
            })
            .collect();
        if cells.iter().all(Value::is_empty) {
            continue;
        }
        table.push_row(cells);
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_date_text_formats() {
        let d = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        assert_eq!(parse_date_text("2024-03-15"), Some(d));
        assert_eq!(parse_date_text("03/15/2024"), Some(d));
        assert_eq!(parse_date_text("2024/03/15"), Some(d));
        assert_eq!(parse_date_text("15-Mar-2024"), Some(d));
        assert_eq!(parse_date_text("2024-03-15 10:30:00"), Some(d));
        assert_eq!(parse_date_text("2024-03-15T10:30:00"), Some(d));
    }

    #[test]
    fn test_parse_date_text_rejects_invalid() {
        assert_eq!(parse_date_text(""), None);
        assert_eq!(parse_date_text("not a date"), None);
        assert_eq!(parse_date_text("02/30/2025"), None);
        assert_eq!(parse_date_text("13/01/2025"), None);
    }

    #[test]
    fn test_excel_serial_to_date() {
        assert_eq!(excel_serial_to_date(45667.0), NaiveDate::from_ymd_opt(2025, 1, 10));
        assert_eq!(excel_serial_to_date(-3.0), None);
    }

    #[test]
    fn test_coerce_date_by_cell_type() {
        let d = NaiveDate::from_ymd_opt(2025, 1, 10).unwrap();
        assert_eq!(coerce_date(&Value::Date(d)), Some(d));
        assert_eq!(coerce_date(&Value::Number(45667.0)), Some(d));
        assert_eq!(coerce_date(&Value::Text("2025-01-10".into())), Some(d));
        assert_eq!(coerce_date(&Value::Empty), None);
    }

    #[test]
    fn test_read_delimited_types_and_padding() {
        let content = "\u{feff}ClaimNo,Billed,MemberNo,Note\nC1,1500,00123,ok\nC2,2.5\n,,,\n";
        let t = read_delimited_from(content.as_bytes()).unwrap();
        assert_eq!(t.columns, vec!["ClaimNo", "Billed", "MemberNo", "Note"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.rows[0][1], Value::Number(1500.0));
        assert_eq!(t.rows[0][2], Value::Text("00123".into()));
        assert_eq!(t.rows[1][2], Value::Empty);
        assert_eq!(t.rows[1][3], Value::Empty);
    }

    #[test]
    fn test_read_delimited_keeps_long_ids_exact() {
        let content = "ClaimNo,Billed\n9007199254740993,10\n9007199254740992,20\n";
        let t = read_delimited_from(content.as_bytes()).unwrap();
        assert_eq!(t.rows[0][0], Value::Text("9007199254740993".into()));
        assert_eq!(t.rows[1][0], Value::Text("9007199254740992".into()));
    }

    #[test]
    fn test_load_table_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("claims.json");
        std::fs::write(&path, "{}").unwrap();
        assert!(matches!(
            load_table(&path),
            Err(ClaimsheetError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_load_table_reads_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("benefit.CSV");
        std::fs::write(&path, "ClaimNo,Status_Claim\nC1,R\n").unwrap();
        let t = load_table(&path).unwrap();
        assert_eq!(t.len(), 1);
        assert_eq!(t.cell(0, "Status_Claim"), Some(&Value::Text("R".into())));
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn test_read_spreadsheet_first_sheet() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ratio.xlsx");
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Policy No").unwrap();
        sheet.write_string(0, 1, "Net Premi").unwrap();
        sheet.write_string(1, 0, "P1").unwrap();
        sheet.write_number(1, 1, 1000.0).unwrap();
        workbook.save(&path).unwrap();

        let t = load_table(&path).unwrap();
        assert_eq!(t.columns, vec!["Policy No", "Net Premi"]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.rows[0][0], Value::Text("P1".into()));
        assert_eq!(t.rows[0][1], Value::Number(1000.0));
    }
}
