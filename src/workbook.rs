use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, FormatBorder, Workbook, Worksheet};
use tracing::debug;

use crate::error::Result;
use crate::models::{BenefitTable, ClaimRecord, Value};
use crate::summary::{RatioSection, SummaryReport};

pub const SUMMARY_SHEET: &str = "Summary";
pub const CLAIM_SHEET: &str = "SC";
pub const BENEFIT_SHEET: &str = "Benefit";
pub const EXTENSION: &str = "xlsx";

const DATE_FORMAT: &str = "yyyy-mm-dd";
const MONEY_FORMAT: &str = "#,##0.00";
const MIN_WIDTH: usize = 8;
const MAX_WIDTH: usize = 48;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RowStyle {
    Plain,
    Header,
    Bordered,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub cells: Vec<Value>,
    pub style: RowStyle,
}

impl SheetRow {
    fn new(cells: Vec<Value>, style: RowStyle) -> Self {
        Self { cells, style }
    }

    fn blank() -> Self {
        Self::new(Vec::new(), RowStyle::Plain)
    }

    fn header<S: AsRef<str>>(names: &[S]) -> Self {
        Self::new(
            names.iter().map(|n| Value::Text(n.as_ref().to_string())).collect(),
            RowStyle::Header,
        )
    }
}

/// A named sheet as rows plus style hints.
#[derive(Debug, Clone, PartialEq)]
pub struct Sheet {
    pub name: &'static str,
    pub rows: Vec<SheetRow>,
    /// Column indexes rendered with thousands separators and two decimals.
    pub money_columns: Vec<usize>,
}

// ---------------------------------------------------------------------------
// Sheet layouts
// ---------------------------------------------------------------------------

pub fn summary_sheet(summary: &SummaryReport) -> Sheet {
    let mut rows = vec![SheetRow::header(&["Metric", "Value"])];
    for m in &summary.metrics {
        rows.push(SheetRow::new(
            vec![Value::Text(m.name.to_string()), Value::Text(m.value.clone())],
            RowStyle::Bordered,
        ));
    }
    rows.push(SheetRow::blank());

    match &summary.ratio_section {
        RatioSection::Horizontal { columns, rows: data } => {
            if !columns.is_empty() {
                rows.push(SheetRow::header(columns));
                for r in data {
                    rows.push(SheetRow::new(r.clone(), RowStyle::Bordered));
                }
            }
        }
        RatioSection::Vertical(blocks) => {
            for (i, block) in blocks.iter().enumerate() {
                if i > 0 {
                    rows.push(SheetRow::blank());
                }
                for (name, value) in block {
                    rows.push(SheetRow::new(
                        vec![Value::Text(name.clone()), value.clone()],
                        RowStyle::Bordered,
                    ));
                }
            }
        }
    }

    Sheet {
        name: SUMMARY_SHEET,
        rows,
        money_columns: Vec::new(),
    }
}

pub fn claims_sheet(claims: &[ClaimRecord]) -> Sheet {
    let mut rows = vec![SheetRow::header(&ClaimRecord::HEADERS)];
    rows.extend(claims.iter().map(|c| SheetRow::new(c.cells(), RowStyle::Plain)));
    let money_columns = ClaimRecord::HEADERS
        .iter()
        .enumerate()
        .filter(|(_, h)| h.starts_with("Sum of"))
        .map(|(i, _)| i)
        .collect();
    Sheet {
        name: CLAIM_SHEET,
        rows,
        money_columns,
    }
}

pub fn benefit_sheet(benefits: &BenefitTable) -> Sheet {
    let mut rows = vec![SheetRow::header(&benefits.columns)];
    rows.extend(
        benefits
            .rows
            .iter()
            .map(|r| SheetRow::new(r.clone(), RowStyle::Plain)),
    );
    Sheet {
        name: BENEFIT_SHEET,
        rows,
        money_columns: Vec::new(),
    }
}

// ---------------------------------------------------------------------------
// Serialization
// ---------------------------------------------------------------------------

pub fn date_to_excel_serial(date: NaiveDate) -> f64 {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .map(|base| (date - base).num_days() as f64)
        .unwrap_or_default()
}

fn cell_format(style: RowStyle, num_format: Option<&str>) -> Format {
    let mut format = Format::new();
    match style {
        RowStyle::Header => format = format.set_bold().set_border(FormatBorder::Thin),
        RowStyle::Bordered => format = format.set_border(FormatBorder::Thin),
        RowStyle::Plain => {}
    }
    if let Some(nf) = num_format {
        format = format.set_num_format(nf);
    }
    format
}

fn write_sheet(worksheet: &mut Worksheet, sheet: &Sheet) -> Result<()> {
    worksheet.set_name(sheet.name)?;
    let mut widths: Vec<usize> = Vec::new();

    for (r, row) in sheet.rows.iter().enumerate() {
        let r = r as u32;
        for (c, value) in row.cells.iter().enumerate() {
            let col = c as u16;
            let money = row.style != RowStyle::Header && sheet.money_columns.contains(&c);
            let len = match value {
                Value::Empty => 0,
                Value::Text(s) => {
                    worksheet.write_string_with_format(r, col, s, &cell_format(row.style, None))?;
                    s.chars().count()
                }
                Value::Number(n) => {
                    let nf = money.then_some(MONEY_FORMAT);
                    worksheet.write_number_with_format(r, col, *n, &cell_format(row.style, nf))?;
                    value.to_string().len() + if money { 4 } else { 0 }
                }
                Value::Date(d) => {
                    let format = cell_format(row.style, Some(DATE_FORMAT));
                    worksheet.write_number_with_format(r, col, date_to_excel_serial(*d), &format)?;
                    DATE_FORMAT.len()
                }
            };
            if value.is_empty() && row.style != RowStyle::Plain {
                worksheet.write_blank(r, col, &cell_format(row.style, None))?;
            }
            if widths.len() <= c {
                widths.resize(c + 1, 0);
            }
            widths[c] = widths[c].max(len);
        }
    }

    for (c, w) in widths.iter().enumerate() {
        let width = (*w + 2).clamp(MIN_WIDTH, MAX_WIDTH);
        worksheet.set_column_width(c as u16, width as f64)?;
    }
    Ok(())
}

/// Serialize the sheets into an in-memory workbook.
pub fn build_workbook(sheets: &[Sheet]) -> Result<Vec<u8>> {
    let mut workbook = Workbook::new();
    for sheet in sheets {
        let worksheet = workbook.add_worksheet();
        write_sheet(worksheet, sheet)?;
    }
    Ok(workbook.save_to_buffer()?)
}

/// `<dir>/<name>.xlsx`; a name that already carries the extension is kept.
pub fn output_path(dir: &Path, name: &str) -> PathBuf {
    let name = name.trim();
    let has_ext = Path::new(name)
        .extension()
        .is_some_and(|e| e.eq_ignore_ascii_case(EXTENSION));
    if has_ext {
        dir.join(name)
    } else {
        dir.join(format!("{name}.{EXTENSION}"))
    }
}

/// Write the three-sheet report. The file only appears once the whole
/// workbook has been serialized.
pub fn write_report(
    claims: &[ClaimRecord],
    benefits: &BenefitTable,
    summary: &SummaryReport,
    path: &Path,
) -> Result<()> {
    let sheets = [summary_sheet(summary), claims_sheet(claims), benefit_sheet(benefits)];
    let bytes = build_workbook(&sheets)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, &bytes)?;
    debug!(path = %path.display(), bytes = bytes.len(), "report written");
    Ok(())
}
