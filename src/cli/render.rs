use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::diagnostics::Diagnostics;
use crate::models::{ClaimRecord, Value};
use crate::summary::{RatioSection, SummaryReport};

pub fn print_diagnostics(diagnostics: &Diagnostics) {
    if diagnostics.is_empty() {
        return;
    }
    tracing::debug!(count = diagnostics.len(), "reporting diagnostics");
    for warning in diagnostics.warnings() {
        eprintln!("{} {warning}", "Warning:".yellow().bold());
    }
    let duplicates = diagnostics.duplicate_claims();
    if !duplicates.is_empty() {
        println!("{}", format!("Duplicated ClaimNo values ({}):", duplicates.len()).cyan());
        for id in duplicates {
            println!("  {id}");
        }
    }
}

pub fn metrics_table(summary: &SummaryReport) -> Table {
    let mut table = Table::new();
    table.set_header(vec!["Metric", "Value"]);
    for m in &summary.metrics {
        table.add_row(vec![Cell::new(m.name), Cell::new(&m.value)]);
    }
    table
}

pub fn ratio_table(summary: &SummaryReport) -> Option<Table> {
    let mut table = Table::new();
    match &summary.ratio_section {
        RatioSection::Horizontal { columns, rows } => {
            if rows.is_empty() {
                return None;
            }
            table.set_header(columns.clone());
            for r in rows {
                table.add_row(r.iter().map(Value::to_string).collect::<Vec<_>>());
            }
        }
        RatioSection::Vertical(blocks) => {
            if blocks.is_empty() {
                return None;
            }
            table.set_header(vec!["Metric", "Value"]);
            for (i, block) in blocks.iter().enumerate() {
                if i > 0 {
                    table.add_row(vec!["", ""]);
                }
                for (name, value) in block {
                    table.add_row(vec![name.clone(), value.to_string()]);
                }
            }
        }
    }
    Some(table)
}

pub fn head_table(columns: &[String], rows: &[Vec<Value>], limit: usize) -> Table {
    let mut table = Table::new();
    table.set_header(columns.to_vec());
    for r in rows.iter().take(limit) {
        table.add_row(r.iter().map(Value::to_string).collect::<Vec<_>>());
    }
    table
}

pub fn claims_head(claims: &[ClaimRecord], limit: usize) -> Table {
    let columns: Vec<String> = ClaimRecord::HEADERS.iter().map(|h| h.to_string()).collect();
    let rows: Vec<Vec<Value>> = claims.iter().take(limit).map(ClaimRecord::cells).collect();
    head_table(&columns, &rows, limit)
}
