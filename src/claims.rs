use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::{ClaimsheetError, Result};
use crate::loader::coerce_date;
use crate::models::{ClaimRecord, RawTable, Value};

/// Only reconciled claims are reported.
pub const SETTLED_STATUS: &str = "R";

pub const REQUIRED_COLUMNS: &[&str] = &[
    "ClaimStatus",
    "ClaimNo",
    "PolicyNo",
    "ClientName",
    "MemberNo",
    "EmpID",
    "EmpName",
    "PatientName",
    "Membership",
    "ProductType",
    "ClaimType",
    "RoomOption",
    "Area",
    "PPlan",
    "PrimaryDiagnosis",
    "TreatmentPlace",
    "TreatmentStart",
    "TreatmentFinish",
    "Date",
    "LOS",
    "Billed",
    "Accepted",
    "ExcessCoy",
    "ExcessEmp",
    "ExcessTotal",
    "Unpaid",
];

const DATE_COLUMNS: [&str; 3] = ["TreatmentStart", "TreatmentFinish", "Date"];

pub struct ClaimBatch {
    pub records: Vec<ClaimRecord>,
    pub diagnostics: Diagnostics,
}

impl ClaimBatch {
    pub fn claim_keys(&self) -> std::collections::HashSet<String> {
        self.records.iter().filter_map(|r| r.claim_no.key()).collect()
    }

    pub fn policy_keys(&self) -> std::collections::HashSet<String> {
        self.records.iter().filter_map(|r| r.policy_no.key()).collect()
    }
}

/// Column positions, resolved once so row access cannot miss.
struct Columns(HashMap<&'static str, usize>);

impl Columns {
    fn resolve(table: &RawTable) -> Result<Self> {
        let mut map = HashMap::new();
        for name in REQUIRED_COLUMNS {
            let idx = table
                .column_index(name)
                .ok_or_else(|| ClaimsheetError::MissingColumn(name.to_string()))?;
            map.insert(*name, idx);
        }
        Ok(Self(map))
    }

    fn get<'a>(&self, row: &'a [Value], name: &str) -> &'a Value {
        const EMPTY: &Value = &Value::Empty;
        self.0.get(name).and_then(|i| row.get(*i)).unwrap_or(EMPTY)
    }
}

fn whitespace() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

pub fn normalize_room_option(value: &Value) -> String {
    whitespace()
        .replace_all(&value.to_string().to_uppercase(), "")
        .into_owned()
}

fn uppercase(value: &Value) -> Value {
    match value {
        Value::Text(s) => Value::Text(s.to_uppercase()),
        other => other.clone(),
    }
}

fn number(value: &Value) -> Option<f64> {
    value.as_f64()
}

/// Stands in for a blank claim number in the duplicate report.
pub const BLANK_CLAIM_LABEL: &str = "(blank)";

/// Keep settled rows only.
pub fn filter_settled(rows: Vec<Vec<Value>>, status_idx: usize) -> Vec<Vec<Value>> {
    rows.into_iter()
        .filter(|row| matches!(row.get(status_idx), Some(Value::Text(s)) if s == SETTLED_STATUS))
        .collect()
}

/// Keep the last row for each claim number, preserving row order. Returns the
/// surviving rows and the duplicated claim numbers in first-seen order.
pub fn keep_last_per_claim(rows: Vec<Vec<Value>>, claim_idx: usize) -> (Vec<Vec<Value>>, Vec<String>) {
    let key_of = |row: &[Value]| row.get(claim_idx).and_then(Value::key).unwrap_or_default();

    let mut last: HashMap<String, usize> = HashMap::new();
    let mut seen: HashMap<String, usize> = HashMap::new();
    let mut order: Vec<String> = Vec::new();
    for (i, row) in rows.iter().enumerate() {
        let key = key_of(row);
        let n = seen.entry(key.clone()).or_insert(0);
        if *n == 0 {
            order.push(key.clone());
        }
        *n += 1;
        last.insert(key, i);
    }
    let duplicates = order
        .into_iter()
        .filter(|k| seen[k] > 1)
        .map(|k| if k.is_empty() { BLANK_CLAIM_LABEL.to_string() } else { k })
        .collect();

    let kept = rows
        .into_iter()
        .enumerate()
        .filter(|(i, row)| last.get(&key_of(row)) == Some(i))
        .map(|(_, row)| row)
        .collect();
    (kept, duplicates)
}

/// Turn a raw claim export into canonical claim records.
pub fn build_claims(table: &RawTable) -> Result<ClaimBatch> {
    let cols = Columns::resolve(table)?;
    let mut diagnostics = Diagnostics::new();

    let total = table.len();
    let rows = filter_settled(table.rows.clone(), cols.0["ClaimStatus"]);
    debug!(kept = rows.len(), dropped = total - rows.len(), "claim status filter");

    let (rows, duplicates) = keep_last_per_claim(rows, cols.0["ClaimNo"]);
    if !duplicates.is_empty() {
        diagnostics.push(Diagnostic::DuplicateClaims(duplicates));
    }

    for column in DATE_COLUMNS {
        let invalid = rows
            .iter()
            .filter(|row| coerce_date(cols.get(row, column)).is_none())
            .count();
        if invalid > 0 {
            diagnostics.push(Diagnostic::InvalidDates {
                column: column.to_string(),
                count: invalid,
            });
        }
    }

    let records: Vec<ClaimRecord> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let get = |name: &str| cols.get(row, name);
            let settled_date = coerce_date(get("Date"));
            let (year, month) = ClaimRecord::period_of(settled_date);
            ClaimRecord {
                no: i + 1,
                policy_no: get("PolicyNo").clone(),
                client_name: get("ClientName").clone(),
                claim_no: get("ClaimNo").clone(),
                member_no: get("MemberNo").clone(),
                emp_id: get("EmpID").clone(),
                emp_name: get("EmpName").clone(),
                patient_name: get("PatientName").clone(),
                membership: get("Membership").clone(),
                product_type: get("ProductType").clone(),
                claim_type: get("ClaimType").clone(),
                room_option: normalize_room_option(get("RoomOption")),
                area: get("Area").clone(),
                plan: get("PPlan").clone(),
                diagnosis: uppercase(get("PrimaryDiagnosis")),
                treatment_place: uppercase(get("TreatmentPlace")),
                treatment_start: coerce_date(get("TreatmentStart")),
                treatment_finish: coerce_date(get("TreatmentFinish")),
                settled_date,
                year,
                month,
                length_of_stay: number(get("LOS")),
                billed: number(get("Billed")),
                accepted: number(get("Accepted")),
                excess_coy: number(get("ExcessCoy")),
                excess_emp: number(get("ExcessEmp")),
                excess_total: number(get("ExcessTotal")),
                unpaid: number(get("Unpaid")),
            }
        })
        .collect();

    debug!(records = records.len(), "claim records built");
    Ok(ClaimBatch {
        records,
        diagnostics,
    })
}
