use chrono::{Datelike, NaiveDate};

/// Integers with more digits than this don't survive a trip through `f64`.
const MAX_EXACT_DIGITS: usize = 15;

/// A single cell as read from an input file.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Date(NaiveDate),
}

impl Value {
    /// Infer a cell from delimited-text input. Numeric strings with a leading
    /// zero (`007`) stay text so identifiers keep their padding, and so do
    /// integers too long to hold exactly.
    pub fn from_field(raw: &str) -> Self {
        if raw.is_empty() {
            return Value::Empty;
        }
        let trimmed = raw.trim();
        let digits = trimmed.strip_prefix('-').unwrap_or(trimmed);
        let padded = digits.len() > 1 && digits.starts_with('0') && !digits.starts_with("0.");
        let long_int = digits.len() > MAX_EXACT_DIGITS && digits.bytes().all(|b| b.is_ascii_digit());
        if !padded && !long_int && !trimmed.is_empty() {
            if let Ok(n) = trimmed.parse::<f64>() {
                if n.is_finite() {
                    return Value::Number(n);
                }
            }
        }
        Value::Text(raw.to_string())
    }

    /// Spreadsheet integers outside the exact `f64` range keep every digit as text.
    pub fn from_int(n: i64) -> Self {
        if n.unsigned_abs() > 1 << 53 {
            Value::Text(n.to_string())
        } else {
            Value::Number(n as f64)
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Value::Empty => true,
            Value::Text(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Numeric view of the cell; text goes through the amount parser.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            Value::Text(s) => parse_amount(s),
            _ => None,
        }
    }

    /// Normalized join key. `None` for blank cells, which never match.
    pub fn key(&self) -> Option<String> {
        match self {
            Value::Empty => None,
            Value::Text(s) => {
                let s = s.trim();
                (!s.is_empty()).then(|| s.to_string())
            }
            Value::Number(n) => Some(number_to_string(*n)),
            Value::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Empty => Ok(()),
            Value::Text(s) => f.write_str(s),
            Value::Number(n) => f.write_str(&number_to_string(*n)),
            Value::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

fn number_to_string(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Parse a monetary string, tolerating thousands separators and a leading
/// currency marker. Parenthesized values are negative.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let s = raw.replace([',', '"', '$'], "");
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Some(inner) = s.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        return inner.trim().parse::<f64>().ok().map(|v| -v);
    }
    s.parse().ok()
}

// ---------------------------------------------------------------------------
// RawTable
// ---------------------------------------------------------------------------

/// Rows of named cells, column order preserved from the source.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Benefit lines after status filter, renames and the claim cross-filter.
pub type BenefitTable = RawTable;

/// Claim-ratio rows, one per policy, projected onto the profile's columns.
pub type RatioTable = RawTable;

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row, padding or truncating it to the column count.
    pub fn push_row(&mut self, mut row: Vec<Value>) {
        row.resize(self.columns.len(), Value::Empty);
        self.rows.push(row);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn cell(&self, row: usize, name: &str) -> Option<&Value> {
        let idx = self.column_index(name)?;
        self.rows.get(row).and_then(|r| r.get(idx))
    }

    pub fn retain_rows<F>(&mut self, mut keep: F)
    where
        F: FnMut(&[Value]) -> bool,
    {
        self.rows.retain(|row| keep(row));
    }

    pub fn rename_column(&mut self, from: &str, to: &str) {
        if from == to {
            return;
        }
        if let Some(idx) = self.column_index(from) {
            self.columns[idx] = to.to_string();
        }
    }

    pub fn drop_column(&mut self, name: &str) {
        while let Some(idx) = self.column_index(name) {
            self.columns.remove(idx);
            for row in &mut self.rows {
                if idx < row.len() {
                    row.remove(idx);
                }
            }
        }
    }

    /// Sum of a column's numeric cells. `None` when the column is absent.
    pub fn column_sum(&self, name: &str) -> Option<f64> {
        let idx = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .filter_map(|r| r.get(idx).and_then(Value::as_f64))
                .sum(),
        )
    }

    /// Keep only the named columns, in the given order. Names not present are
    /// skipped.
    pub fn project(&self, names: &[&str]) -> RawTable {
        let picks: Vec<(usize, &str)> = names
            .iter()
            .filter_map(|n| self.column_index(n).map(|i| (i, *n)))
            .collect();
        RawTable {
            columns: picks.iter().map(|(_, n)| n.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|r| {
                    picks
                        .iter()
                        .map(|(i, _)| r.get(*i).cloned().unwrap_or_default())
                        .collect()
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// ClaimRecord
// ---------------------------------------------------------------------------

/// Canonical settled claim, one per claim number.
#[derive(Debug, Clone, PartialEq)]
pub struct ClaimRecord {
    pub no: usize,
    pub policy_no: Value,
    pub client_name: Value,
    pub claim_no: Value,
    pub member_no: Value,
    pub emp_id: Value,
    pub emp_name: Value,
    pub patient_name: Value,
    pub membership: Value,
    pub product_type: Value,
    pub claim_type: Value,
    pub room_option: String,
    pub area: Value,
    pub plan: Value,
    pub diagnosis: Value,
    pub treatment_place: Value,
    pub treatment_start: Option<NaiveDate>,
    pub treatment_finish: Option<NaiveDate>,
    pub settled_date: Option<NaiveDate>,
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub length_of_stay: Option<f64>,
    pub billed: Option<f64>,
    pub accepted: Option<f64>,
    pub excess_coy: Option<f64>,
    pub excess_emp: Option<f64>,
    pub excess_total: Option<f64>,
    pub unpaid: Option<f64>,
}

impl ClaimRecord {
    pub const HEADERS: [&'static str; 28] = [
        "No",
        "Policy No",
        "Client Name",
        "Claim No",
        "Member No",
        "Emp ID",
        "Emp Name",
        "Patient Name",
        "Membership",
        "Product Type",
        "Claim Type",
        "Room Option",
        "Area",
        "Plan",
        "Diagnosis",
        "Treatment Place",
        "Treatment Start",
        "Treatment Finish",
        "Settled Date",
        "Year",
        "Month",
        "Length of Stay",
        "Sum of Billed",
        "Sum of Accepted",
        "Sum of Excess Coy",
        "Sum of Excess Emp",
        "Sum of Excess Total",
        "Sum of Unpaid",
    ];

    /// Derive Year/Month from the settled date.
    pub fn period_of(date: Option<NaiveDate>) -> (Option<i32>, Option<u32>) {
        match date {
            Some(d) => (Some(d.year()), Some(d.month())),
            None => (None, None),
        }
    }

    /// Cells in `HEADERS` order.
    pub fn cells(&self) -> Vec<Value> {
        let date = |d: Option<NaiveDate>| d.map(Value::Date).unwrap_or_default();
        let num = |n: Option<f64>| n.map(Value::Number).unwrap_or_default();
        vec![
            Value::Number(self.no as f64),
            self.policy_no.clone(),
            self.client_name.clone(),
            self.claim_no.clone(),
            self.member_no.clone(),
            self.emp_id.clone(),
            self.emp_name.clone(),
            self.patient_name.clone(),
            self.membership.clone(),
            self.product_type.clone(),
            self.claim_type.clone(),
            Value::Text(self.room_option.clone()),
            self.area.clone(),
            self.plan.clone(),
            self.diagnosis.clone(),
            self.treatment_place.clone(),
            date(self.treatment_start),
            date(self.treatment_finish),
            date(self.settled_date),
            num(self.year.map(f64::from)),
            num(self.month.map(f64::from)),
            num(self.length_of_stay),
            num(self.billed),
            num(self.accepted),
            num(self.excess_coy),
            num(self.excess_emp),
            num(self.excess_total),
            num(self.unpaid),
        ]
    }
}
