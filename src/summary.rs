use serde::{Deserialize, Serialize};

use crate::fmt::{amount, count, percent};
use crate::models::{ClaimRecord, RatioTable, Value};

pub const NOT_AVAILABLE: &str = "N/A";
pub const CLAIM_COLUMN: &str = "Claim";
pub const PREMIUM_COLUMN: &str = "Net Premi";

/// How the claim-ratio table is rendered below the metrics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SummaryLayout {
    /// One row per policy, one column per metric.
    Horizontal,
    /// One block per policy, one metric per row.
    Vertical,
}

impl std::fmt::Display for SummaryLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SummaryLayout::Horizontal => f.write_str("horizontal"),
            SummaryLayout::Vertical => f.write_str("vertical"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetric {
    pub name: &'static str,
    pub value: String,
}

/// Scalar totals over the claim records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ClaimTotals {
    pub claims: usize,
    pub billed: i64,
    pub accepted: i64,
    pub excess: i64,
    pub unpaid: i64,
}

pub fn claim_totals(claims: &[ClaimRecord]) -> ClaimTotals {
    let total = |f: fn(&ClaimRecord) -> Option<f64>| -> i64 {
        claims.iter().filter_map(f).sum::<f64>().trunc() as i64
    };
    ClaimTotals {
        claims: claims.len(),
        billed: total(|r| r.billed),
        accepted: total(|r| r.accepted),
        excess: total(|r| r.excess_total),
        unpaid: total(|r| r.unpaid),
    }
}

/// 100 × total claim / total net premium, or `None` when either column is
/// missing or the premium total is zero.
pub fn overall_ratio_pct(ratios: &RatioTable) -> Option<f64> {
    let claim = ratios.column_sum(CLAIM_COLUMN)?;
    let premium = ratios.column_sum(PREMIUM_COLUMN)?;
    if premium == 0.0 {
        return None;
    }
    Some(claim * 100.0 / premium)
}

/// The claim-ratio rows as rendered under the metrics.
#[derive(Debug, Clone, PartialEq)]
pub enum RatioSection {
    Horizontal {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },
    /// One `(column, value)` list per policy.
    Vertical(Vec<Vec<(String, Value)>>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub totals: ClaimTotals,
    pub ratio_pct: Option<f64>,
    pub metrics: Vec<SummaryMetric>,
    pub ratio_section: RatioSection,
}

fn ratio_section(ratios: &RatioTable, layout: SummaryLayout) -> RatioSection {
    match layout {
        SummaryLayout::Horizontal => RatioSection::Horizontal {
            columns: ratios.columns.clone(),
            rows: ratios.rows.clone(),
        },
        SummaryLayout::Vertical => RatioSection::Vertical(
            ratios
                .rows
                .iter()
                .map(|row| ratios.columns.iter().cloned().zip(row.iter().cloned()).collect())
                .collect(),
        ),
    }
}

pub fn build_summary(claims: &[ClaimRecord], ratios: &RatioTable, layout: SummaryLayout) -> SummaryReport {
    let totals = claim_totals(claims);
    let ratio_pct = overall_ratio_pct(ratios);

    let metrics = vec![
        SummaryMetric {
            name: "Total Claims",
            value: count(totals.claims),
        },
        SummaryMetric {
            name: "Total Billed",
            value: amount(totals.billed as f64),
        },
        SummaryMetric {
            name: "Total Accepted",
            value: amount(totals.accepted as f64),
        },
        SummaryMetric {
            name: "Total Excess",
            value: amount(totals.excess as f64),
        },
        SummaryMetric {
            name: "Total Unpaid",
            value: amount(totals.unpaid as f64),
        },
        SummaryMetric {
            name: "Claim Ratio (%)",
            value: ratio_pct.map(percent).unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        },
    ];

    SummaryReport {
        totals,
        ratio_pct,
        metrics,
        ratio_section: ratio_section(ratios, layout),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claims::build_claims;
    use crate::claims::tests::claim_table;
    use crate::models::RawTable;

    fn ratios(cols: &[&str], rows: &[Vec<Value>]) -> RatioTable {
        let mut t = RawTable::new(cols.iter().map(|c| c.to_string()).collect());
        for r in rows {
            t.push_row(r.clone());
        }
        t
    }

    fn n(v: f64) -> Value {
        Value::Number(v)
    }

    #[test]
    fn test_ratio_pct_over_deduplicated_rows() {
        let t = ratios(
            &["Policy No", "Claim", "Net Premi"],
            &[
                vec![Value::Text("P1".into()), n(100.0), n(1000.0)],
                vec![Value::Text("P2".into()), n(50.0), n(500.0)],
            ],
        );
        let report = build_summary(&[], &t, SummaryLayout::Horizontal);
        assert_eq!(report.ratio_pct, Some(10.0));
        assert_eq!(report.metrics[5].value, "10.00%");
    }

    #[test]
    fn test_zero_premium_reports_not_available() {
        let t = ratios(&["Claim", "Net Premi"], &[vec![n(100.0), n(0.0)]]);
        let report = build_summary(&[], &t, SummaryLayout::Horizontal);
        assert_eq!(report.ratio_pct, None);
        assert_eq!(report.metrics[5].name, "Claim Ratio (%)");
        assert_eq!(report.metrics[5].value, NOT_AVAILABLE);
    }

    #[test]
    fn test_missing_ratio_columns_report_not_available() {
        let t = ratios(&["Claim"], &[vec![n(100.0)]]);
        assert_eq!(overall_ratio_pct(&t), None);
        let empty = RawTable::default();
        assert_eq!(build_summary(&[], &empty, SummaryLayout::Vertical).metrics[5].value, "N/A");
    }

    #[test]
    fn test_claim_totals_truncate_and_format() {
        let claims = build_claims(&claim_table(&[
            ("R", "C1", "P1", "Ann", "2024-01-10", 1000.5),
            ("R", "C2", "P1", "Bob", "2024-01-11", 250.25),
            ("X", "C3", "P1", "Cid", "2024-01-12", 9999.0),
        ]))
        .unwrap()
        .records;
        let report = build_summary(&claims, &RawTable::default(), SummaryLayout::Horizontal);
        assert_eq!(report.totals.claims, 2);
        assert_eq!(report.totals.billed, 1250);
        assert_eq!(report.totals.accepted, 1000);
        assert_eq!(report.totals.excess, 250);
        let values: Vec<&str> = report.metrics.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["2", "1,250.00", "1,000.00", "250.00", "0.00", "N/A"]);
    }

    #[test]
    fn test_vertical_layout_one_block_per_policy() {
        let t = ratios(
            &["Policy No", "Claim"],
            &[
                vec![Value::Text("P1".into()), n(100.0)],
                vec![Value::Text("P2".into()), n(50.0)],
            ],
        );
        let report = build_summary(&[], &t, SummaryLayout::Vertical);
        match report.ratio_section {
            RatioSection::Vertical(blocks) => {
                assert_eq!(blocks.len(), 2);
                assert_eq!(blocks[1][0], ("Policy No".to_string(), Value::Text("P2".into())));
                assert_eq!(blocks[1][1], ("Claim".to_string(), n(50.0)));
            }
            other => panic!("expected vertical section, got {other:?}"),
        }
    }

    #[test]
    fn test_layout_deserializes_lowercase() {
        let l: SummaryLayout = serde_json::from_str("\"vertical\"").unwrap();
        assert_eq!(l, SummaryLayout::Vertical);
        assert_eq!(SummaryLayout::Horizontal.to_string(), "horizontal");
    }
}
