use std::collections::HashSet;

use tracing::debug;

use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::models::{RatioTable, RawTable, Value};
use crate::profile::{ReportProfile, RATIO_POLICY};
use crate::schema;

/// Claim-ratio rows for the policies present in the claim set, one per
/// policy, projected onto the profile's column list.
pub fn build_ratios(
    mut table: RawTable,
    policy_keys: &HashSet<String>,
    profile: &ReportProfile,
) -> (RatioTable, Diagnostics) {
    let mut diagnostics = Diagnostics::new();

    schema::trim_column_names(&mut table);
    for field in profile.ratio_columns {
        schema::resolve_field(&mut table, field);
    }

    let Some(policy_idx) = table.column_index(RATIO_POLICY.name) else {
        diagnostics.push(Diagnostic::RatioPolicyMissing);
        let columns = profile
            .ratio_column_names()
            .into_iter()
            .filter(|c| table.has_column(c))
            .map(String::from)
            .collect();
        return (RawTable::new(columns), diagnostics);
    };

    let before = table.len();
    table.retain_rows(|row| {
        row.get(policy_idx)
            .and_then(Value::key)
            .is_some_and(|k| policy_keys.contains(&k))
    });

    let mut seen = HashSet::new();
    table.retain_rows(|row| {
        let key = row.get(policy_idx).and_then(Value::key).unwrap_or_default();
        seen.insert(key)
    });
    debug!(kept = table.len(), dropped = before - table.len(), "claim ratio policy filter");

    let wanted = profile.ratio_column_names();
    let missing: Vec<String> = wanted
        .iter()
        .filter(|c| !table.has_column(c))
        .map(|c| c.to_string())
        .collect();
    if !missing.is_empty() {
        diagnostics.push(Diagnostic::MissingRatioColumns(missing));
    }

    (table.project(&wanted), diagnostics)
}
