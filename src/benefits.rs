use std::collections::HashSet;

use tracing::debug;

use crate::claims::SETTLED_STATUS;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::models::{BenefitTable, RawTable, Value};
use crate::profile::{ReportProfile, BENEFIT_CLAIM_KEY_ALIASES};
use crate::schema::{self, Field};

/// The underscore spelling wins when a file carries both.
pub const BENEFIT_STATUS: Field = Field::new("Status_Claim", &["Status Claim"]);

pub const DROPPED_COLUMNS: &[&str] = &["Status_Claim", "BAmount"];

/// Filter by status when a status column exists.
fn filter_status(table: &mut RawTable, diagnostics: &mut Diagnostics) {
    let Some(column) = schema::find_column(table, &BENEFIT_STATUS.candidates().collect::<Vec<_>>())
    else {
        diagnostics.push(Diagnostic::BenefitStatusMissing);
        return;
    };
    let Some(idx) = table.column_index(column) else {
        return;
    };
    let before = table.len();
    table.retain_rows(|row| matches!(row.get(idx), Some(Value::Text(s)) if s == SETTLED_STATUS));
    debug!(column, kept = table.len(), dropped = before - table.len(), "benefit status filter");
}

/// Settle the claim-number column on the profile's canonical name.
fn canonical_claim_key(table: &mut RawTable, profile: &ReportProfile) -> bool {
    let mut candidates = vec![profile.benefit_claim_key];
    candidates.extend(
        BENEFIT_CLAIM_KEY_ALIASES
            .iter()
            .copied()
            .filter(|a| *a != profile.benefit_claim_key),
    );
    match schema::find_column(table, &candidates) {
        Some(found) => {
            table.rename_column(found, profile.benefit_claim_key);
            true
        }
        None => false,
    }
}

/// Benefit lines for settled claims only.
pub fn build_benefits(
    mut table: RawTable,
    claim_keys: &HashSet<String>,
    profile: &ReportProfile,
) -> (BenefitTable, Diagnostics) {
    let mut diagnostics = Diagnostics::new();

    filter_status(&mut table, &mut diagnostics);
    schema::trim_column_names(&mut table);
    schema::trim_text_values(&mut table);
    schema::apply_renames(&mut table, profile.benefit_renames);
    schema::drop_columns(&mut table, DROPPED_COLUMNS);

    if canonical_claim_key(&mut table, profile) {
        if let Some(idx) = table.column_index(profile.benefit_claim_key) {
            let before = table.len();
            table.retain_rows(|row| {
                row.get(idx)
                    .and_then(Value::key)
                    .is_some_and(|k| claim_keys.contains(&k))
            });
            debug!(kept = table.len(), dropped = before - table.len(), "benefit claim filter");
        }
    } else {
        diagnostics.push(Diagnostic::BenefitClaimKeyMissing {
            column: profile.benefit_claim_key.to_string(),
        });
    }

    (table, diagnostics)
}
