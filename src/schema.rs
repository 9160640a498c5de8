use crate::models::{RawTable, Value};

/// A logical column with the source names it may arrive under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Field {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
}

impl Field {
    pub const fn new(name: &'static str, aliases: &'static [&'static str]) -> Self {
        Self { name, aliases }
    }

    /// Candidate names in preference order, canonical name first.
    pub fn candidates(&self) -> impl Iterator<Item = &'static str> + '_ {
        std::iter::once(self.name).chain(self.aliases.iter().copied())
    }
}

/// Find the column for `field` and rename it to the canonical name. Returns
/// `false` when no candidate column exists.
pub fn resolve_field(table: &mut RawTable, field: &Field) -> bool {
    match field.candidates().find(|c| table.has_column(c)) {
        Some(found) => {
            table.rename_column(found, field.name);
            true
        }
        None => false,
    }
}

/// First candidate name present in the table, without renaming.
pub fn find_column<'a>(table: &RawTable, candidates: &[&'a str]) -> Option<&'a str> {
    candidates.iter().copied().find(|c| table.has_column(c))
}

pub fn trim_column_names(table: &mut RawTable) {
    for col in &mut table.columns {
        let trimmed = col.trim_start_matches('\u{feff}').trim();
        if trimmed.len() != col.len() {
            *col = trimmed.to_string();
        }
    }
}

pub fn trim_text_values(table: &mut RawTable) {
    for row in &mut table.rows {
        for cell in row.iter_mut() {
            if let Value::Text(s) = cell {
                let trimmed = s.trim();
                if trimmed.len() != s.len() {
                    *s = trimmed.to_string();
                }
            }
        }
    }
}

/// Apply a static source→display rename map. Columns not in the map keep
/// their names.
pub fn apply_renames(table: &mut RawTable, renames: &[(&str, &str)]) {
    for col in &mut table.columns {
        if let Some((_, to)) = renames.iter().find(|(from, _)| from == col) {
            *col = to.to_string();
        }
    }
}

pub fn drop_columns(table: &mut RawTable, names: &[&str]) {
    for name in names {
        table.drop_column(name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(cols: &[&str]) -> RawTable {
        RawTable::new(cols.iter().map(|c| c.to_string()).collect())
    }

    #[test]
    fn test_resolve_field_prefers_canonical_then_alias_order() {
        const STATUS: Field = Field::new("Status_Claim", &["Status Claim"]);
        let mut both = table(&["Status Claim", "Status_Claim"]);
        assert!(resolve_field(&mut both, &STATUS));
        assert_eq!(both.columns, vec!["Status Claim", "Status_Claim"]);

        let mut spaced = table(&["Status Claim"]);
        assert!(resolve_field(&mut spaced, &STATUS));
        assert_eq!(spaced.columns, vec!["Status_Claim"]);

        let mut none = table(&["Other"]);
        assert!(!resolve_field(&mut none, &STATUS));
    }

    #[test]
    fn test_trim_column_names_and_values() {
        let mut t = table(&["\u{feff}ClaimNo ", " Name"]);
        t.push_row(vec![Value::Text(" C1 ".into()), Value::Number(3.0)]);
        trim_column_names(&mut t);
        trim_text_values(&mut t);
        assert_eq!(t.columns, vec!["ClaimNo", "Name"]);
        assert_eq!(t.rows[0][0], Value::Text("C1".into()));
        assert_eq!(t.rows[0][1], Value::Number(3.0));
    }

    #[test]
    fn test_apply_renames_passes_unknown_columns() {
        let mut t = table(&["ClaimNo", "BenefitCode", "PolicyNo"]);
        apply_renames(&mut t, &[("ClaimNo", "Claim No"), ("PolicyNo", "Policy No")]);
        assert_eq!(t.columns, vec!["Claim No", "BenefitCode", "Policy No"]);
    }

    #[test]
    fn test_drop_columns_ignores_absent() {
        let mut t = table(&["Status_Claim", "Amount"]);
        drop_columns(&mut t, &["Status_Claim", "BAmount"]);
        assert_eq!(t.columns, vec!["Amount"]);
    }
}
