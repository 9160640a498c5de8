use crate::error::{ClaimsheetError, Result};
use crate::schema::Field;
use crate::summary::SummaryLayout;

/// Per-report configuration: how benefit columns are renamed, which
/// claim-ratio columns are reported, and how the summary is laid out.
#[derive(Debug, Clone, Copy)]
pub struct ReportProfile {
    pub key: &'static str,
    pub name: &'static str,
    pub benefit_renames: &'static [(&'static str, &'static str)],
    /// Canonical benefit claim-number column, settled right after renaming.
    pub benefit_claim_key: &'static str,
    pub ratio_columns: &'static [Field],
    pub layout: SummaryLayout,
}

/// Claim-number column names a benefit file may carry.
pub const BENEFIT_CLAIM_KEY_ALIASES: &[&str] = &["Claim No", "ClaimNo", "Claim_No"];

pub const RATIO_POLICY: Field = Field::new("Policy No", &["PolicyNo", "Policy_No"]);

const DETAILED_BENEFIT_RENAMES: &[(&str, &str)] = &[
    ("ClientName", "Client Name"),
    ("PolicyNo", "Policy No"),
    ("ClaimNo", "Claim No"),
    ("MemberNo", "Member No"),
    ("EmpID", "Emp ID"),
    ("EmpName", "Emp Name"),
    ("PatientName", "Patient Name"),
    ("ProductType", "Product Type"),
    ("ClaimType", "Claim Type"),
    ("RoomOption", "Room Option"),
    ("PPlan", "Plan"),
    ("PrimaryDiagnosis", "Diagnosis"),
    ("TreatmentPlace", "Treatment Place"),
    ("TreatmentStart", "Treatment Start"),
    ("TreatmentFinish", "Treatment Finish"),
    ("BenefitCode", "Benefit Code"),
    ("BenefitName", "Benefit Name"),
    ("BBilled", "Billed"),
    ("BAccepted", "Accepted"),
];

const STANDARD_RATIO_COLUMNS: &[Field] = &[
    RATIO_POLICY,
    Field::new("Company", &[]),
    Field::new("Net Premi", &["NetPremi", "Net Premium"]),
    Field::new("Billed", &[]),
    Field::new("Unpaid", &[]),
    Field::new("ExcessTotal", &["Excess Total"]),
    Field::new("ExcessCoy", &["Excess Coy"]),
    Field::new("ExcessEmp", &["Excess Emp"]),
    Field::new("Claim", &[]),
    Field::new("CR", &[]),
    Field::new("Est Claim", &["Est CR Total"]),
];

const DETAILED_RATIO_COLUMNS: &[Field] = &[
    RATIO_POLICY,
    Field::new("Company", &[]),
    Field::new("Net Premi", &["NetPremi", "Net Premium"]),
    Field::new("Billed", &[]),
    Field::new("Unpaid", &[]),
    Field::new("Excess Total", &["ExcessTotal"]),
    Field::new("Excess Coy", &["ExcessCoy"]),
    Field::new("Excess Emp", &["ExcessEmp"]),
    Field::new("Claim", &[]),
    Field::new("CR", &[]),
    Field::new("Est Claim", &["Est CR Total"]),
];

pub const PROFILES: &[ReportProfile] = &[
    ReportProfile {
        key: "standard",
        name: "Standard (source benefit columns, policy table)",
        benefit_renames: &[],
        benefit_claim_key: "ClaimNo",
        ratio_columns: STANDARD_RATIO_COLUMNS,
        layout: SummaryLayout::Horizontal,
    },
    ReportProfile {
        key: "detailed",
        name: "Detailed (display benefit columns, per-policy blocks)",
        benefit_renames: DETAILED_BENEFIT_RENAMES,
        benefit_claim_key: "Claim No",
        ratio_columns: DETAILED_RATIO_COLUMNS,
        layout: SummaryLayout::Vertical,
    },
];

pub fn get_by_key(key: &str) -> Result<&'static ReportProfile> {
    PROFILES
        .iter()
        .find(|p| p.key.eq_ignore_ascii_case(key.trim()))
        .ok_or_else(|| ClaimsheetError::UnknownProfile(key.to_string()))
}

impl ReportProfile {
    pub fn ratio_column_names(&self) -> Vec<&'static str> {
        self.ratio_columns.iter().map(|f| f.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_key() {
        assert_eq!(get_by_key("standard").unwrap().key, "standard");
        assert_eq!(get_by_key(" Detailed ").unwrap().key, "detailed");
        assert!(matches!(
            get_by_key("nope"),
            Err(ClaimsheetError::UnknownProfile(k)) if k == "nope"
        ));
    }

    #[test]
    fn test_profiles_report_policy_first() {
        for p in PROFILES {
            assert_eq!(p.ratio_column_names()[0], "Policy No");
            assert!(p.ratio_column_names().contains(&"Claim"));
            assert!(p.ratio_column_names().contains(&"Net Premi"));
        }
    }

    #[test]
    fn test_renamed_claim_key_matches_rename_map() {
        for p in PROFILES {
            let renamed = p
                .benefit_renames
                .iter()
                .find(|(from, _)| *from == "ClaimNo")
                .map(|(_, to)| *to)
                .unwrap_or("ClaimNo");
            assert_eq!(renamed, p.benefit_claim_key);
        }
    }
}
