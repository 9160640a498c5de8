use std::path::Path;

use tracing::info;

use crate::benefits::build_benefits;
use crate::claims::build_claims;
use crate::diagnostics::Diagnostics;
use crate::error::Result;
use crate::loader::load_table;
use crate::models::{BenefitTable, ClaimRecord, RatioTable, RawTable};
use crate::profile::ReportProfile;
use crate::ratio::build_ratios;
use crate::summary::{build_summary, SummaryLayout, SummaryReport};

pub struct Inputs {
    pub claims: RawTable,
    pub ratios: RawTable,
    pub benefits: RawTable,
}

impl Inputs {
    pub fn load(claims: &Path, ratios: &Path, benefits: &Path) -> Result<Self> {
        Ok(Self {
            claims: load_table(claims)?,
            ratios: load_table(ratios)?,
            benefits: load_table(benefits)?,
        })
    }
}

pub struct Reconciliation {
    pub claims: Vec<ClaimRecord>,
    pub ratios: RatioTable,
    pub benefits: BenefitTable,
    pub summary: SummaryReport,
    pub diagnostics: Diagnostics,
}

/// Run claim, claim-ratio and benefit processing and build the summary.
/// A missing claim column aborts the run; every other problem is reported
/// in `diagnostics`.
pub fn reconcile(inputs: Inputs, profile: &ReportProfile, layout: Option<SummaryLayout>) -> Result<Reconciliation> {
    let layout = layout.unwrap_or(profile.layout);

    let claim_batch = build_claims(&inputs.claims)?;
    let mut diagnostics = Diagnostics::new();

    let (ratios, ratio_diags) = build_ratios(inputs.ratios, &claim_batch.policy_keys(), profile);
    let (benefits, benefit_diags) = build_benefits(inputs.benefits, &claim_batch.claim_keys(), profile);

    diagnostics.extend(claim_batch.diagnostics);
    diagnostics.extend(ratio_diags);
    diagnostics.extend(benefit_diags);

    let summary = build_summary(&claim_batch.records, &ratios, layout);
    info!(
        profile = profile.key,
        %layout,
        claims = claim_batch.records.len(),
        policies = ratios.len(),
        benefits = benefits.len(),
        "reconciliation complete"
    );

    Ok(Reconciliation {
        claims: claim_batch.records,
        ratios,
        benefits,
        summary,
        diagnostics,
    })
}
