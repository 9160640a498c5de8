use crate::error::Result;
use crate::settings::load_settings;

use super::render::{claims_head, head_table, metrics_table, print_diagnostics, ratio_table};
use super::InputArgs;

pub fn run(inputs: &InputArgs, rows: usize) -> Result<()> {
    let settings = load_settings();
    let (rec, _) = super::run_inputs(inputs, &settings)?;

    print_diagnostics(&rec.diagnostics);

    println!("Claim Data Preview ({} rows)\n{}", rec.claims.len(), claims_head(&rec.claims, rows));
    println!(
        "Claim Ratio Data Preview ({} policies)\n{}",
        rec.ratios.len(),
        head_table(&rec.ratios.columns, &rec.ratios.rows, rows)
    );
    println!(
        "Benefit Data Preview ({} rows)\n{}",
        rec.benefits.len(),
        head_table(&rec.benefits.columns, &rec.benefits.rows, rows)
    );

    println!("Summary Preview\n{}", metrics_table(&rec.summary));
    if let Some(table) = ratio_table(&rec.summary) {
        println!("{table}");
    }
    Ok(())
}
