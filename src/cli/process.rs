use colored::Colorize;

use crate::error::Result;
use crate::settings::{load_settings, shellexpand_path};
use crate::workbook::{output_path, write_report};

use super::render::{metrics_table, print_diagnostics};
use super::InputArgs;

pub fn run(inputs: &InputArgs, name: Option<String>, output_dir: Option<String>) -> Result<()> {
    let settings = load_settings();
    let (rec, profile) = super::run_inputs(inputs, &settings)?;

    print_diagnostics(&rec.diagnostics);
    println!(
        "{} claims, {} policies, {} benefit lines ({})",
        rec.claims.len(),
        rec.ratios.len(),
        rec.benefits.len(),
        profile.key
    );
    println!("Summary\n{}", metrics_table(&rec.summary));

    let name = name
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| settings.default_name.clone());
    let dir = shellexpand_path(output_dir.as_deref().unwrap_or(&settings.output_dir));
    let path = output_path(&dir, &name);
    write_report(&rec.claims, &rec.benefits, &rec.summary, &path)?;

    println!("{} {}", "Wrote".green().bold(), path.display());
    Ok(())
}
