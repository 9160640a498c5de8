use comfy_table::{Cell, Table};

use crate::error::Result;
use crate::profile::PROFILES;
use crate::settings::load_settings;

pub fn list() -> Result<()> {
    let current = load_settings().profile;
    let mut table = Table::new();
    table.set_header(vec!["Key", "Name", "Layout", "Claim key", "Ratio columns"]);
    for p in PROFILES {
        let key = if p.key == current {
            format!("{} *", p.key)
        } else {
            p.key.to_string()
        };
        table.add_row(vec![
            Cell::new(key),
            Cell::new(p.name),
            Cell::new(p.layout),
            Cell::new(p.benefit_claim_key),
            Cell::new(p.ratio_column_names().join(", ")),
        ]);
    }
    println!("{table}");
    Ok(())
}
