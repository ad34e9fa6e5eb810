use std::path::Path;

use comfy_table::{ContentArrangement, Table, presets::UTF8_FULL};

pub fn run(data: &Path, family: &str) -> Result<(), String> {
    let tables = super::load_tables(data)?;
    let bases = super::base_family(&tables, family)?;

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![format!("{family} filter tags")]);
    for tag in bases.tags() {
        table.add_row(vec![tag]);
    }
    println!("{table}");
    Ok(())
}
