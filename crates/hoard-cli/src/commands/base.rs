use std::path::Path;

use colored::Colorize;

pub fn run(data: &Path, family: &str, name: &str) -> Result<(), String> {
    let tables = super::load_tables(data)?;
    let bases = super::base_family(&tables, family)?;
    let item = bases.get(name).map_err(|e| e.to_string())?;

    println!("  {} {}", item.name.bold(), format!("({} gp)", item.cost).dimmed());
    println!("    type: {}", item.kind);
    if !item.tags.is_empty() {
        let tags: Vec<&str> = item.tags.iter().map(String::as_str).collect();
        println!("    tags: {}", tags.join(", "));
    }
    if let Some(count) = item.count {
        println!("    count: {count}");
    }
    Ok(())
}
