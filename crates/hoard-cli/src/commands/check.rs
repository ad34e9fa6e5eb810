use std::path::Path;

pub fn run(data: &Path) -> Result<(), String> {
    let tables = super::load_tables(data)?;
    let book = super::open_spellbook(data)?;
    let index = book.index();

    println!("  Loaded table data from '{}'.", data.display());
    println!();
    println!(
        "  armor: {} bases, {} enchantment types",
        tables.armor.bases.len(),
        tables.armor.enchants.kinds().len()
    );
    println!(
        "  weapon: {} bases, {} enchantment types",
        tables.weapon.bases.len(),
        tables.weapon.enchants.kinds().len()
    );
    for (family, ranks) in [
        ("ring", tables.ring.ranks()),
        ("rod", tables.rod.ranks()),
        ("staff", tables.staff.ranks()),
    ] {
        let names: Vec<&str> = ranks.iter().map(|r| r.as_str()).collect();
        println!("  {family}: ranks {}", names.join("/"));
    }
    println!("  keys: {} template keys", tables.keys.names().len());
    println!(
        "  spells: {} spells across {} classes",
        index.len(),
        index.classes().len()
    );
    Ok(())
}
