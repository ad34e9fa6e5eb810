use std::path::Path;

use colored::Colorize;

use hoard_spells::ClassSelector;

pub fn run(
    data: &Path,
    level: Option<u8>,
    class: &str,
    tag: Option<&str>,
    seed: Option<u64>,
) -> Result<(), String> {
    let book = super::open_spellbook(data)?;
    let mut rng = super::make_rng(seed);

    let selector = ClassSelector::parse(class);
    let pick = book
        .random(&mut rng, level, &selector, tag)
        .map_err(|e| e.to_string())?;

    println!(
        "  {} {}",
        pick.name.bold(),
        format!("({} {}, CL {})", pick.class, pick.level, pick.caster_level).dimmed()
    );
    Ok(())
}
