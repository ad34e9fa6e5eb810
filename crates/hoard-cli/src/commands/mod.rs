pub mod base;
pub mod check;
pub mod roll;
pub mod spell;
pub mod tags;

use std::path::{Path, PathBuf};

use rand::SeedableRng;
use rand::rngs::StdRng;

use hoard_spells::Spellbook;
use hoard_tables::{BaseItems, Tables};

/// Load the table registry, mapping failures to a printable message.
fn load_tables(data_dir: &Path) -> Result<Tables, String> {
    Tables::load(data_dir).map_err(|e| e.to_string())
}

/// Open the spellbook with its cache next to the data files.
fn open_spellbook(data_dir: &Path) -> Result<Spellbook, String> {
    Spellbook::open(data_dir, &spell_cache_path(data_dir)).map_err(|e| e.to_string())
}

/// The spell cache lives alongside the source documents.
fn spell_cache_path(data_dir: &Path) -> PathBuf {
    data_dir.join(".spell-cache.json")
}

/// Seeded RNG when a seed is given, OS entropy otherwise.
fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Resolve a family argument to its base item list.
fn base_family<'a>(tables: &'a Tables, family: &str) -> Result<&'a BaseItems, String> {
    match family.to_lowercase().as_str() {
        "armor" | "armour" => Ok(&tables.armor.bases),
        "weapon" => Ok(&tables.weapon.bases),
        other => Err(format!(
            "unknown base item family \"{other}\" (expected armor or weapon)"
        )),
    }
}
