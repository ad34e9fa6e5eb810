//! Table loading and per-family stores for Hoard.
//!
//! Each item family (armor, weapon, rings, wondrous slots, potions,
//! spell-less flat tables, ...) is loaded once from a JSON document,
//! normalized into weighted tables keyed by rank and subrank, and held
//! immutable for the process lifetime. The [`Tables`] registry owns one
//! store per family and is passed by reference to the roll engine; there
//! is no global lookup.

/// Base item lists with tag filtering and fuzzy lookup.
pub mod base;
/// Per-rank compound tables (potions, scrolls, wands).
pub mod compound;
/// Enchantment tables with exclusion and tag constraints.
pub mod enchant;
/// Error types for loading and querying tables.
pub mod error;
/// Template-key string tables in their four source shapes.
pub mod keys;
/// Rank- and subrank-keyed weighted tables.
pub mod ranked;
/// Raw source-document loading helpers.
pub mod source;
/// The per-family registry constructed at startup.
pub mod store;

/// Re-export base item types.
pub use base::{BaseItem, BaseItems};
/// Re-export the compound table.
pub use compound::CompoundTable;
/// Re-export enchantment types.
pub use enchant::{Enchantment, EnchantmentTable};
/// Re-export error types.
pub use error::{TableError, TableResult};
/// Re-export template-key tables.
pub use keys::KeyTables;
/// Re-export the ranked table.
pub use ranked::RankedTable;
/// Re-export the registry and family stores.
pub use store::{CategoryTable, CombatFamily, Pattern, Tables, WondrousStore};
