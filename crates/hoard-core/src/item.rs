//! Roll result types.
//!
//! A [`RolledItem`] is what the engine hands to the presentation layer:
//! a name template (possibly carrying `{key:...}` and `{spell}`
//! placeholders), an optional cost, an optional spell request, and an
//! optional reroll directive. The engine resolves reroll directives
//! itself; the other placeholders are the renderer's job.

use serde::{Deserialize, Serialize};

/// Parameters for a constrained random spell lookup.
///
/// Embedded in spell-bearing items (potions, scrolls, wands); the
/// presentation layer resolves it against the spell index when it
/// substitutes the item's `{spell}` placeholder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellRequest {
    /// Spell level to match exactly, if constrained.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<u8>,
    /// Class column to resolve against (a class name or one of the
    /// pseudo-classes `minimum`, `spellpage`, `spellpage_arcane`,
    /// `spellpage_divine`, `random`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
    /// School, subschool, or descriptor tag the spell must carry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

/// A table cross-reference: path segments naming another table to roll on.
///
/// Each segment is a rank, subrank, category, or slot in any order.
/// An item carrying one of these is a pointer, not a terminal result,
/// and must be re-dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RerollPath(pub Vec<String>);

impl RerollPath {
    /// The path segments in data order.
    pub fn segments(&self) -> &[String] {
        &self.0
    }
}

impl std::fmt::Display for RerollPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.join("/"))
    }
}

/// A fully resolved roll result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolledItem {
    /// Item name template. May embed `{key:NAME}` / `{key:NAME:SUBKEY}`
    /// lookups and a `{spell}` placeholder.
    pub name: String,
    /// Market price in gold pieces, when the table defines one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<u64>,
    /// Spell lookup request backing the `{spell}` placeholder.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spell: Option<SpellRequest>,
    /// Cross-reference to another table; resolved by the dispatcher,
    /// never surfaced to callers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reroll: Option<RerollPath>,
}

impl RolledItem {
    /// A terminal item with just a name and an optional cost.
    pub fn named(name: impl Into<String>, cost: Option<u64>) -> Self {
        Self {
            name: name.into(),
            cost,
            ..Self::default()
        }
    }
}
