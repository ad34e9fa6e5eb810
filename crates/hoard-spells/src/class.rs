//! Spellcasting class definitions.
//!
//! A class carries a caster-level table indexed by spell level and an
//! optional alias: `copy` takes another class's spell list wholesale,
//! `merge` takes the minimum level across several other classes. File
//! order of `classes.json` is the canonical class order used for every
//! deterministic tie-break.

use serde::{Deserialize, Serialize};

/// Magical tradition of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    /// Arcane casters (wizard-side spellpage lookups).
    Arcane,
    /// Divine casters (cleric-side spellpage lookups).
    Divine,
    /// Occult casters (neither spellpage side).
    Occult,
}

/// One spellcasting class.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassDef {
    /// Class identifier, lowercase.
    pub name: String,
    /// Magical tradition.
    pub kind: ClassKind,
    /// Minimum caster level per spell level; index is the spell level,
    /// `null` marks a spell level the class never gets (no cantrips for
    /// paladins). The table length bounds the class's deepest level.
    pub levels: Vec<Option<u32>>,
    /// Take this class's spell levels from another class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub copy: Option<String>,
    /// Take the minimum spell level across these classes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub merge: Vec<String>,
}

impl ClassDef {
    /// Deepest spell level this class can reach, from its table length.
    pub fn max_level(&self) -> u8 {
        self.levels.len().saturating_sub(1) as u8
    }

    /// Caster level needed for a spell of the given level, when the
    /// class reaches that level at all.
    pub fn caster_level(&self, spell_level: u8) -> Option<u32> {
        self.levels.get(usize::from(spell_level)).copied().flatten()
    }
}
