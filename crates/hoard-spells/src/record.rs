//! Spell records, source and compiled.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// A spell as written in `spells.json`.
#[derive(Debug, Clone, Deserialize)]
pub struct SpellSource {
    /// Spell name.
    pub name: String,
    /// Spell level per class that learns it directly.
    pub levels: BTreeMap<String, u8>,
    /// School of magic.
    pub school: String,
    /// Subschool, when the school has one.
    #[serde(default)]
    pub subschool: Option<String>,
    /// Descriptors (fire, mind-affecting, ...).
    #[serde(default)]
    pub descriptors: Vec<String>,
}

/// A column value: the class that provides a derived level, and the level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevel {
    /// Class the level comes from.
    pub class: String,
    /// Spell level for that class.
    pub level: u8,
}

/// A compiled spell row: resolved per-class levels plus the derived
/// columns and tag set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpellRecord {
    /// Spell name.
    pub name: String,
    /// Resolved spell level per class, aliases included.
    pub levels: BTreeMap<String, u8>,
    /// Lowest level across all classes; ties go to the first class in
    /// canonical order.
    pub minimum: ClassLevel,
    /// Wizard's level when the wizard learns it, else the highest level
    /// among other arcane classes; absent for purely non-arcane spells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spellpage_arcane: Option<ClassLevel>,
    /// Cleric's level when the cleric learns it, else the highest level
    /// among other divine classes; absent for purely non-divine spells.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub spellpage_divine: Option<ClassLevel>,
    /// Lowercased school, subschool, and descriptor tokens.
    pub tags: BTreeSet<String>,
}

impl SpellRecord {
    /// The record's level in a named class column, when present.
    pub fn level_for(&self, class: &str) -> Option<u8> {
        self.levels.get(class).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_deserializes_with_optional_fields() {
        let spell: SpellSource = serde_json::from_str(
            r#"{"name": "fireball", "levels": {"wizard": 3},
                "school": "evocation", "descriptors": ["fire"]}"#,
        )
        .unwrap();
        assert_eq!(spell.name, "fireball");
        assert_eq!(spell.levels["wizard"], 3);
        assert!(spell.subschool.is_none());
        assert_eq!(spell.descriptors, vec!["fire"]);
    }

    #[test]
    fn record_round_trips_through_json() {
        let record = SpellRecord {
            name: "bless".to_string(),
            levels: [("cleric".to_string(), 1)].into(),
            minimum: ClassLevel {
                class: "cleric".to_string(),
                level: 1,
            },
            spellpage_arcane: None,
            spellpage_divine: Some(ClassLevel {
                class: "cleric".to_string(),
                level: 1,
            }),
            tags: ["enchantment".to_string()].into(),
        };
        let json = serde_json::to_string(&record).unwrap();
        let back: SpellRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back.name, record.name);
        assert_eq!(back.minimum, record.minimum);
        assert!(back.spellpage_arcane.is_none());
        assert_eq!(back.level_for("cleric"), Some(1));
    }
}
