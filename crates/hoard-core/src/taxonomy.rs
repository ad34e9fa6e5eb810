//! Closed enumerations for the treasure taxonomy.
//!
//! Every enum converts from user-supplied strings through a checked
//! `parse` that rejects anything outside the fixed vocabulary. There is
//! deliberately no way to intern an arbitrary string as one of these types.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Coarse power tier of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rank {
    /// Low-value treasure.
    Minor,
    /// Mid-value treasure.
    Medium,
    /// High-value treasure.
    Major,
}

impl Rank {
    /// Parse a rank from a user-supplied string.
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.to_lowercase().trim() {
            "minor" => Ok(Self::Minor),
            "medium" => Ok(Self::Medium),
            "major" => Ok(Self::Major),
            other => Err(CoreError::UnknownRank(other.to_string())),
        }
    }

    /// All ranks in ascending power order.
    pub fn all() -> &'static [Self] {
        &[Self::Minor, Self::Medium, Self::Major]
    }

    /// The lowercase table key for this rank.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Minor => "minor",
            Self::Medium => "medium",
            Self::Major => "major",
        }
    }
}

impl std::fmt::Display for Rank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fine-grained tier within a rank.
///
/// `Least` is only valid for slotless minor wondrous items; that constraint
/// is enforced by table key shape and by the roll dispatcher, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Subrank {
    /// The weakest tier, below lesser.
    Least,
    /// The lower standard tier.
    Lesser,
    /// The higher standard tier.
    Greater,
}

impl Subrank {
    /// Parse a subrank from a user-supplied string.
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.to_lowercase().trim() {
            "least" => Ok(Self::Least),
            "lesser" => Ok(Self::Lesser),
            "greater" => Ok(Self::Greater),
            other => Err(CoreError::UnknownSubrank(other.to_string())),
        }
    }

    /// All subranks in ascending power order.
    pub fn all() -> &'static [Self] {
        &[Self::Least, Self::Lesser, Self::Greater]
    }

    /// The two standard subranks present in every sub-ranked table.
    pub fn standard() -> &'static [Self] {
        &[Self::Lesser, Self::Greater]
    }

    /// Whether this is one of the standard subranks (lesser or greater).
    pub fn is_standard(self) -> bool {
        matches!(self, Self::Lesser | Self::Greater)
    }

    /// The lowercase table key for this subrank.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Least => "least",
            Self::Lesser => "lesser",
            Self::Greater => "greater",
        }
    }
}

impl std::fmt::Display for Subrank {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Top-level item kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Magic armor and shields.
    Armor,
    /// Magic weapons and ammunition.
    Weapon,
    /// Single-use drinkable spells.
    Potion,
    /// Magic rings.
    Ring,
    /// Magic rods (no minor rank).
    Rod,
    /// Single-use written spells.
    Scroll,
    /// Magic staves (no minor rank).
    Staff,
    /// Charged spell-trigger items.
    Wand,
    /// Slotted and slotless wondrous items.
    Wondrous,
}

impl Category {
    /// Parse a category from a user-supplied string.
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.to_lowercase().trim() {
            "armor" | "armour" => Ok(Self::Armor),
            "weapon" => Ok(Self::Weapon),
            "potion" => Ok(Self::Potion),
            "ring" => Ok(Self::Ring),
            "rod" => Ok(Self::Rod),
            "scroll" => Ok(Self::Scroll),
            "staff" => Ok(Self::Staff),
            "wand" => Ok(Self::Wand),
            "wondrous" => Ok(Self::Wondrous),
            other => Err(CoreError::UnknownCategory(other.to_string())),
        }
    }

    /// All categories.
    pub fn all() -> &'static [Self] {
        &[
            Self::Armor,
            Self::Weapon,
            Self::Potion,
            Self::Ring,
            Self::Rod,
            Self::Scroll,
            Self::Staff,
            Self::Wand,
            Self::Wondrous,
        ]
    }

    /// Whether this category has no minor rank (rods and staves).
    pub fn lacks_minor(self) -> bool {
        matches!(self, Self::Rod | Self::Staff)
    }

    /// Whether this category embeds a spell roll in its items.
    pub fn is_spell_bearing(self) -> bool {
        matches!(self, Self::Potion | Self::Scroll | Self::Wand)
    }

    /// The lowercase table key for this category.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Armor => "armor",
            Self::Weapon => "weapon",
            Self::Potion => "potion",
            Self::Ring => "ring",
            Self::Rod => "rod",
            Self::Scroll => "scroll",
            Self::Staff => "staff",
            Self::Wand => "wand",
            Self::Wondrous => "wondrous",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body location a wondrous item occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Slot {
    /// Waist slot.
    Belt,
    /// Robes and vestments.
    Body,
    /// Chest slot.
    Chest,
    /// Goggles and lenses.
    Eyes,
    /// Boots and shoes.
    Feet,
    /// Gloves and gauntlets.
    Hands,
    /// Hats and helms.
    Head,
    /// Circlets and headbands.
    Headband,
    /// Amulets and periapts.
    Neck,
    /// Cloaks and capes.
    Shoulders,
    /// Bracers and bracelets.
    Wrists,
    /// Items occupying no body slot.
    Slotless,
}

impl Slot {
    /// Parse a slot from a user-supplied string.
    pub fn parse(s: &str) -> CoreResult<Self> {
        match s.to_lowercase().trim() {
            "belt" => Ok(Self::Belt),
            "body" => Ok(Self::Body),
            "chest" => Ok(Self::Chest),
            "eyes" => Ok(Self::Eyes),
            "feet" => Ok(Self::Feet),
            "hands" => Ok(Self::Hands),
            "head" => Ok(Self::Head),
            "headband" => Ok(Self::Headband),
            "neck" => Ok(Self::Neck),
            "shoulders" => Ok(Self::Shoulders),
            "wrists" => Ok(Self::Wrists),
            "slotless" => Ok(Self::Slotless),
            other => Err(CoreError::UnknownSlot(other.to_string())),
        }
    }

    /// All slots.
    pub fn all() -> &'static [Self] {
        &[
            Self::Belt,
            Self::Body,
            Self::Chest,
            Self::Eyes,
            Self::Feet,
            Self::Hands,
            Self::Head,
            Self::Headband,
            Self::Neck,
            Self::Shoulders,
            Self::Wrists,
            Self::Slotless,
        ]
    }

    /// The lowercase table key for this slot.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Belt => "belt",
            Self::Body => "body",
            Self::Chest => "chest",
            Self::Eyes => "eyes",
            Self::Feet => "feet",
            Self::Hands => "hands",
            Self::Head => "head",
            Self::Headband => "headband",
            Self::Neck => "neck",
            Self::Shoulders => "shoulders",
            Self::Wrists => "wrists",
            Self::Slotless => "slotless",
        }
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
