use hoard_core::{Category, CoreError, Rank, Slot};
use hoard_tables::TableError;

/// Alias for `Result<T, RollError>`.
pub type RollResult<T> = Result<T, RollError>;

/// Errors surfaced by the roll engine.
#[derive(Debug, thiserror::Error)]
pub enum RollError {
    /// The requested rank does not exist for the category (rods and
    /// staves have no minor rank).
    #[error("{category}s have no {rank} rank")]
    InvalidRank {
        /// The category rolled.
        category: Category,
        /// The out-of-domain rank.
        rank: Rank,
    },

    /// The least subrank was requested outside slotless wondrous items.
    #[error("the least subrank only exists for slotless wondrous items")]
    LeastRequiresSlotless,

    /// A slot was given for a category that has no slots.
    #[error("{category}s have no {slot} slot")]
    InvalidSlotForCategory {
        /// The category rolled.
        category: Category,
        /// The slot that was requested.
        slot: Slot,
    },

    /// A caster class was given for a category that carries no spell.
    #[error("a class is only valid when rolling a scroll or a wand")]
    ClassOnlyForScrollOrWand,

    /// A base item name was given for a category that has no base items.
    #[error("a base item is only valid when rolling armor or a weapon")]
    BaseOnlyForArmorOrWeapon,

    /// Enchantment selection dead-ended on every assembly attempt.
    #[error("too many failed attempts to assemble the item")]
    TooManyAttempts,

    /// Table cross-references exceeded the recursion ceiling.
    #[error("reroll loop detected while resolving \"{path}\"")]
    RerollLoop {
        /// The path that was being re-dispatched when the ceiling hit.
        path: String,
    },

    /// A reroll directive contained an unparseable segment.
    #[error("bad reroll segment: \"{segment}\"")]
    BadRerollPath {
        /// The segment that is not a rank, subrank, category, or slot.
        segment: String,
    },

    /// A table store error.
    #[error(transparent)]
    Table(#[from] TableError),

    /// A core vocabulary or draw error.
    #[error(transparent)]
    Core(#[from] CoreError),
}
