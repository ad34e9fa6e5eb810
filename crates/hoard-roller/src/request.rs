//! Roll requests.

use hoard_core::{Category, Rank, RerollPath, Slot, Subrank};

use crate::error::{RollError, RollResult};

/// What to roll. Everything is optional: omitted parts are drawn
/// randomly where the tables allow it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollRequest {
    /// Power tier, or random.
    pub rank: Option<Rank>,
    /// Tier within the rank, or random.
    pub subrank: Option<Subrank>,
    /// Item kind, or drawn from the rank's category distribution.
    pub category: Option<Category>,
    /// Wondrous body slot, or random. Implies wondrous when the
    /// category is omitted.
    pub slot: Option<Slot>,
    /// Caster class override for scroll and wand spells.
    pub class: Option<String>,
    /// Base item override for armor and weapon assembly.
    pub base_name: Option<String>,
}

impl RollRequest {
    /// A request for a category at a given rank.
    pub fn category(rank: Rank, category: Category) -> Self {
        Self {
            rank: Some(rank),
            category: Some(category),
            ..Self::default()
        }
    }

    /// Build a request from a reroll directive's path segments.
    ///
    /// Segments name a rank, subrank, category, or slot in any order;
    /// anything else fails with [`RollError::BadRerollPath`].
    pub fn from_reroll_path(path: &RerollPath) -> RollResult<Self> {
        let mut request = Self::default();
        for segment in path.segments() {
            if let Ok(rank) = Rank::parse(segment) {
                request.rank = Some(rank);
            } else if let Ok(subrank) = Subrank::parse(segment) {
                request.subrank = Some(subrank);
            } else if let Ok(category) = Category::parse(segment) {
                request.category = Some(category);
            } else if let Ok(slot) = Slot::parse(segment) {
                request.slot = Some(slot);
            } else {
                return Err(RollError::BadRerollPath {
                    segment: segment.clone(),
                });
            }
        }
        Ok(request)
    }
}
