//! The top-level recursive roll function.
//!
//! Resolution order: structural validation, then category dispatch,
//! then reroll directives. A reroll directive marks the drawn entry as
//! a pointer into another table; it is re-dispatched through the same
//! function with a bounded depth, since externally edited table data
//! could contain a cycle.

use rand::rngs::StdRng;

use hoard_core::{Category, Rank, RolledItem, Slot, Subrank};
use hoard_tables::{Tables, WondrousStore};

use crate::assemble::{CostModel, assemble};
use crate::error::{RollError, RollResult};
use crate::request::RollRequest;

/// Reroll directives deeper than this are treated as a cycle.
pub const MAX_REROLL_DEPTH: u8 = 8;

/// Resolve a roll request into a concrete item.
pub fn roll(tables: &Tables, rng: &mut StdRng, request: &RollRequest) -> RollResult<RolledItem> {
    roll_at_depth(tables, rng, request, 0)
}

fn roll_at_depth(
    tables: &Tables,
    rng: &mut StdRng,
    request: &RollRequest,
    depth: u8,
) -> RollResult<RolledItem> {
    validate(request)?;

    // A slot with no category means the slot key itself names the table.
    let category = match (request.category, request.slot) {
        (None, Some(_)) => Some(Category::Wondrous),
        (category, _) => category,
    };

    let item = match category {
        None => {
            let rank = match request.rank {
                Some(rank) => rank,
                None => *hoard_core::draw_uniform(Rank::all(), rng)?,
            };
            let drawn = tables.category.random(rng, rank)?;
            let mut next = request.clone();
            next.rank = Some(rank);
            next.category = Some(drawn);
            return roll_at_depth(tables, rng, &next, depth);
        }
        Some(Category::Wondrous) => {
            let slot = match request.slot {
                Some(slot) => slot,
                None => WondrousStore::random_slot(rng)?,
            };
            tables
                .wondrous
                .table(slot)?
                .random(rng, request.rank, request.subrank)?
                .clone()
        }
        Some(Category::Ring) => tables
            .ring
            .random(rng, request.rank, request.subrank)?
            .clone(),
        Some(Category::Rod) => tables
            .rod
            .random(rng, request.rank, request.subrank)?
            .clone(),
        Some(Category::Staff) => tables
            .staff
            .random(rng, request.rank, request.subrank)?
            .clone(),
        Some(Category::Potion) => tables.potion.random(rng, request.rank)?.clone(),
        Some(Category::Scroll) => {
            with_class(tables.scroll.random(rng, request.rank)?.clone(), request)
        }
        Some(Category::Wand) => {
            with_class(tables.wand.random(rng, request.rank)?.clone(), request)
        }
        Some(Category::Armor) => roll_combat(&tables.armor, CostModel::ARMOR, rng, request)?,
        Some(Category::Weapon) => roll_combat(&tables.weapon, CostModel::WEAPON, rng, request)?,
    };

    follow_reroll(tables, rng, item, depth)
}

/// Structural constraints checked before any table access.
fn validate(request: &RollRequest) -> RollResult<()> {
    if request.class.is_some()
        && !matches!(
            request.category,
            Some(Category::Scroll) | Some(Category::Wand)
        )
    {
        return Err(RollError::ClassOnlyForScrollOrWand);
    }
    if request.base_name.is_some()
        && !matches!(
            request.category,
            Some(Category::Armor) | Some(Category::Weapon)
        )
    {
        return Err(RollError::BaseOnlyForArmorOrWeapon);
    }
    if let Some(slot) = request.slot
        && let Some(category) = request.category
        && category != Category::Wondrous
    {
        return Err(RollError::InvalidSlotForCategory { category, slot });
    }
    if let Some(category) = request.category
        && category.lacks_minor()
        && request.rank == Some(Rank::Minor)
    {
        return Err(RollError::InvalidRank {
            category,
            rank: Rank::Minor,
        });
    }
    if request.subrank == Some(Subrank::Least) {
        let wondrous = matches!(request.category, None | Some(Category::Wondrous));
        if !wondrous || request.slot != Some(Slot::Slotless) {
            return Err(RollError::LeastRequiresSlotless);
        }
    }
    Ok(())
}

/// Armor and weapons: draw a pattern, then either resolve a specific
/// item or assemble an enchanted one.
fn roll_combat(
    family: &hoard_tables::CombatFamily,
    costs: CostModel,
    rng: &mut StdRng,
    request: &RollRequest,
) -> RollResult<RolledItem> {
    let pattern = family
        .patterns
        .random(rng, request.rank, request.subrank)?
        .clone();
    match &pattern.specific {
        Some(sub_table) => Ok(family
            .specific(sub_table)?
            .random(rng, request.rank, request.subrank)?
            .clone()),
        None => assemble(family, costs, &pattern, request.base_name.as_deref(), rng),
    }
}

/// Rewrite a spell-bearing item's request with the caller's class.
fn with_class(mut item: RolledItem, request: &RollRequest) -> RolledItem {
    if let Some(class) = &request.class {
        item.spell.get_or_insert_default().class = Some(class.clone());
    }
    item
}

/// Re-dispatch items that are table cross-references.
fn follow_reroll(
    tables: &Tables,
    rng: &mut StdRng,
    item: RolledItem,
    depth: u8,
) -> RollResult<RolledItem> {
    let Some(path) = &item.reroll else {
        return Ok(item);
    };
    if depth >= MAX_REROLL_DEPTH {
        return Err(RollError::RerollLoop {
            path: path.to_string(),
        });
    }
    let next = RollRequest::from_reroll_path(path)?;
    roll_at_depth(tables, rng, &next, depth + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_requires_scroll_or_wand() {
        let mut request = RollRequest::category(Rank::Medium, Category::Ring);
        request.class = Some("wizard".to_string());
        assert!(matches!(
            validate(&request),
            Err(RollError::ClassOnlyForScrollOrWand)
        ));

        request.category = Some(Category::Wand);
        assert!(validate(&request).is_ok());
    }

    #[test]
    fn base_name_requires_armor_or_weapon() {
        let mut request = RollRequest::category(Rank::Minor, Category::Potion);
        request.base_name = Some("longsword".to_string());
        assert!(matches!(
            validate(&request),
            Err(RollError::BaseOnlyForArmorOrWeapon)
        ));

        request.category = Some(Category::Weapon);
        assert!(validate(&request).is_ok());
    }

    #[test]
    fn slot_requires_wondrous_or_no_category() {
        let mut request = RollRequest::category(Rank::Minor, Category::Armor);
        request.slot = Some(Slot::Belt);
        assert!(matches!(
            validate(&request),
            Err(RollError::InvalidSlotForCategory { .. })
        ));

        request.category = Some(Category::Wondrous);
        assert!(validate(&request).is_ok());
        request.category = None;
        assert!(validate(&request).is_ok());
    }

    #[test]
    fn minor_rods_and_staves_are_rejected_before_table_access() {
        for category in [Category::Rod, Category::Staff] {
            let request = RollRequest::category(Rank::Minor, category);
            match validate(&request) {
                Err(RollError::InvalidRank { category: c, rank }) => {
                    assert_eq!(c, category);
                    assert_eq!(rank, Rank::Minor);
                }
                other => panic!("expected InvalidRank, got {other:?}"),
            }
        }
    }

    #[test]
    fn least_demands_slotless_wondrous() {
        let mut request = RollRequest::category(Rank::Minor, Category::Wondrous);
        request.subrank = Some(Subrank::Least);
        request.slot = Some(Slot::Belt);
        assert!(matches!(
            validate(&request),
            Err(RollError::LeastRequiresSlotless)
        ));

        request.slot = None;
        assert!(matches!(
            validate(&request),
            Err(RollError::LeastRequiresSlotless)
        ));

        request.slot = Some(Slot::Slotless);
        assert!(validate(&request).is_ok());

        // a bare slot key counts as wondrous
        request.category = None;
        assert!(validate(&request).is_ok());

        request.category = Some(Category::Ring);
        request.slot = None;
        assert!(matches!(
            validate(&request),
            Err(RollError::LeastRequiresSlotless)
        ));
    }
}
