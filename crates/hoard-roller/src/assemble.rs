//! The magic weapon and armor assembler.
//!
//! An assembly starts from a drawn base item and a pattern: the item's
//! own enhancement bonus plus a list of bonus increments to fill with
//! enchantments. Enchantments mutate the working tag set as they land,
//! which feeds back into what later draws may select. A dead-ended draw
//! abandons the attempt; the whole assembly retries up to three times
//! before giving up.

use std::collections::BTreeSet;

use rand::rngs::StdRng;

use hoard_core::RolledItem;
use hoard_tables::{BaseItem, CombatFamily, Pattern};

use crate::error::{RollError, RollResult};

/// Whole-assembly retries before reporting failure.
const MAX_ATTEMPTS: u32 = 3;

/// Tag marking a double weapon, which doubles the enchantment cost side.
const DOUBLE_TAG: &str = "double";

/// Per-category cost constants fed in by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CostModel {
    /// Gold per square of the total enhancement bonus.
    pub multiplier: u64,
    /// Flat masterwork fee added to the base item price.
    pub masterwork: u64,
}

impl CostModel {
    /// Weapon costs.
    pub const WEAPON: Self = Self {
        multiplier: 2_000,
        masterwork: 300,
    };

    /// Armor and shield costs.
    pub const ARMOR: Self = Self {
        multiplier: 1_000,
        masterwork: 150,
    };

    /// The model for double weapons: both sides are enchanted.
    fn doubled(self) -> Self {
        Self {
            multiplier: self.multiplier * 2,
            masterwork: self.masterwork * 2,
        }
    }

    /// Total price for a finished item. The magic side scales with the
    /// square of the total bonus, not the sum of its parts.
    fn price(self, base_cost: u64, effective_bonus: u8, extra: u64) -> u64 {
        let bonus = u64::from(effective_bonus);
        base_cost + self.masterwork + bonus * bonus * self.multiplier + extra
    }
}

/// Assemble one magic item from a pattern.
///
/// `base_override` pins the base item by name instead of drawing one.
/// Fails with [`RollError::TooManyAttempts`] after three dead-ended
/// attempts.
pub fn assemble(
    family: &CombatFamily,
    costs: CostModel,
    pattern: &Pattern,
    base_override: Option<&str>,
    rng: &mut StdRng,
) -> RollResult<RolledItem> {
    for attempt in 1..=MAX_ATTEMPTS {
        let base = match base_override {
            Some(name) => family.bases.get(name)?,
            None => {
                let mut filter = BTreeSet::new();
                if let Some(tag) = &pattern.base {
                    filter.insert(tag.clone());
                }
                family.bases.random(rng, &filter)?
            }
        };
        match attempt_assembly(family, costs, pattern, base, rng)? {
            Some(item) => return Ok(item),
            None => {
                tracing::debug!(
                    family = family.family(),
                    base = %base.name,
                    attempt,
                    "assembly dead-ended; retrying"
                );
            }
        }
    }
    Err(RollError::TooManyAttempts)
}

/// One assembly attempt; `None` means enchantment selection dead-ended.
fn attempt_assembly(
    family: &CombatFamily,
    costs: CostModel,
    pattern: &Pattern,
    base: &BaseItem,
    rng: &mut StdRng,
) -> RollResult<Option<RolledItem>> {
    let model = if base.tags.contains(DOUBLE_TAG) {
        costs.doubled()
    } else {
        costs
    };

    let mut tags: BTreeSet<String> = base.tags.clone();
    tags.insert(base.kind.clone());

    let mut chosen: Vec<String> = Vec::with_capacity(pattern.enchants.len());
    let mut effective_bonus = pattern.bonus;
    let mut extra_cost = 0u64;

    for &increment in &pattern.enchants {
        let Some(enchantment) =
            family
                .enchants
                .random(rng, &base.kind, increment, &chosen, &tags)?
        else {
            return Ok(None);
        };

        match enchantment.cost {
            Some(flat) => extra_cost += flat,
            None => effective_bonus += increment,
        }
        for tag in &enchantment.add {
            tags.insert(tag.clone());
        }
        for tag in &enchantment.remove {
            tags.remove(tag);
        }
        chosen.push(enchantment.name);
    }

    let cost = model.price(base.cost, effective_bonus, extra_cost);

    let mut name = format!("+{}", pattern.bonus);
    for enchantment in &chosen {
        name.push(' ');
        name.push_str(enchantment);
    }
    name.push(' ');
    name.push_str(&base.name);
    if let Some(count) = base.count {
        name.push_str(&format!(" (x{count})"));
    }

    Ok(Some(RolledItem::named(name, Some(cost))))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_squares_the_bonus() {
        let model = CostModel::ARMOR;
        assert_eq!(model.price(100, 1, 0), 100 + 150 + 1_000);
        assert_eq!(model.price(100, 2, 0), 100 + 150 + 4_000);
        assert_eq!(model.price(100, 3, 0), 100 + 150 + 9_000);
    }

    #[test]
    fn price_is_monotone_in_bonus() {
        let model = CostModel::WEAPON;
        let mut prev = 0;
        for bonus in 1..=10 {
            let price = model.price(15, bonus, 0);
            assert!(price > prev);
            prev = price;
        }
    }

    #[test]
    fn flat_extras_add_without_scaling() {
        let model = CostModel::WEAPON;
        assert_eq!(
            model.price(15, 1, 1_400),
            15 + 300 + 2_000 + 1_400
        );
    }

    #[test]
    fn doubled_model_doubles_both_constants() {
        let model = CostModel::WEAPON.doubled();
        assert_eq!(model.multiplier, 4_000);
        assert_eq!(model.masterwork, 600);
    }
}
