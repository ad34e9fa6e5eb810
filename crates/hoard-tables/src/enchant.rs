//! Enchantment tables.
//!
//! Enchantments are keyed by base item type (armor/shield, or
//! melee/ranged/ammo) and bonus level. Selection filters out entries
//! that conflict with already-chosen enchantments or with the item's
//! current tag set, then draws weighted among the survivors. An empty
//! survivor set is a legitimate `None`, not an error.

use std::collections::{BTreeMap, BTreeSet};

use rand::rngs::StdRng;
use serde::Deserialize;

use hoard_core::WeightedTable;

use crate::error::{TableError, TableResult};
use crate::source::WeightedRow;

/// Tag constraints gating an enchantment.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Limit {
    /// The item must carry at least one of these tags.
    #[serde(default)]
    pub only: Vec<String>,
    /// The item must carry none of these tags.
    #[serde(default)]
    pub not: Vec<String>,
}

/// One enchantment a magic item can carry.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Enchantment {
    /// Enchantment name, prefixed onto the item name.
    pub name: String,
    /// Flat gold cost. When present the enchantment does not raise the
    /// item's effective bonus; when absent its cost scales with bonus.
    #[serde(default)]
    pub cost: Option<u64>,
    /// Names of enchantments this one cannot coexist with.
    #[serde(default)]
    pub exclude: Vec<String>,
    /// Tag constraints the item must satisfy.
    #[serde(default)]
    pub limit: Option<Limit>,
    /// Tags added to the item when this enchantment is applied.
    #[serde(default)]
    pub add: Vec<String>,
    /// Tags removed from the item when this enchantment is applied.
    #[serde(default)]
    pub remove: Vec<String>,
}

impl Enchantment {
    /// Whether this enchantment survives the given exclusion list and
    /// current item tags.
    fn permitted(&self, excluded: &[String], tags: &BTreeSet<String>) -> bool {
        if excluded.contains(&self.name) {
            return false;
        }
        if self.exclude.iter().any(|name| excluded.contains(name)) {
            return false;
        }
        if let Some(limit) = &self.limit {
            if !limit.only.is_empty() && !limit.only.iter().any(|tag| tags.contains(tag)) {
                return false;
            }
            if limit.not.iter().any(|tag| tags.contains(tag)) {
                return false;
            }
        }
        true
    }
}

/// Raw enchantment document: type -> bonus level -> weighted rows.
pub type EnchantmentSource = BTreeMap<String, BTreeMap<String, Vec<WeightedRow<Enchantment>>>>;

/// One family's enchantment tables.
#[derive(Debug, Clone)]
pub struct EnchantmentTable {
    family: &'static str,
    kinds: BTreeMap<String, BTreeMap<u8, WeightedTable<Enchantment>>>,
}

impl EnchantmentTable {
    /// Normalize a raw enchantment document, validating bonus-level keys.
    pub fn from_source(family: &'static str, source: EnchantmentSource) -> TableResult<Self> {
        let mut kinds = BTreeMap::new();
        for (kind, levels) in source {
            let mut by_bonus = BTreeMap::new();
            for (level_key, rows) in levels {
                let bonus: u8 = level_key.parse().map_err(|_| TableError::Shape {
                    family,
                    detail: format!("\"{level_key}\" is not a bonus level for {kind} enchantments"),
                })?;
                if bonus == 0 || bonus > 5 {
                    return Err(TableError::Shape {
                        family,
                        detail: format!("bonus level {bonus} for {kind} enchantments is out of range"),
                    });
                }
                by_bonus.insert(
                    bonus,
                    WeightedTable::from_pairs(rows.into_iter().map(|r| (r.weight, r.value))),
                );
            }
            kinds.insert(kind, by_bonus);
        }
        Ok(Self { family, kinds })
    }

    /// The item family these enchantments belong to.
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// Enchantment types present in the table.
    pub fn kinds(&self) -> Vec<&str> {
        self.kinds.keys().map(String::as_str).collect()
    }

    /// Select a random compatible enchantment, or `None` when the
    /// constraints leave nothing to draw.
    pub fn random(
        &self,
        rng: &mut StdRng,
        kind: &str,
        bonus: u8,
        excluded: &[String],
        tags: &BTreeSet<String>,
    ) -> TableResult<Option<Enchantment>> {
        let Some(levels) = self.kinds.get(kind) else {
            return Err(TableError::UnknownEnchantmentKind {
                family: self.family,
                kind: kind.to_string(),
            });
        };
        let Some(table) = levels.get(&bonus) else {
            return Err(TableError::UnknownEnchantmentBonus {
                family: self.family,
                kind: kind.to_string(),
                bonus,
            });
        };

        let survivors = WeightedTable::from_pairs(
            table
                .iter()
                .filter(|entry| entry.value.permitted(excluded, tags))
                .map(|entry| (entry.weight, entry.value.clone())),
        );
        if survivors.total_weight() == 0 {
            tracing::debug!(
                family = self.family,
                kind,
                bonus,
                ?excluded,
                "no enchantment survives the current constraints"
            );
            return Ok(None);
        }
        Ok(Some(survivors.draw(rng)?.clone()))
    }
}
