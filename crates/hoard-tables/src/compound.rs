//! Per-rank compound tables.
//!
//! Potions, scrolls, and wands scale one source record across ranks: a
//! single row carries an independent weight per rank, so a spell-bearing
//! item can be common as minor treasure and vanish from major treasure
//! without duplicating the record.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use serde::Deserialize;

use hoard_core::{Rank, WeightedTable, draw_uniform};

use crate::error::{TableError, TableResult};

/// One compound source row: a weight per rank plus the family payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CompoundRow<T> {
    /// Weight within the minor distribution (0 = absent).
    #[serde(default)]
    pub minor: u32,
    /// Weight within the medium distribution (0 = absent).
    #[serde(default)]
    pub medium: u32,
    /// Weight within the major distribution (0 = absent).
    #[serde(default)]
    pub major: u32,
    /// Family-specific row payload.
    #[serde(flatten)]
    pub value: T,
}

/// A table mapping each rank to its own weighted distribution over the
/// same record set.
#[derive(Debug, Clone)]
pub struct CompoundTable<T> {
    family: &'static str,
    ranks: BTreeMap<Rank, WeightedTable<T>>,
}

impl<T: Clone> CompoundTable<T> {
    /// Normalize compound source rows into one distribution per rank.
    pub fn from_source(family: &'static str, rows: Vec<CompoundRow<T>>) -> TableResult<Self> {
        if rows.is_empty() {
            return Err(TableError::Shape {
                family,
                detail: "compound table defines no rows".to_string(),
            });
        }
        let mut ranks = BTreeMap::new();
        for rank in Rank::all() {
            let table = WeightedTable::from_pairs(rows.iter().map(|row| {
                let weight = match rank {
                    Rank::Minor => row.minor,
                    Rank::Medium => row.medium,
                    Rank::Major => row.major,
                };
                (weight, row.value.clone())
            }));
            ranks.insert(*rank, table);
        }
        Ok(Self { family, ranks })
    }

    /// The item family this table belongs to.
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// Draw one value for the given rank; an omitted rank is drawn
    /// uniformly first.
    pub fn random(&self, rng: &mut StdRng, rank: Option<Rank>) -> TableResult<&T> {
        let rank = match rank {
            Some(rank) => rank,
            None => *draw_uniform(Rank::all(), rng)?,
        };
        let Some(table) = self.ranks.get(&rank) else {
            return Err(TableError::InvalidRank {
                family: self.family,
                rank,
            });
        };
        Ok(table.draw(rng)?)
    }
}
