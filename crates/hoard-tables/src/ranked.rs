//! Rank- and subrank-keyed weighted tables.

use std::collections::BTreeMap;

use rand::rngs::StdRng;

use hoard_core::{Rank, Subrank, WeightedTable, draw_uniform};

use crate::error::{TableError, TableResult};
use crate::source::RankedSource;

/// A table keyed by rank, then subrank, holding one weighted
/// distribution per key pair.
///
/// Valid key shapes: ranks are exactly `{minor, medium, major}` or
/// `{medium, major}`; subranks are `{lesser, greater}`, with `least`
/// additionally allowed under minor. Violations are load-time errors.
#[derive(Debug, Clone)]
pub struct RankedTable<T> {
    family: &'static str,
    ranks: BTreeMap<Rank, BTreeMap<Subrank, WeightedTable<T>>>,
}

impl<T> RankedTable<T> {
    /// Normalize a raw source document into a ranked table, validating
    /// the key shape.
    pub fn from_source(family: &'static str, source: RankedSource<T>) -> TableResult<Self> {
        let mut ranks = BTreeMap::new();
        for (rank_key, subranks) in source {
            let rank = Rank::parse(&rank_key).map_err(|_| TableError::Shape {
                family,
                detail: format!("\"{rank_key}\" is not a rank key"),
            })?;
            let mut tiers = BTreeMap::new();
            for (subrank_key, rows) in subranks {
                let subrank = Subrank::parse(&subrank_key).map_err(|_| TableError::Shape {
                    family,
                    detail: format!("\"{subrank_key}\" is not a subrank key"),
                })?;
                if subrank == Subrank::Least && rank != Rank::Minor {
                    return Err(TableError::Shape {
                        family,
                        detail: format!("least entries are only valid under minor, not {rank}"),
                    });
                }
                let table =
                    WeightedTable::from_pairs(rows.into_iter().map(|r| (r.weight, r.value)));
                tiers.insert(subrank, table);
            }
            for required in Subrank::standard() {
                if !tiers.contains_key(required) {
                    return Err(TableError::Shape {
                        family,
                        detail: format!("{rank} is missing its {required} subrank"),
                    });
                }
            }
            ranks.insert(rank, tiers);
        }

        if ranks.is_empty() {
            return Err(TableError::Shape {
                family,
                detail: "table defines no ranks".to_string(),
            });
        }
        let has_minor = ranks.contains_key(&Rank::Minor);
        let full: &[Rank] = Rank::all();
        let limited: &[Rank] = &[Rank::Medium, Rank::Major];
        let expected = if has_minor { full } else { limited };
        for required in expected {
            if !ranks.contains_key(required) {
                return Err(TableError::Shape {
                    family,
                    detail: format!("table is missing its {required} rank"),
                });
            }
        }

        Ok(Self { family, ranks })
    }

    /// The item family this table belongs to.
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// Whether the table defines the given rank.
    pub fn has_rank(&self, rank: Rank) -> bool {
        self.ranks.contains_key(&rank)
    }

    /// Ranks present in the table, in ascending order.
    pub fn ranks(&self) -> Vec<Rank> {
        self.ranks.keys().copied().collect()
    }

    /// Draw one value. Omitted rank or subrank is first drawn uniformly
    /// among the table's valid keys; out-of-domain keys are rejected.
    pub fn random(
        &self,
        rng: &mut StdRng,
        rank: Option<Rank>,
        subrank: Option<Subrank>,
    ) -> TableResult<&T> {
        let rank = match rank {
            Some(rank) => {
                if !self.ranks.contains_key(&rank) {
                    return Err(TableError::InvalidRank {
                        family: self.family,
                        rank,
                    });
                }
                rank
            }
            None => {
                let keys: Vec<Rank> = self.ranks.keys().copied().collect();
                *draw_uniform(&keys, rng)?
            }
        };
        // Key presence was just validated or drawn from the key set.
        let Some(tiers) = self.ranks.get(&rank) else {
            return Err(TableError::InvalidRank {
                family: self.family,
                rank,
            });
        };

        let subrank = match subrank {
            Some(subrank) => {
                if !tiers.contains_key(&subrank) {
                    return Err(TableError::InvalidSubrank {
                        family: self.family,
                        rank,
                        subrank,
                    });
                }
                subrank
            }
            None => {
                let keys: Vec<Subrank> = tiers.keys().copied().collect();
                *draw_uniform(&keys, rng)?
            }
        };
        let Some(table) = tiers.get(&subrank) else {
            return Err(TableError::InvalidSubrank {
                family: self.family,
                rank,
                subrank,
            });
        };

        Ok(table.draw(rng)?)
    }
}
