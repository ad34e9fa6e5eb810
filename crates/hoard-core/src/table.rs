//! Integer-weighted categorical tables.
//!
//! A [`WeightedTable`] maps non-negative integer weights to values and
//! supports an allocation-free draw: sum the weights, pick a uniform
//! integer below the total, and scan until the running sum passes it.
//! No floating point is involved anywhere.

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// One weighted alternative in a table.
///
/// A weight of zero is legal (it marks an entry removed from the live
/// distribution) and such entries are never drawn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedEntry<T> {
    /// Relative probability mass of this entry.
    pub weight: u32,
    /// The value produced when this entry is drawn.
    pub value: T,
}

/// A categorical distribution over values of `T`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeightedTable<T> {
    entries: Vec<WeightedEntry<T>>,
}

impl<T> WeightedTable<T> {
    /// Build a table from pre-constructed entries.
    pub fn new(entries: Vec<WeightedEntry<T>>) -> Self {
        Self { entries }
    }

    /// Build a table from `(weight, value)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (u32, T)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(weight, value)| WeightedEntry { weight, value })
                .collect(),
        }
    }

    /// Number of entries, including zero-weight ones.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the table has no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all weights.
    pub fn total_weight(&self) -> u64 {
        self.entries.iter().map(|e| u64::from(e.weight)).sum()
    }

    /// Iterate over the entries in table order.
    pub fn iter(&self) -> impl Iterator<Item = &WeightedEntry<T>> {
        self.entries.iter()
    }

    /// Draw one value with probability proportional to its weight.
    ///
    /// Fails with [`CoreError::EmptyDistribution`] if the table is empty
    /// or every weight is zero.
    pub fn draw(&self, rng: &mut StdRng) -> CoreResult<&T> {
        let total = self.total_weight();
        if total == 0 {
            return Err(CoreError::EmptyDistribution);
        }
        let roll = rng.random_range(0..total);
        let mut acc = 0u64;
        for entry in &self.entries {
            acc += u64::from(entry.weight);
            if roll < acc {
                return Ok(&entry.value);
            }
        }
        // total > 0 guarantees the scan returned above
        Err(CoreError::EmptyDistribution)
    }
}

/// Draw uniformly from a plain slice, the weight-omitted table variant.
///
/// Fails with [`CoreError::EmptyDistribution`] on an empty slice.
pub fn draw_uniform<'a, T>(values: &'a [T], rng: &mut StdRng) -> CoreResult<&'a T> {
    if values.is_empty() {
        return Err(CoreError::EmptyDistribution);
    }
    Ok(&values[rng.random_range(0..values.len())])
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use std::collections::HashMap;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(0xD1CE)
    }

    #[test]
    fn draw_from_empty_table_fails() {
        let table: WeightedTable<u32> = WeightedTable::default();
        assert_eq!(table.draw(&mut rng()).unwrap_err(), CoreError::EmptyDistribution);
    }

    #[test]
    fn draw_from_all_zero_weights_fails() {
        let table = WeightedTable::from_pairs([(0u32, "a"), (0, "b")]);
        assert_eq!(table.draw(&mut rng()).unwrap_err(), CoreError::EmptyDistribution);
    }

    #[test]
    fn single_entry_always_drawn() {
        let table = WeightedTable::from_pairs([(7u32, "only")]);
        let mut rng = rng();
        for _ in 0..100 {
            assert_eq!(*table.draw(&mut rng).unwrap(), "only");
        }
    }

    #[test]
    fn zero_weight_entries_never_drawn() {
        let table = WeightedTable::from_pairs([(1u32, "live"), (0, "dead")]);
        let mut rng = rng();
        for _ in 0..1_000 {
            assert_eq!(*table.draw(&mut rng).unwrap(), "live");
        }
    }

    #[test]
    fn frequencies_track_weights() {
        // 10,000 trials against a 1/2/7 split: each observed frequency
        // should land within 2 percentage points of weight / total.
        let table = WeightedTable::from_pairs([(1u32, "a"), (2, "b"), (7, "c")]);
        let mut rng = rng();
        let mut counts: HashMap<&str, u32> = HashMap::new();
        let trials = 10_000u32;
        for _ in 0..trials {
            *counts.entry(table.draw(&mut rng).unwrap()).or_default() += 1;
        }
        let expect = [("a", 0.1), ("b", 0.2), ("c", 0.7)];
        for (key, expected) in expect {
            let observed = f64::from(counts[key]) / f64::from(trials);
            assert!(
                (observed - expected).abs() < 0.02,
                "{key}: observed {observed}, expected {expected}"
            );
        }
    }

    #[test]
    fn total_weight_and_len() {
        let table = WeightedTable::from_pairs([(1u32, 'x'), (0, 'y'), (4, 'z')]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.total_weight(), 5);
        assert!(!table.is_empty());
    }

    #[test]
    fn draw_uniform_covers_all_values() {
        let values = ["a", "b", "c"];
        let mut rng = rng();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..200 {
            seen.insert(*draw_uniform(&values, &mut rng).unwrap());
        }
        assert_eq!(seen.len(), 3);
    }

    #[test]
    fn draw_uniform_empty_fails() {
        let values: [u8; 0] = [];
        assert_eq!(
            draw_uniform(&values, &mut rng()).unwrap_err(),
            CoreError::EmptyDistribution
        );
    }

    proptest! {
        #[test]
        fn draw_always_lands_on_positive_weight(
            weights in prop::collection::vec(0u32..100, 1..20),
            seed in any::<u64>(),
        ) {
            let table = WeightedTable::from_pairs(
                weights.iter().copied().enumerate().map(|(i, w)| (w, i)),
            );
            let mut rng = StdRng::seed_from_u64(seed);
            match table.draw(&mut rng) {
                Ok(&idx) => prop_assert!(weights[idx] > 0),
                Err(CoreError::EmptyDistribution) => {
                    prop_assert_eq!(table.total_weight(), 0);
                }
                Err(other) => prop_assert!(false, "unexpected error: {other}"),
            }
        }
    }
}
