//! Template-key string tables.
//!
//! Item name templates embed `{key:NAME}` and `{key:NAME:SUBKEY}`
//! placeholders resolved against these tables. A key's source shape is
//! detected from its JSON value: a flat list, a flat weighted list, a
//! map of subkeys to lists, or a map of subkeys to weighted lists.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use serde::Deserialize;

use hoard_core::{WeightedTable, draw_uniform};

use crate::error::{TableError, TableResult};

/// A weighted string row in a key table.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightedString {
    /// Relative probability mass.
    pub weight: u32,
    /// The string produced when drawn.
    pub value: String,
}

/// One key's source value, in any of the four accepted shapes.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum KeySource {
    /// A plain list: uniform draw.
    Flat(Vec<String>),
    /// A weighted list.
    FlatWeighted(Vec<WeightedString>),
    /// Subkey groups of plain lists.
    Grouped(BTreeMap<String, Vec<String>>),
    /// Subkey groups of weighted lists.
    GroupedWeighted(BTreeMap<String, Vec<WeightedString>>),
}

/// A normalized key table.
#[derive(Debug, Clone)]
enum KeyTable {
    Flat(Vec<String>),
    Weighted(WeightedTable<String>),
    Grouped(BTreeMap<String, Vec<String>>),
    GroupedWeighted(BTreeMap<String, WeightedTable<String>>),
}

/// The full set of template-key tables.
#[derive(Debug, Clone)]
pub struct KeyTables {
    keys: BTreeMap<String, KeyTable>,
}

impl KeyTables {
    /// Normalize the raw key document.
    pub fn from_source(source: BTreeMap<String, KeySource>) -> Self {
        let keys = source
            .into_iter()
            .map(|(name, value)| {
                let table = match value {
                    KeySource::Flat(values) => KeyTable::Flat(values),
                    KeySource::FlatWeighted(rows) => KeyTable::Weighted(WeightedTable::from_pairs(
                        rows.into_iter().map(|r| (r.weight, r.value)),
                    )),
                    KeySource::Grouped(groups) => KeyTable::Grouped(groups),
                    KeySource::GroupedWeighted(groups) => KeyTable::GroupedWeighted(
                        groups
                            .into_iter()
                            .map(|(subkey, rows)| {
                                (
                                    subkey,
                                    WeightedTable::from_pairs(
                                        rows.into_iter().map(|r| (r.weight, r.value)),
                                    ),
                                )
                            })
                            .collect(),
                    ),
                };
                (name, table)
            })
            .collect();
        Self { keys }
    }

    /// Key names present in the table set.
    pub fn names(&self) -> Vec<&str> {
        self.keys.keys().map(String::as_str).collect()
    }

    /// Draw a random string for a key. Grouped keys draw a random
    /// subkey when none is given; flat keys ignore the subkey.
    pub fn random(
        &self,
        rng: &mut StdRng,
        key: &str,
        subkey: Option<&str>,
    ) -> TableResult<String> {
        let Some(table) = self.keys.get(key) else {
            return Err(TableError::KeyNotFound {
                key: key.to_string(),
            });
        };
        match table {
            KeyTable::Flat(values) => Ok(draw_uniform(values, rng)?.clone()),
            KeyTable::Weighted(table) => Ok(table.draw(rng)?.clone()),
            KeyTable::Grouped(groups) => {
                let values = Self::pick_group(rng, key, groups, subkey)?;
                Ok(draw_uniform(values, rng)?.clone())
            }
            KeyTable::GroupedWeighted(groups) => {
                let table = Self::pick_group(rng, key, groups, subkey)?;
                Ok(table.draw(rng)?.clone())
            }
        }
    }

    fn pick_group<'a, V>(
        rng: &mut StdRng,
        key: &str,
        groups: &'a BTreeMap<String, V>,
        subkey: Option<&str>,
    ) -> TableResult<&'a V> {
        match subkey {
            Some(subkey) => groups.get(subkey).ok_or_else(|| TableError::KeyNotFound {
                key: format!("{key}:{subkey}"),
            }),
            None => {
                let names: Vec<&String> = groups.keys().collect();
                let name = *draw_uniform(&names, rng)?;
                Ok(&groups[name])
            }
        }
    }
}
