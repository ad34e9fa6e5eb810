//! Base armor and weapon lists.
//!
//! Base items are the mundane gear a magic item is built on. Lookup is
//! case-insensitive and diacritic-folded; a missed exact lookup returns
//! near-miss suggestions the way a player would expect from a typo.

use std::collections::BTreeSet;

use rand::rngs::StdRng;
use serde::Deserialize;
use strsim::jaro_winkler;
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use hoard_core::draw_uniform;

use crate::error::{TableError, TableResult};

/// Minimum similarity for a name to appear in a suggestion list.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Maximum number of suggestions returned on a missed lookup.
const SUGGESTION_LIMIT: usize = 4;

/// A mundane base item a magic item can be built on.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct BaseItem {
    /// Item name, unique within its family.
    pub name: String,
    /// Mundane price in gold pieces.
    pub cost: u64,
    /// Sub-category tag (armor/shield, melee/ranged/ammo, ...).
    #[serde(rename = "type")]
    pub kind: String,
    /// Free-form filter tags.
    #[serde(default)]
    pub tags: BTreeSet<String>,
    /// Unit count for items rolled in batches (ammunition).
    #[serde(default)]
    pub count: Option<u32>,
}

impl BaseItem {
    /// Whether the item matches one requested tag: the tag equals the
    /// item's type or appears in its tag set.
    fn matches_tag(&self, tag: &str) -> bool {
        self.kind == tag || self.tags.contains(tag)
    }
}

/// One family's base item list with its declared filter vocabulary.
#[derive(Debug, Clone)]
pub struct BaseItems {
    family: &'static str,
    items: Vec<BaseItem>,
    family_tags: BTreeSet<String>,
}

impl BaseItems {
    /// Build a base item list. `family_tags` is the family's own
    /// category vocabulary (e.g. melee/ranged/ammo), merged into
    /// [`BaseItems::tags`].
    pub fn new(
        family: &'static str,
        items: Vec<BaseItem>,
        family_tags: impl IntoIterator<Item = String>,
    ) -> Self {
        Self {
            family,
            items,
            family_tags: family_tags.into_iter().collect(),
        }
    }

    /// Number of base items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all base items.
    pub fn iter(&self) -> impl Iterator<Item = &BaseItem> {
        self.items.iter()
    }

    /// Draw uniformly among items matching every requested tag.
    ///
    /// Tags combine with AND semantics; within one tag the item matches
    /// on type or tag set. An empty tag set matches everything.
    pub fn random(&self, rng: &mut StdRng, tags: &BTreeSet<String>) -> TableResult<&BaseItem> {
        let survivors: Vec<&BaseItem> = self
            .items
            .iter()
            .filter(|item| tags.iter().all(|tag| item.matches_tag(tag)))
            .collect();
        if survivors.is_empty() {
            let filter = tags.iter().cloned().collect::<Vec<_>>().join(", ");
            return Err(TableError::NotFound {
                what: format!("{} base item matching [{filter}]", self.family),
                suggestions: vec![],
            });
        }
        Ok(*draw_uniform(&survivors, rng)?)
    }

    /// Exact lookup by name, case-insensitive and diacritic-folded.
    ///
    /// On a miss, up to four near-miss suggestions with similarity
    /// above 0.8 are attached, best first.
    pub fn get(&self, name: &str) -> TableResult<&BaseItem> {
        let folded = fold(name);
        if let Some(item) = self.items.iter().find(|item| fold(&item.name) == folded) {
            return Ok(item);
        }

        let mut scored: Vec<(&str, f64)> = self
            .items
            .iter()
            .map(|item| (item.name.as_str(), similarity(&folded, &fold(&item.name))))
            .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

        Err(TableError::NotFound {
            what: format!("{} base item \"{name}\"", self.family),
            suggestions: scored
                .into_iter()
                .take(SUGGESTION_LIMIT)
                .map(|(name, _)| name.to_string())
                .collect(),
        })
    }

    /// The declared vocabulary of valid filter tags: every item tag,
    /// every item type, and the family's own category tags.
    pub fn tags(&self) -> BTreeSet<String> {
        let mut all = self.family_tags.clone();
        for item in &self.items {
            all.insert(item.kind.clone());
            all.extend(item.tags.iter().cloned());
        }
        all
    }
}

/// Lowercase and strip combining marks so "séance" and "seance" compare equal.
fn fold(s: &str) -> String {
    s.nfkd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Similarity between a query and a candidate, both pre-folded.
/// Containment relationships outrank plain edit-distance similarity.
fn similarity(query: &str, candidate: &str) -> f64 {
    if query.is_empty() || candidate.is_empty() {
        return 0.0;
    }
    if candidate.starts_with(query) || candidate.ends_with(query) {
        0.95
    } else if candidate.contains(query) {
        0.9
    } else {
        jaro_winkler(query, candidate)
    }
}
