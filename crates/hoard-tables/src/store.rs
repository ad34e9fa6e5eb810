//! The per-family table registry.
//!
//! [`Tables::load`] reads every family document from a data directory at
//! startup and holds the normalized stores for the process lifetime.
//! The registry is an explicit struct with one handle per family,
//! passed by reference into the roll engine.

use std::collections::BTreeMap;
use std::path::Path;

use rand::rngs::StdRng;
use serde::Deserialize;

use hoard_core::{Category, Rank, RolledItem, Slot, WeightedTable, draw_uniform};

use crate::base::{BaseItem, BaseItems};
use crate::compound::{CompoundRow, CompoundTable};
use crate::enchant::{EnchantmentSource, EnchantmentTable};
use crate::error::{TableError, TableResult};
use crate::keys::{KeySource, KeyTables};
use crate::ranked::RankedTable;
use crate::source::{RankedSource, WeightedRow, load_json};

/// A drawn armor or weapon pattern: either a pointer into a specific-item
/// sub-table, or a bonus plus enchantment increments for the assembler.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct Pattern {
    /// Enhancement bonus of the item itself.
    #[serde(default)]
    pub bonus: u8,
    /// Bonus increments to fill with drawn enchantments.
    #[serde(default)]
    pub enchants: Vec<u8>,
    /// Specific-item sub-table to resolve instead of assembling.
    #[serde(default)]
    pub specific: Option<String>,
    /// Tag constraining the base item draw (e.g. "shield").
    #[serde(default)]
    pub base: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CombatSource {
    ranked: RankedSource<Pattern>,
    bases: Vec<BaseItem>,
    #[serde(default)]
    specific: BTreeMap<String, RankedSource<RolledItem>>,
    enchants: EnchantmentSource,
}

/// One armor- or weapon-family store: the pattern table, base item list,
/// specific-item sub-tables, and enchantment tables.
#[derive(Debug, Clone)]
pub struct CombatFamily {
    family: &'static str,
    /// Ranked pattern table driving assembly.
    pub patterns: RankedTable<Pattern>,
    /// Mundane base items.
    pub bases: BaseItems,
    specific: BTreeMap<String, RankedTable<RolledItem>>,
    /// Enchantments keyed by base type and bonus level.
    pub enchants: EnchantmentTable,
}

impl CombatFamily {
    fn from_source(
        family: &'static str,
        source: CombatSource,
        family_tags: &[&str],
    ) -> TableResult<Self> {
        let patterns = RankedTable::from_source(family, source.ranked)?;
        let bases = BaseItems::new(
            family,
            source.bases,
            family_tags.iter().map(|t| (*t).to_string()),
        );
        let mut specific = BTreeMap::new();
        for (name, raw) in source.specific {
            specific.insert(name, RankedTable::from_source(family, raw)?);
        }
        let enchants = EnchantmentTable::from_source(family, source.enchants)?;
        Ok(Self {
            family,
            patterns,
            bases,
            specific,
            enchants,
        })
    }

    /// The item family this store serves.
    pub fn family(&self) -> &'static str {
        self.family
    }

    /// The specific-item sub-table a pattern points at.
    pub fn specific(&self, name: &str) -> TableResult<&RankedTable<RolledItem>> {
        self.specific.get(name).ok_or_else(|| TableError::NotFound {
            what: format!("{} specific-item table \"{name}\"", self.family),
            suggestions: vec![],
        })
    }
}

/// The wondrous-item store: one ranked table per body slot.
#[derive(Debug, Clone)]
pub struct WondrousStore {
    slots: BTreeMap<Slot, RankedTable<RolledItem>>,
}

impl WondrousStore {
    fn from_source(source: BTreeMap<String, RankedSource<RolledItem>>) -> TableResult<Self> {
        let mut slots = BTreeMap::new();
        for (slot_key, raw) in source {
            let slot = Slot::parse(&slot_key).map_err(|_| TableError::Shape {
                family: "wondrous",
                detail: format!("\"{slot_key}\" is not a slot key"),
            })?;
            slots.insert(slot, RankedTable::from_source("wondrous", raw)?);
        }
        for required in Slot::all() {
            if !slots.contains_key(required) {
                return Err(TableError::Shape {
                    family: "wondrous",
                    detail: format!("missing table for the {required} slot"),
                });
            }
        }
        Ok(Self { slots })
    }

    /// The ranked table for one slot.
    pub fn table(&self, slot: Slot) -> TableResult<&RankedTable<RolledItem>> {
        self.slots.get(&slot).ok_or(TableError::Shape {
            family: "wondrous",
            detail: format!("missing table for the {slot} slot"),
        })
    }

    /// Draw a slot uniformly.
    pub fn random_slot(rng: &mut StdRng) -> TableResult<Slot> {
        Ok(*draw_uniform(Slot::all(), rng)?)
    }
}

#[derive(Debug, Deserialize)]
struct CategoryRow {
    category: Category,
}

/// The per-rank category distribution.
#[derive(Debug, Clone)]
pub struct CategoryTable {
    ranks: BTreeMap<Rank, WeightedTable<Category>>,
}

impl CategoryTable {
    fn from_source(source: BTreeMap<String, Vec<WeightedRow<CategoryRow>>>) -> TableResult<Self> {
        let mut ranks = BTreeMap::new();
        for (rank_key, rows) in source {
            let rank = Rank::parse(&rank_key).map_err(|_| TableError::Shape {
                family: "category",
                detail: format!("\"{rank_key}\" is not a rank key"),
            })?;
            ranks.insert(
                rank,
                WeightedTable::from_pairs(rows.into_iter().map(|r| (r.weight, r.value.category))),
            );
        }
        for required in Rank::all() {
            if !ranks.contains_key(required) {
                return Err(TableError::Shape {
                    family: "category",
                    detail: format!("missing the {required} distribution"),
                });
            }
        }
        Ok(Self { ranks })
    }

    /// Draw a category for the given rank.
    pub fn random(&self, rng: &mut StdRng, rank: Rank) -> TableResult<Category> {
        let Some(table) = self.ranks.get(&rank) else {
            return Err(TableError::InvalidRank {
                family: "category",
                rank,
            });
        };
        Ok(*table.draw(rng)?)
    }
}

/// Every family store, loaded once at startup and shared immutably.
#[derive(Debug, Clone)]
pub struct Tables {
    /// Magic armor and shields.
    pub armor: CombatFamily,
    /// Magic weapons and ammunition.
    pub weapon: CombatFamily,
    /// Magic rings.
    pub ring: RankedTable<RolledItem>,
    /// Magic rods (medium/major only).
    pub rod: RankedTable<RolledItem>,
    /// Magic staves (medium/major only).
    pub staff: RankedTable<RolledItem>,
    /// Wondrous items by slot.
    pub wondrous: WondrousStore,
    /// Potions, weighted per rank.
    pub potion: CompoundTable<RolledItem>,
    /// Scrolls, weighted per rank.
    pub scroll: CompoundTable<RolledItem>,
    /// Wands, weighted per rank.
    pub wand: CompoundTable<RolledItem>,
    /// The per-rank category distribution.
    pub category: CategoryTable,
    /// Template-key string tables.
    pub keys: KeyTables,
}

impl Tables {
    /// Load every family document from a data directory. Fails fast on
    /// the first malformed family.
    pub fn load(dir: &Path) -> TableResult<Self> {
        let armor = CombatFamily::from_source(
            "armor",
            load_json("armor", &dir.join("armor.json"))?,
            &["armor", "shield"],
        )?;
        let weapon = CombatFamily::from_source(
            "weapon",
            load_json("weapon", &dir.join("weapon.json"))?,
            &["melee", "ranged", "ammo"],
        )?;
        let ring = RankedTable::from_source("ring", load_json("ring", &dir.join("ring.json"))?)?;
        let rod = Self::load_limited("rod", dir)?;
        let staff = Self::load_limited("staff", dir)?;
        let wondrous =
            WondrousStore::from_source(load_json("wondrous", &dir.join("wondrous.json"))?)?;
        let potion = Self::load_compound("potion", dir)?;
        let scroll = Self::load_compound("scroll", dir)?;
        let wand = Self::load_compound("wand", dir)?;
        let category =
            CategoryTable::from_source(load_json("category", &dir.join("category.json"))?)?;
        let keys = KeyTables::from_source(load_json::<BTreeMap<String, KeySource>>(
            "keys",
            &dir.join("keys.json"),
        )?);

        tracing::info!(dir = %dir.display(), "loaded all table families");
        Ok(Self {
            armor,
            weapon,
            ring,
            rod,
            staff,
            wondrous,
            potion,
            scroll,
            wand,
            category,
            keys,
        })
    }

    fn load_limited(family: &'static str, dir: &Path) -> TableResult<RankedTable<RolledItem>> {
        let table = RankedTable::from_source(
            family,
            load_json(family, &dir.join(format!("{family}.json")))?,
        )?;
        if table.has_rank(Rank::Minor) {
            return Err(TableError::Shape {
                family,
                detail: "table must not define a minor rank".to_string(),
            });
        }
        Ok(table)
    }

    fn load_compound(family: &'static str, dir: &Path) -> TableResult<CompoundTable<RolledItem>> {
        let rows: Vec<CompoundRow<RolledItem>> =
            load_json(family, &dir.join(format!("{family}.json")))?;
        CompoundTable::from_source(family, rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::fs;
    use tempfile::TempDir;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(21)
    }

    /// Write a minimal but complete data directory.
    pub(crate) fn fixture_dir() -> TempDir {
        let dir = TempDir::new().unwrap();

        let standard_ranked = |name: &str| {
            format!(
                r#"{{
                "minor":  {{ "lesser": [{{"weight": 1, "name": "minor lesser {name}"}}],
                             "greater": [{{"weight": 1, "name": "minor greater {name}"}}] }},
                "medium": {{ "lesser": [{{"weight": 1, "name": "medium lesser {name}"}}],
                             "greater": [{{"weight": 1, "name": "medium greater {name}"}}] }},
                "major":  {{ "lesser": [{{"weight": 1, "name": "major lesser {name}"}}],
                             "greater": [{{"weight": 1, "name": "major greater {name}"}}] }}
            }}"#
            )
        };
        let limited_ranked = |name: &str| {
            format!(
                r#"{{
                "medium": {{ "lesser": [{{"weight": 1, "name": "medium lesser {name}"}}],
                             "greater": [{{"weight": 1, "name": "medium greater {name}"}}] }},
                "major":  {{ "lesser": [{{"weight": 1, "name": "major lesser {name}"}}],
                             "greater": [{{"weight": 1, "name": "major greater {name}"}}] }}
            }}"#
            )
        };

        let combat = |base_name: &str, kind: &str| {
            format!(
                r#"{{
                "ranked": {{
                    "minor":  {{ "lesser": [{{"weight": 1, "bonus": 1}}],
                                 "greater": [{{"weight": 1, "bonus": 1, "enchants": [1]}}] }},
                    "medium": {{ "lesser": [{{"weight": 1, "bonus": 2}}],
                                 "greater": [{{"weight": 1, "specific": "relics"}}] }},
                    "major":  {{ "lesser": [{{"weight": 1, "bonus": 3}}],
                                 "greater": [{{"weight": 1, "bonus": 3, "enchants": [1, 1]}}] }}
                }},
                "bases": [
                    {{"name": "{base_name}", "cost": 100, "type": "{kind}", "tags": ["metal"]}}
                ],
                "specific": {{
                    "relics": {{
                        "minor":  {{ "lesser": [{{"weight": 1, "name": "lesser relic", "cost": 500}}],
                                     "greater": [{{"weight": 1, "name": "greater relic", "cost": 900}}] }},
                        "medium": {{ "lesser": [{{"weight": 1, "name": "old relic", "cost": 5000}}],
                                     "greater": [{{"weight": 1, "name": "older relic", "cost": 9000}}] }},
                        "major":  {{ "lesser": [{{"weight": 1, "name": "ancient relic", "cost": 50000}}],
                                     "greater": [{{"weight": 1, "name": "eldest relic", "cost": 90000}}] }}
                    }}
                }},
                "enchants": {{
                    "{kind}": {{
                        "1": [{{"weight": 1, "name": "gleaming"}}]
                    }}
                }}
            }}"#
            )
        };
        fs::write(dir.path().join("armor.json"), combat("breastplate", "armor")).unwrap();
        fs::write(dir.path().join("weapon.json"), combat("longsword", "melee")).unwrap();
        fs::write(dir.path().join("ring.json"), standard_ranked("ring")).unwrap();
        fs::write(dir.path().join("rod.json"), limited_ranked("rod")).unwrap();
        fs::write(dir.path().join("staff.json"), limited_ranked("staff")).unwrap();

        let mut wondrous = String::from("{");
        for (i, slot) in Slot::all().iter().enumerate() {
            if i > 0 {
                wondrous.push(',');
            }
            if *slot == Slot::Slotless {
                wondrous.push_str(&format!(
                    r#""{slot}": {{
                        "minor": {{ "least": [{{"weight": 1, "name": "least {slot} trinket"}}],
                                    "lesser": [{{"weight": 1, "name": "minor lesser {slot} item"}}],
                                    "greater": [{{"weight": 1, "name": "minor greater {slot} item"}}] }},
                        "medium": {{ "lesser": [{{"weight": 1, "name": "medium lesser {slot} item"}}],
                                     "greater": [{{"weight": 1, "name": "medium greater {slot} item"}}] }},
                        "major": {{ "lesser": [{{"weight": 1, "name": "major lesser {slot} item"}}],
                                    "greater": [{{"weight": 1, "name": "major greater {slot} item"}}] }}
                    }}"#
                ));
            } else {
                wondrous.push_str(&format!(r#""{slot}": {}"#, standard_ranked(&format!("{slot} item"))));
            }
        }
        wondrous.push('}');
        fs::write(dir.path().join("wondrous.json"), wondrous).unwrap();

        let compound = |name: &str| {
            format!(
                r#"[
                {{"minor": 3, "medium": 1, "name": "{name} of {{spell}}",
                  "cost": 50, "spell": {{"level": 1, "class": "minimum"}}}},
                {{"medium": 3, "major": 3, "name": "greater {name} of {{spell}}",
                  "cost": 700, "spell": {{"level": 3, "class": "minimum"}}}}
            ]"#
            )
        };
        fs::write(dir.path().join("potion.json"), compound("potion")).unwrap();
        fs::write(dir.path().join("scroll.json"), compound("scroll")).unwrap();
        fs::write(dir.path().join("wand.json"), compound("wand")).unwrap();

        fs::write(
            dir.path().join("category.json"),
            r#"{
                "minor": [
                    {"weight": 30, "category": "armor"},
                    {"weight": 30, "category": "weapon"},
                    {"weight": 40, "category": "wondrous"}
                ],
                "medium": [
                    {"weight": 20, "category": "rod"},
                    {"weight": 30, "category": "staff"},
                    {"weight": 50, "category": "wondrous"}
                ],
                "major": [
                    {"weight": 50, "category": "ring"},
                    {"weight": 50, "category": "wondrous"}
                ]
            }"#,
        )
        .unwrap();

        fs::write(
            dir.path().join("keys.json"),
            r#"{"gem": ["ruby", "topaz"]}"#,
        )
        .unwrap();

        dir
    }

    #[test]
    fn loads_a_complete_data_directory() {
        let dir = fixture_dir();
        let tables = Tables::load(dir.path()).unwrap();
        assert_eq!(tables.ring.ranks().len(), 3);
        assert_eq!(tables.rod.ranks().len(), 2);
        assert_eq!(tables.armor.bases.len(), 1);
        assert_eq!(tables.keys.names(), vec!["gem"]);
    }

    #[test]
    fn missing_family_file_names_the_family() {
        let dir = fixture_dir();
        fs::remove_file(dir.path().join("staff.json")).unwrap();
        let err = Tables::load(dir.path()).unwrap_err();
        match err {
            TableError::Io { family, .. } => assert_eq!(family, "staff"),
            other => panic!("expected Io error, got {other}"),
        }
    }

    #[test]
    fn malformed_family_file_names_family_and_path() {
        let dir = fixture_dir();
        fs::write(dir.path().join("ring.json"), "{ broken").unwrap();
        let err = Tables::load(dir.path()).unwrap_err();
        match err {
            TableError::Parse { family, path, .. } => {
                assert_eq!(family, "ring");
                assert!(path.ends_with("ring.json"));
            }
            other => panic!("expected Parse error, got {other}"),
        }
    }

    #[test]
    fn rod_table_with_minor_rank_is_rejected() {
        let dir = fixture_dir();
        fs::write(
            dir.path().join("rod.json"),
            r#"{
                "minor":  { "lesser": [{"weight": 1, "name": "a"}],
                            "greater": [{"weight": 1, "name": "b"}] },
                "medium": { "lesser": [{"weight": 1, "name": "c"}],
                            "greater": [{"weight": 1, "name": "d"}] },
                "major":  { "lesser": [{"weight": 1, "name": "e"}],
                            "greater": [{"weight": 1, "name": "f"}] }
            }"#,
        )
        .unwrap();
        let err = Tables::load(dir.path()).unwrap_err();
        match err {
            TableError::Shape { family, detail } => {
                assert_eq!(family, "rod");
                assert!(detail.contains("minor"));
            }
            other => panic!("expected Shape error, got {other}"),
        }
    }

    #[test]
    fn wondrous_store_requires_every_slot() {
        let dir = fixture_dir();
        // drop one slot from the document
        let text = fs::read_to_string(dir.path().join("wondrous.json")).unwrap();
        let truncated = text.replacen("\"belt\":", "\"_belt\":", 1);
        fs::write(dir.path().join("wondrous.json"), truncated).unwrap();
        let err = Tables::load(dir.path()).unwrap_err();
        assert!(matches!(err, TableError::Shape { family: "wondrous", .. }));
    }

    #[test]
    fn category_table_draws_within_rank_domain() {
        let dir = fixture_dir();
        let tables = Tables::load(dir.path()).unwrap();
        let mut rng = rng();
        for _ in 0..100 {
            let category = tables.category.random(&mut rng, Rank::Major).unwrap();
            assert!(matches!(category, Category::Ring | Category::Wondrous));
        }
    }

    #[test]
    fn specific_sub_table_resolves_by_name() {
        let dir = fixture_dir();
        let tables = Tables::load(dir.path()).unwrap();
        let relics = tables.armor.specific("relics").unwrap();
        let item = relics
            .random(&mut rng(), Some(Rank::Minor), Some(hoard_core::Subrank::Lesser))
            .unwrap();
        assert_eq!(item.name, "lesser relic");
        assert_eq!(item.cost, Some(500));

        assert!(tables.armor.specific("unknown").is_err());
    }
}
