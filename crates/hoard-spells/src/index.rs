//! The compiled spell index and its random queries.

use std::collections::BTreeMap;

use rand::Rng;
use rand::rngs::StdRng;

use hoard_core::draw_uniform;

use crate::class::{ClassDef, ClassKind};
use crate::error::{SpellError, SpellResult};
use crate::record::{ClassLevel, SpellRecord, SpellSource};

/// Flagship class for the arcane spellpage column.
const ARCANE_FLAGSHIP: &str = "wizard";

/// Flagship class for the divine spellpage column.
const DIVINE_FLAGSHIP: &str = "cleric";

/// Deepest legal spell level.
const MAX_SPELL_LEVEL: u8 = 9;

/// Which class column a query resolves against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ClassSelector {
    /// The derived lowest-level column.
    #[default]
    Minimum,
    /// Randomly the arcane or the divine spellpage column.
    Spellpage,
    /// The arcane spellpage column.
    SpellpageArcane,
    /// The divine spellpage column.
    SpellpageDivine,
    /// A uniformly chosen class, restricted to classes deep enough for
    /// the requested level.
    Random,
    /// A concrete class column.
    Named(String),
}

impl ClassSelector {
    /// Parse a selector. Anything outside the pseudo-class vocabulary is
    /// a named class, validated at query time.
    pub fn parse(s: &str) -> Self {
        match s.to_lowercase().trim() {
            "minimum" => Self::Minimum,
            "spellpage" => Self::Spellpage,
            "spellpage_arcane" => Self::SpellpageArcane,
            "spellpage_divine" => Self::SpellpageDivine,
            "random" => Self::Random,
            name => Self::Named(name.to_string()),
        }
    }
}

/// One query result: a spell and the caster info it resolved under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpellPick {
    /// Spell name.
    pub name: String,
    /// Class the level column came from.
    pub class: String,
    /// Spell level in that class.
    pub level: u8,
    /// Minimum caster level for that class and level.
    pub caster_level: u32,
}

/// The immutable compiled index: classes in canonical order, compiled
/// records, and the tag inverted index.
#[derive(Debug)]
pub struct SpellIndex {
    classes: Vec<ClassDef>,
    records: Vec<SpellRecord>,
    tag_index: BTreeMap<String, Vec<usize>>,
}

impl SpellIndex {
    /// Compile source spells against the class list.
    ///
    /// Spell levels beyond a class's table depth are discarded as data
    /// errors (logged, treated as absent); a spell no class can cast is
    /// dropped entirely.
    pub fn build(classes: Vec<ClassDef>, spells: &[SpellSource]) -> SpellResult<Self> {
        for class in &classes {
            let targets = class.copy.iter().chain(class.merge.iter());
            for target in targets {
                if !classes.iter().any(|c| &c.name == target) {
                    return Err(SpellError::UnknownAlias {
                        class: class.name.clone(),
                        target: target.clone(),
                    });
                }
            }
        }

        let mut records = Vec::with_capacity(spells.len());
        for spell in spells {
            match compile(&classes, spell) {
                Some(record) => records.push(record),
                None => {
                    tracing::warn!(spell = %spell.name, "no class can cast this spell; dropped");
                }
            }
        }
        Ok(Self::from_records(classes, records))
    }

    /// Assemble an index from already-compiled records (the cache path).
    pub fn from_records(classes: Vec<ClassDef>, records: Vec<SpellRecord>) -> Self {
        let mut tag_index: BTreeMap<String, Vec<usize>> = BTreeMap::new();
        for (i, record) in records.iter().enumerate() {
            for tag in &record.tags {
                tag_index.entry(tag.clone()).or_default().push(i);
            }
        }
        Self {
            classes,
            records,
            tag_index,
        }
    }

    /// The class list in canonical order.
    pub fn classes(&self) -> &[ClassDef] {
        &self.classes
    }

    /// The compiled records.
    pub fn records(&self) -> &[SpellRecord] {
        &self.records
    }

    /// Number of compiled spells.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index holds no spells.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Draw a random spell matching the level, class column, and tag
    /// constraints.
    pub fn random(
        &self,
        rng: &mut StdRng,
        level: Option<u8>,
        selector: &ClassSelector,
        tag: Option<&str>,
    ) -> SpellResult<SpellPick> {
        if let Some(level) = level
            && level > MAX_SPELL_LEVEL
        {
            return Err(SpellError::InvalidLevel(level));
        }

        let selector = self.resolve_selector(rng, level, selector)?;

        let candidates: Vec<usize> = match tag {
            Some(tag) => self
                .tag_index
                .get(&tag.to_lowercase())
                .cloned()
                .unwrap_or_default(),
            None => (0..self.records.len()).collect(),
        };

        let matches: Vec<(usize, ClassLevel)> = candidates
            .into_iter()
            .filter_map(|i| {
                let column = self.column_value(&self.records[i], &selector)?;
                match level {
                    Some(level) if column.level != level => None,
                    _ => Some((i, column)),
                }
            })
            .collect();
        if matches.is_empty() {
            return Err(SpellError::NoMatch);
        }

        let (index, column) = draw_uniform(&matches, rng)?;
        let class = self
            .classes
            .iter()
            .find(|c| c.name == column.class)
            .ok_or_else(|| SpellError::InvalidClass(column.class.clone()))?;
        let caster_level = class
            .caster_level(column.level)
            .ok_or_else(|| SpellError::InvalidClass(column.class.clone()))?;

        Ok(SpellPick {
            name: self.records[*index].name.clone(),
            class: column.class.clone(),
            level: column.level,
            caster_level,
        })
    }

    /// Reduce pseudo-selectors needing randomness or validation to a
    /// concrete column selector.
    fn resolve_selector(
        &self,
        rng: &mut StdRng,
        level: Option<u8>,
        selector: &ClassSelector,
    ) -> SpellResult<ClassSelector> {
        match selector {
            ClassSelector::Spellpage => {
                if rng.random_range(0..2) == 0 {
                    Ok(ClassSelector::SpellpageArcane)
                } else {
                    Ok(ClassSelector::SpellpageDivine)
                }
            }
            ClassSelector::Random => {
                let deep_enough: Vec<&ClassDef> = self
                    .classes
                    .iter()
                    .filter(|class| match level {
                        Some(level) => class.caster_level(level).is_some(),
                        None => true,
                    })
                    .collect();
                if deep_enough.is_empty() {
                    return Err(SpellError::NoMatch);
                }
                let class = draw_uniform(&deep_enough, rng)?;
                Ok(ClassSelector::Named(class.name.clone()))
            }
            ClassSelector::Named(name) => {
                if !self.classes.iter().any(|c| &c.name == name) {
                    return Err(SpellError::InvalidClass(name.clone()));
                }
                Ok(ClassSelector::Named(name.clone()))
            }
            other => Ok(other.clone()),
        }
    }

    /// The column value a record exposes under a concrete selector.
    fn column_value(&self, record: &SpellRecord, selector: &ClassSelector) -> Option<ClassLevel> {
        match selector {
            ClassSelector::Minimum => Some(record.minimum.clone()),
            ClassSelector::SpellpageArcane => record.spellpage_arcane.clone(),
            ClassSelector::SpellpageDivine => record.spellpage_divine.clone(),
            ClassSelector::Named(name) => record.level_for(name).map(|level| ClassLevel {
                class: name.clone(),
                level,
            }),
            // Spellpage and Random were resolved before filtering.
            ClassSelector::Spellpage | ClassSelector::Random => None,
        }
    }
}

/// Compile one source spell, resolving aliases and deriving columns.
fn compile(classes: &[ClassDef], spell: &SpellSource) -> Option<SpellRecord> {
    let mut levels = BTreeMap::new();
    for class in classes {
        let source_level = if let Some(target) = &class.copy {
            spell.levels.get(target).copied()
        } else if !class.merge.is_empty() {
            class
                .merge
                .iter()
                .filter_map(|target| spell.levels.get(target))
                .min()
                .copied()
        } else {
            spell.levels.get(&class.name).copied()
        };
        let Some(level) = source_level else {
            continue;
        };
        if class.caster_level(level).is_none() {
            tracing::warn!(
                spell = %spell.name,
                class = %class.name,
                level,
                "spell level exceeds the class table; discarded"
            );
            continue;
        }
        levels.insert(class.name.clone(), level);
    }

    let minimum = derive_minimum(classes, &levels)?;
    let spellpage_arcane = derive_spellpage(classes, &levels, ClassKind::Arcane, ARCANE_FLAGSHIP);
    let spellpage_divine = derive_spellpage(classes, &levels, ClassKind::Divine, DIVINE_FLAGSHIP);

    let mut tags: std::collections::BTreeSet<String> = [spell.school.to_lowercase()].into();
    if let Some(subschool) = &spell.subschool {
        tags.insert(subschool.to_lowercase());
    }
    tags.extend(spell.descriptors.iter().map(|d| d.to_lowercase()));

    Some(SpellRecord {
        name: spell.name.clone(),
        levels,
        minimum,
        spellpage_arcane,
        spellpage_divine,
        tags,
    })
}

/// Lowest level across classes; the first class in canonical order at
/// that level wins ties.
fn derive_minimum(classes: &[ClassDef], levels: &BTreeMap<String, u8>) -> Option<ClassLevel> {
    let mut best: Option<ClassLevel> = None;
    for class in classes {
        let Some(&level) = levels.get(&class.name) else {
            continue;
        };
        if best.as_ref().is_none_or(|b| level < b.level) {
            best = Some(ClassLevel {
                class: class.name.clone(),
                level,
            });
        }
    }
    best
}

/// The flagship class's level when present, else the highest level among
/// the tradition's other classes (first in canonical order on ties).
fn derive_spellpage(
    classes: &[ClassDef],
    levels: &BTreeMap<String, u8>,
    kind: ClassKind,
    flagship: &str,
) -> Option<ClassLevel> {
    if let Some(&level) = levels.get(flagship) {
        return Some(ClassLevel {
            class: flagship.to_string(),
            level,
        });
    }
    let mut best: Option<ClassLevel> = None;
    for class in classes {
        if class.kind != kind {
            continue;
        }
        let Some(&level) = levels.get(&class.name) else {
            continue;
        };
        if best.as_ref().is_none_or(|b| level > b.level) {
            best = Some(ClassLevel {
                class: class.name.clone(),
                level,
            });
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(33)
    }

    fn classes() -> Vec<ClassDef> {
        serde_json::from_str(
            r#"[
                {"name": "wizard", "kind": "arcane",
                 "levels": [1, 1, 3, 5, 7, 9, 11, 13, 15, 17]},
                {"name": "sorcerer", "kind": "arcane",
                 "levels": [1, 1, 4, 6, 8, 10, 12, 14, 16, 18],
                 "copy": "wizard"},
                {"name": "cleric", "kind": "divine",
                 "levels": [1, 1, 3, 5, 7, 9, 11, 13, 15, 17]},
                {"name": "bard", "kind": "arcane",
                 "levels": [1, 1, 4, 7, 10, 13, 16]},
                {"name": "paladin", "kind": "divine",
                 "levels": [null, 4, 7, 10, 13]},
                {"name": "inquisitor", "kind": "divine",
                 "levels": [1, 1, 4, 7, 10, 13, 16],
                 "merge": ["cleric", "paladin"]}
            ]"#,
        )
        .unwrap()
    }

    fn spells() -> Vec<SpellSource> {
        serde_json::from_str(
            r#"[
                {"name": "fireball", "levels": {"wizard": 3},
                 "school": "evocation", "descriptors": ["fire"]},
                {"name": "cure light wounds",
                 "levels": {"cleric": 1, "bard": 1, "paladin": 1},
                 "school": "conjuration", "subschool": "healing"},
                {"name": "magic missile", "levels": {"wizard": 1},
                 "school": "evocation", "descriptors": ["force"]},
                {"name": "holy word", "levels": {"cleric": 7},
                 "school": "evocation", "descriptors": ["sonic"]},
                {"name": "lost litany", "levels": {"paladin": 5},
                 "school": "abjuration"}
            ]"#,
        )
        .unwrap()
    }

    fn index() -> SpellIndex {
        SpellIndex::build(classes(), &spells()).unwrap()
    }

    #[test]
    fn copy_alias_takes_the_target_column() {
        let index = index();
        let fireball = &index.records()[0];
        assert_eq!(fireball.name, "fireball");
        assert_eq!(fireball.level_for("wizard"), Some(3));
        assert_eq!(fireball.level_for("sorcerer"), Some(3));
        assert_eq!(fireball.level_for("cleric"), None);
    }

    #[test]
    fn merge_alias_takes_the_minimum_across_targets() {
        let index = index();
        let cure = &index.records()[1];
        assert_eq!(cure.name, "cure light wounds");
        assert_eq!(cure.level_for("inquisitor"), Some(1));
    }

    #[test]
    fn minimum_tie_breaks_by_canonical_order() {
        let index = index();
        let cure = &index.records()[1];
        // cleric, bard, paladin, and inquisitor all reach level 1;
        // cleric comes first in classes.json order
        assert_eq!(cure.minimum.class, "cleric");
        assert_eq!(cure.minimum.level, 1);
    }

    #[test]
    fn spellpage_prefers_the_flagship_class() {
        let index = index();
        let fireball = &index.records()[0];
        assert_eq!(
            fireball.spellpage_arcane,
            Some(ClassLevel {
                class: "wizard".to_string(),
                level: 3
            })
        );
        assert!(fireball.spellpage_divine.is_none());
    }

    #[test]
    fn spellpage_falls_back_to_highest_other_level() {
        let index = index();
        let cure = &index.records()[1];
        // no wizard column; bard is the only remaining arcane class
        assert_eq!(
            cure.spellpage_arcane,
            Some(ClassLevel {
                class: "bard".to_string(),
                level: 1
            })
        );
        // cleric is the divine flagship
        assert_eq!(
            cure.spellpage_divine,
            Some(ClassLevel {
                class: "cleric".to_string(),
                level: 1
            })
        );
    }

    #[test]
    fn over_deep_level_is_discarded_but_spell_survives_elsewhere() {
        // lost litany is paladin 5, beyond the paladin table (max 4),
        // but the inquisitor merge still resolves it at 5
        let index = index();
        let litany = &index.records()[4];
        assert_eq!(litany.level_for("paladin"), None);
        assert_eq!(litany.level_for("inquisitor"), Some(5));
    }

    #[test]
    fn unknown_alias_target_fails_the_build() {
        let mut defs = classes();
        defs[1].copy = Some("warlock".to_string());
        let err = SpellIndex::build(defs, &spells()).unwrap_err();
        assert!(matches!(err, SpellError::UnknownAlias { .. }));
    }

    #[test]
    fn random_by_class_and_level_matches_the_column() {
        let index = index();
        let mut rng = rng();
        for _ in 0..50 {
            let pick = index
                .random(
                    &mut rng,
                    Some(1),
                    &ClassSelector::Named("wizard".to_string()),
                    None,
                )
                .unwrap();
            assert_eq!(pick.name, "magic missile");
            assert_eq!(pick.class, "wizard");
            assert_eq!(pick.level, 1);
            assert_eq!(pick.caster_level, 1);
        }
    }

    #[test]
    fn caster_level_comes_from_the_resolved_class_table() {
        let index = index();
        let pick = index
            .random(
                &mut rng(),
                Some(7),
                &ClassSelector::Named("cleric".to_string()),
                None,
            )
            .unwrap();
        assert_eq!(pick.name, "holy word");
        assert_eq!(pick.caster_level, 13);
    }

    #[test]
    fn tag_filter_restricts_matches() {
        let index = index();
        let mut rng = rng();
        for _ in 0..50 {
            let pick = index
                .random(&mut rng, None, &ClassSelector::Minimum, Some("fire"))
                .unwrap();
            assert_eq!(pick.name, "fireball");
        }
    }

    #[test]
    fn tag_filter_is_case_insensitive() {
        let index = index();
        let pick = index
            .random(&mut rng(), None, &ClassSelector::Minimum, Some("Healing"))
            .unwrap();
        assert_eq!(pick.name, "cure light wounds");
    }

    #[test]
    fn no_match_for_an_empty_result_set() {
        let index = index();
        let err = index
            .random(
                &mut rng(),
                Some(9),
                &ClassSelector::Named("cleric".to_string()),
                None,
            )
            .unwrap_err();
        assert!(matches!(err, SpellError::NoMatch));
        assert_eq!(
            err.to_string(),
            "No spells found for the requested parameters"
        );
    }

    #[test]
    fn invalid_class_and_level_are_typed_errors() {
        let index = index();
        assert!(matches!(
            index
                .random(&mut rng(), None, &ClassSelector::Named("warlock".to_string()), None)
                .unwrap_err(),
            SpellError::InvalidClass(_)
        ));
        assert!(matches!(
            index
                .random(&mut rng(), Some(10), &ClassSelector::Minimum, None)
                .unwrap_err(),
            SpellError::InvalidLevel(10)
        ));
    }

    #[test]
    fn random_selector_only_picks_deep_enough_classes() {
        let index = index();
        let mut rng = rng();
        for _ in 0..100 {
            let pick = index.random(&mut rng, Some(7), &ClassSelector::Random, None);
            // only wizard, sorcerer, and cleric reach level 7, and only
            // the cleric column has a level-7 spell; every success must
            // come from one of the deep classes
            if let Ok(pick) = pick {
                assert_eq!(pick.name, "holy word");
                assert_eq!(pick.class, "cleric");
            }
        }
    }

    #[test]
    fn spellpage_selector_resolves_to_either_side() {
        let index = index();
        let mut rng = rng();
        let mut classes_seen = std::collections::HashSet::new();
        for _ in 0..200 {
            if let Ok(pick) =
                index.random(&mut rng, Some(1), &ClassSelector::Spellpage, None)
            {
                classes_seen.insert(pick.class);
            }
        }
        // level-1 spellpage arcane: magic missile (wizard) or cure (bard);
        // divine: cure (cleric)
        assert!(classes_seen.len() >= 2, "saw only {classes_seen:?}");
    }

    #[test]
    fn selector_parse_vocabulary() {
        assert_eq!(ClassSelector::parse("minimum"), ClassSelector::Minimum);
        assert_eq!(ClassSelector::parse("SPELLPAGE"), ClassSelector::Spellpage);
        assert_eq!(
            ClassSelector::parse("spellpage_arcane"),
            ClassSelector::SpellpageArcane
        );
        assert_eq!(ClassSelector::parse("random"), ClassSelector::Random);
        assert_eq!(
            ClassSelector::parse("wizard"),
            ClassSelector::Named("wizard".to_string())
        );
    }
}
