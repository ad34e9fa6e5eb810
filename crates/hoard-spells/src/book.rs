//! The shared spell index handle.
//!
//! Readers clone an `Arc` of the current index and never block each
//! other. The rare rebuild (cold start, or source files edited) happens
//! behind a dedicated mutex so at most one is in flight, and publishes
//! by swapping the `Arc`, so a reader mid-query keeps its consistent
//! snapshot, and no reader ever observes a half-built index.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError, RwLock};

use rand::rngs::StdRng;

use crate::cache::{self, CacheFile, SourceStamp};
use crate::class::ClassDef;
use crate::error::{SpellError, SpellResult};
use crate::index::{ClassSelector, SpellIndex, SpellPick};
use crate::record::SpellSource;

/// The shared, reloadable spell index.
#[derive(Debug)]
pub struct Spellbook {
    classes_path: PathBuf,
    spells_path: PathBuf,
    cache_path: PathBuf,
    index: RwLock<Arc<SpellIndex>>,
    rebuild: Mutex<()>,
}

impl Spellbook {
    /// Open the spellbook: reuse a fresh cache when one exists,
    /// otherwise compile the index and persist it.
    pub fn open(data_dir: &Path, cache_path: &Path) -> SpellResult<Self> {
        let classes_path = data_dir.join("classes.json");
        let spells_path = data_dir.join("spells.json");
        let stamps = cache::stamp_sources(&[&classes_path, &spells_path])?;

        let classes = load_classes(&classes_path)?;
        let index = match cache::load(cache_path).filter(|c| cache::is_fresh(c, &stamps)) {
            Some(cached) => {
                tracing::debug!(path = %cache_path.display(), "reusing spell cache");
                SpellIndex::from_records(classes, cached.records)
            }
            None => build_and_persist(classes, &spells_path, cache_path, stamps)?,
        };

        Ok(Self {
            classes_path,
            spells_path,
            cache_path: cache_path.to_path_buf(),
            index: RwLock::new(Arc::new(index)),
            rebuild: Mutex::new(()),
        })
    }

    /// A snapshot of the current index.
    pub fn index(&self) -> Arc<SpellIndex> {
        Arc::clone(
            &self
                .index
                .read()
                .unwrap_or_else(PoisonError::into_inner),
        )
    }

    /// Re-check the source files and rebuild when they changed.
    /// Returns whether a rebuild happened. Rebuilds are serialized;
    /// readers keep their snapshots until the atomic swap.
    pub fn reload(&self) -> SpellResult<bool> {
        let _guard = self.rebuild.lock().unwrap_or_else(PoisonError::into_inner);

        let stamps = cache::stamp_sources(&[&self.classes_path, &self.spells_path])?;
        if let Some(cached) = cache::load(&self.cache_path)
            && cache::is_fresh(&cached, &stamps)
        {
            return Ok(false);
        }

        let classes = load_classes(&self.classes_path)?;
        let index = build_and_persist(classes, &self.spells_path, &self.cache_path, stamps)?;
        *self.index.write().unwrap_or_else(PoisonError::into_inner) = Arc::new(index);
        Ok(true)
    }

    /// Draw a random spell from the current index.
    pub fn random(
        &self,
        rng: &mut StdRng,
        level: Option<u8>,
        selector: &ClassSelector,
        tag: Option<&str>,
    ) -> SpellResult<SpellPick> {
        self.index().random(rng, level, selector, tag)
    }
}

fn load_classes(path: &Path) -> SpellResult<Vec<ClassDef>> {
    load_json(path)
}

fn load_json<T: serde::de::DeserializeOwned>(path: &Path) -> SpellResult<T> {
    let text = std::fs::read_to_string(path).map_err(|source| SpellError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| SpellError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn build_and_persist(
    classes: Vec<ClassDef>,
    spells_path: &Path,
    cache_path: &Path,
    stamps: Vec<SourceStamp>,
) -> SpellResult<SpellIndex> {
    let spells: Vec<SpellSource> = load_json(spells_path)?;
    tracing::info!(spells = spells.len(), "compiling spell index");
    let index = SpellIndex::build(classes, &spells)?;
    cache::save(
        cache_path,
        &CacheFile {
            fingerprint: cache::fingerprint(),
            sources: stamps,
            records: index.records().to_vec(),
        },
    );
    Ok(index)
}
