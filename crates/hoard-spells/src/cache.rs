//! The persisted spell record cache.
//!
//! Compiling the index is the only expensive startup step, so the
//! compiled records persist alongside a schema fingerprint and the
//! modification times of the source files. A warm start with matching
//! fingerprint and timestamps skips the build; anything else rebuilds.

use std::path::{Path, PathBuf};
use std::time::UNIX_EPOCH;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{SpellError, SpellResult};
use crate::record::SpellRecord;

/// Bumped whenever the compiled record layout changes; stale caches
/// self-invalidate through the fingerprint.
const SCHEMA_VERSION: &str = "hoard-spell-index-v1";

/// One source file's identity at cache-write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceStamp {
    /// Source file path as written.
    pub path: PathBuf,
    /// Modification time, seconds since the Unix epoch.
    pub mtime_secs: u64,
}

/// The on-disk cache document.
#[derive(Debug, Serialize, Deserialize)]
pub struct CacheFile {
    /// Schema fingerprint the records were compiled under.
    pub fingerprint: String,
    /// Source files and their modification times at compile time.
    pub sources: Vec<SourceStamp>,
    /// The compiled records.
    pub records: Vec<SpellRecord>,
}

/// The current schema fingerprint.
pub fn fingerprint() -> String {
    hex::encode(Sha256::digest(SCHEMA_VERSION.as_bytes()))
}

/// Stamp the given source files with their current modification times.
pub fn stamp_sources(paths: &[&Path]) -> SpellResult<Vec<SourceStamp>> {
    paths
        .iter()
        .map(|path| {
            let metadata = std::fs::metadata(path).map_err(|source| SpellError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            let mtime_secs = metadata
                .modified()
                .ok()
                .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
                .map(|d| d.as_secs())
                .unwrap_or(0);
            Ok(SourceStamp {
                path: path.to_path_buf(),
                mtime_secs,
            })
        })
        .collect()
}

/// Read the cache, returning `None` on any miss: absent file, unreadable
/// document, or a document for a different schema.
pub fn load(path: &Path) -> Option<CacheFile> {
    let text = std::fs::read_to_string(path).ok()?;
    let cache: CacheFile = match serde_json::from_str(&text) {
        Ok(cache) => cache,
        Err(error) => {
            tracing::debug!(path = %path.display(), %error, "unreadable spell cache; rebuilding");
            return None;
        }
    };
    if cache.fingerprint != fingerprint() {
        tracing::debug!(path = %path.display(), "spell cache fingerprint mismatch; rebuilding");
        return None;
    }
    Some(cache)
}

/// Whether a cache is still valid for the given source stamps.
pub fn is_fresh(cache: &CacheFile, current: &[SourceStamp]) -> bool {
    cache.sources == current
}

/// Persist the cache. Failure to write is logged, not fatal; the next
/// start simply rebuilds.
pub fn save(path: &Path, cache: &CacheFile) {
    let write = serde_json::to_string(cache)
        .map_err(std::io::Error::other)
        .and_then(|text| std::fs::write(path, text));
    if let Err(error) = write {
        tracing::warn!(path = %path.display(), %error, "could not persist spell cache");
    }
}
