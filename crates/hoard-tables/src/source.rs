//! Raw source-document loading.
//!
//! All table families load from JSON documents. Loading is fail-fast: a
//! missing file or a malformed document aborts startup with an error
//! naming the family and the file.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::error::{TableError, TableResult};

/// One weighted source row: an integer weight plus the family's payload.
#[derive(Debug, Clone, Deserialize)]
pub struct WeightedRow<T> {
    /// Relative probability mass of this row.
    pub weight: u32,
    /// Family-specific row payload.
    #[serde(flatten)]
    pub value: T,
}

/// Raw ranked document: rank key -> subrank key -> weighted rows.
pub type RankedSource<T> = BTreeMap<String, BTreeMap<String, Vec<WeightedRow<T>>>>;

/// Read and deserialize one family's source document.
pub fn load_json<T: DeserializeOwned>(family: &'static str, path: &Path) -> TableResult<T> {
    let text = std::fs::read_to_string(path).map_err(|source| TableError::Io {
        family,
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| TableError::Parse {
        family,
        path: path.to_path_buf(),
        source,
    })
}
