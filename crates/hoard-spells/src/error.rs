use std::path::PathBuf;

use hoard_core::CoreError;

/// Alias for `Result<T, SpellError>`.
pub type SpellResult<T> = Result<T, SpellError>;

/// Errors raised while building or querying the spell index.
#[derive(Debug, thiserror::Error)]
pub enum SpellError {
    /// A source or cache file could not be read or written.
    #[error("failed to access spell data at {path}: {source}")]
    Io {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A source document was not valid.
    #[error("malformed spell data in {path}: {source}")]
    Parse {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A class definition refers to an alias target that does not exist.
    #[error("class \"{class}\" aliases unknown class \"{target}\"")]
    UnknownAlias {
        /// The class carrying the bad alias.
        class: String,
        /// The missing alias target.
        target: String,
    },

    /// A query named a class outside the known set.
    #[error("unknown class: \"{0}\"")]
    InvalidClass(String),

    /// A query asked for a spell level outside 0..=9.
    #[error("invalid spell level: {0} (expected 0-9)")]
    InvalidLevel(u8),

    /// A query's filters legitimately matched nothing.
    #[error("No spells found for the requested parameters")]
    NoMatch,

    /// A core draw error.
    #[error(transparent)]
    Core(#[from] CoreError),
}
