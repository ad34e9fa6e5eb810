use std::path::PathBuf;

use hoard_core::{CoreError, Rank, Subrank};

/// Alias for `Result<T, TableError>`.
pub type TableResult<T> = Result<T, TableError>;

/// Errors raised while loading or querying table data.
#[derive(Debug, thiserror::Error)]
pub enum TableError {
    /// A source file could not be read.
    #[error("failed to read {family} table from {path}: {source}")]
    Io {
        /// Item family whose file failed.
        family: &'static str,
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A source file was not valid for the family's expected shape.
    #[error("malformed {family} table in {path}: {source}")]
    Parse {
        /// Item family whose file failed.
        family: &'static str,
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying deserialization error.
        #[source]
        source: serde_json::Error,
    },

    /// A structurally invalid table (bad rank/subrank key shape).
    #[error("invalid {family} table: {detail}")]
    Shape {
        /// Item family whose table is malformed.
        family: &'static str,
        /// Human-readable description of the violation.
        detail: String,
    },

    /// A rank outside the table's domain was requested.
    #[error("{family} table has no {rank} rank")]
    InvalidRank {
        /// Item family queried.
        family: &'static str,
        /// The out-of-domain rank.
        rank: Rank,
    },

    /// A subrank outside the table's domain was requested.
    #[error("{family} table has no {subrank} subrank under {rank}")]
    InvalidSubrank {
        /// Item family queried.
        family: &'static str,
        /// Rank under which the subrank was requested.
        rank: Rank,
        /// The out-of-domain subrank.
        subrank: Subrank,
    },

    /// A filter legitimately matched nothing.
    #[error("{what} not found{}", format_suggestions(suggestions))]
    NotFound {
        /// Description of what was searched for.
        what: String,
        /// Near-miss candidates, when a name lookup missed.
        suggestions: Vec<String>,
    },

    /// A template key (or grouped subkey) does not exist.
    #[error("unknown template key: \"{key}\"")]
    KeyNotFound {
        /// The missing key, as `name` or `name:subkey`.
        key: String,
    },

    /// An enchantment type outside the family's domain was requested.
    #[error("{family} enchantments have no \"{kind}\" type")]
    UnknownEnchantmentKind {
        /// Item family queried.
        family: &'static str,
        /// The unknown enchantment type.
        kind: String,
    },

    /// An enchantment bonus level outside the type's domain was requested.
    #[error("{family} \"{kind}\" enchantments have no +{bonus} level")]
    UnknownEnchantmentBonus {
        /// Item family queried.
        family: &'static str,
        /// Enchantment type queried.
        kind: String,
        /// The out-of-domain bonus level.
        bonus: u8,
    },

    /// A core vocabulary or draw error.
    #[error(transparent)]
    Core(#[from] CoreError),
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(" (did you mean: {}?)", suggestions.join(", "))
    }
}
