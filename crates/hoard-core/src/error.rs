/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in the core vocabulary and table types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A string could not be parsed as a [`crate::Rank`].
    #[error("unknown rank: \"{0}\" (expected minor, medium, or major)")]
    UnknownRank(String),

    /// A string could not be parsed as a [`crate::Subrank`].
    #[error("unknown subrank: \"{0}\" (expected least, lesser, or greater)")]
    UnknownSubrank(String),

    /// A string could not be parsed as a [`crate::Category`].
    #[error("unknown category: \"{0}\"")]
    UnknownCategory(String),

    /// A string could not be parsed as a [`crate::Slot`].
    #[error("unknown slot: \"{0}\"")]
    UnknownSlot(String),

    /// A draw was requested from an empty table or one whose weights sum to zero.
    #[error("cannot draw from an empty distribution")]
    EmptyDistribution,
}
