//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// An ability score abbreviation was not recognised.
    #[error("unknown stat: {0}")]
    UnknownStat(String),

    /// A class name was not recognised.
    #[error("unknown class: {0}")]
    UnknownClass(String),

    /// A race name was not recognised.
    #[error("unknown race: {0}")]
    UnknownRace(String),

    /// A sex was not recognised.
    #[error("unknown sex: {0}")]
    UnknownSex(String),

    /// An alignment was not recognised.
    #[error("unknown alignment: {0}")]
    UnknownAlignment(String),

    /// A story arc identifier was not recognised.
    #[error("unknown arc: {0}")]
    UnknownArc(String),

    /// A character record violates one of its invariants.
    #[error("invalid character: {0}")]
    InvalidCharacter(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
