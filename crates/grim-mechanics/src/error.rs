//! Error types for the mechanics engine.

/// Errors that can occur during mechanics operations.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// A luck test was attempted with no luck left.
    #[error("you have no luck left")]
    NoLuck,

    /// A scripted die was built from an empty sequence.
    #[error("a scripted die needs at least one value")]
    EmptyScript,
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
