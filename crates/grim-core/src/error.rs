/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised by the data model.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A stat name did not match skill, stamina, or luck.
    #[error("unknown stat: \"{0}\" (expected skill, stamina or luck)")]
    UnknownStat(String),

    /// A heptagram slot index was outside `0..7`.
    #[error("heptagram slot {0} does not exist (slots are 0 to 6)")]
    InvalidSlot(usize),

    /// The save was written by a newer schema than this build understands.
    #[error("save schema version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version found in the save.
        found: u32,
        /// Highest version this build can read.
        supported: u32,
    },

    /// The save could not be encoded or decoded.
    #[error("malformed save data: {0}")]
    Json(#[from] serde_json::Error),
}
