//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditError {
    /// Every add operation must carry exactly one of `after`/`before`.
    /// This aborts the whole batch before any mutation.
    #[error("add operation is missing a position reference")]
    MissingPosition,

    #[error("response contains no <edit> block")]
    MissingEditBlock,

    #[error("invalid edit script: {0}")]
    Script(#[from] serde_json::Error),
}
