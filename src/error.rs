//! Error types for the `try_*` tree operations.

use thiserror::Error;

/// Result type alias for hash tree operations.
pub type Result<T> = std::result::Result<T, HashTreeError>;

/// Ways a keyed operation can fail.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashTreeError {
    /// No node along the residue path holds the key.
    #[error("key {key} not found")]
    NotFound { key: u32 },

    /// The residue path ran past the last prime without a free slot. Distinct keys always part
    /// ways before that, so this only shows up once an item's key changed after insertion.
    #[error("no slot for key {key} within {max_depth} levels")]
    DepthOverflow { key: u32, max_depth: u8 },
}
