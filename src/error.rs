//! Error types shared by the containers.

use std::collections::TryReserveError;
use thiserror::Error;

/// Growing or creating a buffer failed. The container that reported it is
/// left exactly as it was before the call.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AllocError {
    /// The requested capacity does not fit in `usize`.
    #[error("requested capacity overflows usize")]
    CapacityOverflow,
    /// The allocator refused the request.
    #[error("allocation failed: {0}")]
    Reserve(#[from] TryReserveError),
}

/// Failure of a positional array mutation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ArrayError {
    #[error("index {index} out of bounds for length {len}")]
    OutOfBounds { index: usize, len: usize },
    #[error(transparent)]
    Alloc(#[from] AllocError),
}
