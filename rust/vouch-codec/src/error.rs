//! Error type for buffer reads.

use thiserror::Error;

/// A read past the end of the input buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
#[error("input truncated: needed {needed} bytes, {available} available")]
pub struct Truncated {
    /// Length of the read that was attempted.
    pub needed: usize,
    /// Bytes remaining in the buffer at the point of the read.
    pub available: usize,
}
