//! Error types for signature decoding and key handling.

use thiserror::Error;
use vouch_codec::Truncated;

/// Errors from decoding or canonicalizing an ECDSA signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SignatureDecodeError {
    /// The buffer ended before a required or declared length.
    #[error(transparent)]
    Truncated(#[from] Truncated),

    /// The DER structure violates encoding rules.
    #[error("malformed DER signature: {0}")]
    Malformed(&'static str),

    /// A decoded scalar is zero or not less than the curve order.
    #[error("signature scalar is zero or exceeds the curve order")]
    InvalidScalar,

    /// The signature is in range but its `s` is not in low-S form.
    #[error("high-s signature is not canonical")]
    NonCanonical,
}

/// Errors from decoding a compressed P-256 public key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PublicKeyError {
    /// The key is not exactly 33 bytes long.
    #[error("compressed P-256 key must be 33 bytes, got {len}")]
    WrongLength {
        /// Length of the rejected input.
        len: usize,
    },

    /// The bytes do not decode to a point on the curve.
    #[error("bytes do not encode a valid P-256 point")]
    InvalidPoint,
}
