//! The verification error taxonomy.

use thiserror::Error;
use vouch_codec::Truncated;
use vouch_ecdsa::{PublicKeyError, SignatureDecodeError};

/// Reasons an assertion fails verification.
///
/// Every failure is returned as a value to the immediate caller; nothing
/// is retried internally and nothing is downgraded to success. The
/// variants are distinguishable so callers can pick a response: prompt
/// re-authentication ([`UserNotPresent`] / [`UserNotVerified`]), suspect
/// a cloned authenticator ([`ReplayedOrClonedCredential`]), or treat the
/// request as attacker-controlled garbage (the structural variants).
///
/// [`UserNotPresent`]: VerifyError::UserNotPresent
/// [`UserNotVerified`]: VerifyError::UserNotVerified
/// [`ReplayedOrClonedCredential`]: VerifyError::ReplayedOrClonedCredential
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// An input buffer is shorter than a required or declared length.
    #[error("input truncated: needed {needed} bytes, {available} available")]
    TruncatedInput {
        /// Bytes the failed read required.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// The DER signature structure violates encoding rules.
    #[error("malformed DER signature: {0}")]
    MalformedSignature(&'static str),

    /// A signature scalar is zero or not less than the curve order.
    #[error("signature scalar is zero or exceeds the curve order")]
    InvalidScalar,

    /// The public key is not a 33-byte SEC1 compressed P-256 point.
    #[error("invalid compressed P-256 public key")]
    InvalidPublicKey,

    /// Policy requires the User Present flag and it is unset.
    #[error("user presence flag is not set")]
    UserNotPresent,

    /// Policy requires the User Verified flag and it is unset.
    #[error("user verification flag is not set")]
    UserNotVerified,

    /// The relying-party ID hash differs from the one policy expects.
    #[error("relying-party id hash does not match the expected value")]
    RelyingPartyMismatch,

    /// The signature counter did not advance past the stored value.
    #[error("signature counter did not advance: previous {previous}, current {current}")]
    ReplayedOrClonedCredential {
        /// The stored counter supplied by the caller.
        previous: u32,
        /// The counter parsed from the assertion.
        current: u32,
    },

    /// The signature is structurally valid but does not verify.
    #[error("signature does not verify against the reconstructed payload")]
    SignatureMismatch,

    /// The batch exceeds the configured bound.
    #[error("batch of {len} requests exceeds the limit of {max}")]
    BatchTooLarge {
        /// Number of requests submitted.
        len: usize,
        /// The bound in force.
        max: usize,
    },
}

impl From<Truncated> for VerifyError {
    fn from(err: Truncated) -> Self {
        Self::TruncatedInput {
            needed: err.needed,
            available: err.available,
        }
    }
}

impl From<SignatureDecodeError> for VerifyError {
    fn from(err: SignatureDecodeError) -> Self {
        match err {
            SignatureDecodeError::Truncated(truncated) => truncated.into(),
            SignatureDecodeError::Malformed(reason) => Self::MalformedSignature(reason),
            SignatureDecodeError::InvalidScalar => Self::InvalidScalar,
            SignatureDecodeError::NonCanonical => {
                Self::MalformedSignature("high-s signature is not canonical")
            }
        }
    }
}

impl From<PublicKeyError> for VerifyError {
    fn from(_: PublicKeyError) -> Self {
        Self::InvalidPublicKey
    }
}
