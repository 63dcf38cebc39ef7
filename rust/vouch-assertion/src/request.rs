//! Per-call verification inputs.

use crate::assertion::Assertion;
use serde::{Deserialize, Serialize};

/// The immutable input bundle for one verification call.
///
/// Created per call and consumed once. The core holds no state across
/// calls: replay protection works only through the `previous_count` the
/// caller threads in from its credential record, and the caller persists
/// the count returned on success.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationRequest {
    /// The raw assertion triple from the platform.
    pub assertion: Assertion,
    /// SEC1 compressed P-256 public key (33 bytes) from the credential
    /// store.
    #[serde(with = "serde_bytes")]
    pub public_key: Vec<u8>,
    /// Last counter value persisted for this credential, if any. `None`
    /// disables the replay check for this call.
    pub previous_count: Option<u32>,
}

impl VerificationRequest {
    /// Bundle an assertion with its credential public key.
    #[must_use]
    pub fn new(assertion: Assertion, public_key: Vec<u8>) -> Self {
        Self {
            assertion,
            public_key,
            previous_count: None,
        }
    }

    /// Supply the stored counter for replay detection.
    #[must_use]
    pub fn with_previous_count(mut self, count: u32) -> Self {
        self.previous_count = Some(count);
        self
    }
}
