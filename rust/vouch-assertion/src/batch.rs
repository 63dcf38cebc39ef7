//! Bounded batch verification.

use crate::error::VerifyError;
use crate::request::VerificationRequest;
use crate::verifier::{AssertionVerifier, VerifiedAssertion};

/// Default cap on the number of requests in one batch call.
pub const DEFAULT_MAX_BATCH: usize = 10;

impl AssertionVerifier {
    /// Verify an ordered sequence of independent assertions.
    ///
    /// Results come back in input order, one per request, each produced
    /// by [`AssertionVerifier::verify`] with no shared state: a failing
    /// item never suppresses evaluation of the others. Items share
    /// nothing, so callers needing throughput may shard a batch across
    /// threads themselves as long as they reassemble results by index.
    ///
    /// # Errors
    ///
    /// Fails with [`VerifyError::BatchTooLarge`] before any item is
    /// evaluated when the batch exceeds the configured bound.
    pub fn verify_batch(
        &self,
        requests: &[VerificationRequest],
    ) -> Result<Vec<Result<VerifiedAssertion, VerifyError>>, VerifyError> {
        if requests.len() > self.max_batch {
            return Err(VerifyError::BatchTooLarge {
                len: requests.len(),
                max: self.max_batch,
            });
        }
        Ok(requests.iter().map(|request| self.verify(request)).collect())
    }
}
