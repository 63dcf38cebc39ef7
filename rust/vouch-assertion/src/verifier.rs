//! The assertion verification pipeline.
//!
//! Order of checks: structural preconditions, payload reconstruction,
//! flag policy, relying-party pinning, counter monotonicity, signature
//! canonicalization, elliptic-curve verification. The payload handed to
//! the curve is always `SHA-256(authenticatorData ‖
//! SHA-256(clientDataJSON))` and nothing else; the verification seam
//! performs no hashing of its own.

use crate::authenticator_data::{AuthenticatorData, Flags};
use crate::batch::DEFAULT_MAX_BATCH;
use crate::error::VerifyError;
use crate::policy::{CounterPolicy, Policy};
use crate::request::VerificationRequest;
use sha2::{Digest, Sha256};
use vouch_ecdsa::{CanonicalSignature, DigestVerifier as _, P256PublicKey, SIGNATURE_LEN};

/// Outcome of a successful verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VerifiedAssertion {
    /// The counter parsed from the assertion. The caller persists this
    /// as the credential's new stored value for future replay checks.
    pub new_count: u32,
    /// The parsed flags byte, for callers that record UV state.
    pub flags: Flags,
}

/// Compute the payload the authenticator signed.
///
/// Per the WebAuthn assertion contract this is
/// `SHA-256(authenticatorData ‖ SHA-256(clientDataJSON))`. The ordering
/// and concatenation must be bit-exact: any deviation verifies the wrong
/// statement even when the curve math succeeds.
#[must_use]
pub fn signed_payload(authenticator_data: &[u8], client_data_json: &[u8]) -> [u8; 32] {
    let client_data_hash = Sha256::digest(client_data_json);
    let mut hasher = Sha256::new();
    hasher.update(authenticator_data);
    hasher.update(client_data_hash);
    hasher.finalize().into()
}

/// Verifies assertions under a fixed [`Policy`].
///
/// Stateless across calls and freely shareable between threads: counter
/// history lives with the caller, and every call owns its inputs.
#[derive(Debug, Clone)]
pub struct AssertionVerifier {
    policy: Policy,
    pub(crate) max_batch: usize,
}

impl Default for AssertionVerifier {
    fn default() -> Self {
        Self::new(Policy::default())
    }
}

impl AssertionVerifier {
    /// Create a verifier with the given policy and the default batch
    /// bound.
    #[must_use]
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            max_batch: DEFAULT_MAX_BATCH,
        }
    }

    /// Override the batch size bound.
    #[must_use]
    pub fn with_max_batch(mut self, max_batch: usize) -> Self {
        self.max_batch = max_batch;
        self
    }

    /// The policy in force.
    #[must_use]
    pub const fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Verify a single assertion.
    ///
    /// On success the caller receives the parsed counter to persist; on
    /// failure, the [`VerifyError`] variant naming the first check that
    /// rejected the request.
    ///
    /// # Errors
    ///
    /// See [`VerifyError`] for the taxonomy.
    pub fn verify(&self, request: &VerificationRequest) -> Result<VerifiedAssertion, VerifyError> {
        let assertion = &request.assertion;

        let auth_data = AuthenticatorData::parse(&assertion.authenticator_data)?;
        if assertion.client_data_json.is_empty() {
            return Err(VerifyError::TruncatedInput {
                needed: 1,
                available: 0,
            });
        }
        let public_key = P256PublicKey::from_sec1_bytes(&request.public_key)?;

        let digest = signed_payload(&assertion.authenticator_data, &assertion.client_data_json);

        self.check_flags(auth_data.flags())?;
        if let Some(expected) = &self.policy.expected_rp_id_hash {
            if auth_data.rp_id_hash() != expected {
                return Err(VerifyError::RelyingPartyMismatch);
            }
        }
        self.check_counter(request.previous_count, auth_data.sign_count())?;

        let canonical = decode_signature(&assertion.signature)?;
        public_key
            .verify_digest(&digest, &canonical)
            .map_err(|_| VerifyError::SignatureMismatch)?;

        Ok(VerifiedAssertion {
            new_count: auth_data.sign_count(),
            flags: auth_data.flags(),
        })
    }

    fn check_flags(&self, flags: Flags) -> Result<(), VerifyError> {
        if self.policy.require_user_present && !flags.user_present() {
            return Err(VerifyError::UserNotPresent);
        }
        if self.policy.require_user_verified && !flags.user_verified() {
            return Err(VerifyError::UserNotVerified);
        }
        Ok(())
    }

    fn check_counter(&self, previous: Option<u32>, current: u32) -> Result<(), VerifyError> {
        let Some(previous) = previous else {
            return Ok(());
        };
        if previous == 0 && current == 0 && self.policy.counter == CounterPolicy::AllowUnsupported {
            // Neither side tracks a counter; nothing to compare.
            return Ok(());
        }
        if current > previous {
            Ok(())
        } else {
            Err(VerifyError::ReplayedOrClonedCredential { previous, current })
        }
    }
}

/// Decode signature bytes from an assertion: exactly 64 bytes is treated
/// as fixed-width `r‖s`, anything else as DER. Both paths normalize to
/// low-S.
fn decode_signature(bytes: &[u8]) -> Result<CanonicalSignature, VerifyError> {
    if bytes.len() == SIGNATURE_LEN {
        let fixed: &[u8; SIGNATURE_LEN] = bytes.try_into().expect("length checked above");
        Ok(CanonicalSignature::from_raw(fixed)?)
    } else {
        Ok(CanonicalSignature::from_der(bytes)?)
    }
}
