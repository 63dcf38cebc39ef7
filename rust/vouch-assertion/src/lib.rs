//! WebAuthn/FIDO2 passkey assertion verification.
//!
//! Reconstructs the exact byte sequence a hardware authenticator signed,
//! `SHA-256(authenticatorData ‖ SHA-256(clientDataJSON))`, and validates
//! an ECDSA P-256 signature against it, enforcing user-presence and
//! user-verification policy plus signature-counter monotonicity for
//! clone detection. Batch verification applies the same check
//! independently to an ordered, bounded sequence of assertions.
//!
//! Challenge, origin, and ceremony-type validation of `clientDataJSON`
//! are deliberately left to the caller: this crate treats client data as
//! an opaque byte string and only binds it into the signed payload.
//! Credential storage is likewise external; the caller supplies the
//! public key and last-known counter, and persists the returned count.

mod assertion;
pub use assertion::Assertion;

mod authenticator_data;
pub use authenticator_data::{AuthenticatorData, Flags, MIN_AUTHENTICATOR_DATA_LEN};

mod batch;
pub use batch::DEFAULT_MAX_BATCH;

mod error;
pub use error::VerifyError;

mod policy;
pub use policy::{CounterPolicy, Policy};

mod request;
pub use request::VerificationRequest;

mod verifier;
pub use verifier::{AssertionVerifier, VerifiedAssertion, signed_payload};
