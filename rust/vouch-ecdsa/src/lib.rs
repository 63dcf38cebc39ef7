//! ECDSA P-256 signature canonicalization and digest verification.
//!
//! Authenticators emit ECDSA signatures as DER; low-level verifiers want
//! fixed-width `r‖s`. This crate decodes DER strictly, range-checks the
//! scalars, collapses both halves of a malleable signature pair to the
//! low-S representative, and exposes the verification seam as a trait
//! over a caller-supplied digest (no additional hashing inside).

mod canonical;
pub use canonical::{CanonicalSignature, SCALAR_LEN, SIGNATURE_LEN};

mod der;
pub use der::split_scalars;

mod error;
pub use error::{PublicKeyError, SignatureDecodeError};

mod key;
pub use key::{COMPRESSED_POINT_LEN, DigestVerifier, P256PublicKey};
