//! Parsed view over raw authenticator data.
//!
//! Layout: `rpIdHash` (32 bytes) | `flags` (1 byte) | `signCount`
//! (big-endian u32) | optional attested-credential-data / extension
//! tail. The tail is surfaced but never interpreted here.

use crate::error::VerifyError;
use serde::{Deserialize, Serialize};
use vouch_codec::ByteCursor;

/// Minimum length of well-formed authenticator data.
pub const MIN_AUTHENTICATOR_DATA_LEN: usize = 37;

/// The authenticator flags byte at offset 32.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flags(u8);

impl Flags {
    /// User Present (UP), bit 0.
    pub const USER_PRESENT: u8 = 1 << 0;
    /// User Verified (UV), bit 2.
    pub const USER_VERIFIED: u8 = 1 << 2;
    /// Attested credential data follows the counter (AT), bit 6.
    pub const ATTESTED_CREDENTIAL_DATA: u8 = 1 << 6;
    /// Extension data is present (ED), bit 7.
    pub const EXTENSION_DATA: u8 = 1 << 7;

    /// Wrap a raw flags byte.
    #[must_use]
    pub const fn new(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw byte.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Whether the authenticator observed the user (UP).
    #[must_use]
    pub const fn user_present(self) -> bool {
        self.0 & Self::USER_PRESENT != 0
    }

    /// Whether the authenticator verified the user, e.g. via biometric
    /// or PIN (UV).
    #[must_use]
    pub const fn user_verified(self) -> bool {
        self.0 & Self::USER_VERIFIED != 0
    }

    /// Whether attested credential data follows the counter (AT).
    #[must_use]
    pub const fn attested_credential_data(self) -> bool {
        self.0 & Self::ATTESTED_CREDENTIAL_DATA != 0
    }

    /// Whether extension data is present (ED).
    #[must_use]
    pub const fn extension_data(self) -> bool {
        self.0 & Self::EXTENSION_DATA != 0
    }
}

/// Parsed view over an authenticator-data blob.
///
/// Borrows the input. The variable-length tail (attested credential
/// data, extensions) is exposed as raw bytes; registration-time parsing
/// of its content is out of scope for assertion verification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatorData<'a> {
    rp_id_hash: &'a [u8; 32],
    flags: Flags,
    sign_count: u32,
    tail: &'a [u8],
}

impl<'a> AuthenticatorData<'a> {
    /// Parse the fixed-layout header.
    ///
    /// # Errors
    ///
    /// Returns [`VerifyError::TruncatedInput`] when `bytes` is shorter
    /// than [`MIN_AUTHENTICATOR_DATA_LEN`].
    pub fn parse(bytes: &'a [u8]) -> Result<Self, VerifyError> {
        if bytes.len() < MIN_AUTHENTICATOR_DATA_LEN {
            return Err(VerifyError::TruncatedInput {
                needed: MIN_AUTHENTICATOR_DATA_LEN,
                available: bytes.len(),
            });
        }
        let mut cursor = ByteCursor::new(bytes);
        let rp_id_hash = cursor.take_array::<32>()?;
        let flags = Flags::new(cursor.read_u8()?);
        let sign_count = cursor.read_u32_be()?;
        let tail = cursor.rest();
        Ok(Self {
            rp_id_hash,
            flags,
            sign_count,
            tail,
        })
    }

    /// SHA-256 hash of the relying-party ID the assertion is scoped to.
    #[must_use]
    pub const fn rp_id_hash(&self) -> &'a [u8; 32] {
        self.rp_id_hash
    }

    /// The flags byte.
    #[must_use]
    pub const fn flags(&self) -> Flags {
        self.flags
    }

    /// The monotonic signature counter.
    #[must_use]
    pub const fn sign_count(&self) -> u32 {
        self.sign_count
    }

    /// Whether the authenticator observed the user.
    #[must_use]
    pub const fn is_user_present(&self) -> bool {
        self.flags.user_present()
    }

    /// Whether the authenticator verified the user.
    #[must_use]
    pub const fn is_user_verified(&self) -> bool {
        self.flags.user_verified()
    }

    /// The uninterpreted bytes past the counter, if any.
    #[must_use]
    pub const fn tail(&self) -> &'a [u8] {
        self.tail
    }
}
