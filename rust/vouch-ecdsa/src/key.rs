//! Compressed P-256 public keys and the digest verification seam.

use crate::canonical::CanonicalSignature;
use crate::error::PublicKeyError;
use p256::ecdsa::VerifyingKey;
use p256::ecdsa::signature::hazmat::PrehashVerifier;

/// Length of a SEC1 compressed P-256 point.
pub const COMPRESSED_POINT_LEN: usize = 33;

/// Verifies a canonical signature against a caller-supplied 32-byte
/// digest.
///
/// Implementations perform the raw elliptic-curve check only: the digest
/// is used as-is, with no additional hashing. The caller is responsible
/// for handing in exactly the bytes the signer committed to.
pub trait DigestVerifier {
    /// Check `signature` against `digest`.
    ///
    /// # Errors
    ///
    /// Returns an opaque [`signature::Error`] when the signature does not
    /// verify; the error deliberately carries no detail about why.
    fn verify_digest(
        &self,
        digest: &[u8; 32],
        signature: &CanonicalSignature,
    ) -> Result<(), signature::Error>;
}

/// A P-256 public key held in SEC1 compressed form (33 bytes).
#[derive(Debug, Clone)]
pub struct P256PublicKey {
    key: VerifyingKey,
}

impl P256PublicKey {
    /// Decode a 33-byte SEC1 compressed point.
    ///
    /// # Errors
    ///
    /// Returns [`PublicKeyError::WrongLength`] for anything but 33 bytes
    /// (uncompressed 65-byte points are deliberately not accepted) and
    /// [`PublicKeyError::InvalidPoint`] when the bytes do not decode to a
    /// point on the curve.
    pub fn from_sec1_bytes(bytes: &[u8]) -> Result<Self, PublicKeyError> {
        if bytes.len() != COMPRESSED_POINT_LEN {
            return Err(PublicKeyError::WrongLength { len: bytes.len() });
        }
        let key =
            VerifyingKey::from_sec1_bytes(bytes).map_err(|_| PublicKeyError::InvalidPoint)?;
        Ok(Self { key })
    }

    /// The compressed SEC1 encoding (33 bytes).
    #[must_use]
    pub fn to_sec1_bytes(&self) -> [u8; 33] {
        let mut bytes = [0u8; COMPRESSED_POINT_LEN];
        bytes.copy_from_slice(self.key.to_encoded_point(true).as_bytes());
        bytes
    }

    /// Borrow the inner verifying key.
    #[must_use]
    pub const fn verifying_key(&self) -> &VerifyingKey {
        &self.key
    }
}

impl PartialEq for P256PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_sec1_bytes() == other.to_sec1_bytes()
    }
}

impl Eq for P256PublicKey {}

impl DigestVerifier for P256PublicKey {
    fn verify_digest(
        &self,
        digest: &[u8; 32],
        signature: &CanonicalSignature,
    ) -> Result<(), signature::Error> {
        self.key.verify_prehash(digest, signature.as_ecdsa())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::ecdsa::SigningKey;
    use p256::ecdsa::signature::hazmat::PrehashSigner;
    use sha2::{Digest, Sha256};

    fn signing_key(seed: u8) -> SigningKey {
        let mut key_bytes = [0u8; 32];
        key_bytes[0] = seed;
        SigningKey::from_bytes(&key_bytes.into()).unwrap()
    }

    fn public_key(key: &SigningKey) -> P256PublicKey {
        let sec1 = key.verifying_key().to_encoded_point(true);
        P256PublicKey::from_sec1_bytes(sec1.as_bytes()).unwrap()
    }

    fn sign(key: &SigningKey, digest: &[u8; 32]) -> CanonicalSignature {
        let signature: p256::ecdsa::Signature = key.sign_prehash(digest).unwrap();
        let mut raw = [0u8; 64];
        raw.copy_from_slice(&signature.to_bytes());
        CanonicalSignature::from_raw(&raw).unwrap()
    }

    #[test]
    fn rejects_wrong_lengths() {
        assert_eq!(
            P256PublicKey::from_sec1_bytes(&[0x02; 32]),
            Err(PublicKeyError::WrongLength { len: 32 })
        );
        assert_eq!(
            P256PublicKey::from_sec1_bytes(&[0x04; 65]),
            Err(PublicKeyError::WrongLength { len: 65 })
        );
    }

    #[test]
    fn rejects_invalid_point() {
        // 0xff is not a valid SEC1 tag, and the x coordinate exceeds the
        // field modulus besides.
        assert_eq!(
            P256PublicKey::from_sec1_bytes(&[0xff; 33]),
            Err(PublicKeyError::InvalidPoint)
        );
    }

    #[test]
    fn sec1_round_trip() {
        let key = public_key(&signing_key(42));
        let restored = P256PublicKey::from_sec1_bytes(&key.to_sec1_bytes()).unwrap();
        assert_eq!(restored, key);
    }

    #[test]
    fn verifies_a_matching_digest() {
        let sk = signing_key(42);
        let digest: [u8; 32] = Sha256::digest(b"digest seam").into();
        let signature = sign(&sk, &digest);
        public_key(&sk).verify_digest(&digest, &signature).unwrap();
    }

    #[test]
    fn rejects_a_different_digest() {
        let sk = signing_key(42);
        let digest: [u8; 32] = Sha256::digest(b"signed this").into();
        let signature = sign(&sk, &digest);
        let other: [u8; 32] = Sha256::digest(b"verified that").into();
        assert!(public_key(&sk).verify_digest(&other, &signature).is_err());
    }

    #[test]
    fn rejects_a_different_key() {
        let sk = signing_key(42);
        let digest: [u8; 32] = Sha256::digest(b"key binding").into();
        let signature = sign(&sk, &digest);
        let other = public_key(&signing_key(43));
        assert!(other.verify_digest(&digest, &signature).is_err());
    }
}
