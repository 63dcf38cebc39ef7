//! Canonical fixed-width ECDSA signatures.

use crate::der;
use crate::error::SignatureDecodeError;
use ::signature::SignatureEncoding;
use p256::FieldBytes;
use p256::ecdsa::Signature as EcdsaSignature;
use vouch_codec::Truncated;

/// Byte length of one P-256 scalar.
pub const SCALAR_LEN: usize = 32;

/// Byte length of a canonical `r‖s` signature.
pub const SIGNATURE_LEN: usize = 64;

/// An ECDSA P-256 signature in canonical form: fixed-width 64-byte `r‖s`
/// with `s` at most half the curve order.
///
/// ECDSA is malleable: `(r, s)` and `(r, order − s)` verify the same
/// statement. The lenient constructors ([`from_der`], [`from_scalars`],
/// [`from_raw`]) accept either half of the pair and normalize, so both
/// encodings of the same logical signature collapse to identical
/// canonical bytes. The strict [`from_canonical_bytes`] decoder instead
/// rejects high-S input outright.
///
/// [`from_der`]: CanonicalSignature::from_der
/// [`from_scalars`]: CanonicalSignature::from_scalars
/// [`from_raw`]: CanonicalSignature::from_raw
/// [`from_canonical_bytes`]: CanonicalSignature::from_canonical_bytes
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalSignature {
    inner: EcdsaSignature,
}

impl Eq for CanonicalSignature {}

impl CanonicalSignature {
    /// Decode a DER-encoded signature, range-check, and normalize.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureDecodeError::Malformed`] /
    /// [`SignatureDecodeError::Truncated`] for structural DER defects and
    /// [`SignatureDecodeError::InvalidScalar`] when a scalar is zero or
    /// not below the curve order.
    pub fn from_der(der: &[u8]) -> Result<Self, SignatureDecodeError> {
        let (r, s) = der::split_scalars(der)?;
        Self::from_scalars(&r, &s)
    }

    /// Build from pre-split big-endian scalars and normalize.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureDecodeError::InvalidScalar`] when either scalar
    /// is zero or not below the curve order.
    pub fn from_scalars(r: &[u8; 32], s: &[u8; 32]) -> Result<Self, SignatureDecodeError> {
        let signature = EcdsaSignature::from_scalars(FieldBytes::from(*r), FieldBytes::from(*s))
            .map_err(|_| SignatureDecodeError::InvalidScalar)?;
        Ok(Self {
            inner: signature.normalize_s().unwrap_or(signature),
        })
    }

    /// Build from a fixed-width 64-byte `r‖s` buffer and normalize.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureDecodeError::InvalidScalar`] when either scalar
    /// is zero or not below the curve order.
    pub fn from_raw(bytes: &[u8; 64]) -> Result<Self, SignatureDecodeError> {
        let (r, s) = split_raw(bytes);
        Self::from_scalars(&r, &s)
    }

    /// Strict decoder: exactly 64 bytes, valid scalars, already low-S.
    ///
    /// Lenient call sites that want normalization applied use
    /// [`Self::from_raw`]; this is the entry point for consumers that
    /// must reject non-canonical input rather than repair it.
    ///
    /// # Errors
    ///
    /// Returns [`SignatureDecodeError::NonCanonical`] for in-range
    /// high-S input, plus the length and scalar-range failures of
    /// [`Self::from_raw`].
    pub fn from_canonical_bytes(bytes: &[u8]) -> Result<Self, SignatureDecodeError> {
        if bytes.len() < SIGNATURE_LEN {
            return Err(Truncated {
                needed: SIGNATURE_LEN,
                available: bytes.len(),
            }
            .into());
        }
        if bytes.len() > SIGNATURE_LEN {
            return Err(SignatureDecodeError::Malformed(
                "canonical signature must be exactly 64 bytes",
            ));
        }
        let fixed: &[u8; 64] = bytes.try_into().expect("length checked above");
        let (r, s) = split_raw(fixed);
        let signature = EcdsaSignature::from_scalars(FieldBytes::from(r), FieldBytes::from(s))
            .map_err(|_| SignatureDecodeError::InvalidScalar)?;
        if signature.normalize_s().is_some() {
            return Err(SignatureDecodeError::NonCanonical);
        }
        Ok(Self { inner: signature })
    }

    /// The canonical 64-byte `r‖s` encoding.
    #[must_use]
    pub fn to_bytes(&self) -> [u8; 64] {
        let mut bytes = [0u8; SIGNATURE_LEN];
        bytes.copy_from_slice(&self.inner.to_bytes());
        bytes
    }

    /// The `r` scalar, big-endian.
    #[must_use]
    pub fn r_bytes(&self) -> [u8; 32] {
        split_raw(&self.to_bytes()).0
    }

    /// The `s` scalar, big-endian. Guaranteed at most half the order.
    #[must_use]
    pub fn s_bytes(&self) -> [u8; 32] {
        split_raw(&self.to_bytes()).1
    }

    /// Borrow the underlying `p256` signature.
    #[must_use]
    pub const fn as_ecdsa(&self) -> &EcdsaSignature {
        &self.inner
    }
}

fn split_raw(bytes: &[u8; 64]) -> ([u8; 32], [u8; 32]) {
    let mut r = [0u8; SCALAR_LEN];
    let mut s = [0u8; SCALAR_LEN];
    r.copy_from_slice(&bytes[..SCALAR_LEN]);
    s.copy_from_slice(&bytes[SCALAR_LEN..]);
    (r, s)
}

impl TryFrom<&[u8]> for CanonicalSignature {
    type Error = ::signature::Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_canonical_bytes(bytes).map_err(|_| ::signature::Error::new())
    }
}

impl From<CanonicalSignature> for [u8; 64] {
    fn from(signature: CanonicalSignature) -> Self {
        signature.to_bytes()
    }
}

impl SignatureEncoding for CanonicalSignature {
    type Repr = [u8; 64];
}

#[cfg(test)]
mod tests {
    use super::*;
    use p256::elliptic_curve::PrimeField;
    use proptest::prelude::*;

    /// Big-endian byte encoding of the P-256 group order `n`.
    const ORDER: [u8; 32] = [
        0xff, 0xff, 0xff, 0xff, 0x00, 0x00, 0x00, 0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xff, 0xbc, 0xe6, 0xfa, 0xad, 0xa7, 0x17, 0x9e, 0x84, 0xf3, 0xb9, 0xca, 0xc2, 0xfc, 0x63,
        0x25, 0x51,
    ];

    fn scalar(last: u8) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes[31] = last;
        bytes
    }

    fn negate(s: &[u8; 32]) -> [u8; 32] {
        let s_scalar = Option::<p256::Scalar>::from(p256::Scalar::from_repr((*s).into()))
            .expect("scalar below the order");
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&(-s_scalar).to_repr());
        bytes
    }

    #[test]
    fn zero_scalars_are_rejected() {
        assert_eq!(
            CanonicalSignature::from_scalars(&[0u8; 32], &scalar(1)),
            Err(SignatureDecodeError::InvalidScalar)
        );
        assert_eq!(
            CanonicalSignature::from_scalars(&scalar(1), &[0u8; 32]),
            Err(SignatureDecodeError::InvalidScalar)
        );
    }

    #[test]
    fn order_scalar_is_rejected() {
        assert_eq!(
            CanonicalSignature::from_scalars(&ORDER, &scalar(1)),
            Err(SignatureDecodeError::InvalidScalar)
        );
    }

    #[test]
    fn malleable_pair_collapses_to_one_encoding() {
        let r = scalar(7);
        let s = scalar(9);
        let low = CanonicalSignature::from_scalars(&r, &s).unwrap();
        let high = CanonicalSignature::from_scalars(&r, &negate(&s)).unwrap();
        assert_eq!(low.to_bytes(), high.to_bytes());
        assert_eq!(low, high);
    }

    #[test]
    fn scalar_accessors_split_the_encoding() {
        let signature = CanonicalSignature::from_scalars(&scalar(7), &scalar(9)).unwrap();
        assert_eq!(signature.r_bytes(), scalar(7));
        assert_eq!(signature.s_bytes(), scalar(9));
    }

    #[test]
    fn strict_decoder_rejects_high_s() {
        let low = CanonicalSignature::from_scalars(&scalar(7), &scalar(9)).unwrap();
        let mut high = [0u8; 64];
        high[..32].copy_from_slice(&low.r_bytes());
        high[32..].copy_from_slice(&negate(&low.s_bytes()));

        assert_eq!(
            CanonicalSignature::from_canonical_bytes(&high),
            Err(SignatureDecodeError::NonCanonical)
        );
        // The lenient path accepts and repairs the same bytes.
        assert_eq!(CanonicalSignature::from_raw(&high).unwrap(), low);
    }

    #[test]
    fn strict_decoder_checks_length() {
        assert_eq!(
            CanonicalSignature::from_canonical_bytes(&[0u8; 63]),
            Err(SignatureDecodeError::Truncated(Truncated {
                needed: 64,
                available: 63
            }))
        );
        assert!(matches!(
            CanonicalSignature::from_canonical_bytes(&[0u8; 65]),
            Err(SignatureDecodeError::Malformed(_))
        ));
    }

    #[test]
    fn signature_encoding_round_trips() {
        let signature = CanonicalSignature::from_scalars(&scalar(7), &scalar(9)).unwrap();
        let repr: [u8; 64] = signature.clone().into();
        let decoded = CanonicalSignature::try_from(repr.as_slice()).unwrap();
        assert_eq!(decoded, signature);
    }

    proptest! {
        #[test]
        fn normalization_is_idempotent(r in any::<[u8; 32]>(), s in any::<[u8; 32]>()) {
            prop_assume!(CanonicalSignature::from_scalars(&r, &s).is_ok());
            let first = CanonicalSignature::from_scalars(&r, &s).unwrap();
            let second = CanonicalSignature::from_raw(&first.to_bytes()).unwrap();
            prop_assert_eq!(first.to_bytes(), second.to_bytes());
        }

        #[test]
        fn both_malleable_forms_normalize_identically(
            r in any::<[u8; 32]>(),
            s in any::<[u8; 32]>(),
        ) {
            prop_assume!(CanonicalSignature::from_scalars(&r, &s).is_ok());
            let canonical = CanonicalSignature::from_scalars(&r, &s).unwrap();
            let mirrored = CanonicalSignature::from_scalars(&r, &negate(&s)).unwrap();
            prop_assert_eq!(canonical.to_bytes(), mirrored.to_bytes());
        }
    }
}
