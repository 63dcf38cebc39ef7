//! Strict DER decoding for ECDSA signatures.
//!
//! A DER ECDSA signature is `SEQUENCE { INTEGER r, INTEGER s }`. A P-256
//! scalar is at most 32 bytes, so each INTEGER carries 1..=33 content
//! bytes (33 when a 0x00 pad keeps the high bit clear) and a well-formed
//! signature never exceeds 72 bytes.

use crate::error::SignatureDecodeError;
use vouch_codec::ByteCursor;

const SEQUENCE_TAG: u8 = 0x30;
const INTEGER_TAG: u8 = 0x02;

/// Split a DER-encoded ECDSA signature into fixed-width `(r, s)` scalars.
///
/// The declared SEQUENCE length must cover the buffer exactly; trailing
/// bytes inside or after the SEQUENCE are rejected, as are negative
/// integers, non-minimal padding, and non-minimal length forms. The
/// scalars are returned big-endian and left-padded to 32 bytes, without
/// range checking or normalization.
///
/// # Errors
///
/// Returns [`SignatureDecodeError::Truncated`] when the buffer ends
/// early, [`SignatureDecodeError::Malformed`] on any structural
/// violation, and [`SignatureDecodeError::InvalidScalar`] when an
/// integer is wider than any scalar below the curve order.
pub fn split_scalars(der: &[u8]) -> Result<([u8; 32], [u8; 32]), SignatureDecodeError> {
    let mut cursor = ByteCursor::new(der);
    if cursor.read_u8()? != SEQUENCE_TAG {
        return Err(SignatureDecodeError::Malformed("expected SEQUENCE tag"));
    }
    let len = read_length(&mut cursor)?;
    if len != cursor.remaining() {
        return Err(SignatureDecodeError::Malformed(
            "SEQUENCE length does not match the buffer",
        ));
    }
    let r = read_integer(&mut cursor)?;
    let s = read_integer(&mut cursor)?;
    if !cursor.is_empty() {
        return Err(SignatureDecodeError::Malformed("trailing bytes after s"));
    }
    Ok((r, s))
}

/// Read a DER length octet: short form, or the one-byte long form DER
/// permits for lengths of 128..=255. Nothing longer can occur in an
/// ECDSA signature.
fn read_length(cursor: &mut ByteCursor<'_>) -> Result<usize, SignatureDecodeError> {
    let first = cursor.read_u8()?;
    match first {
        0x00..=0x7f => Ok(usize::from(first)),
        0x81 => {
            let value = cursor.read_u8()?;
            if value < 0x80 {
                return Err(SignatureDecodeError::Malformed("non-minimal length form"));
            }
            Ok(usize::from(value))
        }
        _ => Err(SignatureDecodeError::Malformed("unsupported length form")),
    }
}

fn read_integer(cursor: &mut ByteCursor<'_>) -> Result<[u8; 32], SignatureDecodeError> {
    if cursor.read_u8()? != INTEGER_TAG {
        return Err(SignatureDecodeError::Malformed("expected INTEGER tag"));
    }
    let len = read_length(cursor)?;
    if len == 0 {
        return Err(SignatureDecodeError::Malformed("empty INTEGER"));
    }
    let content = cursor.take(len)?;
    if content[0] & 0x80 != 0 {
        return Err(SignatureDecodeError::Malformed("negative INTEGER"));
    }
    let magnitude = if content[0] == 0x00 && content.len() > 1 {
        if content[1] & 0x80 == 0 {
            return Err(SignatureDecodeError::Malformed(
                "non-minimal INTEGER padding",
            ));
        }
        &content[1..]
    } else {
        content
    };
    if magnitude.len() > 32 {
        // Well-formed, but wider than any scalar below the curve order.
        return Err(SignatureDecodeError::InvalidScalar);
    }
    let mut scalar = [0u8; 32];
    scalar[32 - magnitude.len()..].copy_from_slice(magnitude);
    Ok(scalar)
}
