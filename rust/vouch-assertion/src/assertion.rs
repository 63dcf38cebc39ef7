//! The raw assertion triple produced by a platform authenticator.

use signature::SignatureEncoding;

/// A WebAuthn assertion as handed over by the platform credential API:
/// the client data, the authenticator data, and the authenticator's
/// signature over `authenticatorData ‖ SHA-256(clientDataJSON)`.
///
/// On the wire this is encoded with varint length prefixes:
///
/// ```text
/// varint(client_data_json.len) | client_data_json
/// | varint(authenticator_data.len) | authenticator_data
/// | varint(signature.len) | signature
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assertion {
    /// The `clientDataJSON` bytes. Treated as an opaque byte string
    /// here; challenge/origin/type checks are the caller's obligation.
    pub client_data_json: Vec<u8>,
    /// The raw `authenticatorData` bytes.
    pub authenticator_data: Vec<u8>,
    /// The signature bytes: DER, or fixed-width 64-byte `r‖s`.
    pub signature: Vec<u8>,
}

impl Assertion {
    /// Create a new assertion bundle.
    #[must_use]
    pub fn new(client_data_json: Vec<u8>, authenticator_data: Vec<u8>, signature: Vec<u8>) -> Self {
        Self {
            client_data_json,
            authenticator_data,
            signature,
        }
    }

    /// Encode to the varint-length-prefixed wire layout.
    #[must_use]
    pub fn to_vec(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        write_field(&mut buf, &self.client_data_json);
        write_field(&mut buf, &self.authenticator_data);
        write_field(&mut buf, &self.signature);
        buf
    }

    /// Decode from the varint-length-prefixed wire layout.
    ///
    /// # Errors
    ///
    /// Returns `signature::Error` when a length prefix is malformed or
    /// runs past the buffer, when trailing bytes remain, or when the
    /// signature field is empty.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, signature::Error> {
        let mut cursor = std::io::Cursor::new(bytes);
        let client_data_json = read_field(&mut cursor, bytes)?;
        let authenticator_data = read_field(&mut cursor, bytes)?;
        let signature = read_field(&mut cursor, bytes)?;
        if (cursor.position() as usize) < bytes.len() {
            return Err(signature::Error::new());
        }
        if signature.is_empty() {
            return Err(signature::Error::new());
        }
        Ok(Self {
            client_data_json,
            authenticator_data,
            signature,
        })
    }
}

fn write_field(buf: &mut Vec<u8>, field: &[u8]) {
    leb128::write::unsigned(buf, field.len() as u64).expect("write to Vec never fails");
    buf.extend_from_slice(field);
}

fn read_field(
    cursor: &mut std::io::Cursor<&[u8]>,
    bytes: &[u8],
) -> Result<Vec<u8>, signature::Error> {
    let len = leb128::read::unsigned(cursor).map_err(|_| signature::Error::new())?;
    let start = cursor.position() as usize;
    let end = start
        .checked_add(len as usize)
        .ok_or_else(signature::Error::new)?;
    if end > bytes.len() {
        return Err(signature::Error::new());
    }
    let field = bytes[start..end].to_vec();
    cursor.set_position(end as u64);
    Ok(field)
}

impl SignatureEncoding for Assertion {
    type Repr = Box<[u8]>;
}

impl TryFrom<&[u8]> for Assertion {
    type Error = signature::Error;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(bytes)
    }
}

impl From<Assertion> for Box<[u8]> {
    fn from(assertion: Assertion) -> Self {
        assertion.to_vec().into_boxed_slice()
    }
}

impl serde::Serialize for Assertion {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serde_bytes::serialize(&self.to_vec(), serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Assertion {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bytes: serde_bytes::ByteBuf = serde::Deserialize::deserialize(deserializer)?;
        Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture() -> Assertion {
        Assertion::new(
            b"{\"type\":\"webauthn.get\"}".to_vec(),
            vec![0xaa; 37],
            vec![0x30, 0x06, 0x02, 0x01, 0x01, 0x02, 0x01, 0x01],
        )
    }

    #[test]
    fn wire_round_trip() {
        let assertion = fixture();
        let decoded = Assertion::from_bytes(&assertion.to_vec()).unwrap();
        assert_eq!(decoded, assertion);
    }

    #[test]
    fn empty_signature_field_fails() {
        let assertion = Assertion::new(b"cd".to_vec(), b"ad".to_vec(), Vec::new());
        assert!(Assertion::from_bytes(&assertion.to_vec()).is_err());
    }

    #[test]
    fn dangling_length_prefix_fails() {
        let mut buf = Vec::new();
        leb128::write::unsigned(&mut buf, 1000).unwrap();
        buf.extend_from_slice(b"far too short");
        assert!(Assertion::from_bytes(&buf).is_err());
    }

    #[test]
    fn trailing_bytes_fail() {
        let mut encoded = fixture().to_vec();
        encoded.push(0x00);
        assert!(Assertion::from_bytes(&encoded).is_err());
    }

    #[test]
    fn truncated_buffer_fails() {
        let encoded = fixture().to_vec();
        assert!(Assertion::from_bytes(&encoded[..encoded.len() - 1]).is_err());
    }

    #[test]
    fn serde_round_trip() {
        let assertion = fixture();
        let json = serde_json::to_string(&assertion).unwrap();
        let decoded: Assertion = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, assertion);
    }

    #[test]
    fn signature_encoding_repr_matches_wire() {
        let assertion = fixture();
        let repr: Box<[u8]> = assertion.clone().into();
        assert_eq!(repr.as_ref(), assertion.to_vec().as_slice());
        let decoded = Assertion::try_from(repr.as_ref()).unwrap();
        assert_eq!(decoded, assertion);
    }
}
