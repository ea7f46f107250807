//! Strict hex decoding and lossless output representations

use crate::error::{InputError, Result};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use std::fmt;

/// Decode a hex string, rejecting odd lengths and non-hex characters
///
/// Both upper and lower case digits are accepted. Nothing is trimmed, padded
/// or truncated: the input either decodes completely or is rejected.
///
/// # Errors
///
/// Returns `InputError::InvalidHex` naming `field` when `input` is not valid hex.
pub fn decode_hex(field: &'static str, input: &str) -> Result<Vec<u8>> {
    hex::decode(input).map_err(|e| InputError::InvalidHex {
        field,
        reason: e.to_string(),
    })
}

/// Decode a hex string into a fixed-size array
///
/// # Errors
///
/// Returns `InputError::InvalidHex` for malformed hex and
/// `InputError::InvalidLength` when the decoded length is not `N`.
pub fn decode_hex_array<const N: usize>(field: &'static str, input: &str) -> Result<[u8; N]> {
    let bytes = decode_hex(field, input)?;
    <[u8; N]>::try_from(bytes.as_slice()).map_err(|_| InputError::InvalidLength {
        field,
        expected: N,
        actual: bytes.len(),
    })
}

/// Encoded output presentable as raw bytes, lowercase hex or standard base64
///
/// The three representations are lossless round trips of one another.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Encoded {
    data: Vec<u8>,
}

impl Encoded {
    /// Wrap raw bytes
    #[must_use]
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Parse from a hex string
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidHex` when `input` is not valid hex.
    pub fn from_hex(field: &'static str, input: &str) -> Result<Self> {
        decode_hex(field, input).map(Self::new)
    }

    /// Parse from a standard (padded) base64 string
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidBase64` when `input` is not valid base64.
    pub fn from_base64(field: &'static str, input: &str) -> Result<Self> {
        STANDARD
            .decode(input)
            .map(Self::new)
            .map_err(|e| InputError::InvalidBase64 {
                field,
                reason: e.to_string(),
            })
    }

    /// Lowercase hex representation
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.data)
    }

    /// Standard base64 representation with padding
    #[must_use]
    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.data)
    }

    /// Borrow the raw bytes
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Take the raw bytes
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Get the length of the data
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the data is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

impl fmt::Display for Encoded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Encoded {
    fn as_ref(&self) -> &[u8] {
        &self.data
    }
}

impl From<Vec<u8>> for Encoded {
    fn from(data: Vec<u8>) -> Self {
        Self::new(data)
    }
}

impl From<Encoded> for Vec<u8> {
    fn from(encoded: Encoded) -> Self {
        encoded.data
    }
}
