//! Core error types and definitions

use thiserror::Error;

/// Classification of every failure the pipeline can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum ErrorKind {
    /// Hex strings of invalid length or characters, frame fields violating
    /// their width invariants, out-of-range values
    #[error("Malformed input")]
    MalformedInput,

    /// Missing or wrong-length session key
    #[error("Cryptographic precondition violated")]
    CryptographicPrecondition,

    /// Publish rejected or connection lost
    #[error("Transport failure")]
    TransportFailure,

    /// Configuration file could not be read or parsed
    #[error("Configuration error")]
    Configuration,
}

/// Errors raised while decoding caller-supplied values
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// The string is not valid hex (odd length or non-hex character)
    #[error("{field}: invalid hex: {reason}")]
    InvalidHex {
        /// Name of the offending field
        field: &'static str,
        /// Decoder diagnostic
        reason: String,
    },

    /// The decoded byte string has the wrong length
    #[error("{field}: expected {expected} bytes, got {actual}")]
    InvalidLength {
        /// Name of the offending field
        field: &'static str,
        /// Expected length in bytes
        expected: usize,
        /// Actual length in bytes
        actual: usize,
    },

    /// The string is not valid base64
    #[error("{field}: invalid base64: {reason}")]
    InvalidBase64 {
        /// Name of the offending field
        field: &'static str,
        /// Decoder diagnostic
        reason: String,
    },
}

impl InputError {
    /// Every input error is a malformed-input failure
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::MalformedInput
    }

    /// Name of the field that failed to decode
    #[must_use]
    pub fn field(&self) -> &'static str {
        match self {
            Self::InvalidHex { field, .. }
            | Self::InvalidLength { field, .. }
            | Self::InvalidBase64 { field, .. } => field,
        }
    }
}

/// Result type alias for input decoding
pub type Result<T> = std::result::Result<T, InputError>;
