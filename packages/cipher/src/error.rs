//! Error handling for the session-key primitives

use lorasim_common::{ErrorKind, InputError};
use thiserror::Error;

/// Cipher-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CipherError {
    /// Invalid key length provided
    #[error("Invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength {
        /// Expected key length in bytes
        expected: usize,
        /// Actual key length in bytes
        actual: usize,
    },

    /// Caller-supplied value failed to decode
    #[error(transparent)]
    Input(#[from] InputError),

    /// FRMPayload needs more keystream blocks than the one-byte block index allows
    #[error("Payload too long for keystream: {len} bytes (max {max})")]
    PayloadTooLong {
        /// Payload length in bytes
        len: usize,
        /// Largest accepted payload length
        max: usize,
    },

    /// The authenticated message does not fit the one-byte length field of B0
    #[error("Message too long for MIC: {len} bytes (max {max})")]
    MessageTooLong {
        /// Length of MHDR plus MACPayload
        len: usize,
        /// Largest accepted message length
        max: usize,
    },
}

impl CipherError {
    /// Classify into the pipeline error taxonomy
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidKeyLength { .. } => ErrorKind::CryptographicPrecondition,
            Self::Input(_) | Self::PayloadTooLong { .. } | Self::MessageTooLong { .. } => {
                ErrorKind::MalformedInput
            }
        }
    }
}

/// Result type for cipher operations
pub type Result<T> = std::result::Result<T, CipherError>;
