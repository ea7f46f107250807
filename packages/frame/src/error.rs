//! Error handling for frame construction and parsing

use crate::MType;
use lorasim_cipher::CipherError;
use lorasim_common::{ErrorKind, InputError};
use thiserror::Error;

/// Frame-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Key, keystream or MIC precondition failed
    #[error(transparent)]
    Cipher(#[from] CipherError),

    /// Caller-supplied value failed to decode
    #[error(transparent)]
    Input(#[from] InputError),

    /// FOpts longer than the 4-bit FOptsLen field allows
    #[error("FOpts too long: {len} bytes (max 15)")]
    FOptsTooLong {
        /// Supplied FOpts length
        len: usize,
    },

    /// FOptsLen in FCtrl disagrees with the FOpts bytes
    #[error("FOptsLen mismatch: FCtrl declares {declared}, FOpts holds {actual}")]
    FOptsLenMismatch {
        /// Length declared in FCtrl
        declared: u8,
        /// Length of the FOpts bytes
        actual: usize,
    },

    /// FRMPayload present without an FPort
    #[error("FRMPayload requires an FPort")]
    MissingPort,

    /// FPort 0 carries MAC commands under the network key, not application data
    #[error("FPort {0} is not an application port")]
    ReservedPort(u8),

    /// Message type is not a data message
    #[error("{0:?} is not a data message type")]
    NotDataMessage(MType),

    /// MHDR with non-zero RFU bits or an unknown major version
    #[error("Invalid MHDR: {0:#04x}")]
    InvalidMacHeader(u8),

    /// Encoded frame would not fit the one-byte length of the MIC block
    #[error("Frame too long: {len} bytes before MIC (max {max})")]
    FrameTooLong {
        /// MHDR plus MACPayload length
        len: usize,
        /// Largest accepted length
        max: usize,
    },

    /// Byte sequence too short to be a data frame
    #[error("Frame truncated: {len} bytes (min {min})")]
    Truncated {
        /// Supplied length
        len: usize,
        /// Minimum length
        min: usize,
    },

    /// Full frame counter does not match the 16 bits carried on the wire
    #[error("Frame counter {f_cnt:#010x} does not match wire value {wire:#06x}")]
    CounterMismatch {
        /// Full counter supplied by the caller
        f_cnt: u32,
        /// Low 16 bits from FHDR
        wire: u16,
    },

    /// Requested counter lies below the session's next counter
    #[error("Frame counter regression: requested {requested}, next is {next}")]
    CounterRegression {
        /// Requested counter
        requested: u32,
        /// Lowest counter the session may still issue
        next: u64,
    },

    /// 32-bit uplink counter space used up; the session must be re-provisioned
    #[error("Uplink frame counter exhausted")]
    CounterExhausted,
}

impl FrameError {
    /// Classify into the pipeline error taxonomy
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Cipher(e) => e.kind(),
            Self::CounterRegression { .. } | Self::CounterExhausted => {
                ErrorKind::CryptographicPrecondition
            }
            _ => ErrorKind::MalformedInput,
        }
    }
}

/// Result type for frame operations
pub type Result<T> = std::result::Result<T, FrameError>;
