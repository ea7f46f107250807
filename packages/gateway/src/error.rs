//! Error handling for envelope construction and delivery

use lorasim_common::{ErrorKind, InputError};
use thiserror::Error;

/// Envelope-specific errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// Caller-supplied value failed to decode
    #[error(transparent)]
    Input(#[from] InputError),

    /// Radio parameter outside what a LoRa transmission can use
    #[error("Invalid {field}: {value} (expected {expected})")]
    InvalidRadioParameter {
        /// Parameter name
        field: &'static str,
        /// Supplied value
        value: u32,
        /// Accepted values
        expected: &'static str,
    },

    /// Unrecognized CRC status label
    #[error("Unknown CRC status: {0:?} (expected OK, FAIL or UNKNOWN)")]
    UnknownCrcStatus(String),

    /// Envelope bytes are not a valid uplink frame
    #[error("Envelope decode failed: {0}")]
    Decode(#[from] prost::DecodeError),
}

impl GatewayError {
    /// Classify into the pipeline error taxonomy
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::MalformedInput
    }
}

/// Result type for envelope operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Delivery failure; the serialized envelope is kept for replay
#[derive(Debug, Error)]
pub enum PublishError {
    /// Receiving side of the channel is gone
    #[error("Channel closed while publishing to {topic}")]
    ChannelClosed {
        /// Destination topic
        topic: String,
        /// Envelope that was not delivered
        payload: Vec<u8>,
    },

    /// Writing to the output stream failed
    #[error("Write to {topic} failed: {source}")]
    Io {
        /// Destination topic
        topic: String,
        /// Envelope that was not delivered
        payload: Vec<u8>,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl PublishError {
    /// Always a transport failure
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::TransportFailure
    }

    /// Destination topic
    #[must_use]
    pub fn topic(&self) -> &str {
        match self {
            Self::ChannelClosed { topic, .. } | Self::Io { topic, .. } => topic,
        }
    }

    /// Undelivered envelope
    #[must_use]
    pub fn payload(&self) -> &[u8] {
        match self {
            Self::ChannelClosed { payload, .. } | Self::Io { payload, .. } => payload,
        }
    }

    /// Take back the undelivered envelope for a retry
    #[must_use]
    pub fn into_payload(self) -> Vec<u8> {
        match self {
            Self::ChannelClosed { payload, .. } | Self::Io { payload, .. } => payload,
        }
    }
}
