//! Top-level error for configuration, simulation and CLI

use lorasim_cipher::CipherError;
use lorasim_common::{ErrorKind, InputError};
use lorasim_frame::FrameError;
use lorasim_gateway::{GatewayError, PublishError};
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the simulator
#[derive(Debug, Error)]
pub enum LorasimError {
    /// Caller-supplied value failed to decode
    #[error(transparent)]
    Input(#[from] InputError),

    /// Key or cipher precondition failed
    #[error(transparent)]
    Cipher(#[from] CipherError),

    /// Frame could not be built
    #[error(transparent)]
    Frame(#[from] FrameError),

    /// Envelope could not be built
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Envelope was built but not delivered
    #[error(transparent)]
    Publish(#[from] PublishError),

    /// Configuration file could not be read
    #[error("Cannot read config {}: {source}", path.display())]
    ConfigRead {
        /// Config file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration file is not valid JSON for the simulator schema
    #[error("Cannot parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

impl LorasimError {
    /// Classify into the pipeline error taxonomy
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Input(e) => e.kind(),
            Self::Cipher(e) => e.kind(),
            Self::Frame(e) => e.kind(),
            Self::Gateway(e) => e.kind(),
            Self::Publish(e) => e.kind(),
            Self::ConfigRead { .. } | Self::ConfigParse(_) => ErrorKind::Configuration,
        }
    }
}

/// Result type for simulator operations
pub type Result<T> = std::result::Result<T, LorasimError>;
