//! Error taxonomy and logging
//!
//! Provides:
//! - `ErrorKind`, the classification every crate maps its errors into
//! - `InputError` for malformed caller input at decoding boundaries
//! - `LoggingTransformer`, the `env_logger` setup used by binaries and tests

pub mod logging;
pub mod types;

pub use logging::LoggingTransformer;
pub use types::{ErrorKind, InputError, Result};
