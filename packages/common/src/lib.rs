//! Common infrastructure shared by the lorasim crates
//!
//! This crate provides:
//! - Strict hex decoding for every caller-supplied byte string
//! - Lossless output representations (raw bytes, lowercase hex, base64)
//! - The error taxonomy every other crate classifies into
//! - Structured logging setup with key-safe fingerprints

#![forbid(unsafe_code)]

pub mod encoding;
pub mod error;

pub use encoding::{Encoded, decode_hex, decode_hex_array};
pub use error::{ErrorKind, InputError, LoggingTransformer, Result};
