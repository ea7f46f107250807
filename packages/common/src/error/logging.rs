//! Structured logging infrastructure
//!
//! Provides env_logger-based logging with secure handling of key material
//! and proper integration with the standard log crate.

use log::{debug, info, warn};
use sha2::{Digest, Sha256};
use std::sync::Once;

static INIT_LOGGER: Once = Once::new();

/// Logging setup and pipeline event helpers
pub struct LoggingTransformer;

impl LoggingTransformer {
    /// Initialize logging system (should be called once at application startup)
    ///
    /// Configure logging levels via `RUST_LOG`:
    /// - `RUST_LOG=debug` - every pipeline stage
    /// - `RUST_LOG=info` - one line per simulated uplink
    /// - `RUST_LOG=lorasim_gateway=debug` - module-specific levels
    pub fn init() {
        INIT_LOGGER.call_once(|| {
            env_logger::Builder::from_default_env()
                .format_timestamp_micros()
                .init();

            debug!("Structured logging initialized");
        });
    }

    /// Initialize logging for test environments
    ///
    /// Use this in test modules to avoid initialization conflicts
    pub fn init_test() {
        let _ = env_logger::Builder::from_default_env()
            .is_test(true)
            .try_init();
    }

    /// Fingerprint of secret material, safe to put in logs
    ///
    /// First 12 hex characters of the SHA-256 digest, prefixed with `#`.
    #[must_use]
    pub fn fingerprint(secret: &[u8]) -> String {
        let hash = Sha256::digest(secret);
        let hex_hash = hex::encode(hash);
        format!("#{}", &hex_hash[..12])
    }

    /// Log a session being provisioned, identifying keys only by fingerprint
    pub fn log_session_provisioned(dev_addr: &str, app_key: &[u8], nwk_key: &[u8]) {
        info!(
            "ABP session for {dev_addr} (app_s_key: {}, nwk_s_key: {})",
            Self::fingerprint(app_key),
            Self::fingerprint(nwk_key)
        );
    }

    /// Log a completed PHYPayload
    pub fn log_frame_built(dev_addr: &str, f_cnt: u32, frame_len: usize) {
        debug!("Frame built: dev_addr={dev_addr} f_cnt={f_cnt} len={frame_len}");
    }

    /// Log a serialized gateway envelope
    pub fn log_envelope_encoded(gateway_id: &str, envelope_len: usize) {
        debug!("Envelope encoded: gateway_id={gateway_id} len={envelope_len}");
    }

    /// Log the outcome of a publish attempt
    pub fn log_publish(topic: &str, payload_len: usize, error: Option<&dyn std::error::Error>) {
        match error {
            None => info!("Published {payload_len} bytes to {topic}"),
            Some(e) => warn!("Publish to {topic} failed ({payload_len} bytes kept): {e}"),
        }
    }

    /// Log a rejected input without echoing its value
    pub fn log_rejected_input(field: &str, error: &dyn std::error::Error) {
        warn!("Rejected input for {field}: {error}");
    }
}
