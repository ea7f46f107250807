//! Radio transmission and reception descriptors

use crate::proto::{CodeRate, CrcStatus};
use crate::{GatewayError, Result};
use lorasim_common::{decode_hex, decode_hex_array};
use std::fmt;
use std::str::FromStr;

/// Spreading factors a LoRa transmission can use
const SPREADING_FACTORS: std::ops::RangeInclusive<u8> = 5..=12;

/// 64-bit gateway EUI
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GatewayId([u8; 8]);

impl GatewayId {
    /// Wrap raw EUI bytes
    #[must_use]
    pub const fn new(bytes: [u8; 8]) -> Self {
        Self(bytes)
    }

    /// Parse exactly 16 hex digits
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Input` for malformed hex or a length other than 8 bytes.
    pub fn from_hex(input: &str) -> Result<Self> {
        Ok(Self(decode_hex_array("gateway_id", input)?))
    }

    /// EUI bytes
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; 8] {
        &self.0
    }
}

impl fmt::Display for GatewayId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for byte in self.0 {
            write!(f, "{byte:02x}")?;
        }
        Ok(())
    }
}

/// How the simulated device transmitted
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RadioTxContext {
    frequency_hz: u32,
    bandwidth_hz: u32,
    spreading_factor: u8,
}

impl RadioTxContext {
    /// LoRa transmission at coding rate 4/5
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::InvalidRadioParameter` for a zero frequency or
    /// bandwidth, or a spreading factor outside 5..=12.
    pub fn lora(frequency_hz: u32, bandwidth_hz: u32, spreading_factor: u8) -> Result<Self> {
        if frequency_hz == 0 {
            return Err(GatewayError::InvalidRadioParameter {
                field: "frequency",
                value: 0,
                expected: "a non-zero frequency in Hz",
            });
        }
        if bandwidth_hz == 0 {
            return Err(GatewayError::InvalidRadioParameter {
                field: "bandwidth",
                value: 0,
                expected: "a non-zero bandwidth in Hz",
            });
        }
        if !SPREADING_FACTORS.contains(&spreading_factor) {
            return Err(GatewayError::InvalidRadioParameter {
                field: "spreading_factor",
                value: u32::from(spreading_factor),
                expected: "5..=12",
            });
        }
        Ok(Self {
            frequency_hz,
            bandwidth_hz,
            spreading_factor,
        })
    }

    /// Frequency in Hz
    #[must_use]
    pub const fn frequency_hz(&self) -> u32 {
        self.frequency_hz
    }

    /// Bandwidth in Hz
    #[must_use]
    pub const fn bandwidth_hz(&self) -> u32 {
        self.bandwidth_hz
    }

    /// Spreading factor
    #[must_use]
    pub const fn spreading_factor(&self) -> u8 {
        self.spreading_factor
    }

    /// Coding rate, fixed at 4/5
    #[must_use]
    pub const fn code_rate(&self) -> CodeRate {
        CodeRate::Cr45
    }
}

/// Outcome of the gateway's CRC check
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ReceptionCrc {
    /// CRC verified
    #[default]
    Ok,
    /// CRC mismatch
    Fail,
    /// Not checked
    Unknown,
}

impl From<ReceptionCrc> for CrcStatus {
    fn from(crc: ReceptionCrc) -> Self {
        match crc {
            ReceptionCrc::Ok => CrcStatus::CrcOk,
            ReceptionCrc::Fail => CrcStatus::BadCrc,
            ReceptionCrc::Unknown => CrcStatus::NoCrc,
        }
    }
}

impl From<CrcStatus> for ReceptionCrc {
    fn from(status: CrcStatus) -> Self {
        match status {
            CrcStatus::CrcOk => ReceptionCrc::Ok,
            CrcStatus::BadCrc => ReceptionCrc::Fail,
            CrcStatus::NoCrc => ReceptionCrc::Unknown,
        }
    }
}

impl FromStr for ReceptionCrc {
    type Err = GatewayError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "OK" => Ok(Self::Ok),
            "FAIL" => Ok(Self::Fail),
            "UNKNOWN" => Ok(Self::Unknown),
            _ => Err(GatewayError::UnknownCrcStatus(s.to_string())),
        }
    }
}

/// How the gateway received the frame
///
/// The reception timestamp is not part of this descriptor; the envelope
/// encoder stamps it from its clock.
#[derive(Clone, Debug, PartialEq)]
pub struct RadioRxMetadata {
    gateway_id: GatewayId,
    rssi_dbm: i32,
    snr_db: f32,
    context: Vec<u8>,
    crc: ReceptionCrc,
}

impl RadioRxMetadata {
    /// Default signal strength of the simulated link
    pub const DEFAULT_RSSI_DBM: i32 = -52;
    /// Default signal to noise ratio of the simulated link
    pub const DEFAULT_SNR_DB: f32 = 13.75;
    /// Default opaque context
    pub const DEFAULT_CONTEXT: [u8; 4] = [0x01, 0x02, 0x03, 0x04];

    /// Good-link reception by `gateway_id`
    #[must_use]
    pub fn new(gateway_id: GatewayId) -> Self {
        Self {
            gateway_id,
            rssi_dbm: Self::DEFAULT_RSSI_DBM,
            snr_db: Self::DEFAULT_SNR_DB,
            context: Self::DEFAULT_CONTEXT.to_vec(),
            crc: ReceptionCrc::Ok,
        }
    }

    /// Set signal strength
    #[must_use]
    pub fn with_rssi(mut self, rssi_dbm: i32) -> Self {
        self.rssi_dbm = rssi_dbm;
        self
    }

    /// Set signal to noise ratio
    #[must_use]
    pub fn with_snr(mut self, snr_db: f32) -> Self {
        self.snr_db = snr_db;
        self
    }

    /// Set the opaque context bytes
    #[must_use]
    pub fn with_context(mut self, context: Vec<u8>) -> Self {
        self.context = context;
        self
    }

    /// Set the opaque context from hex
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Input` for odd-length or non-hex input.
    pub fn with_context_hex(self, context: &str) -> Result<Self> {
        Ok(self.with_context(decode_hex("context", context)?))
    }

    /// Set the CRC outcome
    #[must_use]
    pub fn with_crc(mut self, crc: ReceptionCrc) -> Self {
        self.crc = crc;
        self
    }

    /// Gateway EUI
    #[must_use]
    pub const fn gateway_id(&self) -> GatewayId {
        self.gateway_id
    }

    /// Signal strength in dBm
    #[must_use]
    pub const fn rssi_dbm(&self) -> i32 {
        self.rssi_dbm
    }

    /// Signal to noise ratio in dB
    #[must_use]
    pub const fn snr_db(&self) -> f32 {
        self.snr_db
    }

    /// Opaque context bytes
    #[must_use]
    pub fn context(&self) -> &[u8] {
        &self.context
    }

    /// CRC outcome
    #[must_use]
    pub const fn crc(&self) -> ReceptionCrc {
        self.crc
    }
}
