//! Simulator configuration file
//!
//! ```json
//! {
//!   "gateway": { "id": "0102030405060708", "ip_addr": "127.0.0.1" },
//!   "dev": {
//!     "addr": "26011BDA",
//!     "app_s_key": "2B7E151628AED2A6ABF7158809CF4F3C",
//!     "nwk_s_key": "000102030405060708090A0B0C0D0E0F",
//!     "tx_freq": 868100000, "tx_bw": 125000, "tx_sf": 7
//!   },
//!   "mqtt": {
//!     "host": "localhost", "port": 1883, "username": "", "password": "",
//!     "topic_up": "eu868/gateway/0102030405060708/event/up"
//!   }
//! }
//! ```
//!
//! `radio` and `uplink` sections are optional and default to the reference
//! device: RSSI -52 dBm, SNR 13.75 dB, context `01020304`, CRC OK, payload
//! `01020304` on port 1 with counter 1, unconfirmed, ADR on.

use crate::{LorasimError, Result};
use lorasim_cipher::{DevAddr, SessionKeys};
use lorasim_common::decode_hex;
use lorasim_frame::FrameError;
use lorasim_gateway::{GatewayId, RadioRxMetadata, RadioTxContext, ReceptionCrc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Complete configuration file
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimulatorConfig {
    /// Relaying gateway
    pub gateway: GatewayConfig,
    /// Simulated device
    pub dev: DeviceConfig,
    /// Transport endpoint
    pub mqtt: MqttConfig,
    /// Reception conditions
    #[serde(default)]
    pub radio: RadioConfig,
    /// Uplink content
    #[serde(default)]
    pub uplink: UplinkConfig,
}

/// `gateway` section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway EUI, 16 hex digits
    pub id: String,
    /// Gateway address, informational
    #[serde(default)]
    pub ip_addr: String,
}

/// `dev` section
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeviceConfig {
    /// Device address, 8 hex digits
    pub addr: String,
    /// Application session key, 32 hex digits
    pub app_s_key: String,
    /// Network session key, 32 hex digits
    pub nwk_s_key: String,
    /// Transmit frequency in Hz
    pub tx_freq: u32,
    /// Transmit bandwidth in Hz
    pub tx_bw: u32,
    /// Spreading factor
    pub tx_sf: u8,
}

/// `mqtt` section, consumed by the external transport
#[derive(Clone, Serialize, Deserialize)]
pub struct MqttConfig {
    /// Broker host
    pub host: String,
    /// Broker port
    pub port: u16,
    /// Username, empty for anonymous
    #[serde(default)]
    pub username: String,
    /// Password, empty for anonymous
    #[serde(default)]
    pub password: String,
    /// Uplink topic
    pub topic_up: String,
}

impl fmt::Debug for MqttConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MqttConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("topic_up", &self.topic_up)
            .finish()
    }
}

/// Optional `radio` section
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RadioConfig {
    /// Signal strength in dBm
    pub rssi: i32,
    /// Signal to noise ratio in dB
    pub snr: f32,
    /// Opaque gateway context as hex
    pub context: String,
    /// `OK`, `FAIL` or `UNKNOWN`
    pub crc_status: String,
}

impl Default for RadioConfig {
    fn default() -> Self {
        Self {
            rssi: RadioRxMetadata::DEFAULT_RSSI_DBM,
            snr: RadioRxMetadata::DEFAULT_SNR_DB,
            context: "01020304".to_string(),
            crc_status: "OK".to_string(),
        }
    }
}

/// Optional `uplink` section
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct UplinkConfig {
    /// Cleartext payload as hex
    pub payload: String,
    /// Application port
    pub f_port: u8,
    /// First frame counter to issue
    pub f_cnt: u32,
    /// Send confirmed data up
    pub confirmed: bool,
    /// Adaptive data rate flag
    pub adr: bool,
}

impl Default for UplinkConfig {
    fn default() -> Self {
        Self {
            payload: "01020304".to_string(),
            f_port: 1,
            f_cnt: 1,
            confirmed: false,
            adr: true,
        }
    }
}

/// Configuration with every string decoded into its typed value
#[derive(Debug)]
pub struct ValidatedConfig {
    /// Device address
    pub dev_addr: DevAddr,
    /// Session keys
    pub keys: SessionKeys,
    /// Transmission descriptor
    pub tx: RadioTxContext,
    /// Reception descriptor
    pub rx: RadioRxMetadata,
    /// Uplink topic
    pub topic: String,
    /// Cleartext payload
    pub payload: Vec<u8>,
    /// Application port
    pub f_port: u8,
    /// First frame counter
    pub f_cnt: u32,
    /// Confirmed data up
    pub confirmed: bool,
    /// ADR flag
    pub adr: bool,
}

impl SimulatorConfig {
    /// Read and parse a configuration file
    ///
    /// # Errors
    ///
    /// Returns `LorasimError::ConfigRead` if the file cannot be read and
    /// `LorasimError::ConfigParse` if it does not match the schema.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| LorasimError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_json(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse configuration from JSON text
    ///
    /// # Errors
    ///
    /// Returns `LorasimError::ConfigParse` for invalid JSON or missing fields.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Decode every hex string and range-check radio parameters
    ///
    /// # Errors
    ///
    /// Returns the first malformed or out-of-range value found; no partially
    /// validated configuration is produced.
    pub fn validate(&self) -> Result<ValidatedConfig> {
        let dev_addr = DevAddr::from_hex(&self.dev.addr)?;
        let keys = SessionKeys::from_hex(&self.dev.app_s_key, &self.dev.nwk_s_key)?;
        let tx = RadioTxContext::lora(self.dev.tx_freq, self.dev.tx_bw, self.dev.tx_sf)?;
        let rx = RadioRxMetadata::new(GatewayId::from_hex(&self.gateway.id)?)
            .with_rssi(self.radio.rssi)
            .with_snr(self.radio.snr)
            .with_context_hex(&self.radio.context)?
            .with_crc(self.radio.crc_status.parse::<ReceptionCrc>()?);
        let payload = decode_hex("uplink.payload", &self.uplink.payload)?;
        if self.uplink.f_port == 0 {
            return Err(FrameError::ReservedPort(0).into());
        }

        Ok(ValidatedConfig {
            dev_addr,
            keys,
            tx,
            rx,
            topic: self.mqtt.topic_up.clone(),
            payload,
            f_port: self.uplink.f_port,
            f_cnt: self.uplink.f_cnt,
            confirmed: self.uplink.confirmed,
            adr: self.uplink.adr,
        })
    }
}
