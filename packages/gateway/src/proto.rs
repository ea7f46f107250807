//! Wire schema of the gateway uplink envelope
//!
//! Field numbers follow the ChirpStack v4 `gw.UplinkFrame` message so a
//! network server's gateway bridge can decode the envelope unchanged. Only
//! the fields this simulator populates are declared; unknown fields in
//! decoded input are skipped.

/// Uplink as relayed by a gateway
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UplinkFrame {
    /// Raw PHYPayload
    #[prost(bytes = "vec", tag = "1")]
    pub phy_payload: Vec<u8>,
    /// How the device transmitted
    #[prost(message, optional, tag = "4")]
    pub tx_info: Option<UplinkTxInfo>,
    /// How the gateway received
    #[prost(message, optional, tag = "5")]
    pub rx_info: Option<UplinkRxInfo>,
}

/// Transmission descriptor
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UplinkTxInfo {
    /// Frequency in Hz
    #[prost(uint32, tag = "1")]
    pub frequency: u32,
    /// Modulation parameters
    #[prost(message, optional, tag = "2")]
    pub modulation: Option<Modulation>,
}

/// Modulation wrapper
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Modulation {
    /// Modulation-specific parameters
    #[prost(oneof = "modulation::Parameters", tags = "3")]
    pub parameters: Option<modulation::Parameters>,
}

/// Nested types of [`Modulation`]
pub mod modulation {
    /// Modulation-specific parameters
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Parameters {
        /// LoRa modulation
        #[prost(message, tag = "3")]
        Lora(super::LoraModulationInfo),
    }
}

/// LoRa modulation parameters
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct LoraModulationInfo {
    /// Bandwidth in Hz
    #[prost(uint32, tag = "1")]
    pub bandwidth: u32,
    /// Spreading factor
    #[prost(uint32, tag = "2")]
    pub spreading_factor: u32,
    /// Forward error correction rate
    #[prost(enumeration = "CodeRate", tag = "5")]
    pub code_rate: i32,
}

/// LoRa coding rate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum CodeRate {
    /// Not set
    CrUndefined = 0,
    /// 4/5
    Cr45 = 1,
    /// 4/6
    Cr46 = 2,
    /// 4/7
    Cr47 = 3,
    /// 4/8
    Cr48 = 4,
}

/// Reception descriptor
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct UplinkRxInfo {
    /// Gateway EUI as 16 lowercase hex digits
    #[prost(string, tag = "1")]
    pub gateway_id: String,
    /// Gateway time of reception
    #[prost(message, optional, tag = "3")]
    pub gw_time: Option<::prost_types::Timestamp>,
    /// Signal strength in dBm
    #[prost(int32, tag = "7")]
    pub rssi: i32,
    /// Signal to noise ratio in dB
    #[prost(float, tag = "8")]
    pub snr: f32,
    /// Opaque gateway context, echoed back on downlink
    #[prost(bytes = "vec", tag = "14")]
    pub context: Vec<u8>,
    /// Physical-layer CRC check
    #[prost(enumeration = "CrcStatus", tag = "16")]
    pub crc_status: i32,
}

/// Physical-layer CRC check result
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
#[repr(i32)]
pub enum CrcStatus {
    /// No CRC present or not checked
    NoCrc = 0,
    /// CRC mismatch
    BadCrc = 1,
    /// CRC verified
    CrcOk = 2,
}
