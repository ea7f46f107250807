//! Gateway uplink envelope
//!
//! Wraps a PHYPayload with the radio descriptors into a `gw.UplinkFrame`
//! protobuf. The reception time is taken from the encoder's clock at encode
//! time, never from the caller.

use crate::proto::{
    CrcStatus, LoraModulationInfo, Modulation, UplinkFrame, UplinkRxInfo, UplinkTxInfo,
    modulation,
};
use crate::{RadioRxMetadata, RadioTxContext, Result, SystemClock, TimeSource};
use chrono::{DateTime, Utc};
use lorasim_common::{Encoded, LoggingTransformer};
use prost::Message;

/// One relayed uplink, immutable once composed
#[derive(Clone, Debug, PartialEq)]
pub struct GatewayUplinkEnvelope {
    phy_payload: Vec<u8>,
    tx: RadioTxContext,
    rx: RadioRxMetadata,
    received_at: DateTime<Utc>,
}

impl GatewayUplinkEnvelope {
    /// Raw PHYPayload
    #[must_use]
    pub fn phy_payload(&self) -> &[u8] {
        &self.phy_payload
    }

    /// Transmission descriptor
    #[must_use]
    pub const fn tx(&self) -> &RadioTxContext {
        &self.tx
    }

    /// Reception descriptor
    #[must_use]
    pub const fn rx(&self) -> &RadioRxMetadata {
        &self.rx
    }

    /// Reception timestamp stamped by the encoder
    #[must_use]
    pub const fn received_at(&self) -> DateTime<Utc> {
        self.received_at
    }

    /// Protobuf message for this envelope
    #[must_use]
    pub fn to_uplink_frame(&self) -> UplinkFrame {
        let lora = LoraModulationInfo {
            bandwidth: self.tx.bandwidth_hz(),
            spreading_factor: u32::from(self.tx.spreading_factor()),
            code_rate: self.tx.code_rate() as i32,
        };

        UplinkFrame {
            phy_payload: self.phy_payload.clone(),
            tx_info: Some(UplinkTxInfo {
                frequency: self.tx.frequency_hz(),
                modulation: Some(Modulation {
                    parameters: Some(modulation::Parameters::Lora(lora)),
                }),
            }),
            rx_info: Some(UplinkRxInfo {
                gateway_id: self.rx.gateway_id().to_string(),
                gw_time: Some(prost_types::Timestamp {
                    seconds: self.received_at.timestamp(),
                    // Always below 2e9, leap seconds included
                    nanos: self.received_at.timestamp_subsec_nanos() as i32,
                }),
                rssi: self.rx.rssi_dbm(),
                snr: self.rx.snr_db(),
                context: self.rx.context().to_vec(),
                crc_status: CrcStatus::from(self.rx.crc()) as i32,
            }),
        }
    }

    /// Serialized envelope with hex and base64 views
    #[must_use]
    pub fn encode(&self) -> Encoded {
        Encoded::new(self.to_uplink_frame().encode_to_vec())
    }
}

/// Envelope encoder stamping reception time from `C`
#[derive(Clone, Debug, Default)]
pub struct GatewayEnvelopeEncoder<C: TimeSource = SystemClock> {
    clock: C,
}

impl<C: TimeSource> GatewayEnvelopeEncoder<C> {
    /// Encoder reading time from `clock`
    #[must_use]
    pub const fn new(clock: C) -> Self {
        Self { clock }
    }

    /// Compose the envelope, stamping the current time
    #[must_use]
    pub fn compose(
        &self,
        phy_payload: &[u8],
        tx: &RadioTxContext,
        rx: &RadioRxMetadata,
    ) -> GatewayUplinkEnvelope {
        let received_at = self.clock.now();
        log::debug!("Gateway {} received {} bytes at {received_at}", rx.gateway_id(), phy_payload.len());
        GatewayUplinkEnvelope {
            phy_payload: phy_payload.to_vec(),
            tx: *tx,
            rx: rx.clone(),
            received_at,
        }
    }

    /// Compose and serialize in one step
    #[must_use]
    pub fn encode(&self, phy_payload: &[u8], tx: &RadioTxContext, rx: &RadioRxMetadata) -> Encoded {
        let encoded = self.compose(phy_payload, tx, rx).encode();
        LoggingTransformer::log_envelope_encoded(&rx.gateway_id().to_string(), encoded.len());
        encoded
    }
}

/// Parse serialized envelope bytes back into the protobuf message
///
/// # Errors
///
/// Returns `GatewayError::Decode` for bytes that are not a valid `UplinkFrame`.
pub fn decode_uplink_frame(bytes: &[u8]) -> Result<UplinkFrame> {
    Ok(UplinkFrame::decode(bytes)?)
}
