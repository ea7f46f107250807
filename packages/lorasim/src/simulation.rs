//! One end-to-end uplink: counter, cipher, MIC, PHYPayload, envelope, publish

use crate::{Result, SimulatorConfig};
use lorasim_common::Encoded;
use lorasim_frame::{AbpSession, FrameError, Uplink, UplinkBuilder};
use lorasim_gateway::{
    GatewayEnvelopeEncoder, Publisher, RadioRxMetadata, RadioTxContext, TimeSource,
};

/// Outcome of one simulated uplink
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SimulationReport {
    /// Counter carried by the frame
    pub f_cnt: u32,
    /// PHYPayload as transmitted
    pub phy_payload: Encoded,
    /// Serialized gateway envelope as published
    pub envelope: Encoded,
    /// Destination topic
    pub topic: String,
}

/// Device session plus the gateway that relays it
#[derive(Debug)]
pub struct Simulation {
    session: AbpSession,
    uplink: UplinkBuilder,
    tx: RadioTxContext,
    rx: RadioRxMetadata,
    topic: String,
}

impl Simulation {
    /// Provision the session and radio descriptors from a configuration
    ///
    /// # Errors
    ///
    /// Any validation error from [`SimulatorConfig::validate`].
    pub fn from_config(config: &SimulatorConfig) -> Result<Self> {
        let config = config.validate()?;
        let uplink = if config.confirmed {
            Uplink::confirmed()
        } else {
            Uplink::unconfirmed()
        }
        .port(config.f_port)
        .adr(config.adr)
        .payload(config.payload);

        Ok(Self {
            session: AbpSession::new(config.dev_addr, config.keys).starting_at(config.f_cnt),
            uplink,
            tx: config.tx,
            rx: config.rx,
            topic: config.topic,
        })
    }

    /// Destination topic
    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Device session
    #[must_use]
    pub fn session(&self) -> &AbpSession {
        &self.session
    }

    /// Build the next uplink and publish its envelope
    ///
    /// Each call consumes one frame counter. A failed publish still consumes
    /// it; the error carries the serialized envelope for replay.
    ///
    /// # Errors
    ///
    /// Returns `LorasimError::Frame` for construction failures (including an
    /// exhausted counter) and `LorasimError::Publish` for delivery failures.
    pub async fn run<P, C>(&mut self, publisher: &P, clock: C) -> Result<SimulationReport>
    where
        P: Publisher,
        C: TimeSource,
    {
        let f_cnt = self
            .session
            .next_f_cnt_up()
            .ok_or(FrameError::CounterExhausted)?;
        let phy_payload = self.uplink.clone().build(&mut self.session)?.to_encoded();

        let envelope = GatewayEnvelopeEncoder::new(clock).encode(phy_payload.as_bytes(), &self.tx, &self.rx);
        publisher
            .publish(&self.topic, envelope.as_bytes().to_vec())
            .await?;

        log::info!(
            "Uplink f_cnt={f_cnt} from {} published to {}",
            self.session.dev_addr(),
            self.topic
        );
        Ok(SimulationReport {
            f_cnt,
            phy_payload,
            envelope,
            topic: self.topic.clone(),
        })
    }
}
