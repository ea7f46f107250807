//! # Lorasim
//!
//! Simulates one LoRaWAN Class A end device activated by personalization and
//! the gateway that relays its uplinks:
//!
//! ```text
//! payload + keys + counter -> keystream -> MACPayload -> MIC -> PHYPayload
//!     -> gw.UplinkFrame envelope -> Publisher
//! ```
//!
//! The building blocks are re-exported from the member crates:
//!
//! - [`cipher`]: session keys, keystream cipher, MIC
//! - [`frame`]: MAC and PHY frame encoding, ABP session, uplink builder
//! - [`gateway`]: envelope encoding, time source, publisher seam
//!
//! ```rust,no_run
//! use lorasim::{SimulatorConfig, Simulation};
//! use lorasim::gateway::{ChannelPublisher, SystemClock};
//!
//! # async fn example() -> lorasim::Result<()> {
//! let config = SimulatorConfig::load("conf.json").await?;
//! let mut simulation = Simulation::from_config(&config)?;
//! let (publisher, _receiver) = ChannelPublisher::new(1);
//! let report = simulation.run(&publisher, SystemClock).await?;
//! println!("{} -> {}", report.phy_payload, report.topic);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod cli;
pub mod config;
pub mod error;
pub mod simulation;

pub use lorasim_cipher as cipher;
pub use lorasim_common as common;
pub use lorasim_frame as frame;
pub use lorasim_gateway as gateway;

pub use config::{
    DeviceConfig, GatewayConfig, MqttConfig, RadioConfig, SimulatorConfig, UplinkConfig,
    ValidatedConfig,
};
pub use error::{LorasimError, Result};
pub use simulation::{Simulation, SimulationReport};
